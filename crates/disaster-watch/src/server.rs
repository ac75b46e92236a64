//! HTTP interface

use crate::error::{Result, WatchError};
use crate::pipeline::{DisasterPipeline, Investigation};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

const INDEX_HTML: &str = include_str!("../assets/index.html");

pub const LOOKUP_PATH: &str = "/getdisasterDataFromIdea";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<DisasterPipeline>,
}

/// Lookup request body
#[derive(Debug, Deserialize)]
pub struct IdeaRequest {
    pub idea: String,
}

/// Build the service router
pub fn router(pipeline: Arc<DisasterPipeline>) -> Router {
    Router::new()
        .route("/", get(index))
        .route(LOOKUP_PATH, post(disaster_data_from_idea))
        .with_state(AppState { pipeline })
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn disaster_data_from_idea(
    State(state): State<AppState>,
    payload: std::result::Result<Json<IdeaRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) =
        payload.map_err(|rejection| WatchError::InvalidRequest(rejection.body_text()))?;
    info!(idea = %request.idea, "Disaster lookup requested");

    match state.pipeline.investigate(&request.idea).await? {
        Investigation::NoResults => {
            Ok(Json(json!({ "error": "No results found" })).into_response())
        }
        // Respond with the persisted bytes so the file and the body never diverge
        Investigation::Found(saved) => {
            Ok(([(header::CONTENT_TYPE, "application/json")], saved.body).into_response())
        }
    }
}
