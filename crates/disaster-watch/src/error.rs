//! Error types for disaster lookups

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Body returned for every failure that is not the caller's fault
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// DisasterWatch specific errors
#[derive(Debug, Error)]
pub enum WatchError {
    /// Request body rejected before any upstream call
    #[error("{0}")]
    InvalidRequest(String),

    /// Upstream API returned an error
    #[error("API error: {0}")]
    ApiError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Agent run failed
    #[error("Agent error: {0}")]
    AgentError(#[from] dw_core::Error),

    /// LLM provider could not be set up
    #[error("LLM error: {0}")]
    LlmError(#[from] dw_llm::LLMError),

    /// Prompt template failed to render
    #[error("Prompt error: {0}")]
    PromptError(#[from] minijinja::Error),

    /// Result file could not be written
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),
}

/// Result type alias for DisasterWatch operations
pub type Result<T> = std::result::Result<T, WatchError>;

/// Convert WatchError to dw_core::Error
impl From<WatchError> for dw_core::Error {
    fn from(err: WatchError) -> Self {
        dw_core::Error::ProcessingFailed(err.to_string())
    }
}

impl IntoResponse for WatchError {
    fn into_response(self) -> Response {
        match self {
            WatchError::InvalidRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            other => {
                error!(error = %other, "An error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": GENERIC_ERROR_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}
