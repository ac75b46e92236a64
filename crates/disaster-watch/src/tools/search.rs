//! Web search tool exposed to the agent

use async_trait::async_trait;
use dw_core::Result as AgentResult;
use dw_llm::tools::schema;
use dw_tools::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::api::SerpApiClient;

pub const SEARCH_TOOL_NAME: &str = "search_tool";

/// Tool that searches Google through SerpAPI
pub struct SearchTool {
    client: Arc<SerpApiClient>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

impl SearchTool {
    /// Create a new search tool
    pub fn new(client: Arc<SerpApiClient>) -> Self {
        Self { client }
    }
}

/// Accepts `{"query": "..."}` or a bare string
fn parse_query(params: Value) -> AgentResult<String> {
    let query = match params {
        Value::String(query) => query,
        other => {
            serde_json::from_value::<SearchParams>(other)
                .map_err(|e| {
                    dw_core::Error::tool(SEARCH_TOOL_NAME, format!("Invalid parameters: {e}"))
                })?
                .query
        }
    };

    if query.trim().is_empty() {
        return Err(dw_core::Error::tool(SEARCH_TOOL_NAME, "query must not be empty"));
    }
    Ok(query)
}

#[async_trait]
impl Tool for SearchTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let query = parse_query(params)?;

        self.client
            .search(&query)
            .await
            .map(Value::String)
            .map_err(|e| dw_core::Error::tool(SEARCH_TOOL_NAME, e.to_string()))
    }

    fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    fn description(&self) -> &str {
        "To search for relevant information about the disaster"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "query": schema::string("Search query to send to Google") }),
            &["query"],
        )
    }
}
