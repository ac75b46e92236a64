//! SerpAPI (Google engine) search client

use crate::error::{Result, WatchError};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Text returned by the search tool when Google has nothing for a query
pub const NO_RESULTS_SENTINEL: &str = "Google hasn't returned any results for this query.";

/// Returned when SerpAPI answers without anything usable
pub const NO_GOOD_RESULT: &str = "No good search result found";

const SERPAPI_URL: &str = "https://serpapi.com/search";
const MAX_ORGANIC_RESULTS: usize = 5;

/// SerpAPI client pinned to Google, US region, English
pub struct SerpApiClient {
    client: Client,
    api_key: SecretString,
}

impl SerpApiClient {
    /// Create a new SerpAPI client
    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_key })
    }

    /// Run a Google search and summarise the results as text
    pub async fn search(&self, query: &str) -> Result<String> {
        info!(query, "SerpAPI search");

        let response = self
            .client
            .get(SERPAPI_URL)
            .query(&[
                ("q", query),
                ("api_key", self.api_key.expose_secret()),
                ("engine", "google"),
                ("gl", "us"),
                ("hl", "en"),
            ])
            .send()
            .await
            .map_err(|e| WatchError::ApiError(format!("SerpAPI request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await?;

        // Error responses still carry a JSON body with an `error` field
        let results: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(WatchError::ApiError(format!("SerpAPI error {status}: {body}")));
            }
            Err(e) => {
                return Err(WatchError::ApiError(format!(
                    "Failed to parse SerpAPI response: {e}"
                )));
            }
        };

        let summary = summarize(&results)?;
        debug!(query, summary_length = summary.len(), "SerpAPI search complete");
        Ok(summary)
    }
}

/// Reduce a SerpAPI response to the most useful text it contains
///
/// An answer box wins over sports results, which win over the knowledge
/// graph; organic results are the fallback.
pub fn summarize(results: &Value) -> Result<String> {
    if let Some(error) = results.get("error").and_then(Value::as_str) {
        if error.contains("hasn't returned any results") {
            return Ok(NO_RESULTS_SENTINEL.to_string());
        }
        return Err(WatchError::ApiError(format!("Got error from SerpAPI: {error}")));
    }

    if let Some(answer_box) = results.get("answer_box") {
        let answer = non_empty_str(answer_box.get("answer"))
            .or_else(|| non_empty_str(answer_box.get("snippet")))
            .or_else(|| {
                non_empty_str(
                    answer_box
                        .get("snippet_highlighted_words")
                        .and_then(|words| words.get(0)),
                )
            });
        if let Some(answer) = answer {
            return Ok(answer.to_string());
        }
    }

    if let Some(spotlight) = results
        .get("sports_results")
        .and_then(|sports| sports.get("game_spotlight"))
    {
        return Ok(match spotlight {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        });
    }

    if let Some(description) = non_empty_str(
        results
            .get("knowledge_graph")
            .and_then(|graph| graph.get("description")),
    ) {
        return Ok(description.to_string());
    }

    let organic: Vec<String> = results
        .get("organic_results")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(render_organic)
                .take(MAX_ORGANIC_RESULTS)
                .collect()
        })
        .unwrap_or_default();

    if organic.is_empty() {
        Ok(NO_GOOD_RESULT.to_string())
    } else {
        Ok(organic.join("\n"))
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// `title: snippet (link)`; entries without a snippet are skipped
fn render_organic(entry: &Value) -> Option<String> {
    let snippet = non_empty_str(entry.get("snippet"))?;
    let title = non_empty_str(entry.get("title")).unwrap_or("Untitled");
    Some(match non_empty_str(entry.get("link")) {
        Some(link) => format!("{title}: {snippet} ({link})"),
        None => format!("{title}: {snippet}"),
    })
}
