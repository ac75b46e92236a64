//! Parsing of the agent's news answers

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Commentary used when an answer cannot be parsed
pub const PARSE_ERROR_COMMENTARY: &str = "Error parsing response";

/// News about one location, as requested by the news prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsReport {
    #[serde(rename = "answer", alias = "commentary")]
    pub commentary: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
}

/// Why an agent answer was rejected
#[derive(Debug, Error)]
pub enum NewsParseError {
    #[error("no JSON object found in response")]
    NoJsonObject,

    #[error("response does not match the news schema: {0}")]
    Schema(#[from] serde_json::Error),
}

impl NewsReport {
    /// Parse an agent answer
    ///
    /// The JSON object may be wrapped in a markdown code fence or surrounded
    /// by prose; everything from the first `{` to the last `}` is parsed.
    pub fn parse(answer: &str) -> Result<Self, NewsParseError> {
        let object = extract_json_object(answer).ok_or(NewsParseError::NoJsonObject)?;
        Ok(serde_json::from_str(object)?)
    }

    /// Stand-in for an answer that failed to parse
    pub fn placeholder() -> Self {
        Self {
            commentary: PARSE_ERROR_COMMENTARY.to_string(),
            date: String::new(),
            source: String::new(),
        }
    }
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
