//! Error types for dw-core

use thiserror::Error;

/// Result type alias for dw-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Agent initialization failed
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),

    /// Agent processing failed
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),

    /// A tool rejected its input or its backend failed
    #[error("Tool '{tool}' failed: {message}")]
    ToolFailed {
        /// Name of the failing tool
        tool: String,
        /// Failure description
        message: String,
    },
}

impl Error {
    /// Build a [`Error::ToolFailed`] for the named tool
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_display() {
        let err = Error::tool("search_tool", "quota exhausted");
        assert_eq!(err.to_string(), "Tool 'search_tool' failed: quota exhausted");
    }
}
