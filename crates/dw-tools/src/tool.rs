//! Tool trait definition

use async_trait::async_trait;
use dw_core::Result;
use dw_llm::ToolDefinition;
use serde_json::Value;

/// Trait for tools that agents can execute
///
/// Each tool provides a unique name, a description the model reads when
/// deciding whether to call it, and a JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with parameters matching [`Tool::input_schema`]
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name, unique within a [`crate::ToolRegistry`]
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;

    /// Definition advertised to the LLM
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }
}
