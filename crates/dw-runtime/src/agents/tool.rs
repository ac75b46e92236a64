//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use async_trait::async_trait;
use dw_core::{Agent, AgentOutcome, Result};

/// An agent that runs the LLM loop with tool execution
///
/// ToolAgent wraps the AgentExecutor to provide the Agent trait interface.
///
/// # Example
///
/// ```no_run
/// use dw_core::Agent;
/// use dw_runtime::{AgentExecutor, ToolAgent};
/// # use std::sync::Arc;
///
/// # async fn example(provider: Arc<dyn dw_llm::LLMProvider>) -> dw_core::Result<()> {
/// let executor = AgentExecutor::builder().provider(provider).build()?;
/// let agent = ToolAgent::new(executor, "disaster-researcher");
///
/// let outcome = agent.run("Which districts flooded in Kerala?".to_string()).await?;
/// println!("{}", outcome.answer);
/// # Ok(())
/// # }
/// ```
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    /// Create a new tool agent
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
        }
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn run(&self, prompt: String) -> Result<AgentOutcome> {
        self.executor.run(prompt).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
