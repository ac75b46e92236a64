//! Core Agent trait definition

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Output of a single tool invocation observed during an agent run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Name of the tool that produced the output
    pub tool: String,
    /// Tool output as the model saw it
    pub output: String,
}

impl Observation {
    /// Create a new observation
    pub fn new(tool: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            output: output.into(),
        }
    }
}

/// Result of running an agent to completion
///
/// Besides the final answer, the outcome keeps every tool observation so
/// callers can inspect what the tools reported without re-running the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentOutcome {
    /// Final text produced by the model
    pub answer: String,
    /// Tool outputs in the order they were produced
    pub observations: Vec<Observation>,
}

impl AgentOutcome {
    /// Outcome with an answer and no tool activity
    pub fn answer(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            observations: Vec::new(),
        }
    }

    /// Add an observation
    pub fn with_observation(mut self, observation: Observation) -> Self {
        self.observations.push(observation);
        self
    }

    /// Whether the answer or any observation contains `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        self.answer.contains(needle) || self.observations.iter().any(|o| o.output.contains(needle))
    }
}

/// Core trait that all agents must implement
///
/// The agent is opaque to its callers: it may consult any number of tools
/// before answering, and no guarantee is made about the format of the answer.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Run the agent on a prompt until it produces a final answer
    async fn run(&self, prompt: String) -> Result<AgentOutcome>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoAgent;

    #[async_trait]
    impl Agent for EchoAgent {
        async fn run(&self, prompt: String) -> Result<AgentOutcome> {
            Ok(AgentOutcome::answer(prompt))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[test]
    fn test_mentions_answer() {
        let outcome = AgentOutcome::answer("Kochi, Munnar");
        assert!(outcome.mentions("Munnar"));
        assert!(!outcome.mentions("Chennai"));
    }

    #[test]
    fn test_mentions_observation() {
        let outcome = AgentOutcome::answer("I could not find anything.")
            .with_observation(Observation::new("search_tool", "no hits for this query"));
        assert!(outcome.mentions("no hits"));
        assert_eq!(outcome.observations[0].tool, "search_tool");
    }

    #[tokio::test]
    async fn test_agent_trait_object() {
        let agent: Box<dyn Agent> = Box::new(EchoAgent);
        let outcome = agent.run("hello".to_string()).await.unwrap();
        assert_eq!(outcome.answer, "hello");
        assert_eq!(agent.name(), "echo");
    }
}
