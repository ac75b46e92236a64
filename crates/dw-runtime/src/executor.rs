//! Agent executor for running agent loops
//!
//! The AgentExecutor implements the core agent loop pattern:
//! 1. Call LLM with conversation history and available tools
//! 2. Check stop reason
//! 3. If tool use requested, execute tools and loop back
//! 4. If completed, return final response

use dw_core::{AgentOutcome, Observation, Result};
use dw_llm::{CompletionRequest, ContentBlock, LLMProvider, Message, StopReason};
use dw_tools::ToolRegistry;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Answer returned when the loop runs out of iterations
pub const ITERATION_LIMIT_ANSWER: &str = "Agent stopped due to iteration limit.";

const SYSTEM_PROMPT: &str = "Answer the user's question as best you can. \
Use the available tools to look up current information before answering.";

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of LLM calls per run (prevents infinite loops)
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1024,
            temperature: Some(0.9),
        }
    }
}

/// Executes an agent loop: LLM → tool calls → execution → loop back
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    /// Create a new agent executor
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    /// Create a builder
    pub fn builder() -> AgentExecutorBuilder {
        AgentExecutorBuilder::new()
    }

    /// Get the executor configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute the agent loop for a single user prompt
    ///
    /// Returns the final answer together with every tool observation made
    /// along the way.
    pub async fn run(&self, user_message: String) -> Result<AgentOutcome> {
        let mut conversation = vec![Message::user(user_message)];
        let mut observations = Vec::new();
        let tools = self.tool_registry.definitions();

        for iteration in 1..=self.config.max_iterations {
            info!(
                iteration,
                max_iterations = self.config.max_iterations,
                tool_count = tools.len(),
                model = %self.config.model,
                "Agent iteration started"
            );

            let mut request = CompletionRequest::builder(&self.config.model)
                .messages(conversation.clone())
                .system(SYSTEM_PROMPT)
                .max_tokens(self.config.max_tokens)
                .tools(tools.clone());
            if let Some(temperature) = self.config.temperature {
                request = request.temperature(temperature);
            }

            let response = self
                .provider
                .complete(request.build())
                .await
                .map_err(|e| dw_core::Error::ProcessingFailed(e.to_string()))?;

            info!(
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "LLM response received"
            );

            let text = response.message.text().unwrap_or_default();
            let preview: String = text.chars().take(300).collect();
            debug!(response_preview = %preview, "LLM response content preview");

            // Some providers report a natural stop while still carrying tool calls
            let wants_tools =
                response.stop_reason == StopReason::ToolUse || response.message.has_tool_uses();

            if !wants_tools {
                if response.stop_reason == StopReason::MaxTokens {
                    warn!("Hit max tokens in LLM response, returning truncated answer");
                } else {
                    info!(iteration, response_length = text.len(), "Agent completed");
                }
                return Ok(AgentOutcome {
                    answer: text,
                    observations,
                });
            }

            let tool_results = self
                .execute_tools(&response.message, &mut observations)
                .await?;
            conversation.push(response.message);

            if tool_results.is_empty() {
                warn!("Tool use requested but no tool calls were present");
                return Ok(AgentOutcome {
                    answer: text,
                    observations,
                });
            }
            conversation.extend(tool_results);
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "Max iterations reached, stopping"
        );
        Ok(AgentOutcome {
            answer: ITERATION_LIMIT_ANSWER.to_string(),
            observations,
        })
    }

    /// Execute the tool calls of an assistant message
    ///
    /// A failing tool is reported back to the model as an error result; an
    /// unknown tool name aborts the run.
    async fn execute_tools(
        &self,
        message: &Message,
        observations: &mut Vec<Observation>,
    ) -> Result<Vec<Message>> {
        let mut results = Vec::new();

        for tool_use in message.tool_uses() {
            let ContentBlock::ToolUse { id, name, input } = tool_use else {
                continue;
            };

            let input_preview: String = input.to_string().chars().take(500).collect();
            info!(
                tool_name = %name,
                tool_id = %id,
                input_preview = %input_preview,
                "Executing tool"
            );

            let tool = self.tool_registry.get(name).ok_or_else(|| {
                dw_core::Error::ProcessingFailed(format!("Tool not found: {name}"))
            })?;

            let start = Instant::now();
            match tool.execute(input.clone()).await {
                Ok(result) => {
                    let output = render_output(result);
                    info!(
                        tool_name = %name,
                        duration_ms = start.elapsed().as_millis() as u64,
                        result_length = output.len(),
                        "Tool execution succeeded"
                    );
                    observations.push(Observation::new(name.as_str(), output.as_str()));
                    results.push(Message::tool_result(id.as_str(), output));
                }
                Err(e) => {
                    warn!(
                        tool_name = %name,
                        duration_ms = start.elapsed().as_millis() as u64,
                        error = %e,
                        "Tool execution failed"
                    );
                    let output = format!("Error: {e}");
                    observations.push(Observation::new(name.as_str(), output.as_str()));
                    results.push(Message::tool_error(id.as_str(), output));
                }
            }
        }

        Ok(results)
    }
}

/// Plain strings are passed through unquoted
fn render_output(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set maximum iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Build the executor
    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self
            .provider
            .ok_or_else(|| dw_core::Error::InitializationFailed("Provider not set".to_string()))?;

        Ok(AgentExecutor::new(provider, self.tool_registry, self.config))
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use dw_llm::{CompletionResponse, LLMError, TokenUsage};
    use dw_tools::Tool;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider that replays canned responses and records the requests
    pub(crate) struct ScriptedProvider {
        responses: Mutex<VecDeque<CompletionResponse>>,
        pub(crate) requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        pub(crate) fn new(responses: Vec<CompletionResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(&self, request: CompletionRequest) -> dw_llm::Result<CompletionResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| LLMError::RequestFailed("script exhausted".to_string()))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    pub(crate) fn answer(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    pub(crate) fn tool_call(id: &str, tool: &str, query: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant_blocks(vec![ContentBlock::ToolUse {
                id: id.to_string(),
                name: tool.to_string(),
                input: json!({ "query": query }),
            }]),
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        }
    }

    struct FakeSearch;

    #[async_trait]
    impl Tool for FakeSearch {
        async fn execute(&self, params: Value) -> Result<Value> {
            let query = params["query"].as_str().unwrap_or_default();
            if query == "fail" {
                return Err(dw_core::Error::tool("search_tool", "backend down"));
            }
            Ok(Value::String(format!("Flooding reported in {query}")))
        }

        fn name(&self) -> &str {
            "search_tool"
        }

        fn description(&self) -> &str {
            "To search for relevant information about the disaster"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {"query": {"type": "string"}}})
        }
    }

    fn executor(provider: Arc<ScriptedProvider>, max_iterations: usize) -> AgentExecutor {
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(FakeSearch));
        AgentExecutor::builder()
            .provider(provider)
            .tool_registry(registry)
            .max_iterations(max_iterations)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_direct_answer() {
        let provider = Arc::new(ScriptedProvider::new(vec![answer("Kochi, Munnar")]));
        let outcome = executor(provider.clone(), 5).run("Kerala floods".into()).await.unwrap();

        assert_eq!(outcome.answer, "Kochi, Munnar");
        assert!(outcome.observations.is_empty());

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].tools.as_ref().map(Vec::len), Some(1));
        assert_eq!(requests[0].temperature, Some(0.9));
    }

    #[tokio::test]
    async fn test_tool_round_trip_feeds_result_back() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            tool_call("call_1", "search_tool", "Wayanad"),
            answer("Wayanad"),
        ]));
        let outcome = executor(provider.clone(), 5).run("landslides".into()).await.unwrap();

        assert_eq!(outcome.answer, "Wayanad");
        assert_eq!(
            outcome.observations,
            vec![Observation::new("search_tool", "Flooding reported in Wayanad")]
        );

        let requests = provider.requests.lock().unwrap();
        let second = &requests[1].messages;
        assert_eq!(second.len(), 3);
        assert!(second[1].has_tool_uses());
        match &second[2].content {
            Some(dw_llm::MessageContent::Blocks(blocks)) => match &blocks[0] {
                ContentBlock::ToolResult {
                    tool_use_id,
                    content,
                    is_error,
                } => {
                    assert_eq!(tool_use_id, "call_1");
                    assert_eq!(content, "Flooding reported in Wayanad");
                    assert!(is_error.is_none());
                }
                other => panic!("Expected tool result, got {other:?}"),
            },
            other => panic!("Expected blocks, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tool_failure_is_reported_to_model() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            tool_call("call_1", "search_tool", "fail"),
            answer("No data"),
        ]));
        let outcome = executor(provider, 5).run("anything".into()).await.unwrap();

        assert_eq!(outcome.answer, "No data");
        assert!(outcome.observations[0].output.starts_with("Error: "));
        assert!(outcome.mentions("backend down"));
    }

    #[tokio::test]
    async fn test_unknown_tool_aborts() {
        let provider = Arc::new(ScriptedProvider::new(vec![tool_call("c", "weather", "x")]));
        let result = executor(provider, 5).run("anything".into()).await;
        assert!(matches!(
            result,
            Err(dw_core::Error::ProcessingFailed(msg)) if msg.contains("weather")
        ));
    }

    #[tokio::test]
    async fn test_iteration_limit() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            tool_call("c1", "search_tool", "a"),
            tool_call("c2", "search_tool", "b"),
            answer("never reached"),
        ]));
        let outcome = executor(provider.clone(), 2).run("loop".into()).await.unwrap();

        assert_eq!(outcome.answer, ITERATION_LIMIT_ANSWER);
        assert_eq!(outcome.observations.len(), 2);
        assert_eq!(provider.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let result = executor(provider, 3).run("anything".into()).await;
        assert!(matches!(result, Err(dw_core::Error::ProcessingFailed(_))));
    }

    #[test]
    fn test_builder_requires_provider() {
        assert!(AgentExecutorBuilder::new().build().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.max_iterations, 15);
        assert_eq!(config.model, "gpt-4o-mini");
    }
}
