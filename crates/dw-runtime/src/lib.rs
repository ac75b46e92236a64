//! Agent runtime for DisasterWatch
//!
//! Provides the [`AgentExecutor`] that drives an LLM through tool calls
//! until it answers, and [`ToolAgent`], which exposes an executor through
//! the [`dw_core::Agent`] trait.

pub mod agents;
pub mod executor;

pub use agents::ToolAgent;
pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutorConfig, ITERATION_LIMIT_ANSWER};
