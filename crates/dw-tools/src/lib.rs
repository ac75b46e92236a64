//! Tool framework for DisasterWatch
//!
//! Tools are the capabilities an agent may invoke while reasoning, such as
//! web search. This crate defines the [`Tool`] trait and the registry the
//! runtime resolves tool calls against.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;
