//! Tools the DisasterWatch agent may call

pub mod search;

pub use search::{SEARCH_TOOL_NAME, SearchTool};
