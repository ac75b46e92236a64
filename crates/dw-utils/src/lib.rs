//! Shared utilities for DisasterWatch
//!
//! This crate provides common functionality used across the workspace,
//! currently the tracing subscriber setup.

pub mod logging;

pub use logging::{LogFormat, ParseLogFormatError, init_tracing};
