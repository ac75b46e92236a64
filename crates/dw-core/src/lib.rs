//! Core abstractions for DisasterWatch
//!
//! This crate defines the agent seam the request pipeline talks to, together
//! with the error type shared by the agent, tool and runtime crates.

pub mod agent;
pub mod error;

pub use agent::{Agent, AgentOutcome, Observation};
pub use error::{Error, Result};
