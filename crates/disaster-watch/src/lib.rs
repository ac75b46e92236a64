//! DisasterWatch: locate disasters and collect news about them
//!
//! Given a free-text disaster idea, an LLM agent with a Google search tool
//! lists the affected places, each place is geocoded through Nominatim, and
//! the agent is asked again for news about every place it could resolve.
//! The aggregated result is saved to disk and returned over HTTP.
//!
//! # Architecture
//!
//! - [`api`]: SerpAPI and Nominatim clients
//! - [`tools`]: the `search_tool` exposed to the agent
//! - [`pipeline`]: the lookup flow behind the HTTP endpoint
//! - [`server`]: axum router
//!
//! # Example
//!
//! ```rust,ignore
//! use disaster_watch::{WatchConfig, app::build_pipeline, server::router};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = WatchConfig::from_env()?;
//!     let pipeline = Arc::new(build_pipeline(&config)?);
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//!     axum::serve(listener, router(pipeline)).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod bundle;
pub mod config;
pub mod error;
pub mod locations;
pub mod news;
pub mod pipeline;
pub mod prompts;
pub mod server;
pub mod store;
pub mod tools;

// Re-export main types for convenience
pub use bundle::ResultBundle;
pub use config::{WatchConfig, WatchConfigBuilder};
pub use error::{Result, WatchError};
pub use news::NewsReport;
pub use pipeline::{DisasterPipeline, Investigation};
