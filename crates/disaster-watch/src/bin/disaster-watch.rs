//! DisasterWatch HTTP server
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables (or put them in .env)
//! export OPEN_AI_KEY="sk-..."
//! export SERPAPI_API_KEY="..."
//!
//! # Run the server
//! cargo run --bin disaster-watch -- --bind 127.0.0.1:3000
//! ```

use clap::Parser;
use disaster_watch::WatchConfigBuilder;
use disaster_watch::app::build_pipeline;
use disaster_watch::server::router;
use dw_utils::{LogFormat, init_tracing};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const DEFAULT_LOG_FILTER: &str = "info,disaster_watch=info";

#[derive(Debug, Parser)]
#[command(name = "disaster-watch", version, about = "Disaster location and news lookup service")]
struct Cli {
    /// Address to listen on (overrides DISASTER_WATCH_BIND)
    #[arg(long)]
    bind: Option<String>,

    /// Directory for saved results (overrides DISASTER_WATCH_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Model used by the agent (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Log output format: pretty or json
    #[arg(long, env = "DISASTER_WATCH_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(DEFAULT_LOG_FILTER, cli.log_format)?;

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let mut builder = WatchConfigBuilder::from_env()?;
    if let Some(bind) = cli.bind {
        builder = builder.bind_addr(bind);
    }
    if let Some(dir) = cli.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(model) = cli.model {
        builder = builder.model(model);
    }
    let config = builder.build()?;

    let pipeline = Arc::new(build_pipeline(&config)?);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "DisasterWatch listening");

    axum::serve(listener, router(pipeline)).await?;
    Ok(())
}
