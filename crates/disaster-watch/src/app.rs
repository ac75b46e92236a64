//! Wiring of the production services

use crate::api::{NominatimGeocoder, SerpApiClient};
use crate::config::WatchConfig;
use crate::error::Result;
use crate::pipeline::DisasterPipeline;
use crate::store::ResultStore;
use crate::tools::SearchTool;
use dw_llm::providers::{OpenAIConfig, OpenAIProvider};
use dw_runtime::{AgentExecutor, ToolAgent};
use dw_tools::ToolRegistry;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::info;

pub const AGENT_NAME: &str = "disaster-researcher";

/// Build the pipeline backed by OpenAI, SerpAPI and Nominatim
pub fn build_pipeline(config: &WatchConfig) -> Result<DisasterPipeline> {
    let provider = OpenAIProvider::with_config(
        OpenAIConfig::new(config.openai_api_key.expose_secret())
            .with_api_base(&config.openai_api_base)
            .with_timeout(config.http_timeout),
    )?;

    let search = SerpApiClient::new(
        SecretString::from(config.serpapi_api_key.expose_secret().to_owned()),
        config.http_timeout,
    )?;
    let registry = Arc::new(ToolRegistry::new());
    registry.register(Arc::new(SearchTool::new(Arc::new(search))));

    let executor = AgentExecutor::builder()
        .provider(Arc::new(provider))
        .tool_registry(registry)
        .model(&config.model)
        .temperature(config.temperature)
        .max_iterations(config.max_iterations)
        .build()?;
    let agent = ToolAgent::new(executor, AGENT_NAME);

    let geocoder = NominatimGeocoder::new(
        &config.nominatim_url,
        &config.geocoder_user_agent,
        config.geocoder_rate_per_sec,
        config.http_timeout,
    )?;

    info!(
        model = %config.model,
        api_base = %config.openai_api_base,
        nominatim = %config.nominatim_url,
        output_dir = %config.output_dir.display(),
        "Pipeline configured"
    );

    DisasterPipeline::new(
        Arc::new(agent),
        Arc::new(geocoder),
        ResultStore::new(&config.output_dir),
    )
}
