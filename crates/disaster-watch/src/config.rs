//! Configuration for the DisasterWatch service

use crate::error::{Result, WatchError};
use secrecy::{ExposeSecret, SecretString};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_OPENAI_API_BASE: &str = dw_llm::providers::DEFAULT_OPENAI_API_BASE;
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "DisasterWatch";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_OUTPUT_DIR: &str = "disaster_data";

const DEFAULT_GEOCODER_RATE_PER_SEC: u32 = 1;
const DEFAULT_MAX_ITERATIONS: usize = 15;
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the DisasterWatch service
#[derive(Debug)]
pub struct WatchConfig {
    /// OpenAI API key
    pub openai_api_key: SecretString,

    /// Base URL of the chat-completions API
    pub openai_api_base: String,

    /// Model used by the agent
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// SerpAPI key for the search tool
    pub serpapi_api_key: SecretString,

    /// Base URL of the Nominatim instance
    pub nominatim_url: String,

    /// User-Agent sent to Nominatim
    pub geocoder_user_agent: String,

    /// Geocoding requests allowed per second
    pub geocoder_rate_per_sec: u32,

    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// Directory receiving one JSON file per successful lookup
    pub output_dir: PathBuf,

    /// Maximum LLM calls per agent run
    pub max_iterations: usize,

    /// Timeout applied to every outbound HTTP request
    pub http_timeout: Duration,
}

impl WatchConfig {
    /// Create a new configuration builder
    pub fn builder() -> WatchConfigBuilder {
        WatchConfigBuilder::default()
    }

    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        WatchConfigBuilder::from_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.expose_secret().trim().is_empty() {
            return Err(config_error("OpenAI API key must not be empty"));
        }

        if self.serpapi_api_key.expose_secret().trim().is_empty() {
            return Err(config_error("SerpAPI key must not be empty"));
        }

        if self.model.trim().is_empty() {
            return Err(config_error("model must not be empty"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(config_error(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.geocoder_rate_per_sec == 0 {
            return Err(config_error("geocoder_rate_per_sec must be greater than 0"));
        }

        if self.max_iterations == 0 {
            return Err(config_error("max_iterations must be greater than 0"));
        }

        if self.http_timeout.is_zero() {
            return Err(config_error("http_timeout must be greater than 0"));
        }

        for (name, value) in [
            ("openai_api_base", &self.openai_api_base),
            ("nominatim_url", &self.nominatim_url),
        ] {
            Url::parse(value)
                .map_err(|e| config_error(format!("{name} '{value}' is not a valid URL: {e}")))?;
        }

        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> WatchError {
    WatchError::ConfigError(message.into())
}

/// Builder for WatchConfig
#[derive(Debug, Default)]
pub struct WatchConfigBuilder {
    openai_api_key: Option<String>,
    openai_api_base: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    serpapi_api_key: Option<String>,
    nominatim_url: Option<String>,
    geocoder_user_agent: Option<String>,
    geocoder_rate_per_sec: Option<u32>,
    bind_addr: Option<String>,
    output_dir: Option<PathBuf>,
    max_iterations: Option<usize>,
    http_timeout: Option<Duration>,
}

impl WatchConfigBuilder {
    /// Seed a builder from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Seed a builder from an arbitrary variable lookup
    ///
    /// Unset and blank variables are ignored; values that fail to parse are
    /// reported instead of silently replaced by defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            openai_api_key: get("OPEN_AI_KEY").or_else(|| get("OPENAI_API_KEY")),
            openai_api_base: get("OPENAI_API_BASE"),
            model: get("OPENAI_MODEL"),
            temperature: parse_var("OPENAI_TEMPERATURE", get("OPENAI_TEMPERATURE"))?,
            serpapi_api_key: get("SERPAPI_API_KEY"),
            nominatim_url: get("NOMINATIM_URL"),
            geocoder_user_agent: get("GEOCODER_USER_AGENT"),
            geocoder_rate_per_sec: parse_var(
                "GEOCODER_RATE_PER_SEC",
                get("GEOCODER_RATE_PER_SEC"),
            )?,
            bind_addr: get("DISASTER_WATCH_BIND"),
            output_dir: get("DISASTER_WATCH_OUTPUT_DIR").map(PathBuf::from),
            max_iterations: parse_var("AGENT_MAX_ITERATIONS", get("AGENT_MAX_ITERATIONS"))?,
            http_timeout: parse_var::<u64>("HTTP_TIMEOUT_SECS", get("HTTP_TIMEOUT_SECS"))?
                .map(Duration::from_secs),
        })
    }

    /// Set the OpenAI API key
    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Set the chat-completions base URL
    pub fn openai_api_base(mut self, url: impl Into<String>) -> Self {
        self.openai_api_base = Some(url.into());
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the SerpAPI key
    pub fn serpapi_api_key(mut self, key: impl Into<String>) -> Self {
        self.serpapi_api_key = Some(key.into());
        self
    }

    /// Set the Nominatim base URL
    pub fn nominatim_url(mut self, url: impl Into<String>) -> Self {
        self.nominatim_url = Some(url.into());
        self
    }

    /// Set the geocoder User-Agent
    pub fn geocoder_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.geocoder_user_agent = Some(user_agent.into());
        self
    }

    /// Set the geocoder rate limit
    pub fn geocoder_rate_per_sec(mut self, rate: u32) -> Self {
        self.geocoder_rate_per_sec = Some(rate);
        self
    }

    /// Set the bind address
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = Some(addr.into());
        self
    }

    /// Set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set maximum agent iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Set the outbound HTTP timeout
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<WatchConfig> {
        let openai_api_key = self.openai_api_key.ok_or_else(|| {
            config_error("OPEN_AI_KEY (or OPENAI_API_KEY) environment variable not set")
        })?;
        let serpapi_api_key = self
            .serpapi_api_key
            .ok_or_else(|| config_error("SERPAPI_API_KEY environment variable not set"))?;

        let bind = self
            .bind_addr
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = SocketAddr::from_str(&bind)
            .map_err(|e| config_error(format!("bind address '{bind}' is invalid: {e}")))?;

        let config = WatchConfig {
            openai_api_key: SecretString::from(openai_api_key),
            openai_api_base: self
                .openai_api_base
                .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            serpapi_api_key: SecretString::from(serpapi_api_key),
            nominatim_url: self
                .nominatim_url
                .unwrap_or_else(|| DEFAULT_NOMINATIM_URL.to_string()),
            geocoder_user_agent: self
                .geocoder_user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            geocoder_rate_per_sec: self
                .geocoder_rate_per_sec
                .unwrap_or(DEFAULT_GEOCODER_RATE_PER_SEC),
            bind_addr,
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            max_iterations: self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS),
            http_timeout: self.http_timeout.unwrap_or(DEFAULT_HTTP_TIMEOUT),
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T>(name: &str, value: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| config_error(format!("{name}='{raw}' is invalid: {e}")))
        })
        .transpose()
}
