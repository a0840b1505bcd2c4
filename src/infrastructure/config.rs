//! Application configuration

use anyhow::{Context, Result};
use config::{Config, Environment, Source};
use serde::Deserialize;

use crate::domain::value_objects::{
    DispatchConfig, DispatchConfigError, DEFAULT_BASE_BACKOFF_MS, DEFAULT_BATCH_SIZE,
    DEFAULT_MAX_BACKOFF_MS, DEFAULT_MAX_RETRIES,
};

/// Prefix of every environment variable read by the service
pub const ENV_PREFIX: &str = "LOC_DISPATCH";

/// Application configuration loaded from defaults and `LOC_DISPATCH_*` variables
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,

    /// Odin (AEM author) base URL, e.g. https://author-p1-e1.adobeaemcloud.com
    pub odin_endpoint: String,
    /// IMS base URL used for token validation
    pub ims_endpoint: String,
    /// Only tokens issued to this client are accepted
    pub allowed_client_id: String,
    /// Timeout for every outbound HTTP request
    pub request_timeout_secs: u64,

    /// Items localised concurrently per batch
    pub batch_size: usize,
    /// Attempts per item, first one included
    pub max_retries: u32,
    pub base_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn load<S>(source: S) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let config: Self = Config::builder()
            .set_default("server_port", 3000_i64)?
            .set_default("ims_endpoint", "https://ims-na1.adobelogin.com")?
            .set_default("request_timeout_secs", 30_i64)?
            .set_default("batch_size", DEFAULT_BATCH_SIZE as i64)?
            .set_default("max_retries", i64::from(DEFAULT_MAX_RETRIES))?
            .set_default("base_backoff_ms", DEFAULT_BASE_BACKOFF_MS as i64)?
            .set_default("max_backoff_ms", DEFAULT_MAX_BACKOFF_MS as i64)?
            .add_source(source)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("LOC_DISPATCH_ODIN_ENDPOINT and LOC_DISPATCH_ALLOWED_CLIENT_ID are required")?;

        config
            .dispatch_config()
            .context("Invalid dispatch configuration")?;
        Ok(config)
    }

    /// Validated dispatch defaults
    pub fn dispatch_config(&self) -> Result<DispatchConfig, DispatchConfigError> {
        DispatchConfig::new(
            self.batch_size,
            self.max_retries,
            self.base_backoff_ms,
            self.max_backoff_ms,
        )
    }
}
