//! Server configuration

use anyhow::Result;
use serde::Deserialize;

/// Dashboard server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Site label attached to structured log events
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Port for the dashboard/health/metrics API
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Base URL of the mock REST data source
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Snapshot refresh interval in seconds
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Deadline for the predictive enrichment call, in milliseconds
    #[serde(default = "default_forecast_timeout")]
    pub forecast_timeout_ms: u64,
}

fn default_site_name() -> String {
    std::env::var("SITE_NAME").unwrap_or_else(|_| "factory".to_string())
}

fn default_api_port() -> u16 {
    8080
}

fn default_source_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_forecast_timeout() -> u64 {
    2000
}

impl ServerConfig {
    /// Load configuration from ENERGY_-prefixed environment variables.
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("ENERGY"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| ServerConfig {
            site_name: default_site_name(),
            api_port: default_api_port(),
            source_url: default_source_url(),
            refresh_interval_secs: default_refresh_interval(),
            forecast_timeout_ms: default_forecast_timeout(),
        }))
    }
}
