use crate::api::ClientOptions;
use anyhow::{anyhow, Result};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Listing API
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub favorite_timeout_ms: u64,

    // Session storage
    pub token_store_path: String,

    // Where the binary writes the bootstrap result
    pub output_path: String,

    pub log_level: String,
}

impl Config {
    /// Load from `LISTING_*` environment variables, after reading `.env` if present
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let config = config::Config::builder()
            .set_default("api_base_url", "http://localhost:8000/api/")?
            .set_default("request_timeout_secs", 30)?
            .set_default("favorite_timeout_ms", 5000)?
            .set_default("token_store_path", ".listing/session.json")?
            .set_default("output_path", "bootstrap_result.json")?
            .set_default("log_level", "info")?
            .add_source(config::Environment::with_prefix("LISTING"))
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_base_url)
            .map_err(|e| anyhow!("Invalid API base URL {}: {}", self.api_base_url, e))?;

        if self.request_timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be greater than 0"));
        }

        if self.favorite_timeout_ms == 0 {
            return Err(anyhow!("Favorite lookup timeout must be greater than 0"));
        }

        if self.token_store_path.trim().is_empty() {
            return Err(anyhow!("Token store path is required"));
        }

        Ok(())
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientOptions::default()
        }
    }

    pub fn favorite_timeout(&self) -> Duration {
        Duration::from_millis(self.favorite_timeout_ms)
    }
}
