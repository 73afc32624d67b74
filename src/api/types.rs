use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the listing API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Base URL every endpoint path is joined onto
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("listing-bootstrap/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
