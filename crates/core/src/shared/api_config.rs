use std::time::Duration;

use crate::shared::constants::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};

/// Connection settings for an OpenAI-compatible HTTP API.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build the blocking client shared by every adapter of one run.
    pub fn build_client(&self) -> Result<reqwest::blocking::Client, reqwest::Error> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(None)
    }
}
