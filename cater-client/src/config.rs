//! Client configuration

use crate::{ClientError, ClientResult, HttpClient};

/// Backend base URL variable
pub const ENV_API_URL: &str = "CATER_API_URL";
/// Bearer token variable
pub const ENV_API_TOKEN: &str = "CATER_API_TOKEN";
/// Request timeout variable, in seconds
pub const ENV_API_TIMEOUT: &str = "CATER_API_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the catering backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read `CATER_API_*` variables, loading a `.env` file first if present
    pub fn from_env() -> ClientResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(present(ENV_API_URL).unwrap_or_else(|| DEFAULT_BASE_URL.into()));
        if let Some(token) = present(ENV_API_TOKEN) {
            config = config.with_token(token);
        }
        if let Some(raw) = present(ENV_API_TIMEOUT) {
            let seconds = raw.trim().parse::<u64>().map_err(|_| {
                ClientError::Config(format!("{ENV_API_TIMEOUT} must be a whole number of seconds, got '{raw}'"))
            })?;
            config = config.with_timeout(seconds);
        }
        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<HttpClient> {
        HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
