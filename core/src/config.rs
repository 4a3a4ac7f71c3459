//! Client configuration.
//!
//! The endpoint is fixed when the client is built. `from_env` lets an
//! embedding application point the client elsewhere without code changes.

use std::fmt;
use std::time::Duration;

/// Production endpoint of the vegetable inventory API.
pub const DEFAULT_ENDPOINT: &str = "https://api.dak.edu.vn/api_rau/vegetables.php";

/// Overrides `ClientConfig::endpoint`.
pub const ENDPOINT_ENV: &str = "VEGETABLE_API_URL";

/// Overrides `ClientConfig::timeout`, in whole seconds. `0` disables it.
pub const TIMEOUT_ENV: &str = "VEGETABLE_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the vegetables resource, without a query string.
    pub endpoint: String,
    /// Per-call timeout applied by the transport. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Defaults, overridden by `VEGETABLE_API_URL` and
    /// `VEGETABLE_API_TIMEOUT_SECS` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        Ok(config)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `VEGETABLE_API_TIMEOUT_SECS` was not a whole number of seconds.
    InvalidTimeout(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimeout(raw) => {
                write!(f, "{TIMEOUT_ENV} must be a whole number of seconds, got {raw:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
