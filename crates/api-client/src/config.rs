//! Configuration for the edge detection client
//!
//! The base URL is injected at construction time; nothing is read from a
//! process-wide constant once a client exists.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Base URL used when nothing else is configured (a locally running service)
pub const DEFAULT_EDGE_SERVICE_URL: &str = "http://localhost:8000";

/// Environment variable holding the service base URL
pub const EDGE_URL_ENV: &str = "CITRA_EDGE_URL";

/// Environment variable holding the request timeout in seconds
pub const EDGE_TIMEOUT_ENV: &str = "CITRA_EDGE_TIMEOUT_SECS";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service base URL; requests go to `{base_url}/edge/{method}`
    pub base_url: String,
    /// Request timeout; `None` waits for as long as the service takes
    #[serde(default, with = "optional_secs")]
    pub timeout: Option<Duration>,
    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

mod optional_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        duration.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

fn default_user_agent() -> String {
    format!("citra-api-client/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EDGE_SERVICE_URL.to_string(),
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `CITRA_EDGE_URL`: service base URL
    /// - `CITRA_EDGE_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        Self::default().merge_env()
    }

    /// Override fields of `self` with whatever the environment sets
    pub fn merge_env(mut self) -> ApiResult<Self> {
        if let Ok(url) = env::var(EDGE_URL_ENV) {
            self.base_url = url;
        }

        if let Ok(raw) = env::var(EDGE_TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::config(format!(
                    "{EDGE_TIMEOUT_ENV} must be whole seconds, got {raw:?}"
                ))
            })?;
            self.timeout = Some(Duration::from_secs(secs));
        }

        Ok(self)
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }

    /// Absolute URL for a path below the base URL
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
