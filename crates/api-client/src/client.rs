//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::EdgeApi;
use crate::error::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use uuid::Uuid;

/// Request correlation ID header
pub(crate) const X_REQUEST_ID: &str = "X-Request-ID";

/// Client for the remote edge detection service
///
/// One network round trip per call: no retry, no deduplication. The timeout
/// is whatever the configuration says (none by default).
#[derive(Clone)]
pub struct EdgeServiceClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for EdgeServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeServiceClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

impl EdgeServiceClient {
    /// Create a new client with configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ApiError::config("user_agent is not a valid header value"))?;
        default_headers.insert(USER_AGENT, user_agent);

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder.build().map_err(ApiError::HttpClient)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Access edge detection endpoints
    #[must_use]
    pub fn edges(&self) -> EdgeApi {
        EdgeApi::new(self.clone())
    }

    /// POST to a path below the base URL with a fresh correlation ID
    ///
    /// Returns the builder together with the ID so callers can log it.
    pub(crate) fn post(&self, path: &str) -> (RequestBuilder, String) {
        let url = self.config.endpoint(path);
        let request_id = Uuid::new_v4().to_string();
        let builder = self
            .inner
            .post(url)
            .header(X_REQUEST_ID, request_id.as_str());
        (builder, request_id)
    }
}
