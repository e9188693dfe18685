//! Error types for the API client

use citra_image::{EdgeMethod, ImageError};
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The service answered with a non-2xx status
    #[error("Edge detection failed ({method}) - {status}")]
    EdgeDetectionRequest {
        /// Method that was requested
        method: EdgeMethod,
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The request never produced a response
    #[error("Edge detection request failed ({method}): {source}")]
    Transport {
        /// Method that was requested
        method: EdgeMethod,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The service answered 2xx but the body is not a decodable image
    #[error("Invalid edge detection response: {0}")]
    InvalidResponse(#[from] ImageError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpClient(reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a non-2xx response error
    pub fn edge_request(method: EdgeMethod, status: u16, message: impl Into<String>) -> Self {
        Self::EdgeDetectionRequest {
            method,
            status,
            message: message.into(),
        }
    }

    /// HTTP status of a failed request, when the service answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::EdgeDetectionRequest { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Edge method of the failed request
    #[must_use]
    pub fn method(&self) -> Option<EdgeMethod> {
        match self {
            Self::EdgeDetectionRequest { method, .. } | Self::Transport { method, .. } => {
                Some(*method)
            }
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_request_display() {
        let err = ApiError::edge_request(EdgeMethod::FreiChen, 502, "bad gateway");
        assert_eq!(err.to_string(), "Edge detection failed (frei-chen) - 502");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.method(), Some(EdgeMethod::FreiChen));
        assert!(err.is_server_error());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_error_classification() {
        let err = ApiError::edge_request(EdgeMethod::Sobel, 415, "unsupported media type");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_config_error_has_no_status() {
        let err = ApiError::config("base_url cannot be empty");
        assert_eq!(err.status(), None);
        assert_eq!(err.method(), None);
    }
}
