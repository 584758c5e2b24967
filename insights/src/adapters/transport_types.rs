//! Transport types
//!
//! Common types shared across transport implementations.

use async_trait::async_trait;

/// Adapter errors
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Network error (connection refused, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP error (non-2xx status)
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limited
    #[error("Rate limited")]
    RateLimited,

    /// Invalid response from provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::Json(err.to_string())
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AdapterError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => AdapterError::Network(err.to_string()),
        }
    }
}

/// Map a non-success HTTP status to the matching error.
pub fn error_for_status(status: u16, body: &str) -> AdapterError {
    match status {
        401 | 403 => AdapterError::Authentication("Invalid API key".to_string()),
        429 => AdapterError::RateLimited,
        _ => AdapterError::Http {
            status,
            message: body.chars().take(200).collect(),
        },
    }
}

/// Async HTTP transport
///
/// Abstraction over the HTTP client so adapters can be tested with
/// [`super::transport_fake::FakeTransport`].
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    /// POST a JSON body and return the response body
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError>;
}
