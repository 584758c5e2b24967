//! Fake transport for testing
//!
//! Uses fixture strings instead of real HTTP calls and remembers the last
//! request body so tests can inspect the prompt.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::adapters::transport_types::{AdapterError, AsyncTransport};

/// Fake transport for testing (uses fixture strings)
#[derive(Debug, Default)]
pub struct FakeTransport {
    /// Response body to return
    pub response_body: String,
    /// Error message to return (if set)
    pub error_message: Option<String>,
    last_request: Mutex<Option<String>>,
}

impl FakeTransport {
    /// Create fake transport with given response
    pub fn new(response: &str) -> Self {
        Self {
            response_body: response.to_string(),
            ..Self::default()
        }
    }

    /// Create fake transport whose response is an OpenAI chat completion
    /// carrying `content`
    pub fn with_completion(content: &str) -> Self {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        });
        Self::new(&body.to_string())
    }

    /// Create fake transport that returns a network error
    pub fn with_error(msg: &str) -> Self {
        Self {
            error_message: Some(msg.to_string()),
            ..Self::default()
        }
    }

    /// Body of the most recent request, if any
    pub fn last_request(&self) -> Option<String> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AsyncTransport for FakeTransport {
    async fn post_json(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(body.to_string());
        }
        if let Some(ref msg) = self.error_message {
            return Err(AdapterError::Network(msg.clone()));
        }
        Ok(self.response_body.clone())
    }
}
