//! Real HTTP transport using reqwest

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::transport_types::{error_for_status, AdapterError, AsyncTransport};

/// Real HTTP transport using reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    /// Timeout in seconds for requests
    timeout: u64,
}

impl HttpTransport {
    /// Create transport with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: timeout_secs,
        }
    }
}

#[async_trait]
impl AsyncTransport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        debug!(
            "[HTTP] POST {} (timeout={}s, body_len={})",
            url,
            self.timeout,
            body.len()
        );

        let mut request = self
            .client
            .post(url)
            .timeout(Duration::from_secs(self.timeout))
            .body(body.to_string());

        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("[HTTP] response: status={}", status);

        let text = response.text().await?;
        if !status.is_success() {
            return Err(error_for_status(status.as_u16(), &text));
        }

        Ok(text)
    }
}
