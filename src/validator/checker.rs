//! Per-link HTTP checks

use std::time::{Duration, Instant};
use tracing::{debug, warn};

use linkprobe_core::NO_STATUS;

use super::Result;

/// Status and timing of one link request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    /// Final HTTP status, or [`NO_STATUS`] when no response arrived
    pub status: u16,
    pub response_time_ms: u64,
}

/// Issues one GET per link with a fixed timeout. Redirects are followed.
#[derive(Debug, Clone)]
pub struct LinkChecker {
    client: reqwest::Client,
    timeout: Duration,
}

impl LinkChecker {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Never fails: a non-2xx status is a result, and a transport error or
    /// timeout is reported as [`NO_STATUS`].
    pub async fn check(&self, url: &str) -> CheckResult {
        let started = Instant::now();
        let status = match self.client.get(url).send().await {
            Ok(response) => response.status().as_u16(),
            Err(e) => {
                if e.is_timeout() {
                    warn!("Request timed out after {:?}: {}", self.timeout, url);
                } else {
                    warn!("Request failed for {}: {}", url, e);
                }
                NO_STATUS
            }
        };
        let response_time_ms = started.elapsed().as_millis() as u64;

        debug!(url, status, response_time_ms, "Link checked");
        CheckResult {
            status,
            response_time_ms,
        }
    }
}
