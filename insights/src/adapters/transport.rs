//! HTTP Transport for LLM Adapters
//!
//! Concrete transport enum so adapters hold a plain value rather than a
//! boxed trait object.

use async_trait::async_trait;

pub use crate::adapters::transport_fake::FakeTransport;
pub use crate::adapters::transport_http::HttpTransport;
pub use crate::adapters::transport_types::{AdapterError, AsyncTransport};

#[derive(Debug)]
pub enum Transport {
    Real(HttpTransport),
    Fake(FakeTransport),
}

#[async_trait]
impl AsyncTransport for Transport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        match self {
            Transport::Real(t) => t.post_json(url, headers, body).await,
            Transport::Fake(t) => t.post_json(url, headers, body).await,
        }
    }
}
