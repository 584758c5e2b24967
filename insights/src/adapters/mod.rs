//! LLM Adapters
//!
//! Provider interface for the text-generation call behind AI insights.

pub mod openai;
pub mod openai_parse;
pub mod transport;
pub mod transport_fake;
pub mod transport_http;
pub mod transport_types;

pub use openai::OpenAiAdapter;
pub use transport::{AdapterError, AsyncTransport, FakeTransport, HttpTransport, Transport};

/// LLM message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmRole {
    /// System message (sets behavior/context)
    System,
    /// User message (human input)
    User,
    /// Assistant message (LLM response)
    Assistant,
}

/// Single LLM message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

impl LlmMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::User,
            content: content.into(),
        }
    }
}
