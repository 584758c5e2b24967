//! OpenAI Adapter
//!
//! OpenAI-compatible `chat/completions` adapter. Any provider speaking the
//! same wire format can be used by pointing `base_url` at it.

use crate::adapters::openai_parse::parse_chat_completion;
use crate::adapters::transport::{AsyncTransport, Transport};
use crate::adapters::{AdapterError, LlmMessage, LlmRole};

/// OpenAI-compatible adapter
#[derive(Debug)]
pub struct OpenAiAdapter {
    /// Base URL (e.g., https://api.openai.com/v1)
    base_url: String,
    /// Model name (e.g., gpt-4)
    model: String,
    /// API key
    api_key: String,
    temperature: f64,
    max_tokens: u32,
    /// HTTP transport
    transport: Transport,
}

impl OpenAiAdapter {
    /// Create adapter over `transport`
    pub fn with_transport(
        base_url: String,
        model: String,
        api_key: String,
        transport: Transport,
    ) -> Self {
        Self {
            base_url,
            model,
            api_key,
            temperature: 0.7,
            max_tokens: 500,
            transport,
        }
    }

    pub fn with_sampling(mut self, temperature: f64, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Build chat request body
    pub fn build_request(&self, messages: &[LlmMessage]) -> String {
        let messages: Vec<serde_json::Value> = messages
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    LlmRole::System => "system",
                    LlmRole::User => "user",
                    LlmRole::Assistant => "assistant",
                };
                serde_json::json!({"role": role, "content": msg.content})
            })
            .collect();

        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        })
        .to_string()
    }

    /// Send a conversation and return the assistant's text
    pub async fn complete(&self, messages: &[LlmMessage]) -> Result<String, AdapterError> {
        if self.api_key.is_empty() {
            return Err(AdapterError::Configuration("Missing API key".to_string()));
        }

        let body = self.build_request(messages);
        let auth_header = format!("Bearer {}", self.api_key);
        let headers = [
            ("Authorization", auth_header.as_str()),
            ("Content-Type", "application/json"),
        ];

        let response = self
            .transport
            .post_json(&self.endpoint(), &headers, &body)
            .await?;
        parse_chat_completion(&response)
    }
}
