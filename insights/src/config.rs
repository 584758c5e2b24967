//! Insight generator configuration
//!
//! Passed explicitly to [`crate::InsightGenerator`]; the generator never
//! reads the process environment itself.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Credential for the text-generation service; `None` disables AI
    /// insights.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_secs: 30,
        }
    }
}

impl InsightConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// AI insights are on only with a non-blank credential.
    pub fn ai_enabled(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_disabled() {
        let config = InsightConfig::default();
        assert!(!config.ai_enabled());
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.max_tokens, 500);
    }

    #[test]
    fn test_blank_key_disabled() {
        assert!(!InsightConfig::default().with_api_key("  ").ai_enabled());
        assert!(InsightConfig::default().with_api_key("sk-test").ai_enabled());
    }
}
