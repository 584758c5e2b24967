//! Insight Generator
//!
//! `generate` never fails: when no adapter is configured, or the call or its
//! parsing fails, the rule-based insight is returned instead.

use tracing::{debug, error, info, warn};

use linkprobe_core::{Insight, Report};

use crate::adapters::{HttpTransport, LlmMessage, OpenAiAdapter, Transport};
use crate::config::InsightConfig;
use crate::fallback::fallback_insight;
use crate::parse::{parse_ai_reply, payload_to_insight};
use crate::prompt::{build_prompt, system_prompt};

#[derive(Debug)]
pub struct InsightGenerator {
    adapter: Option<OpenAiAdapter>,
}

impl InsightGenerator {
    /// Generator with AI insights enabled iff the config carries a
    /// credential.
    pub fn from_config(config: &InsightConfig) -> Self {
        if !config.ai_enabled() {
            info!("AI insights disabled (no API key configured)");
            return Self::disabled();
        }

        let api_key = config.api_key.clone().unwrap_or_default();
        let adapter = OpenAiAdapter::with_transport(
            config.base_url.clone(),
            config.model.clone(),
            api_key,
            Transport::Real(HttpTransport::with_timeout(config.timeout_secs)),
        )
        .with_sampling(config.temperature, config.max_tokens);

        info!(
            "AI insights enabled via {} (model {})",
            adapter.base_url(),
            adapter.model()
        );
        Self {
            adapter: Some(adapter),
        }
    }

    /// Rule-based only
    pub fn disabled() -> Self {
        Self { adapter: None }
    }

    /// Use a specific adapter (for testing)
    pub fn with_adapter(adapter: OpenAiAdapter) -> Self {
        Self {
            adapter: Some(adapter),
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.adapter.is_some()
    }

    pub fn adapter(&self) -> Option<&OpenAiAdapter> {
        self.adapter.as_ref()
    }

    pub async fn generate(&self, report: &Report) -> Insight {
        let Some(adapter) = self.adapter.as_ref() else {
            warn!("AI not configured, using default insights");
            return fallback_insight(report);
        };

        let messages = [
            LlmMessage::system(system_prompt()),
            LlmMessage::user(build_prompt(report)),
        ];

        let reply = match adapter.complete(&messages).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Error generating AI insights: {}", e);
                return fallback_insight(report);
            }
        };
        debug!("AI reply for {}: {} chars", report.locale, reply.len());

        match parse_ai_reply(&reply) {
            Some(payload) => payload_to_insight(payload, report),
            None => {
                error!("Error parsing AI response for locale {}", report.locale);
                fallback_insight(report)
            }
        }
    }
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::disabled()
    }
}
