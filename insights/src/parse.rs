//! Parsing of the model's free-text reply into an [`Insight`]

use serde::Deserialize;

use linkprobe_core::{now_timestamp, Insight, Report, Severity};

use crate::fallback::{fallback_insight, success_rate_text};

/// JSON object the prompt asks the model to return. Every field is optional
/// so a partially compliant reply still yields an insight.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiInsightPayload {
    pub severity: Option<String>,
    pub most_affected_pages: Option<Vec<String>>,
    pub common_patterns: Option<Vec<String>>,
    pub root_cause_analysis: Option<String>,
    pub recommended_actions: Option<Vec<String>>,
    pub summary: Option<String>,
}

/// Substring from the first `{` to the last `}`, if both exist in order.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse the reply; `None` when no JSON object can be extracted or it does
/// not deserialize.
pub fn parse_ai_reply(text: &str) -> Option<AiInsightPayload> {
    let json = extract_json_object(text)?;
    serde_json::from_str(json).ok()
}

/// Merge a model payload with the report. Missing or unrecognised fields
/// take their rule-based values.
pub fn payload_to_insight(payload: AiInsightPayload, report: &Report) -> Insight {
    let rules = fallback_insight(report);

    let severity = payload
        .severity
        .as_deref()
        .and_then(|s| s.parse::<Severity>().ok())
        .unwrap_or(rules.severity);

    Insight {
        enabled: true,
        severity,
        summary: payload.summary.unwrap_or(rules.summary),
        recommended_actions: payload
            .recommended_actions
            .unwrap_or(rules.recommended_actions),
        success_rate: Some(success_rate_text(report)),
        broken_links_count: None,
        most_affected_pages: payload.most_affected_pages,
        common_patterns: payload.common_patterns,
        root_cause_analysis: payload.root_cause_analysis,
        timestamp: Some(now_timestamp()),
    }
}
