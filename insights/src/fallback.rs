//! Rule-based insights, used whenever the AI path is off or fails.

use linkprobe_core::{format_rate, Insight, Report, Severity};

pub const DEFAULT_ACTIONS: [&str; 3] = [
    "Review broken links and update navigation",
    "Test cross-locale redirects",
    "Monitor server health for 5xx errors",
];

pub fn success_rate_text(report: &Report) -> String {
    format_rate(report.success_rate())
}

pub fn fallback_insight(report: &Report) -> Insight {
    let rate = report.success_rate();
    let rate_text = format_rate(rate);
    let broken = report.broken_count();

    Insight {
        enabled: true,
        severity: Severity::from_success_rate(rate),
        summary: format!(
            "{} broken links detected across {} pages ({}% success rate)",
            broken, report.pages_scanned, rate_text
        ),
        recommended_actions: DEFAULT_ACTIONS.iter().map(|a| a.to_string()).collect(),
        success_rate: Some(rate_text),
        broken_links_count: Some(broken),
        most_affected_pages: None,
        common_patterns: None,
        root_cause_analysis: None,
        timestamp: None,
    }
}
