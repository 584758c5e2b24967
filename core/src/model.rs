//! Report data model
//!
//! JSON field names follow the on-disk report format (camelCase), so a report
//! written by one run can be served verbatim by the API.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status recorded when a request produced no HTTP response (transport
/// failure or timeout).
pub const NO_STATUS: u16 = 0;

/// ISO-8601 UTC timestamp with millisecond precision, e.g.
/// `2026-10-16T09:30:00.123Z`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One evaluated link that passed eligibility filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOutcome {
    /// URL of the page the link was found on
    pub page: String,
    /// Absolute HTTP(S) target
    pub url: String,
    /// HTTP status, or [`NO_STATUS`]
    pub status: u16,
    /// Milliseconds; 0 when unknown
    #[serde(default)]
    pub response_time: u64,
}

/// One validation run for one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub platform: String,
    pub locale: String,
    pub environment: String,
    pub pages_scanned: u64,
    pub total_links: u64,
    pub success_count: u64,
    pub broken_links: Vec<LinkOutcome>,
    pub skipped: u64,
    pub timestamp: String,
}

impl Report {
    /// Empty report stamped with the current time
    pub fn new(
        locale: impl Into<String>,
        environment: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            locale: locale.into(),
            environment: environment.into(),
            pages_scanned: 0,
            total_links: 0,
            success_count: 0,
            broken_links: Vec::new(),
            skipped: 0,
            timestamp: now_timestamp(),
        }
    }

    /// Success percentage in `[0, 100]`; 0 when no links were evaluated.
    pub fn success_rate(&self) -> f64 {
        if self.total_links == 0 {
            0.0
        } else {
            self.success_count as f64 / self.total_links as f64 * 100.0
        }
    }

    pub fn broken_count(&self) -> usize {
        self.broken_links.len()
    }

    pub fn count_404(&self) -> usize {
        self.broken_links.iter().filter(|l| l.status == 404).count()
    }

    /// Broken links with a status of 500 or above.
    pub fn count_5xx(&self) -> usize {
        self.broken_links.iter().filter(|l| l.status >= 500).count()
    }

    /// `totalLinks == successCount + |brokenLinks|`
    pub fn is_consistent(&self) -> bool {
        self.total_links == self.success_count + self.broken_links.len() as u64
    }
}

/// Coarse ordinal label derived from success rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Thresholds: `<50` Critical, `<80` High, `<95` Medium, else Low.
    pub fn from_success_rate(rate: f64) -> Self {
        if rate < 50.0 {
            Severity::Critical
        } else if rate < 80.0 {
            Severity::High
        } else if rate < 95.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(format!("Unknown severity: {other}")),
        }
    }
}

/// Summary, severity and recommendations derived from a [`Report`].
///
/// Never persisted; regenerated on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub enabled: bool,
    pub severity: Severity,
    pub summary: String,
    pub recommended_actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broken_links_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_affected_pages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_patterns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause_analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Per-locale line of the cross-locale summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleSummary {
    pub locale: String,
    /// Two-decimal percentage, e.g. `"90.00"`
    pub success_rate: String,
    pub broken_links: usize,
    pub success_count: u64,
}

/// Average across locales: the number `0` when there are no locales,
/// otherwise a two-decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AverageSuccessRate {
    Zero(u8),
    Rate(String),
}

impl Default for AverageSuccessRate {
    fn default() -> Self {
        AverageSuccessRate::Zero(0)
    }
}

/// Aggregate over every stored report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_locales: usize,
    pub locales: Vec<LocaleSummary>,
    pub total_broken_links: usize,
    pub total_successful: u64,
    pub average_success_rate: AverageSuccessRate,
}

/// Reports for an explicit list of locales
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub locales_compared: Vec<String>,
    pub reports: Vec<Report>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: u16) -> LinkOutcome {
        LinkOutcome {
            page: "https://example.com/".to_string(),
            url: format!("https://example.com/{status}"),
            status,
            response_time: 12,
        }
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let mut report = Report::new("en-IN", "Production", "Web");
        report.broken_links.push(outcome(404));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["pagesScanned"], 0);
        assert_eq!(json["totalLinks"], 0);
        assert_eq!(json["successCount"], 0);
        assert_eq!(json["brokenLinks"][0]["responseTime"], 12);
        assert_eq!(json["locale"], "en-IN");
    }

    #[test]
    fn test_success_rate_zero_links() {
        let report = Report::new("en-US", "Development", "Web");
        assert_eq!(report.success_rate(), 0.0);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_status_counts() {
        let mut report = Report::new("en-US", "Development", "Web");
        report.total_links = 4;
        report.success_count = 1;
        report.broken_links = vec![outcome(404), outcome(503), outcome(403)];

        assert_eq!(report.count_404(), 1);
        assert_eq!(report.count_5xx(), 1);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(Severity::from_success_rate(0.0), Severity::Critical);
        assert_eq!(Severity::from_success_rate(49.99), Severity::Critical);
        assert_eq!(Severity::from_success_rate(50.0), Severity::High);
        assert_eq!(Severity::from_success_rate(79.9), Severity::High);
        assert_eq!(Severity::from_success_rate(80.0), Severity::Medium);
        assert_eq!(Severity::from_success_rate(94.99), Severity::Medium);
        assert_eq!(Severity::from_success_rate(95.0), Severity::Low);
        assert_eq!(Severity::from_success_rate(100.0), Severity::Low);
    }

    #[test]
    fn test_severity_parse_case_insensitive() {
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!(" low ".parse::<Severity>().unwrap(), Severity::Low);
        assert!("Critical|High".parse::<Severity>().is_err());
    }

    #[test]
    fn test_insight_omits_absent_fields() {
        let insight = Insight {
            enabled: true,
            severity: Severity::Low,
            summary: "ok".to_string(),
            recommended_actions: vec![],
            success_rate: None,
            broken_links_count: None,
            most_affected_pages: None,
            common_patterns: None,
            root_cause_analysis: None,
            timestamp: None,
        };
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["severity"], "Low");
        assert!(json.get("timestamp").is_none());
        assert!(json.get("rootCauseAnalysis").is_none());
    }

    #[test]
    fn test_average_rate_serialization() {
        assert_eq!(
            serde_json::to_string(&AverageSuccessRate::default()).unwrap(),
            "0"
        );
        assert_eq!(
            serde_json::to_string(&AverageSuccessRate::Rate("90.00".to_string())).unwrap(),
            "\"90.00\""
        );
    }
}
