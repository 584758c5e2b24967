//! Link Classifier
//!
//! Two pure decisions: whether a link element is eligible for an HTTP check,
//! and which outcome bucket an HTTP status falls into. The caller performs
//! the network fetch.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static ABSOLUTE_HTTP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("absolute http pattern"));

/// Statuses counted as a working link
pub const SUCCESS_STATUSES: [u16; 7] = [200, 201, 204, 301, 302, 307, 308];

/// A link element as seen by the page driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    /// Resolved `href` of the closest enclosing anchor, `None` when the
    /// element has no anchor ancestor. An anchor without an `href` resolves
    /// to an empty string.
    pub href: Option<String>,
    /// Visible text, used only for logging
    pub text: String,
}

impl LinkCandidate {
    pub fn anchored(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            text: text.into(),
        }
    }

    pub fn unanchored(text: impl Into<String>) -> Self {
        Self {
            href: None,
            text: text.into(),
        }
    }
}

/// Why a candidate was excluded before any HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoAnchor,
    EmptyHref,
    NotHttp(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoAnchor => write!(f, "no parent <a>"),
            SkipReason::EmptyHref => write!(f, "empty href"),
            SkipReason::NotHttp(href) => write!(f, "non-HTTP URL: {href}"),
        }
    }
}

/// Eligibility decision for one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Eligible { url: String, page: String },
    Skipped(SkipReason),
}

impl Classification {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Classification::Eligible { .. })
    }
}

/// Outcome bucket for an HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    Success,
    Broken404,
    Broken5xx,
    BrokenOther,
}

impl StatusClass {
    pub fn is_broken(&self) -> bool {
        !matches!(self, StatusClass::Success)
    }
}

pub fn is_absolute_http(href: &str) -> bool {
    ABSOLUTE_HTTP.is_match(href)
}

/// Decide whether `candidate`, found on `page_url`, gets an HTTP check.
pub fn classify(candidate: &LinkCandidate, page_url: &str) -> Classification {
    let href = match candidate.href.as_deref() {
        None => return Classification::Skipped(SkipReason::NoAnchor),
        Some(href) => href,
    };

    if href.is_empty() {
        return Classification::Skipped(SkipReason::EmptyHref);
    }

    if !is_absolute_http(href) {
        return Classification::Skipped(SkipReason::NotHttp(href.to_string()));
    }

    Classification::Eligible {
        url: href.to_string(),
        page: page_url.to_string(),
    }
}

/// Bucket an HTTP status. 404 is checked before the success set.
pub fn classify_status(status: u16) -> StatusClass {
    if status == 404 {
        StatusClass::Broken404
    } else if SUCCESS_STATUSES.contains(&status) {
        StatusClass::Success
    } else if (500..600).contains(&status) {
        StatusClass::Broken5xx
    } else {
        StatusClass::BrokenOther
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NO_STATUS;

    const PAGE: &str = "https://example.com/home";

    #[test]
    fn test_success_statuses() {
        for status in [200, 201, 204, 301, 302, 307, 308] {
            assert_eq!(classify_status(status), StatusClass::Success, "{status}");
        }
    }

    #[test]
    fn test_broken_statuses() {
        assert_eq!(classify_status(404), StatusClass::Broken404);
        assert_eq!(classify_status(500), StatusClass::Broken5xx);
        assert_eq!(classify_status(503), StatusClass::Broken5xx);
        assert_eq!(classify_status(599), StatusClass::Broken5xx);
        assert_eq!(classify_status(403), StatusClass::BrokenOther);
        assert_eq!(classify_status(202), StatusClass::BrokenOther);
        assert_eq!(classify_status(304), StatusClass::BrokenOther);
        assert_eq!(classify_status(600), StatusClass::BrokenOther);
        assert_eq!(classify_status(NO_STATUS), StatusClass::BrokenOther);
    }

    #[test]
    fn test_is_broken() {
        assert!(!StatusClass::Success.is_broken());
        assert!(StatusClass::Broken404.is_broken());
        assert!(StatusClass::Broken5xx.is_broken());
        assert!(StatusClass::BrokenOther.is_broken());
    }

    #[test]
    fn test_skip_without_anchor() {
        let candidate = LinkCandidate::unanchored("Menu");
        assert_eq!(
            classify(&candidate, PAGE),
            Classification::Skipped(SkipReason::NoAnchor)
        );
    }

    #[test]
    fn test_skip_empty_href() {
        let candidate = LinkCandidate::anchored("", "Empty");
        assert_eq!(
            classify(&candidate, PAGE),
            Classification::Skipped(SkipReason::EmptyHref)
        );
    }

    #[test]
    fn test_skip_non_http_schemes() {
        for href in [
            "mailto:team@example.com",
            "tel:+123456",
            "javascript:void(0)",
            "ftp://example.com/file",
            "/relative/path",
        ] {
            let candidate = LinkCandidate::anchored(href, "x");
            assert_eq!(
                classify(&candidate, PAGE),
                Classification::Skipped(SkipReason::NotHttp(href.to_string())),
                "{href}"
            );
        }
    }

    #[test]
    fn test_eligible_case_insensitive_scheme() {
        let candidate = LinkCandidate::anchored("HTTPS://Example.com/About", "About");
        let classification = classify(&candidate, PAGE);
        assert!(classification.is_eligible());
        assert_eq!(
            classification,
            Classification::Eligible {
                url: "HTTPS://Example.com/About".to_string(),
                page: PAGE.to_string(),
            }
        );
    }

    #[test]
    fn test_eligible_plain_http() {
        let candidate = LinkCandidate::anchored("http://example.com", "Home");
        assert!(classify(&candidate, PAGE).is_eligible());
    }
}
