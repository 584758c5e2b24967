//! Report Aggregator
//!
//! Accumulates per-link outcomes for one locale/run. `totalLinks` counts
//! attempted evaluations: [`ReportAggregator::record_eligible`] is called
//! before the request for that link is issued, outcomes arrive later in any
//! order. [`ReportAggregator::finalize`] consumes the aggregator, so a run
//! produces its report exactly once.

use tracing::{debug, warn};

use crate::classifier::StatusClass;
use crate::model::{LinkOutcome, Report};

/// Counters at a point in time, for progress logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorSnapshot {
    pub pages_scanned: u64,
    pub total_links: u64,
    pub success_count: u64,
    pub broken_count: usize,
    pub skipped: u64,
}

impl AggregatorSnapshot {
    /// Eligible links whose outcome has not been recorded yet
    pub fn pending(&self) -> u64 {
        self.total_links
            .saturating_sub(self.success_count + self.broken_count as u64)
    }
}

#[derive(Debug)]
pub struct ReportAggregator {
    report: Report,
    broken: Vec<LinkOutcome>,
}

impl ReportAggregator {
    /// Start a run: all counters zero, timestamp taken now.
    pub fn new(
        locale: impl Into<String>,
        environment: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            report: Report::new(locale, environment, platform),
            broken: Vec::new(),
        }
    }

    pub fn record_page(&mut self) {
        self.report.pages_scanned += 1;
    }

    pub fn record_skip(&mut self) {
        self.report.skipped += 1;
    }

    pub fn record_eligible(&mut self) {
        self.report.total_links += 1;
    }

    pub fn record_outcome(&mut self, outcome: LinkOutcome, class: StatusClass) {
        if class.is_broken() {
            debug!(url = %outcome.url, status = outcome.status, ?class, "Broken link");
            self.broken.push(outcome);
        } else {
            self.report.success_count += 1;
        }
    }

    pub fn snapshot(&self) -> AggregatorSnapshot {
        AggregatorSnapshot {
            pages_scanned: self.report.pages_scanned,
            total_links: self.report.total_links,
            success_count: self.report.success_count,
            broken_count: self.broken.len(),
            skipped: self.report.skipped,
        }
    }

    /// Attach the broken list and hand back the finished report.
    pub fn finalize(self) -> Report {
        let mut report = self.report;
        report.broken_links = self.broken;

        if !report.is_consistent() {
            warn!(
                locale = %report.locale,
                total = report.total_links,
                success = report.success_count,
                broken = report.broken_links.len(),
                "Report finalized with unresolved links"
            );
        }

        report
    }
}
