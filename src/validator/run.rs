//! Validation run orchestration
//!
//! Per page: visit, classify every candidate, then check the eligible links
//! concurrently. All checks for a page settle before the next page is
//! visited, and the report is finalized only after the last page.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use linkprobe_core::{
    classify, classify_status, Classification, LinkOutcome, Report, ReportAggregator,
    ReportStore,
};

use super::{LinkChecker, PageDriver, Result, Selector, ValidatorError};

/// What a run is for and how hard it may hit the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub locale: String,
    pub environment: String,
    pub platform: String,
    pub max_concurrent_requests: usize,
    /// Extra attempts for the whole run when a page fails to load
    pub run_retries: u32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            environment: "Development".to_string(),
            platform: "Web".to_string(),
            max_concurrent_requests: 16,
            run_retries: 1,
        }
    }
}

pub struct ValidationRun {
    settings: RunSettings,
    store: ReportStore,
}

impl ValidationRun {
    pub fn new(settings: RunSettings, store: ReportStore) -> Self {
        Self { settings, store }
    }

    /// Validate `pages` and save the report for the configured locale.
    pub async fn execute<D: PageDriver>(
        &self,
        driver: &mut D,
        checker: &LinkChecker,
        pages: &[String],
        selector: &Selector,
    ) -> Result<Report> {
        if pages.is_empty() {
            return Err(ValidatorError::NoPages);
        }

        let attempts = self.settings.run_retries + 1;
        let mut attempt = 1;
        let report = loop {
            match self.attempt(driver, checker, pages, selector).await {
                Ok(report) => break report,
                Err(e) if attempt < attempts => {
                    warn!("Attempt {}/{} failed: {}; retrying", attempt, attempts, e);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        log_summary(&report);

        let path = self.store.save(&report)?;
        info!("Report saved for locale {}: {}", report.locale, path.display());
        Ok(report)
    }

    async fn attempt<D: PageDriver>(
        &self,
        driver: &mut D,
        checker: &LinkChecker,
        pages: &[String],
        selector: &Selector,
    ) -> Result<Report> {
        let mut aggregator = ReportAggregator::new(
            self.settings.locale.clone(),
            self.settings.environment.clone(),
            self.settings.platform.clone(),
        );

        for page in pages {
            driver.visit(page).await?;
            aggregator.record_page();

            let page_url = driver.current_url().unwrap_or(page.as_str()).to_string();
            let candidates = driver.find_link_candidates(selector)?;
            info!(
                "Found {} elements matching {} on {}",
                candidates.len(),
                selector,
                page_url
            );

            let mut targets = Vec::new();
            for candidate in &candidates {
                match classify(candidate, &page_url) {
                    Classification::Skipped(reason) => {
                        aggregator.record_skip();
                        info!("Skipped ({}): {}", reason, candidate.text);
                    }
                    Classification::Eligible { url, page } => {
                        aggregator.record_eligible();
                        targets.push((url, page));
                    }
                }
            }

            let mut checks = stream::iter(targets)
                .map(|(url, page)| async move {
                    let result = checker.check(&url).await;
                    (url, page, result)
                })
                .buffer_unordered(self.settings.max_concurrent_requests.max(1));

            while let Some((url, page, result)) = checks.next().await {
                let outcome = LinkOutcome {
                    page,
                    url,
                    status: result.status,
                    response_time: result.response_time_ms,
                };
                aggregator.record_outcome(outcome, classify_status(result.status));
            }

            let snapshot = aggregator.snapshot();
            info!(
                "Page done: {} links, {} ok, {} broken, {} skipped",
                snapshot.total_links, snapshot.success_count, snapshot.broken_count, snapshot.skipped
            );
        }

        Ok(aggregator.finalize())
    }
}

fn log_summary(report: &Report) {
    info!("───────────────────────────────");
    info!("Link Validation Summary");
    info!("Platform: {}", report.platform);
    info!("Locale: {}", report.locale);
    info!("Environment: {}", report.environment);
    info!("Total Links: {}", report.total_links);
    info!("Successfully validated: {}", report.success_count);
    info!("Broken Links: {}", report.broken_count());
    info!("Skipped: {}", report.skipped);
    info!("───────────────────────────────");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use linkprobe_core::LinkCandidate;
    use tempfile::TempDir;

    /// Serves canned candidates; fails the first `failures` visits.
    struct ScriptedDriver {
        candidates: Vec<LinkCandidate>,
        failures: u32,
        visits: u32,
        current: Option<String>,
    }

    impl ScriptedDriver {
        fn new(candidates: Vec<LinkCandidate>, failures: u32) -> Self {
            Self {
                candidates,
                failures,
                visits: 0,
                current: None,
            }
        }
    }

    #[async_trait]
    impl PageDriver for ScriptedDriver {
        async fn visit(&mut self, url: &str) -> Result<()> {
            self.visits += 1;
            if self.visits <= self.failures {
                return Err(ValidatorError::PageLoad {
                    url: url.to_string(),
                    message: "connection reset".to_string(),
                });
            }
            self.current = Some(url.to_string());
            Ok(())
        }

        fn current_url(&self) -> Option<&str> {
            self.current.as_deref()
        }

        fn find_link_candidates(&self, _selector: &Selector) -> Result<Vec<LinkCandidate>> {
            Ok(self.candidates.clone())
        }
    }

    fn skipped_only() -> Vec<LinkCandidate> {
        vec![
            LinkCandidate::unanchored("Orphan"),
            LinkCandidate::anchored("", "Empty"),
            LinkCandidate::anchored("mailto:a@b.c", "Mail"),
        ]
    }

    fn settings(retries: u32) -> RunSettings {
        RunSettings {
            locale: "en-IN".to_string(),
            environment: "Production".to_string(),
            run_retries: retries,
            ..RunSettings::default()
        }
    }

    #[tokio::test]
    async fn test_skips_only_run_is_saved() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path());
        let run = ValidationRun::new(settings(0), store.clone());
        let mut driver = ScriptedDriver::new(skipped_only(), 0);
        let checker = LinkChecker::new(1).unwrap();
        let pages = vec!["https://example.com/".to_string()];

        let report = run
            .execute(&mut driver, &checker, &pages, &Selector::parse("a").unwrap())
            .await
            .unwrap();

        assert_eq!(report.skipped, 3);
        assert_eq!(report.total_links, 0);
        assert_eq!(report.pages_scanned, 1);
        assert_eq!(store.load("en-IN").unwrap(), report);
    }

    #[tokio::test]
    async fn test_page_failure_is_retried() {
        let dir = TempDir::new().unwrap();
        let run = ValidationRun::new(settings(1), ReportStore::new(dir.path()));
        let mut driver = ScriptedDriver::new(skipped_only(), 1);
        let checker = LinkChecker::new(1).unwrap();
        let pages = vec!["https://example.com/".to_string()];

        let report = run
            .execute(&mut driver, &checker, &pages, &Selector::parse("a").unwrap())
            .await
            .unwrap();

        assert_eq!(driver.visits, 2);
        assert_eq!(report.skipped, 3);
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::new(dir.path());
        let run = ValidationRun::new(settings(1), store.clone());
        let mut driver = ScriptedDriver::new(skipped_only(), 5);
        let checker = LinkChecker::new(1).unwrap();
        let pages = vec!["https://example.com/".to_string()];

        let err = run
            .execute(&mut driver, &checker, &pages, &Selector::parse("a").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, ValidatorError::PageLoad { .. }));
        assert_eq!(driver.visits, 2);
        assert!(!store.exists("en-IN"));
    }

    #[tokio::test]
    async fn test_no_pages() {
        let dir = TempDir::new().unwrap();
        let run = ValidationRun::new(settings(0), ReportStore::new(dir.path()));
        let mut driver = ScriptedDriver::new(Vec::new(), 0);
        let checker = LinkChecker::new(1).unwrap();

        let err = run
            .execute(&mut driver, &checker, &[], &Selector::parse("a").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ValidatorError::NoPages));
    }

    #[tokio::test]
    async fn test_pages_are_counted() {
        let dir = TempDir::new().unwrap();
        let run = ValidationRun::new(settings(0), ReportStore::new(dir.path()));
        let mut driver = ScriptedDriver::new(skipped_only(), 0);
        let checker = LinkChecker::new(1).unwrap();
        let pages = vec![
            "https://example.com/".to_string(),
            "https://example.com/about".to_string(),
        ];

        let report = run
            .execute(&mut driver, &checker, &pages, &Selector::parse("a").unwrap())
            .await
            .unwrap();

        assert_eq!(report.pages_scanned, 2);
        assert_eq!(report.skipped, 6);
    }
}
