//! LinkProbe Core Module
//!
//! The core module holds the link-validation pipeline that does not depend on
//! a browser, an HTTP client, or a server: the report data model, link and
//! status classification, per-run aggregation, and the JSON-per-locale
//! report store.

pub mod aggregator;
pub mod classifier;
pub mod model;
pub mod store;
pub mod summary;

pub use aggregator::{AggregatorSnapshot, ReportAggregator};
pub use classifier::{
    classify, classify_status, is_absolute_http, Classification, LinkCandidate, SkipReason,
    StatusClass, SUCCESS_STATUSES,
};
pub use model::{
    AverageSuccessRate, Comparison, Insight, LinkOutcome, LocaleSummary, Report, Severity,
    Summary, NO_STATUS,
};
pub use model::now_timestamp;
pub use store::{ReportStore, StoreError};
pub use summary::{format_rate, parse_locale_list, summarize};
