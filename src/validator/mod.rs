//! Link validation run
//!
//! A [`PageDriver`] loads each page and yields link candidates, a
//! [`LinkChecker`] resolves each eligible link to a status, and
//! [`ValidationRun`] aggregates everything into one saved report.

pub mod checker;
pub mod page;
pub mod run;
pub mod selector;

pub use checker::{CheckResult, LinkChecker};
pub use page::{HttpPageDriver, PageDriver};
pub use run::{RunSettings, ValidationRun};
pub use selector::Selector;

use linkprobe_core::StoreError;

/// Validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    #[error("Failed to load page {url}: {message}")]
    PageLoad { url: String, message: String },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("No page has been visited")]
    NoPageLoaded,

    #[error("No pages to validate")]
    NoPages,

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Failed to save report: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
