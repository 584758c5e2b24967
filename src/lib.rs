//! LinkProbe: per-locale link validation with stored reports
//!
//! Scans pages for link elements, checks every eligible link, saves one
//! report per locale and serves the reports, summaries and insights over
//! HTTP.

pub mod cli;
pub mod config;
pub mod logging;
pub mod validator;

pub use config::AppConfig;
pub use validator::{HttpPageDriver, LinkChecker, PageDriver, RunSettings, Selector, ValidationRun};
