//! API Models Module
//!
//! Configuration and response bodies for the report API.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use linkprobe_core::{Insight, Summary};

/// API server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Listen address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Directory holding `<locale>.json` reports
    pub reports_dir: PathBuf,
    /// Static dashboard files served at `/`, if any
    pub dashboard_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            reports_dir: PathBuf::from("reports"),
            dashboard_dir: None,
        }
    }
}

/// `{error}` body used by every failing route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Summary endpoint body. Degrades to a message when the reports directory
/// is missing altogether.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SummaryResponse {
    Summary(Summary),
    NoReports {
        message: String,
        locales: Vec<String>,
    },
}

impl SummaryResponse {
    pub fn no_reports() -> Self {
        SummaryResponse::NoReports {
            message: "No reports found".to_string(),
            locales: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightResponse {
    pub locale: String,
    pub insights: Insight,
}
