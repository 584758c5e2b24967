//! Report Store
//!
//! One pretty-printed JSON file per locale, `<dir>/<locale>.json`. Saves go
//! through a temporary file in the same directory followed by a rename, so
//! readers never observe a partially written report.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::model::Report;

const REPORT_EXTENSION: &str = "json";

/// Report store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No report found for locale: {0}")]
    NotFound(String),

    #[error("Report for locale {locale} is corrupt: {source}")]
    Corrupt {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid locale identifier: {0:?}")]
    InvalidLocale(String),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the reports directory exists at all
    pub fn is_available(&self) -> bool {
        self.dir.is_dir()
    }

    /// Path of the report file for `locale`
    pub fn path_for(&self, locale: &str) -> Result<PathBuf, StoreError> {
        validate_locale(locale)?;
        Ok(self.dir.join(format!("{locale}.{REPORT_EXTENSION}")))
    }

    pub fn exists(&self, locale: &str) -> bool {
        self.path_for(locale).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Write `report` under its locale, replacing any earlier report for the
    /// same locale.
    pub fn save(&self, report: &Report) -> Result<PathBuf, StoreError> {
        let path = self.path_for(&report.locale)?;
        let content = serde_json::to_string_pretty(report).map_err(StoreError::Serialize)?;

        fs::create_dir_all(&self.dir)?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".report-")
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;

        info!("Report saved: {}", path.display());
        Ok(path)
    }

    pub fn load(&self, locale: &str) -> Result<Report, StoreError> {
        let path = self.path_for(locale)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(locale.to_string()));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        debug!("Loaded report file {}", path.display());
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            locale: locale.to_string(),
            source,
        })
    }

    /// Locales with a stored report, sorted. A missing directory is empty.
    pub fn list_all(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let mut locales = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(REPORT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                locales.push(stem.to_string());
            }
        }

        locales.sort();
        Ok(locales)
    }

    /// Every stored report, in locale order.
    pub fn load_all(&self) -> Result<Vec<Report>, StoreError> {
        self.list_all()?
            .iter()
            .map(|locale| self.load(locale))
            .collect()
    }
}

fn validate_locale(locale: &str) -> Result<(), StoreError> {
    if locale.is_empty()
        || locale.contains(&['/', '\\'][..])
        || locale.contains("..")
        || locale.contains('\0')
    {
        return Err(StoreError::InvalidLocale(locale.to_string()));
    }
    Ok(())
}
