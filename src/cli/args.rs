//! CLI argument parsing
//!
//! ```text
//! linkprobe [--config FILE] [--verbose] [--log-json] <mode>
//!
//! MODES:
//!   validate   Scan pages and save the locale report
//!   serve      Start the report server
//!   insights   Print insights for a stored report
//! ```

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::{Error, Result};
use crate::config::AppConfig;

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "linkprobe", version, about = "Per-locale link validation and reporting")]
pub struct Args {
    /// Configuration file (defaults to ./linkprobe.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON log lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub mode: Mode,
}

/// CLI modes
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Mode {
    /// Validate links on one or more pages and save the report
    Validate(ValidateArgs),

    /// Serve stored reports over HTTP
    Serve(ServeArgs),

    /// Print insights for a stored report
    Insights {
        /// Locale of the stored report
        locale: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, ClapArgs)]
pub struct ValidateArgs {
    /// Page to scan (repeatable)
    #[arg(long = "base-url", value_name = "URL")]
    pub base_urls: Vec<String>,

    #[arg(long)]
    pub locale: Option<String>,

    #[arg(long)]
    pub environment: Option<String>,

    #[arg(long)]
    pub platform: Option<String>,

    /// Selector for link elements, e.g. `a` or `span.menu-label`
    #[arg(long)]
    pub selector: Option<String>,

    #[arg(long, value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Per-link request timeout
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    #[arg(long, value_name = "N")]
    pub max_concurrent_requests: Option<usize>,

    #[arg(long, value_name = "N")]
    pub run_retries: Option<u32>,

    /// Print the saved report as JSON on stdout
    #[arg(long)]
    pub json_summary: bool,
}

impl ValidateArgs {
    /// Flags win over file and environment values.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if !self.base_urls.is_empty() {
            config.run.base_urls = self.base_urls.clone();
        }
        if let Some(locale) = &self.locale {
            config.run.locale = locale.clone();
        }
        if let Some(environment) = &self.environment {
            config.run.environment = environment.clone();
        }
        if let Some(platform) = &self.platform {
            config.run.platform = platform.clone();
        }
        if let Some(selector) = &self.selector {
            config.run.selector = selector.clone();
        }
        if let Some(dir) = &self.reports_dir {
            config.reports_dir = dir.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.run.link_timeout_secs = secs;
        }
        if let Some(n) = self.max_concurrent_requests {
            config.run.max_concurrent_requests = n;
        }
        if let Some(n) = self.run_retries {
            config.run.run_retries = n;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, ClapArgs)]
pub struct ServeArgs {
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long, value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Static dashboard files to serve at `/`
    #[arg(long, value_name = "DIR")]
    pub dashboard_dir: Option<PathBuf>,
}

impl ServeArgs {
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(dir) = &self.reports_dir {
            config.reports_dir = dir.clone();
        }
        if let Some(dir) = &self.dashboard_dir {
            config.server.dashboard_dir = Some(dir.clone());
        }
    }
}

/// Parse CLI arguments; the first item is the program name.
pub fn parse_args<I, T>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Args::try_parse_from(args).map_err(|e| Error::InvalidArgs(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_flags() {
        let args = parse_args([
            "linkprobe",
            "validate",
            "--base-url",
            "https://example.com/",
            "--base-url",
            "https://example.com/about",
            "--locale",
            "en-IN",
            "--json-summary",
            "--verbose",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.mode {
            Mode::Validate(v) => {
                assert_eq!(v.base_urls.len(), 2);
                assert_eq!(v.locale.as_deref(), Some("en-IN"));
                assert!(v.json_summary);
                assert_eq!(v.timeout_secs, None);
            }
            other => panic!("unexpected mode: {:?}", other),
        }
    }

    #[test]
    fn test_serve_flags() {
        let args = parse_args(["linkprobe", "--config", "lp.toml", "serve", "--port", "8080"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("lp.toml")));
        assert_eq!(
            args.mode,
            Mode::Serve(ServeArgs {
                port: Some(8080),
                ..ServeArgs::default()
            })
        );
    }

    #[test]
    fn test_insights_requires_locale() {
        assert!(parse_args(["linkprobe", "insights"]).is_err());
        let args = parse_args(["linkprobe", "insights", "fr-FR"]).unwrap();
        assert_eq!(
            args.mode,
            Mode::Insights {
                locale: "fr-FR".to_string()
            }
        );
    }

    #[test]
    fn test_missing_mode_is_error() {
        assert!(matches!(parse_args(["linkprobe"]), Err(Error::InvalidArgs(_))));
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = AppConfig::default();
        ValidateArgs {
            locale: Some("de-DE".to_string()),
            timeout_secs: Some(5),
            ..ValidateArgs::default()
        }
        .apply_to(&mut config);
        assert_eq!(config.run.locale, "de-DE");
        assert_eq!(config.run.link_timeout_secs, 5);
        assert_eq!(config.run.environment, "Development");

        ServeArgs {
            dashboard_dir: Some(PathBuf::from("ui")),
            ..ServeArgs::default()
        }
        .apply_to(&mut config);
        assert_eq!(config.server.dashboard_dir, Some(PathBuf::from("ui")));
    }
}
