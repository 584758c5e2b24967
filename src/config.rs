//! Application configuration
//!
//! Precedence, lowest first: built-in defaults, the TOML file, environment
//! variables, command-line flags (applied by the CLI dispatcher).

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use linkprobe_api::ApiConfig;
use linkprobe_insights::InsightConfig;

/// File picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "linkprobe.toml";

/// Report server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dashboard_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            dashboard_dir: None,
        }
    }
}

/// Validation run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Pages to scan, in order
    pub base_urls: Vec<String>,
    pub locale: String,
    pub environment: String,
    pub platform: String,
    /// Selector for the link elements on each page
    pub selector: String,
    /// Per-link request timeout
    pub link_timeout_secs: u64,
    /// Page load timeout
    pub page_timeout_secs: u64,
    pub max_concurrent_requests: usize,
    /// Extra attempts for the whole run when a page fails to load
    pub run_retries: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_urls: Vec::new(),
            locale: "en-US".to_string(),
            environment: "Development".to_string(),
            platform: "Web".to_string(),
            selector: "a".to_string(),
            link_timeout_secs: 20,
            page_timeout_secs: 60,
            max_concurrent_requests: 16,
            run_retries: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding one `<locale>.json` per locale
    pub reports_dir: PathBuf,
    pub server: ServerConfig,
    pub run: RunConfig,
    pub insights: InsightConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports"),
            server: ServerConfig::default(),
            run: RunConfig::default(),
            insights: InsightConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] when present, then
    /// apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {:?}: {}", path, e))?;
        let config = Self::from_toml(&content)
            .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path, e))?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| anyhow!("{}", e))
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = parse_var(&lookup, "PORT") {
            self.server.port = port;
            debug!("Applied env override for port");
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
            debug!("Applied env override for host");
        }
        if let Some(dir) = lookup("REPORTS_DIR") {
            self.reports_dir = PathBuf::from(dir);
            debug!("Applied env override for reports directory");
        }
        if let Some(dir) = lookup("DASHBOARD_DIR") {
            self.server.dashboard_dir = Some(PathBuf::from(dir));
            debug!("Applied env override for dashboard directory");
        }

        if let Some(urls) = lookup("BASE_URL") {
            self.run.base_urls = split_url_list(&urls);
            debug!("Applied env override for base URL");
        }
        if let Some(locale) = lookup("LOCALE") {
            self.run.locale = locale;
            debug!("Applied env override for locale");
        }
        if let Some(environment) = lookup("ENVIRONMENT") {
            self.run.environment = environment;
            debug!("Applied env override for environment");
        }
        if let Some(platform) = lookup("PLATFORM") {
            self.run.platform = platform;
            debug!("Applied env override for platform");
        }
        if let Some(selector) = lookup("LINK_SELECTOR") {
            self.run.selector = selector;
            debug!("Applied env override for link selector");
        }
        if let Some(secs) = parse_var(&lookup, "LINK_TIMEOUT_SECS") {
            self.run.link_timeout_secs = secs;
            debug!("Applied env override for link timeout");
        }
        if let Some(n) = parse_var(&lookup, "MAX_CONCURRENT_REQUESTS") {
            self.run.max_concurrent_requests = n;
            debug!("Applied env override for max concurrent requests");
        }
        if let Some(n) = parse_var(&lookup, "RUN_RETRIES") {
            self.run.run_retries = n;
            debug!("Applied env override for run retries");
        }

        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.insights.api_key = Some(key);
            debug!("Applied env override for OpenAI API key");
        }
        if let Some(base_url) = lookup("OPENAI_BASE_URL") {
            self.insights.base_url = base_url;
            debug!("Applied env override for OpenAI base URL");
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            self.insights.model = model;
            debug!("Applied env override for OpenAI model");
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow!("Port must be greater than 0"));
        }
        if self.run.link_timeout_secs == 0 {
            return Err(anyhow!("Link timeout must be greater than 0"));
        }
        if self.run.page_timeout_secs == 0 {
            return Err(anyhow!("Page timeout must be greater than 0"));
        }
        if self.run.max_concurrent_requests == 0 {
            return Err(anyhow!("Max concurrent requests must be greater than 0"));
        }
        if self.run.selector.trim().is_empty() {
            return Err(anyhow!("Link selector must not be empty"));
        }
        Ok(())
    }

    /// Explicit insight settings; the generator never reads the environment.
    pub fn insight_config(&self) -> InsightConfig {
        self.insights.clone()
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            reports_dir: self.reports_dir.clone(),
            dashboard_dir: self.server.dashboard_dir.clone(),
        }
    }
}

/// Comma-separated URLs, trimmed, blanks dropped
fn split_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.reports_dir, PathBuf::from("reports"));
        assert_eq!(config.run.locale, "en-US");
        assert_eq!(config.run.environment, "Development");
        assert_eq!(config.run.platform, "Web");
        assert_eq!(config.run.link_timeout_secs, 20);
        assert_eq!(config.run.run_retries, 1);
        assert!(!config.insights.ai_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = AppConfig::from_toml(
            r#"
reports_dir = "out/reports"

[server]
port = 8080

[run]
base_urls = ["https://example.com/"]
locale = "en-IN"
environment = "Production"

[insights]
model = "gpt-4o-mini"
"#,
        )
        .unwrap();

        assert_eq!(config.reports_dir, PathBuf::from("out/reports"));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.run.base_urls, vec!["https://example.com/"]);
        assert_eq!(config.run.locale, "en-IN");
        assert_eq!(config.run.selector, "a");
        assert_eq!(config.insights.model, "gpt-4o-mini");
        assert_eq!(config.insights.max_tokens, 500);
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        assert!(AppConfig::from_toml("[server]\nport = \"high\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides_from(lookup(&[
            ("PORT", "4000"),
            ("REPORTS_DIR", "/tmp/reports"),
            ("BASE_URL", "https://a.example/, https://b.example/,"),
            ("LOCALE", "fr-FR"),
            ("ENVIRONMENT", "Staging"),
            ("OPENAI_API_KEY", "sk-env"),
            ("MAX_CONCURRENT_REQUESTS", "4"),
        ]));

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.reports_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(
            config.run.base_urls,
            vec!["https://a.example/", "https://b.example/"]
        );
        assert_eq!(config.run.locale, "fr-FR");
        assert_eq!(config.run.environment, "Staging");
        assert_eq!(config.run.max_concurrent_requests, 4);
        assert!(config.insight_config().ai_enabled());
    }

    #[test]
    fn test_invalid_env_number_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides_from(lookup(&[("PORT", "not-a-port"), ("RUN_RETRIES", "-1")]));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.run.run_retries, 1);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.run.link_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.run.max_concurrent_requests = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_config() {
        let mut config = AppConfig::default();
        config.server.dashboard_dir = Some(PathBuf::from("ui"));
        let api = config.api_config();
        assert_eq!(api.port, 3000);
        assert_eq!(api.reports_dir, PathBuf::from("reports"));
        assert_eq!(api.dashboard_dir, Some(PathBuf::from("ui")));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[run]\nplatform = \"Mobile\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.run.platform, "Mobile");

        assert!(AppConfig::from_file(&dir.path().join("missing.toml")).is_err());
    }
}
