//! CLI mode dispatch
//!
//! Loads configuration, applies the mode's flags and runs it:
//! - validate: scan pages, save the report
//! - serve: start the report server
//! - insights: print insights for a stored report

use tracing::info;

use linkprobe_api::ApiServer;
use linkprobe_core::ReportStore;
use linkprobe_insights::InsightGenerator;

use crate::cli::{
    Args, Error, Mode, Result, ValidateArgs, EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS,
};
use crate::config::AppConfig;
use crate::validator::{HttpPageDriver, LinkChecker, RunSettings, Selector, ValidationRun};

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Run CLI mode and return exit code
pub async fn run_cli_mode(args: Args) -> ExitCode {
    let mut config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return EXIT_CONFIG_ERROR;
        }
    };

    match &args.mode {
        Mode::Validate(flags) => flags.apply_to(&mut config),
        Mode::Serve(flags) => flags.apply_to(&mut config),
        Mode::Insights { .. } => {}
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {:#}", e);
        return EXIT_CONFIG_ERROR;
    }

    match run_mode(args.mode, config).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                Error::Config(_) | Error::InvalidArgs(_) => EXIT_CONFIG_ERROR,
                _ => EXIT_FAILURE,
            }
        }
    }
}

/// Run specific CLI mode against a resolved configuration
pub async fn run_mode(mode: Mode, config: AppConfig) -> Result<()> {
    match mode {
        Mode::Validate(flags) => run_validate_mode(&flags, &config).await,
        Mode::Serve(_) => run_serve_mode(&config).await,
        Mode::Insights { locale } => run_insights_mode(&locale, &config).await,
    }
}

/// Run validate mode
async fn run_validate_mode(flags: &ValidateArgs, config: &AppConfig) -> Result<()> {
    if config.run.base_urls.is_empty() {
        return Err(Error::Config(
            "No pages to validate; pass --base-url or set BASE_URL".to_string(),
        ));
    }
    let selector =
        Selector::parse(&config.run.selector).map_err(|e| Error::Config(e.to_string()))?;

    let mut driver = HttpPageDriver::new(config.run.page_timeout_secs)?;
    let checker = LinkChecker::new(config.run.link_timeout_secs)?;
    let settings = RunSettings {
        locale: config.run.locale.clone(),
        environment: config.run.environment.clone(),
        platform: config.run.platform.clone(),
        max_concurrent_requests: config.run.max_concurrent_requests,
        run_retries: config.run.run_retries,
    };

    info!(
        "Validating {} page(s) for {} ({})",
        config.run.base_urls.len(),
        settings.locale,
        settings.environment
    );
    let run = ValidationRun::new(settings, ReportStore::new(&config.reports_dir));
    let report = run
        .execute(&mut driver, &checker, &config.run.base_urls, &selector)
        .await?;

    if flags.json_summary {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

/// Run serve mode
async fn run_serve_mode(config: &AppConfig) -> Result<()> {
    let insights = InsightGenerator::from_config(&config.insight_config());
    let server = ApiServer::new(config.api_config(), insights);
    server
        .start()
        .await
        .map_err(|e| Error::Server(format!("{:#}", e)))
}

/// Run insights mode
async fn run_insights_mode(locale: &str, config: &AppConfig) -> Result<()> {
    let store = ReportStore::new(&config.reports_dir);
    let report = store.load(locale)?;

    let generator = InsightGenerator::from_config(&config.insight_config());
    let insight = generator.generate(&report).await;
    println!("{}", serde_json::to_string_pretty(&insight)?);
    Ok(())
}
