//! API Server Module
//!
//! This module contains the server setup functionality for the report API.

use anyhow::Result;
use axum::{handler::HandlerWithoutStateExt, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

use linkprobe_core::ReportStore;
use linkprobe_insights::InsightGenerator;

use crate::error::panic_response;
use crate::handlers::{
    compare_locales, get_insights, get_report, get_summary, health_check, route_not_found,
    ApiState,
};
use crate::models::ApiConfig;

/// Main API server
pub struct ApiServer {
    /// Server configuration
    config: ApiConfig,
    /// Shared state
    state: Arc<ApiState>,
}

impl ApiServer {
    /// Create a new API server over the configured reports directory
    pub fn new(config: ApiConfig, insights: InsightGenerator) -> Self {
        let store = ReportStore::new(config.reports_dir.clone());
        let state = Arc::new(ApiState::new(store, insights));
        Self { config, state }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Build the application router with the shared state
    pub fn router(&self) -> Router {
        let api = Router::new()
            .route("/api/reports", get(get_summary))
            .route("/api/reports/compare/:locales", get(compare_locales))
            .route("/api/reports/:locale", get(get_report))
            .route("/api/reports/:locale/insights", get(get_insights))
            .route("/health", get(health_check))
            .with_state(self.state.clone());

        let app = match &self.config.dashboard_dir {
            Some(dir) => {
                let assets = ServeDir::new(dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(route_not_found.into_service());
                api.fallback_service(assets)
            }
            None => api.fallback(route_not_found),
        };

        app.layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(CatchPanicLayer::custom(panic_response))
    }

    /// Start the API server
    pub async fn start(&self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        info!("Starting report server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;
        info!(
            "Report server listening on {}",
            listener.local_addr().map(|a| a.to_string()).unwrap_or(addr)
        );
        if let Some(dir) = &self.config.dashboard_dir {
            info!("Serving dashboard from {}", dir.display());
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start API server: {}", e))?;

        info!("Report server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
