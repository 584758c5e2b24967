//! API Handlers Module
//!
//! This module contains the request handlers for the report API.

use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use linkprobe_core::{
    now_timestamp, parse_locale_list, summarize, Comparison, Report, ReportStore, StoreError,
};
use linkprobe_insights::InsightGenerator;

use crate::error::ApiError;
use crate::models::{ErrorBody, HealthResponse, InsightResponse, SummaryResponse};

/// Represents the state of the API server
pub struct ApiState {
    /// Report persistence
    pub store: ReportStore,
    /// Insight generator, AI-backed when a credential is configured
    pub insights: InsightGenerator,
}

impl ApiState {
    pub fn new(store: ReportStore, insights: InsightGenerator) -> Self {
        Self { store, insights }
    }
}

/// Health check endpoint
#[debug_handler]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Report server running".to_string(),
        timestamp: now_timestamp(),
    })
}

/// Get the stored report for one locale
#[debug_handler]
pub async fn get_report(
    State(state): State<Arc<ApiState>>,
    Path(locale): Path<String>,
) -> Result<Json<Report>, ApiError> {
    tracing::debug!("Getting report: {}", locale);

    state
        .store
        .load(&locale)
        .map(Json)
        .map_err(|e| ApiError::from_store(e, "Failed to read report"))
}

/// Summary across every stored report
#[debug_handler]
pub async fn get_summary(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<SummaryResponse>, ApiError> {
    if !state.store.is_available() {
        tracing::debug!(
            "Reports directory {} does not exist",
            state.store.dir().display()
        );
        return Ok(Json(SummaryResponse::no_reports()));
    }

    let reports = state
        .store
        .load_all()
        .map_err(|e| ApiError::internal("Failed to generate summary", e))?;

    Ok(Json(SummaryResponse::Summary(summarize(&reports))))
}

/// Reports for a comma-separated list of locales; absent ones are omitted
#[debug_handler]
pub async fn compare_locales(
    State(state): State<Arc<ApiState>>,
    Path(raw): Path<String>,
) -> Result<Json<Comparison>, ApiError> {
    let locales = parse_locale_list(&raw);
    tracing::debug!("Comparing locales: {:?}", locales);

    let mut reports = Vec::new();
    for locale in &locales {
        match state.store.load(locale) {
            Ok(report) => reports.push(report),
            Err(StoreError::NotFound(_)) | Err(StoreError::InvalidLocale(_)) => continue,
            Err(e) => return Err(ApiError::internal("Failed to compare locales", e)),
        }
    }

    Ok(Json(Comparison {
        locales_compared: locales,
        reports,
    }))
}

/// Insights for one stored report
#[debug_handler]
pub async fn get_insights(
    State(state): State<Arc<ApiState>>,
    Path(locale): Path<String>,
) -> Result<Json<InsightResponse>, ApiError> {
    let report = state
        .store
        .load(&locale)
        .map_err(|e| ApiError::from_store(e, "Failed to generate insights"))?;

    let insights = state.insights.generate(&report).await;
    Ok(Json(InsightResponse { locale, insights }))
}

/// Fallback for unknown routes
pub async fn route_not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Route not found".to_string(),
        }),
    )
}
