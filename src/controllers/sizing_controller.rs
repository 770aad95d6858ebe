use axum::{extract::State, Json};

use crate::error::{ApiError, ErrorResponse};
use crate::models::sizing::{
    HealthStatus, LayoutResult, PerformanceRequest, PerformanceResult, SiteLayout, SizingDefaults,
    SizingReport, SizingRequest,
};
use crate::services::sizing_service;
use crate::shared_state::AppState;

/// POST /api/sizing/performance
/// Module performance under derating
///
/// Returns panel area, average temperature derating, area-normalised power
/// and annual yield in both Wh/m²/year and kWh/m²/year.
#[utoipa::path(
    post,
    path = "/api/sizing/performance",
    request_body = PerformanceRequest,
    responses(
        (status = 200, description = "Module performance", body = PerformanceResult),
        (status = 422, description = "Module length or width is not positive", body = ErrorResponse)
    )
)]
pub async fn compute_performance(
    Json(req): Json<PerformanceRequest>,
) -> Result<Json<PerformanceResult>, ApiError> {
    Ok(Json(sizing_service::module_performance(&req)?))
}

/// POST /api/sizing/layout
/// Whole modules that fit a rectangular site
#[utoipa::path(
    post,
    path = "/api/sizing/layout",
    request_body = SiteLayout,
    responses(
        (status = 200, description = "Module grid on the site", body = LayoutResult),
        (status = 422, description = "Footprint or site dimension is not positive", body = ErrorResponse)
    )
)]
pub async fn compute_layout(
    Json(layout): Json<SiteLayout>,
) -> Result<Json<LayoutResult>, ApiError> {
    Ok(Json(sizing_service::site_layout(&layout)?))
}

/// POST /api/sizing
/// Full sizing report
///
/// Runs module performance and site layout together. Layout module
/// dimensions that are omitted are taken from the module.
#[utoipa::path(
    post,
    path = "/api/sizing",
    request_body = SizingRequest,
    responses(
        (status = 200, description = "Performance and layout for the module", body = SizingReport),
        (status = 422, description = "Invalid geometry in either step", body = ErrorResponse)
    )
)]
pub async fn compute_sizing(
    Json(req): Json<SizingRequest>,
) -> Result<Json<SizingReport>, ApiError> {
    Ok(Json(sizing_service::size_installation(&req)?))
}

/// GET /api/sizing/defaults
/// Suggested form values
#[utoipa::path(
    get,
    path = "/api/sizing/defaults",
    responses(
        (status = 200, description = "Configured default inputs", body = SizingDefaults)
    )
)]
pub async fn get_defaults(State(state): State<AppState>) -> Json<SizingDefaults> {
    Json(state.defaults.as_ref().clone())
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health", body = HealthStatus)
    )
)]
pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
