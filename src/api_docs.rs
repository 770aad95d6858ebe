use utoipa::OpenApi;
use crate::controllers::sizing_controller;
use crate::error;
use crate::models::sizing;

#[derive(OpenApi)]
#[openapi(
    paths(
        sizing_controller::compute_sizing,
        sizing_controller::compute_performance,
        sizing_controller::compute_layout,
        sizing_controller::get_defaults,
        sizing_controller::get_health
    ),
    components(
        schemas(
            sizing::ModuleSpec,
            sizing::DeratingFactors,
            sizing::SiteLayout,
            sizing::Orientation,
            sizing::PerformanceResult,
            sizing::EnergyUnit,
            sizing::LayoutResult,
            sizing::PerformanceRequest,
            sizing::LayoutRequest,
            sizing::SizingRequest,
            sizing::SizingReport,
            sizing::SizingDefaults,
            sizing::HealthStatus,
            error::ErrorResponse
        )
    ),
    tags(
        (name = "pv-sizing-tool", description = "Grid-connected PV module sizing API")
    )
)]
pub struct ApiDoc;
