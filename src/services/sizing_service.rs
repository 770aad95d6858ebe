use chrono::Utc;
use tracing::{debug, warn};

use crate::models::sizing::{
    EnergyUnit, LayoutRequest, LayoutResult, ModuleSpec, PerformanceRequest, PerformanceResult,
    SiteLayout, SizingReport, SizingRequest,
};
use crate::services::sizing_algorithm::{self, SizingError};

/// Fill in layout module dimensions the caller left out from the module being sized.
pub fn resolve_layout(module: &ModuleSpec, layout: &LayoutRequest) -> SiteLayout {
    SiteLayout {
        module_width_m: layout.module_width_m.unwrap_or(module.width_m),
        module_length_m: layout.module_length_m.unwrap_or(module.length_m),
        gap_m: layout.gap_m,
        site_width_m: layout.site_width_m,
        site_length_m: layout.site_length_m,
        orientation: layout.orientation,
    }
}

pub fn module_performance(req: &PerformanceRequest) -> Result<PerformanceResult, SizingError> {
    let result = sizing_algorithm::compute_module_performance(&req.module, &req.derating)
        .inspect_err(|e| warn!(error = %e, "module performance rejected"))?;
    debug!(
        area_m2 = result.panel_area_m2,
        f_temp = result.temp_derate_factor,
        power_w_m2 = result.power_density_w_per_m2,
        yearly_kwh_m2 = result.yearly_energy(EnergyUnit::KwhPerM2Year),
        "module performance computed"
    );
    Ok(result)
}

pub fn site_layout(layout: &SiteLayout) -> Result<LayoutResult, SizingError> {
    let result = sizing_algorithm::compute_site_layout(layout)
        .inspect_err(|e| warn!(error = %e, "site layout rejected"))?;
    debug!(
        orientation = ?layout.orientation,
        up = result.modules_up,
        across = result.modules_across,
        total = result.modules_total,
        "site layout computed"
    );
    Ok(result)
}

/// Both sizing steps for one module: performance first, then the layout
/// with any missing footprint inherited from the module.
pub fn size_installation(req: &SizingRequest) -> Result<SizingReport, SizingError> {
    let performance = module_performance(&PerformanceRequest {
        module: req.module,
        derating: req.derating,
    })?;
    let layout = resolve_layout(&req.module, &req.layout);
    let placement = site_layout(&layout)?;

    Ok(SizingReport {
        timestamp: Utc::now(),
        module: req.module,
        performance,
        layout,
        placement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sizing::{Orientation, SizingDefaults};
    use crate::services::sizing_algorithm::GeometryFault;

    fn default_request() -> SizingRequest {
        let d = SizingDefaults::default();
        SizingRequest { module: d.module, derating: d.derating, layout: d.layout }
    }

    #[test]
    fn test_layout_inherits_module_dimensions() {
        let req = default_request();
        let layout = resolve_layout(&req.module, &req.layout);
        assert_eq!(layout.module_width_m, 1.1);
        assert_eq!(layout.module_length_m, 1.7);
        assert_eq!(layout.orientation, Orientation::Landscape);
    }

    #[test]
    fn test_explicit_layout_dimensions_win() {
        let mut req = default_request();
        req.layout.module_width_m = Some(1.0);
        req.layout.module_length_m = Some(2.0);
        let layout = resolve_layout(&req.module, &req.layout);
        assert_eq!(layout.module_width_m, 1.0);
        assert_eq!(layout.module_length_m, 2.0);
    }

    #[test]
    fn test_size_installation_with_defaults() {
        let report = size_installation(&default_request()).unwrap();
        assert_eq!(report.placement.modules_total, 289);
        assert_eq!(report.module.isc_stc_a, 13.0);
        assert_eq!(report.module.isc_max_inv_a, 15.0);
        assert!((report.performance.temp_derate_factor - 0.93).abs() < 1e-9);
    }

    #[test]
    fn test_either_stage_failure_fails_report() {
        let mut req = default_request();
        req.layout.site_length_m = 0.0;
        assert_eq!(
            size_installation(&req).unwrap_err(),
            SizingError::InvalidGeometry(GeometryFault::SiteLength)
        );

        let mut req = default_request();
        req.module.width_m = 0.0;
        assert_eq!(
            size_installation(&req).unwrap_err(),
            SizingError::InvalidGeometry(GeometryFault::ModuleWidth)
        );
    }
}
