/// ============================================================
///  PV Module Sizing Engine
///
///  Two independent stages:
///   1. Module performance – panel area, average temperature
///                           derating, area-normalised power and
///                           annual yield under the loss chain
///   2. Site layout        – whole modules that fit a rectangular
///                           site for one uniform orientation
///
///  Both stages are pure: no I/O, no state, same input → same
///  bit-identical output.
/// ============================================================

use thiserror::Error;

use crate::models::sizing::{
    DeratingFactors, LayoutResult, ModuleSpec, Orientation, PerformanceResult, SiteLayout,
};

// ─── Constants ───────────────────────────────────────────────
const DAYS_PER_YEAR: f64 = 365.0;
const WH_PER_KWH: f64 = 1000.0;
/// Quotients are rounded to this many decimals before flooring so that an
/// exact fit such as 3.3 / 1.1 is not undercounted.
const FLOOR_DECIMALS: i32 = 9;

// ─── Errors ──────────────────────────────────────────────────

/// Which denominator or dimension was not strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFault {
    ModuleLength,
    ModuleWidth,
    PanelArea,
    WidthFootprint,
    LengthFootprint,
    SiteWidth,
    SiteLength,
}

impl std::fmt::Display for GeometryFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self {
            GeometryFault::ModuleLength => "module length must be positive",
            GeometryFault::ModuleWidth => "module width must be positive",
            GeometryFault::PanelArea => "panel area must be positive",
            GeometryFault::WidthFootprint => "module width plus gap must be positive",
            GeometryFault::LengthFootprint => "module length plus gap must be positive",
            GeometryFault::SiteWidth => "site width must be positive",
            GeometryFault::SiteLength => "site length must be positive",
        };
        f.write_str(what)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SizingError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(GeometryFault),
}

/// NaN fails this check as well as zero and negatives.
fn require_positive(value: f64, fault: GeometryFault) -> Result<f64, SizingError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SizingError::InvalidGeometry(fault))
    }
}

// ─── Stage 1: module performance ─────────────────────────────

/// Area-normalised output of one module under the derating chain.
///
/// Only the panel area is validated; every other input is evaluated as given,
/// including physically meaningless factors.
pub fn compute_module_performance(
    module: &ModuleSpec,
    derating: &DeratingFactors,
) -> Result<PerformanceResult, SizingError> {
    require_positive(module.length_m, GeometryFault::ModuleLength)?;
    require_positive(module.width_m, GeometryFault::ModuleWidth)?;
    // Underflow of two tiny positive sides still yields zero.
    let panel_area_m2 = require_positive(module.length_m * module.width_m, GeometryFault::PanelArea)?;

    let temp_derate_factor = 1.0
        + (derating.temp_coef_pct_per_c / 100.0) * (derating.module_temp_c - derating.ref_temp_c);

    let power_density_w_per_m2 = (module.rated_power_w
        * derating.mismatch
        * temp_derate_factor
        * derating.degradation)
        / panel_area_m2;

    // Base energy, then mismatch, temperature, soiling, degradation,
    // shading, cable loss and inverter loss.
    let yearly_energy_wh_per_m2 = ((derating.peak_sun_hours * DAYS_PER_YEAR)
        * module.rated_power_w
        * derating.mismatch
        * temp_derate_factor
        * derating.soiling
        * derating.degradation
        * derating.shading
        * derating.cable_eff
        * derating.inverter_eff)
        / panel_area_m2;

    Ok(PerformanceResult {
        panel_area_m2,
        temp_derate_factor,
        power_density_w_per_m2,
        yearly_energy_wh_per_m2,
        yearly_energy_kwh_per_m2: yearly_energy_wh_per_m2 / WH_PER_KWH,
    })
}

// ─── Stage 2: site layout ────────────────────────────────────

/// Whole modules of `footprint` that fit along `span`.
fn whole_modules(span: f64, footprint: f64) -> u64 {
    let quotient = span / footprint;
    let scale = 10f64.powi(FLOOR_DECIMALS);
    let scaled = quotient * scale;
    let rounded = if scaled.is_finite() { scaled.round() / scale } else { quotient };
    // `as` saturates: negatives and NaN map to 0, overflow to u64::MAX.
    rounded.floor().max(0.0) as u64
}

/// Largest axis-aligned grid of identically oriented modules on the site.
pub fn compute_site_layout(layout: &SiteLayout) -> Result<LayoutResult, SizingError> {
    let width_footprint = require_positive(
        layout.module_width_m + layout.gap_m,
        GeometryFault::WidthFootprint,
    )?;
    let length_footprint = require_positive(
        layout.module_length_m + layout.gap_m,
        GeometryFault::LengthFootprint,
    )?;
    let site_width = require_positive(layout.site_width_m, GeometryFault::SiteWidth)?;
    let site_length = require_positive(layout.site_length_m, GeometryFault::SiteLength)?;

    let (up_footprint, across_footprint) = match layout.orientation {
        Orientation::Landscape => (width_footprint, length_footprint),
        Orientation::Portrait => (length_footprint, width_footprint),
    };

    let modules_up = whole_modules(site_width, up_footprint);
    let modules_across = whole_modules(site_length, across_footprint);

    Ok(LayoutResult {
        modules_up,
        modules_across,
        modules_total: modules_up.saturating_mul(modules_across),
    })
}
