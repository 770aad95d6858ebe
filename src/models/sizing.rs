use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Module description ──────────────────────────────────────────────────────

/// Physical and electrical description of one PV module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ModuleSpec {
    /// Module length (m)
    pub length_m: f64,
    /// Module width (m)
    pub width_m: f64,
    /// Rated power at STC (W)
    pub rated_power_w: f64,
    /// Short-circuit current at STC (A). Carried through, never computed on.
    pub isc_stc_a: f64,
    /// Maximum inverter input short-circuit current (A). Carried through, never computed on.
    pub isc_max_inv_a: f64,
}

/// Environmental and system-loss multipliers applied to the rated power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeratingFactors {
    /// Power temperature coefficient (%/°C), negative for silicon
    pub temp_coef_pct_per_c: f64,
    /// Average operating module temperature (°C)
    pub module_temp_c: f64,
    /// Reference temperature of the rating (°C)
    pub ref_temp_c: f64,
    /// Module mismatch, f_mm
    pub mismatch: f64,
    /// Soiling, f_clean
    pub soiling: f64,
    /// Degradation, f_degrad
    pub degradation: f64,
    /// Shading, f_unshade
    pub shading: f64,
    /// Cable efficiency, η_cable
    pub cable_eff: f64,
    /// Inverter efficiency, η_inv
    pub inverter_eff: f64,
    /// Peak sun hours (h/day)
    pub peak_sun_hours: f64,
}

// ─── Site geometry ───────────────────────────────────────────────────────────

/// Which module dimension runs along which site axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Orientation {
    /// Module width along the site width.
    Landscape,
    /// Module length along the site width.
    Portrait,
}

/// Rectangular installation area and the module footprint laid out on it.
///
/// The module dimensions here are independent of [`ModuleSpec`] so a layout
/// can be studied with a different footprint than the electrical module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SiteLayout {
    /// Module width used for the layout, Wm (m)
    pub module_width_m: f64,
    /// Module length used for the layout, Lm (m)
    pub module_length_m: f64,
    /// Inter-module gap, Δ (m)
    pub gap_m: f64,
    /// Usable site width (m)
    pub site_width_m: f64,
    /// Usable site length (m)
    pub site_length_m: f64,
    pub orientation: Orientation,
}

// ─── Derived results ─────────────────────────────────────────────────────────

/// Unit in which the annual yield is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnergyUnit {
    WhPerM2Year,
    KwhPerM2Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PerformanceResult {
    /// Module area (m²)
    pub panel_area_m2: f64,
    /// Average temperature derating, f_temp-ave
    pub temp_derate_factor: f64,
    /// Area-normalised power output (W/m²)
    pub power_density_w_per_m2: f64,
    /// Area-normalised annual yield as produced by the formula (Wh/m²/year)
    pub yearly_energy_wh_per_m2: f64,
    /// Same yield divided by 1000 (kWh/m²/year)
    pub yearly_energy_kwh_per_m2: f64,
}

impl PerformanceResult {
    pub fn yearly_energy(&self, unit: EnergyUnit) -> f64 {
        match unit {
            EnergyUnit::WhPerM2Year => self.yearly_energy_wh_per_m2,
            EnergyUnit::KwhPerM2Year => self.yearly_energy_kwh_per_m2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LayoutResult {
    /// Modules along the site width, N_up
    pub modules_up: u64,
    /// Modules along the site length, N_across
    pub modules_across: u64,
    /// N_up × N_across
    pub modules_total: u64,
}

// ─── REST API request / response types ───────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PerformanceRequest {
    pub module: ModuleSpec,
    pub derating: DeratingFactors,
}

/// Layout inputs as submitted alongside a module. Missing module dimensions
/// are taken from the module being sized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LayoutRequest {
    #[serde(default)]
    pub module_width_m: Option<f64>,
    #[serde(default)]
    pub module_length_m: Option<f64>,
    pub gap_m: f64,
    pub site_width_m: f64,
    pub site_length_m: f64,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SizingRequest {
    pub module: ModuleSpec,
    pub derating: DeratingFactors,
    pub layout: LayoutRequest,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SizingReport {
    pub timestamp: DateTime<Utc>,
    pub module: ModuleSpec,
    pub performance: PerformanceResult,
    /// Layout after module dimensions were resolved
    pub layout: SiteLayout,
    pub placement: LayoutResult,
}

/// Pre-filled form values for a sizing front-end.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SizingDefaults {
    pub module: ModuleSpec,
    pub derating: DeratingFactors,
    pub layout: LayoutRequest,
}

impl Default for SizingDefaults {
    fn default() -> Self {
        Self {
            module: ModuleSpec {
                length_m: 1.7,
                width_m: 1.1,
                rated_power_w: 550.0,
                isc_stc_a: 13.0,
                isc_max_inv_a: 15.0,
            },
            derating: DeratingFactors {
                temp_coef_pct_per_c: -0.35,
                module_temp_c: 45.0,
                ref_temp_c: 25.0,
                mismatch: 0.98,
                soiling: 0.97,
                degradation: 0.99,
                shading: 0.98,
                cable_eff: 0.98,
                inverter_eff: 0.96,
                peak_sun_hours: 5.0,
            },
            layout: LayoutRequest {
                module_width_m: None,
                module_length_m: None,
                gap_m: 0.02,
                site_width_m: 20.0,
                site_length_m: 30.0,
                orientation: Orientation::Landscape,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
