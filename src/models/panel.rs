use serde::{Deserialize, Serialize};

use super::types::Model;

/// Physical parameters of the solar panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelParameters {
    /// Collector area in m² (expected > 0).
    pub panel_area_m2: f64,
    /// Conversion efficiency (expected in `[0, 1]`, not enforced).
    pub efficiency: f64,
}

impl Default for PanelParameters {
    fn default() -> Self {
        Self {
            panel_area_m2: 1.0,
            efficiency: 0.2,
        }
    }
}

/// Converts irradiance (W/m²) to electrical power (W).
///
/// Linear in irradiance, with no clamping: a negative input yields a
/// negative output.
///
/// # Examples
///
/// ```
/// use solar_twin::models::{PanelParameters, compute_power};
///
/// let p = PanelParameters::default();
/// assert_eq!(compute_power(500.0, &p), 100.0);
/// ```
pub fn compute_power(irradiance_wm2: f64, params: &PanelParameters) -> f64 {
    irradiance_wm2 * params.panel_area_m2 * params.efficiency
}

/// Solar panel model: irradiance in W/m² to power in W.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolarPanelModel {
    /// Panel parameters.
    pub params: PanelParameters,
}

impl SolarPanelModel {
    /// Creates a panel model with the given parameters.
    pub fn new(params: PanelParameters) -> Self {
        Self { params }
    }
}

impl Model for SolarPanelModel {
    fn evaluate(&self, irradiance_wm2: f64) -> f64 {
        compute_power(irradiance_wm2, &self.params)
    }

    fn model_name(&self) -> &'static str {
        "SolarPanelModel"
    }

    fn output_name(&self) -> &'static str {
        "power"
    }
}
