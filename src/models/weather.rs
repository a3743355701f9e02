use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::types::Model;

/// Seconds per simulated hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Length of the modelled period in hours. Outside `[0, HORIZON_HOURS]`
/// the generator produces no irradiance at all.
pub const HORIZON_HOURS: f64 = 24.0;

/// Parameters of the synthetic irradiance generator.
///
/// Ranges are documented but not enforced; out-of-range values flow through
/// the formula unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrradianceParameters {
    /// Peak clear-sky irradiance in W/m² (expected > 0).
    pub max_irradiance: f64,
    /// Length of the daylight arc in hours (expected > 0).
    pub day_length_hours: f64,
    /// Hour at which the sine argument crosses zero.
    pub time_offset_hours: f64,
    /// Attenuation factor for cloud cover (expected in `[0, 1]`).
    pub cloud_factor: f64,
}

impl Default for IrradianceParameters {
    fn default() -> Self {
        Self {
            max_irradiance: 1000.0,
            day_length_hours: 12.0,
            time_offset_hours: 6.0,
            cloud_factor: 0.8,
        }
    }
}

/// Computes solar irradiance (W/m²) at a simulated time.
///
/// The generator models a single sine arc over the first 24 simulated hours
/// and clamps everything outside that window to zero, so runs longer than a
/// day see no second sunrise. Negative values of the sine are clamped to
/// zero as well.
///
/// # Arguments
///
/// * `time_seconds` - Simulated time in seconds
/// * `params` - Generator parameters
///
/// # Examples
///
/// ```
/// use solar_twin::models::{IrradianceParameters, compute_irradiance};
///
/// let params = IrradianceParameters::default();
/// assert_eq!(compute_irradiance(0.0, &params), 0.0);
/// assert_eq!(compute_irradiance(25.0 * 3600.0, &params), 0.0);
/// ```
pub fn compute_irradiance(time_seconds: f64, params: &IrradianceParameters) -> f64 {
    let t = time_seconds / SECONDS_PER_HOUR;
    let raw = if (0.0..=HORIZON_HOURS).contains(&t) {
        params.max_irradiance
            * (PI * (t - params.time_offset_hours) / params.day_length_hours).sin()
            * params.cloud_factor
    } else if t.is_nan() {
        // NaN propagates rather than being swallowed by the window check.
        t
    } else {
        0.0
    };
    if raw.is_nan() { raw } else { raw.max(0.0) }
}

/// Weather model: simulated time in seconds to irradiance in W/m².
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeatherModel {
    /// Generator parameters.
    pub params: IrradianceParameters,
}

impl WeatherModel {
    /// Creates a weather model with the given parameters.
    pub fn new(params: IrradianceParameters) -> Self {
        Self { params }
    }
}

impl Model for WeatherModel {
    fn evaluate(&self, time_seconds: f64) -> f64 {
        compute_irradiance(time_seconds, &self.params)
    }

    fn model_name(&self) -> &'static str {
        "WeatherModel"
    }

    fn output_name(&self) -> &'static str {
        "irradiance"
    }
}
