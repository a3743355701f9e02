//! API response and query types.
//!
//! Field names follow the plain CSV column names for consistency across
//! export formats.

use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::sim::summary::RunSummary;
use crate::sim::types::SimulationSample;

/// Combined state response: scenario, summary, and latest sample.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    /// Scenario configuration.
    pub scenario: ScenarioConfig,
    /// Run summary.
    pub summary: RunSummary,
    /// Most recent sample, absent for an empty run.
    pub latest_sample: Option<TelemetryRecord>,
}

/// Single sample using CSV column names.
///
/// Maps internal `SimulationSample` fields to the public API contract:
/// - `time_seconds` → `time`
/// - `irradiance_wm2` → `irradiance`
/// - `power_w` → `power`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TelemetryRecord {
    /// Simulated time (s).
    pub time: f64,
    /// Simulated time (h), as used by plots.
    pub time_hours: f64,
    /// Irradiance (W/m²).
    pub irradiance: f64,
    /// Power (W).
    pub power: f64,
}

impl From<&SimulationSample> for TelemetryRecord {
    fn from(s: &SimulationSample) -> Self {
        Self {
            time: s.time_seconds,
            time_hours: s.time_hours(),
            irradiance: s.irradiance_wm2,
            power: s.power_w,
        }
    }
}

/// Optional range query parameters for the telemetry endpoint (seconds).
#[derive(Debug, Deserialize)]
pub struct TelemetryQuery {
    /// Start time (inclusive).
    pub from: Option<f64>,
    /// End time (inclusive).
    pub to: Option<f64>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
