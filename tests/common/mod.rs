//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use solar_twin::models::{IrradianceParameters, PanelParameters};
use solar_twin::sim::clock::SimulationClock;
use solar_twin::sim::engine::run_simulation;
use solar_twin::sim::types::SimulationResult;

/// Default clock: one day at one-minute steps.
pub fn default_clock() -> SimulationClock {
    SimulationClock::new(0.0, 86_400.0, 60.0)
}

/// Default irradiance parameters (1000 W/m², 12 h, offset 6 h, cloud 0.8).
pub fn default_irradiance() -> IrradianceParameters {
    IrradianceParameters::default()
}

/// Default panel (1 m², 20 % efficiency).
pub fn default_panel() -> PanelParameters {
    PanelParameters::default()
}

/// Runs the default scenario.
pub fn default_run() -> SimulationResult {
    run_simulation(&default_clock(), &default_irradiance(), &default_panel())
        .expect("default clock is valid")
}

/// The literal irradiance formula, clamped at zero, for a time in hours.
pub fn reference_irradiance(t_hours: f64, p: &IrradianceParameters) -> f64 {
    if !(0.0..=24.0).contains(&t_hours) {
        return 0.0;
    }
    (p.max_irradiance
        * (std::f64::consts::PI * (t_hours - p.time_offset_hours) / p.day_length_hours).sin()
        * p.cloud_factor)
        .max(0.0)
}

/// A unique scratch path under the system temp directory.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("solar-twin-{}-{name}", std::process::id()))
}
