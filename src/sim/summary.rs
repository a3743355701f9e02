//! Post-hoc summary figures for a completed run.

use std::fmt;

use serde::Serialize;

use crate::models::weather::SECONDS_PER_HOUR;

use super::types::SimulationResult;

/// Aggregate figures derived from a complete simulation run.
///
/// Computed after the fact from the recorded samples; the result itself
/// carries no aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Number of recorded samples.
    pub sample_count: usize,
    /// Simulated span from first to last sample (h).
    pub duration_hours: f64,
    /// Highest irradiance seen (W/m²).
    pub peak_irradiance_wm2: f64,
    /// Time of the first irradiance peak (h).
    pub peak_irradiance_time_hours: f64,
    /// Highest power seen (W).
    pub peak_power_w: f64,
    /// Energy yield, trapezoidal integral of power over time (Wh).
    pub energy_wh: f64,
}

impl RunSummary {
    /// Computes the summary from a completed run.
    ///
    /// Returns a zeroed summary for an empty result.
    pub fn from_result(result: &SimulationResult) -> Self {
        let (Some(first), Some(last)) = (result.first(), result.last()) else {
            return Self::default();
        };

        let mut peak_irr = first.irradiance_wm2;
        let mut peak_irr_time = first.time_seconds;
        let mut peak_power = first.power_w;
        let mut energy_ws = 0.0_f64;

        for pair in result.samples().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let dt = b.time_seconds - a.time_seconds;
            energy_ws += 0.5 * (a.power_w + b.power_w) * dt;
        }
        for s in result {
            if s.irradiance_wm2 > peak_irr {
                peak_irr = s.irradiance_wm2;
                peak_irr_time = s.time_seconds;
            }
            peak_power = peak_power.max(s.power_w);
        }

        Self {
            sample_count: result.len(),
            duration_hours: (last.time_seconds - first.time_seconds) / SECONDS_PER_HOUR,
            peak_irradiance_wm2: peak_irr,
            peak_irradiance_time_hours: peak_irr_time / SECONDS_PER_HOUR,
            peak_power_w: peak_power,
            energy_wh: energy_ws / SECONDS_PER_HOUR,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ---")?;
        writeln!(f, "Samples:               {}", self.sample_count)?;
        writeln!(f, "Duration:              {:.2} h", self.duration_hours)?;
        writeln!(
            f,
            "Peak irradiance:       {:.2} W/m2 at {:.2} h",
            self.peak_irradiance_wm2, self.peak_irradiance_time_hours
        )?;
        writeln!(f, "Peak power:            {:.2} W", self.peak_power_w)?;
        write!(f, "Energy yield:          {:.2} Wh", self.energy_wh)
    }
}
