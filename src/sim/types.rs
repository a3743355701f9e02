//! Core simulation types: per-step samples and the completed run.

use std::fmt;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::models::weather::SECONDS_PER_HOUR;

/// Record of one simulation instant.
///
/// Created by the stepper once per instant and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSample {
    /// Simulated time in seconds.
    pub time_seconds: f64,
    /// Irradiance produced by the weather model (W/m²).
    pub irradiance_wm2: f64,
    /// Power produced by the panel model (W).
    pub power_w: f64,
}

impl SimulationSample {
    /// Simulated time in hours.
    pub fn time_hours(&self) -> f64 {
        self.time_seconds / SECONDS_PER_HOUR
    }
}

impl fmt::Display for SimulationSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>8.0}s ({:>5.2}h) | irradiance={:>8.2} W/m2 | power={:>8.2} W",
            self.time_seconds,
            self.time_hours(),
            self.irradiance_wm2,
            self.power_w,
        )
    }
}

/// Ordered time series produced by one simulation run.
///
/// Samples are ordered by increasing `time_seconds`, one per clock instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationResult {
    samples: Vec<SimulationSample>,
}

impl SimulationResult {
    /// Wraps samples that are already in time order.
    pub(crate) fn from_ordered(samples: Vec<SimulationSample>) -> Self {
        debug_assert!(
            samples
                .windows(2)
                .all(|w| w[0].time_seconds <= w[1].time_seconds),
            "samples must be ordered by time"
        );
        Self { samples }
    }

    /// All samples in time order.
    pub fn samples(&self) -> &[SimulationSample] {
        &self.samples
    }

    /// Iterates over samples in time order.
    pub fn iter(&self) -> slice::Iter<'_, SimulationSample> {
        self.samples.iter()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the run produced no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The first sample, if any.
    pub fn first(&self) -> Option<&SimulationSample> {
        self.samples.first()
    }

    /// The last sample, if any.
    pub fn last(&self) -> Option<&SimulationSample> {
        self.samples.last()
    }

    /// Samples whose time lies in `[from_seconds, to_seconds]`.
    pub fn in_range(
        &self,
        from_seconds: f64,
        to_seconds: f64,
    ) -> impl Iterator<Item = &SimulationSample> {
        self.samples
            .iter()
            .filter(move |s| s.time_seconds >= from_seconds && s.time_seconds <= to_seconds)
    }

    /// Consumes the result, returning the samples.
    pub fn into_samples(self) -> Vec<SimulationSample> {
        self.samples
    }
}

impl<'a> IntoIterator for &'a SimulationResult {
    type Item = &'a SimulationSample;
    type IntoIter = slice::Iter<'a, SimulationSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
