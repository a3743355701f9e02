//! Accumulates samples into a [`SimulationResult`].

use super::types::{SimulationResult, SimulationSample};

/// Collects samples in the order the stepper produces them.
///
/// Each run owns its recorder; [`ResultRecorder::finish`] hands the ordered
/// sequence over as the run's result.
#[derive(Debug, Default)]
pub struct ResultRecorder {
    samples: Vec<SimulationSample>,
}

impl ResultRecorder {
    /// Creates a recorder with room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Appends a sample. Samples must arrive in non-decreasing time order.
    pub fn record(&mut self, sample: SimulationSample) {
        debug_assert!(
            self.samples
                .last()
                .is_none_or(|prev| prev.time_seconds <= sample.time_seconds),
            "samples must be recorded in time order"
        );
        self.samples.push(sample);
    }

    /// Number of samples recorded so far.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Finishes recording and returns the completed result.
    pub fn finish(self) -> SimulationResult {
        SimulationResult::from_ordered(self.samples)
    }
}
