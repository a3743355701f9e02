use serde::Serialize;

use crate::error::SimError;

/// Relative tolerance (in units of `step_size`) under which a trailing
/// remainder is treated as floating-point noise rather than a partial step.
const REMAINDER_TOLERANCE: f64 = 1e-9;

/// Upper bound on the number of steps a clock may describe.
pub const MAX_STEPS: f64 = u32::MAX as f64;

/// A fixed-step simulation clock over `[start_time, end_time]` in seconds.
///
/// The instants are `start_time, start_time + step_size, ..., end_time`.
/// When `step_size` does not divide the interval evenly, the last step is
/// truncated so the final instant is exactly `end_time`. The clock is
/// immutable once constructed.
///
/// # Examples
///
/// ```
/// use solar_twin::sim::clock::SimulationClock;
///
/// let clock = SimulationClock::new(0.0, 150.0, 60.0);
/// let instants: Vec<f64> = clock.instants().collect();
/// assert_eq!(instants, vec![0.0, 60.0, 120.0, 150.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationClock {
    start_time: f64,
    end_time: f64,
    step_size: f64,
}

impl SimulationClock {
    /// Creates a clock. Use [`SimulationClock::validate`] (or run it through
    /// the engine, which validates) before relying on its instants.
    ///
    /// # Arguments
    ///
    /// * `start_time` - First instant in seconds
    /// * `end_time` - Last instant in seconds (must be >= `start_time`)
    /// * `step_size` - Step in seconds (must be > 0)
    pub const fn new(start_time: f64, end_time: f64, step_size: f64) -> Self {
        Self {
            start_time,
            end_time,
            step_size,
        }
    }

    /// First instant in seconds.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Last instant in seconds.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Nominal step in seconds.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Checks that the clock describes a finite, ordered time grid.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `step_size <= 0`,
    /// `end_time < start_time`, any value is not finite, or the grid would
    /// exceed [`MAX_STEPS`] steps.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(SimError::InvalidConfiguration {
                field: "step_size",
                message: format!("must be finite and > 0, got {}", self.step_size),
            });
        }
        if !self.start_time.is_finite() {
            return Err(SimError::InvalidConfiguration {
                field: "start_time",
                message: format!("must be finite, got {}", self.start_time),
            });
        }
        if !self.end_time.is_finite() {
            return Err(SimError::InvalidConfiguration {
                field: "end_time",
                message: format!("must be finite, got {}", self.end_time),
            });
        }
        if self.end_time < self.start_time {
            return Err(SimError::InvalidConfiguration {
                field: "end_time",
                message: format!(
                    "must be >= start_time ({}), got {}",
                    self.start_time, self.end_time
                ),
            });
        }
        if (self.end_time - self.start_time) / self.step_size > MAX_STEPS {
            return Err(SimError::InvalidConfiguration {
                field: "step_size",
                message: format!(
                    "too small for the interval, more than {MAX_STEPS} steps"
                ),
            });
        }
        Ok(())
    }

    /// Number of whole steps that fit in the interval.
    fn full_steps(&self) -> usize {
        let ratio = (self.end_time - self.start_time) / self.step_size;
        (ratio + REMAINDER_TOLERANCE).floor() as usize
    }

    /// Number of instants on the grid, endpoints included.
    ///
    /// Returns 0 for a clock that fails [`SimulationClock::validate`].
    pub fn len(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let full = self.full_steps();
        let covered = full as f64 * self.step_size;
        let remainder = (self.end_time - self.start_time) - covered;
        if remainder > self.step_size * REMAINDER_TOLERANCE {
            full + 2
        } else {
            full + 1
        }
    }

    /// Returns `true` if the clock yields no instants (only when invalid).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the `index`-th instant, or `None` past the end of the grid.
    pub fn instant(&self, index: usize) -> Option<f64> {
        self.instant_within(index, self.len())
    }

    /// Like [`SimulationClock::instant`] with `len` already computed by
    /// [`SimulationClock::len`].
    pub(crate) fn instant_within(&self, index: usize, len: usize) -> Option<f64> {
        if index >= len {
            None
        } else if index + 1 == len {
            Some(self.end_time)
        } else {
            let t = self.start_time + index as f64 * self.step_size;
            Some(t.min(self.end_time))
        }
    }

    /// Iterates over every instant in increasing order.
    pub fn instants(&self) -> Instants {
        Instants {
            clock: *self,
            next: 0,
            len: self.len(),
        }
    }

    /// Runs a function for each instant, passing the step index and time.
    pub fn run(&self, mut f: impl FnMut(usize, f64)) {
        for (step, t) in self.instants().enumerate() {
            f(step, t);
        }
    }
}

/// Iterator over the instants of a [`SimulationClock`].
#[derive(Debug, Clone)]
pub struct Instants {
    clock: SimulationClock,
    next: usize,
    len: usize,
}

impl Iterator for Instants {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next >= self.len {
            return None;
        }
        let t = self.clock.instant_within(self.next, self.len);
        self.next += 1;
        t
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Instants {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_day_at_one_minute() {
        let clock = SimulationClock::new(0.0, 86_400.0, 60.0);
        assert_eq!(clock.len(), 1441);
        let instants: Vec<f64> = clock.instants().collect();
        assert_eq!(instants.first(), Some(&0.0));
        assert_eq!(instants.last(), Some(&86_400.0));
        assert_eq!(instants[1], 60.0);
    }

    #[test]
    fn truncated_last_step() {
        let clock = SimulationClock::new(0.0, 100.0, 30.0);
        let instants: Vec<f64> = clock.instants().collect();
        assert_eq!(instants, vec![0.0, 30.0, 60.0, 90.0, 100.0]);
    }

    #[test]
    fn step_larger_than_interval() {
        let clock = SimulationClock::new(10.0, 15.0, 60.0);
        let instants: Vec<f64> = clock.instants().collect();
        assert_eq!(instants, vec![10.0, 15.0]);
    }

    #[test]
    fn zero_length_interval() {
        let clock = SimulationClock::new(42.0, 42.0, 1.0);
        let instants: Vec<f64> = clock.instants().collect();
        assert_eq!(instants, vec![42.0]);
    }

    #[test]
    fn fractional_step_does_not_add_spurious_instant() {
        let clock = SimulationClock::new(0.0, 1.0, 0.1);
        assert_eq!(clock.len(), 11);
        let instants: Vec<f64> = clock.instants().collect();
        assert_eq!(instants.last(), Some(&1.0));
        assert!(instants.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn non_zero_start() {
        let clock = SimulationClock::new(3600.0, 7200.0, 900.0);
        let instants: Vec<f64> = clock.instants().collect();
        assert_eq!(instants, vec![3600.0, 4500.0, 5400.0, 6300.0, 7200.0]);
    }

    #[test]
    fn zero_step_is_invalid() {
        let clock = SimulationClock::new(0.0, 10.0, 0.0);
        assert!(matches!(
            clock.validate(),
            Err(SimError::InvalidConfiguration {
                field: "step_size",
                ..
            })
        ));
        assert!(clock.is_empty());
        assert_eq!(clock.instants().count(), 0);
    }

    #[test]
    fn negative_step_is_invalid() {
        assert!(SimulationClock::new(0.0, 10.0, -1.0).validate().is_err());
    }

    #[test]
    fn end_before_start_is_invalid() {
        let clock = SimulationClock::new(10.0, 0.0, 1.0);
        assert!(matches!(
            clock.validate(),
            Err(SimError::InvalidConfiguration {
                field: "end_time",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_values_are_invalid() {
        assert!(SimulationClock::new(0.0, 10.0, f64::NAN).validate().is_err());
        assert!(SimulationClock::new(0.0, f64::INFINITY, 1.0).validate().is_err());
        assert!(SimulationClock::new(f64::NAN, 10.0, 1.0).validate().is_err());
    }

    #[test]
    fn unbounded_step_count_is_invalid() {
        let clock = SimulationClock::new(-1e308, 1e308, 1e-9);
        assert!(clock.validate().is_err());
        assert_eq!(clock.len(), 0);
    }

    #[test]
    fn cached_length_matches_instant() {
        let clock = SimulationClock::new(0.0, 1000.0, 300.0);
        let len = clock.len();
        for i in 0..=len {
            assert_eq!(clock.instant_within(i, len), clock.instant(i));
        }
        assert_eq!(clock.instant_within(len - 1, len), Some(1000.0));
    }

    #[test]
    fn run_passes_index_and_time() {
        let clock = SimulationClock::new(0.0, 2.0, 1.0);
        let mut seen = Vec::new();
        clock.run(|i, t| seen.push((i, t)));
        assert_eq!(seen, vec![(0, 0.0), (1, 1.0), (2, 2.0)]);
    }

    #[test]
    fn exact_size_iterator() {
        let clock = SimulationClock::new(0.0, 600.0, 60.0);
        let mut it = clock.instants();
        assert_eq!(it.len(), 11);
        it.next();
        assert_eq!(it.len(), 10);
    }
}
