//! Fixed-step stepper coupling the weather model to the panel model.

use tracing::debug;

use crate::error::SimError;
use crate::models::{
    IrradianceParameters, Model, PanelParameters, SolarPanelModel, WeatherModel,
};

use super::clock::SimulationClock;
use super::recorder::ResultRecorder;
use super::types::{SimulationResult, SimulationSample};

/// Simulation engine owning the clock and both models.
///
/// Holds typed model fields rather than trait objects since the coupling is
/// fixed: weather output feeds panel input, with no feedback.
#[derive(Debug, Clone)]
pub struct Engine {
    clock: SimulationClock,
    weather: WeatherModel,
    panel: SolarPanelModel,
}

impl Engine {
    /// Creates a new simulation engine.
    ///
    /// # Arguments
    ///
    /// * `clock` - Time grid to step over
    /// * `irradiance` - Weather model parameters
    /// * `panel` - Panel model parameters
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the clock is invalid.
    pub fn new(
        clock: SimulationClock,
        irradiance: IrradianceParameters,
        panel: PanelParameters,
    ) -> Result<Self, SimError> {
        clock.validate()?;
        Ok(Self {
            clock,
            weather: WeatherModel::new(irradiance),
            panel: SolarPanelModel::new(panel),
        })
    }

    /// Evaluates one instant: irradiance first, then power from it.
    pub fn step(&self, time_seconds: f64) -> SimulationSample {
        let irradiance_wm2 = self.weather.evaluate(time_seconds);
        let power_w = self.panel.evaluate(irradiance_wm2);
        SimulationSample {
            time_seconds,
            irradiance_wm2,
            power_w,
        }
    }

    /// Executes every instant of the clock and returns the recorded run.
    pub fn run(&self) -> SimulationResult {
        let total = self.clock.len();
        debug!(
            start_time = self.clock.start_time(),
            end_time = self.clock.end_time(),
            step_size = self.clock.step_size(),
            steps = total,
            "simulation started"
        );
        let mut recorder = ResultRecorder::with_capacity(total);
        for t in self.clock.instants() {
            recorder.record(self.step(t));
        }
        debug!(samples = recorder.len(), "simulation finished");
        recorder.finish()
    }

    /// Returns the simulation clock.
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Returns the weather model.
    pub fn weather(&self) -> &WeatherModel {
        &self.weather
    }

    /// Returns the panel model.
    pub fn panel(&self) -> &SolarPanelModel {
        &self.panel
    }
}

/// Runs a complete simulation in one call.
///
/// # Errors
///
/// Returns [`SimError::InvalidConfiguration`] if `step_size <= 0` or
/// `end_time < start_time`; nothing is evaluated in that case.
///
/// # Examples
///
/// ```
/// use solar_twin::models::{IrradianceParameters, PanelParameters};
/// use solar_twin::sim::clock::SimulationClock;
/// use solar_twin::sim::engine::run_simulation;
///
/// let clock = SimulationClock::new(0.0, 86_400.0, 60.0);
/// let result = run_simulation(
///     &clock,
///     &IrradianceParameters::default(),
///     &PanelParameters::default(),
/// )
/// .unwrap();
/// assert_eq!(result.len(), 1441);
/// ```
pub fn run_simulation(
    clock: &SimulationClock,
    irradiance: &IrradianceParameters,
    panel: &PanelParameters,
) -> Result<SimulationResult, SimError> {
    Engine::new(*clock, *irradiance, *panel).map(|engine| engine.run())
}
