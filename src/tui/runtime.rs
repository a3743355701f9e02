//! Step-by-step replay of a run and the TUI application state.

use std::time::Instant;

use crate::config::ScenarioConfig;
use crate::models::weather::SECONDS_PER_HOUR;
use crate::sim::clock::SimulationClock;
use crate::sim::engine::Engine;
use crate::sim::types::SimulationSample;

/// Tick interval options in milliseconds (slowest → fastest).
const SPEED_LEVELS_MS: [u64; 6] = [200, 100, 50, 20, 5, 1];

/// Default speed index (20 ms).
const DEFAULT_SPEED_IDX: usize = 3;

/// TUI application state.
pub struct App {
    /// Engine for the active scenario, or `None` if its clock is invalid.
    engine: Option<Engine>,
    /// Clock of the active scenario.
    clock: SimulationClock,
    /// Samples produced so far (whole run, time order).
    pub history: Vec<SimulationSample>,
    /// Index of the next instant to evaluate.
    pub step: usize,
    /// Total instants in the run.
    pub total_steps: usize,
    /// Whether playback is paused.
    pub paused: bool,
    /// Current index into `SPEED_LEVELS_MS`.
    pub speed_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last simulation tick was executed.
    pub last_tick: Instant,
    /// Label of the active scenario (preset name or `"custom"`).
    pub scenario_name: String,
    /// Active scenario (kept for restart).
    scenario: ScenarioConfig,
}

impl App {
    /// Creates an app replaying the given scenario.
    pub fn new(name: &str, scenario: ScenarioConfig) -> Self {
        let clock = scenario.clock();
        let engine = Engine::new(
            clock,
            scenario.irradiance_parameters(),
            scenario.panel_parameters(),
        )
        .ok();
        let total_steps = if engine.is_some() { clock.len() } else { 0 };
        Self {
            engine,
            clock,
            history: Vec::with_capacity(total_steps),
            step: 0,
            total_steps,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
            quit: false,
            last_tick: Instant::now(),
            scenario_name: name.to_string(),
            scenario,
        }
    }

    /// Evaluates the next instant if the run is not finished.
    pub fn tick(&mut self) {
        let Some(engine) = &self.engine else {
            return;
        };
        let Some(t) = self.clock.instant_within(self.step, self.total_steps) else {
            return;
        };
        self.history.push(engine.step(t));
        self.step += 1;
    }

    /// Toggles pause/resume.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Increases playback speed (shorter tick interval).
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_LEVELS_MS.len() {
            self.speed_idx += 1;
        }
    }

    /// Decreases playback speed (longer tick interval).
    pub fn speed_down(&mut self) {
        if self.speed_idx > 0 {
            self.speed_idx -= 1;
        }
    }

    /// Returns the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        SPEED_LEVELS_MS[self.speed_idx]
    }

    /// Switches to a built-in preset, resetting playback.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(scenario) = ScenarioConfig::from_preset(name) else {
            return;
        };
        *self = Self::new(name, scenario);
    }

    /// Restarts the current scenario from the beginning.
    pub fn restart(&mut self) {
        let scenario = self.scenario.clone();
        let name = self.scenario_name.clone();
        let speed_idx = self.speed_idx;
        *self = Self::new(&name, scenario);
        self.speed_idx = speed_idx;
    }

    /// Returns `true` when every instant has been evaluated.
    pub fn is_finished(&self) -> bool {
        self.step >= self.total_steps
    }

    /// Returns the most recent sample, if any.
    pub fn last_sample(&self) -> Option<&SimulationSample> {
        self.history.last()
    }

    /// End of the time axis in hours.
    pub fn end_hours(&self) -> f64 {
        self.clock.end_time() / SECONDS_PER_HOUR
    }

    /// Start of the time axis in hours.
    pub fn start_hours(&self) -> f64 {
        self.clock.start_time() / SECONDS_PER_HOUR
    }
}
