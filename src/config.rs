//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SimError;
use crate::io::export::ColumnNames;
use crate::models::{IrradianceParameters, PanelParameters};
use crate::sim::clock::SimulationClock;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the default scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::default_scenario`] for the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation time grid.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Irradiance generator parameters.
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Solar panel parameters.
    #[serde(default)]
    pub panel: PanelConfig,
    /// Names of the coupled model instances.
    #[serde(default)]
    pub coupling: CouplingConfig,
}

/// Simulation time grid (all values in seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// First simulated instant.
    pub start_time: f64,
    /// Last simulated instant (must be >= `start_time`).
    pub end_time: f64,
    /// Fixed step (must be > 0).
    pub step_size: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            end_time: 86_400.0,
            step_size: 60.0,
        }
    }
}

/// Irradiance generator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeatherConfig {
    /// Peak irradiance (W/m²).
    pub max_irradiance: f64,
    /// Daylight arc length (h).
    pub day_length: f64,
    /// Zero crossing of the sine argument (h).
    pub time_offset: f64,
    /// Cloud attenuation (0.0–1.0).
    pub cloud_factor: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        let p = IrradianceParameters::default();
        Self {
            max_irradiance: p.max_irradiance,
            day_length: p.day_length_hours,
            time_offset: p.time_offset_hours,
            cloud_factor: p.cloud_factor,
        }
    }
}

/// Solar panel parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    /// Collector area (m²).
    pub panel_area: f64,
    /// Conversion efficiency (0.0–1.0).
    pub efficiency: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let p = PanelParameters::default();
        Self {
            panel_area: p.panel_area_m2,
            efficiency: p.efficiency,
        }
    }
}

/// Instance names of the two coupled models, used for qualified column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CouplingConfig {
    /// Weather model instance name.
    pub weather_instance: String,
    /// Panel model instance name.
    pub panel_instance: String,
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            weather_instance: "{weather}".to_string(),
            panel_instance: "{panel}".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.step_size"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<SimError> for ConfigError {
    fn from(e: SimError) -> Self {
        match e {
            SimError::InvalidConfiguration { field, message } => {
                Self::new(format!("simulation.{field}"), message)
            }
        }
    }
}

impl ScenarioConfig {
    /// Returns the default scenario: one day at one-minute steps.
    pub fn default_scenario() -> Self {
        Self::default()
    }

    /// Returns the overcast preset: heavy cloud attenuation.
    pub fn overcast() -> Self {
        Self {
            weather: WeatherConfig {
                cloud_factor: 0.3,
                ..WeatherConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the long-day preset: 16 h daylight arc starting at 04:00.
    pub fn long_day() -> Self {
        Self {
            weather: WeatherConfig {
                day_length: 16.0,
                time_offset: 4.0,
                cloud_factor: 0.9,
                ..WeatherConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the large-array preset: 10 m² of higher-efficiency panels.
    pub fn large_array() -> Self {
        Self {
            panel: PanelConfig {
                panel_area: 10.0,
                efficiency: 0.22,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "overcast", "long_day", "large_array"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::default_scenario()),
            "overcast" => Ok(Self::overcast()),
            "long_day" => Ok(Self::long_day()),
            "large_array" => Ok(Self::large_array()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Only the time grid is checked; model parameters are accepted as given
    /// (see [`ScenarioConfig::advisories`]). Returns an empty vector if the
    /// configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if !s.step_size.is_finite() || s.step_size <= 0.0 {
            errors.push(ConfigError::new(
                "simulation.step_size",
                "must be finite and > 0",
            ));
        }
        if !s.start_time.is_finite() {
            errors.push(ConfigError::new("simulation.start_time", "must be finite"));
        }
        if !s.end_time.is_finite() {
            errors.push(ConfigError::new("simulation.end_time", "must be finite"));
        }
        if s.end_time < s.start_time {
            errors.push(ConfigError::new(
                "simulation.end_time",
                "must be >= simulation.start_time",
            ));
        }
        if errors.is_empty() {
            if let Err(e) = self.clock().validate() {
                errors.push(e.into());
            }
        }

        let c = &self.coupling;
        if c.weather_instance.is_empty() {
            errors.push(ConfigError::new("coupling.weather_instance", "must not be empty"));
        }
        if c.panel_instance.is_empty() {
            errors.push(ConfigError::new("coupling.panel_instance", "must not be empty"));
        }
        if !c.weather_instance.is_empty() && c.weather_instance == c.panel_instance {
            errors.push(ConfigError::new(
                "coupling.panel_instance",
                "must differ from coupling.weather_instance",
            ));
        }

        errors
    }

    /// Returns soft findings on model parameters outside their expected range.
    ///
    /// These never prevent a run; the models evaluate whatever they are given.
    pub fn advisories(&self) -> Vec<ConfigError> {
        let mut notes = Vec::new();
        let w = &self.weather;
        if w.max_irradiance <= 0.0 {
            notes.push(ConfigError::new("weather.max_irradiance", "expected > 0"));
        }
        if w.day_length <= 0.0 {
            notes.push(ConfigError::new("weather.day_length", "expected > 0"));
        }
        if !(0.0..=1.0).contains(&w.cloud_factor) {
            notes.push(ConfigError::new("weather.cloud_factor", "expected in [0.0, 1.0]"));
        }
        let p = &self.panel;
        if p.panel_area <= 0.0 {
            notes.push(ConfigError::new("panel.panel_area", "expected > 0"));
        }
        if !(0.0..=1.0).contains(&p.efficiency) {
            notes.push(ConfigError::new("panel.efficiency", "expected in [0.0, 1.0]"));
        }
        notes
    }

    /// Builds the simulation clock.
    pub fn clock(&self) -> SimulationClock {
        let s = &self.simulation;
        SimulationClock::new(s.start_time, s.end_time, s.step_size)
    }

    /// Builds the irradiance generator parameters.
    pub fn irradiance_parameters(&self) -> IrradianceParameters {
        let w = &self.weather;
        IrradianceParameters {
            max_irradiance: w.max_irradiance,
            day_length_hours: w.day_length,
            time_offset_hours: w.time_offset,
            cloud_factor: w.cloud_factor,
        }
    }

    /// Builds the panel parameters.
    pub fn panel_parameters(&self) -> PanelParameters {
        PanelParameters {
            panel_area_m2: self.panel.panel_area,
            efficiency: self.panel.efficiency,
        }
    }

    /// Column names for export, either plain or qualified by instance name.
    pub fn column_names(&self, qualified: bool) -> ColumnNames {
        if qualified {
            ColumnNames::qualified(&self.coupling.weather_instance, &self.coupling.panel_instance)
        } else {
            ColumnNames::default()
        }
    }
}
