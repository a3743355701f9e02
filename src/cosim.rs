//! JSON co-simulation document: model instances, wiring, parameters and
//! the fixed-step algorithm, converted into a [`ScenarioConfig`].
//!
//! ```json
//! {
//!   "fmus": { "{weather}": "WeatherModel.fmu", "{panel}": "SolarPanelModel.fmu" },
//!   "connections": {
//!     "{weather}.WeatherModel.irradiance": ["{panel}.SolarPanelModel.irradiance"]
//!   },
//!   "parameters": { "{weather}.WeatherModel.cloudFactor": 0.5 },
//!   "algorithm": { "type": "fixed-step", "size": 60 },
//!   "startTime": 0,
//!   "endTime": 86400
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::{ConfigError, CouplingConfig, ScenarioConfig};
use crate::models::{Model, SolarPanelModel, WeatherModel};

/// The only supported master algorithm.
const FIXED_STEP: &str = "fixed-step";

/// Raw co-simulation document as written on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CosimDocument {
    /// Instance name to compiled unit path.
    pub fmus: BTreeMap<String, String>,
    /// Output signal to the input signals it drives.
    pub connections: BTreeMap<String, Vec<String>>,
    /// Qualified parameter name to value.
    pub parameters: BTreeMap<String, f64>,
    /// Master algorithm settings.
    pub algorithm: Option<AlgorithmSpec>,
    /// First simulated instant (s).
    pub start_time: Option<f64>,
    /// Last simulated instant (s).
    pub end_time: Option<f64>,
}

/// Master algorithm section.
#[derive(Debug, Clone, Deserialize)]
pub struct AlgorithmSpec {
    /// Algorithm kind; only `"fixed-step"` is accepted.
    #[serde(rename = "type")]
    pub kind: String,
    /// Step size (s).
    pub size: Option<f64>,
}

/// A dotted signal reference `instance.Model.signal`.
#[derive(Debug, PartialEq)]
struct SignalRef<'a> {
    instance: &'a str,
    model: &'a str,
    signal: &'a str,
}

impl<'a> SignalRef<'a> {
    /// Splits on the last two dots so instance names may contain dots.
    fn parse(raw: &'a str) -> Option<Self> {
        let (rest, signal) = raw.rsplit_once('.')?;
        let (instance, model) = rest.rsplit_once('.')?;
        if instance.is_empty() || model.is_empty() || signal.is_empty() {
            return None;
        }
        Some(Self {
            instance,
            model,
            signal,
        })
    }
}

impl CosimDocument {
    /// Parses a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the JSON is malformed.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::new("json", e.to_string()))
    }

    /// Converts the document into a scenario, applying defaults for
    /// anything it leaves out.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unsupported algorithm, an unknown
    /// parameter, or wiring other than weather irradiance into panel
    /// irradiance.
    pub fn into_scenario(self) -> Result<ScenarioConfig, ConfigError> {
        let mut cfg = ScenarioConfig::default();

        if let Some(algo) = &self.algorithm {
            if algo.kind != FIXED_STEP {
                return Err(ConfigError::new(
                    "algorithm.type",
                    format!("must be \"{FIXED_STEP}\", got \"{}\"", algo.kind),
                ));
            }
            if let Some(size) = algo.size {
                cfg.simulation.step_size = size;
            }
        }
        if let Some(start) = self.start_time {
            cfg.simulation.start_time = start;
        }
        if let Some(end) = self.end_time {
            cfg.simulation.end_time = end;
        }

        if !self.connections.is_empty() {
            cfg.coupling = self.coupling()?;
        }

        for (name, &value) in &self.parameters {
            self.apply_parameter(&mut cfg, name, value)?;
        }

        Ok(cfg)
    }

    /// Sets one `instance.Model.name` parameter on the scenario.
    ///
    /// The model must own the parameter. With connections present the
    /// instance must be the coupled one; with only `fmus` it must be declared.
    fn apply_parameter(
        &self,
        cfg: &mut ScenarioConfig,
        name: &str,
        value: f64,
    ) -> Result<(), ConfigError> {
        let field = || format!("parameters.{name}");
        let param = SignalRef::parse(name).ok_or_else(|| {
            ConfigError::new(field(), "expected <instance>.<model>.<parameter>")
        })?;

        let weather = WeatherModel::default();
        let panel = SolarPanelModel::default();
        let (model, instance) = match param.signal {
            "maxIrradiance" | "dayLength" | "timeOffset" | "cloudFactor" => {
                (weather.model_name(), &cfg.coupling.weather_instance)
            }
            "panelArea" | "efficiency" => (panel.model_name(), &cfg.coupling.panel_instance),
            _ => return Err(ConfigError::new(field(), "unknown parameter")),
        };

        if param.model != model {
            return Err(ConfigError::new(
                field(),
                format!("\"{}\" is a {model} parameter, not {}", param.signal, param.model),
            ));
        }
        if !self.connections.is_empty() && param.instance != instance.as_str() {
            return Err(ConfigError::new(
                field(),
                format!("instance \"{}\" is not the coupled {model} \"{instance}\"", param.instance),
            ));
        }
        if self.connections.is_empty()
            && !self.fmus.is_empty()
            && !self.fmus.contains_key(param.instance)
        {
            return Err(ConfigError::new(
                field(),
                format!("instance \"{}\" is not declared", param.instance),
            ));
        }

        match param.signal {
            "maxIrradiance" => cfg.weather.max_irradiance = value,
            "dayLength" => cfg.weather.day_length = value,
            "timeOffset" => cfg.weather.time_offset = value,
            "cloudFactor" => cfg.weather.cloud_factor = value,
            "panelArea" => cfg.panel.panel_area = value,
            _ => cfg.panel.efficiency = value,
        }
        Ok(())
    }

    /// Validates the single weather-to-panel edge and extracts instance names.
    fn coupling(&self) -> Result<CouplingConfig, ConfigError> {
        let edges: Vec<(&String, &String)> = self
            .connections
            .iter()
            .flat_map(|(from, targets)| targets.iter().map(move |to| (from, to)))
            .collect();

        let [(from, to)] = edges.as_slice() else {
            return Err(ConfigError::new(
                "connections",
                format!("expected exactly one connection, found {}", edges.len()),
            ));
        };

        let weather = WeatherModel::default();
        let panel = SolarPanelModel::default();

        let source = SignalRef::parse(from)
            .ok_or_else(|| ConfigError::new("connections", format!("malformed signal \"{from}\"")))?;
        let target = SignalRef::parse(to)
            .ok_or_else(|| ConfigError::new("connections", format!("malformed signal \"{to}\"")))?;

        if source.model != weather.model_name() || source.signal != weather.output_name() {
            return Err(ConfigError::new(
                "connections",
                format!(
                    "source must be <instance>.{}.{}, got \"{from}\"",
                    weather.model_name(),
                    weather.output_name()
                ),
            ));
        }
        // The panel's input carries the same name as the weather output.
        if target.model != panel.model_name() || target.signal != weather.output_name() {
            return Err(ConfigError::new(
                "connections",
                format!(
                    "target must be <instance>.{}.{}, got \"{to}\"",
                    panel.model_name(),
                    weather.output_name()
                ),
            ));
        }
        if source.instance == target.instance {
            return Err(ConfigError::new(
                "connections",
                "source and target must be different instances",
            ));
        }
        if !self.fmus.is_empty() {
            for instance in [source.instance, target.instance] {
                if !self.fmus.contains_key(instance) {
                    return Err(ConfigError::new(
                        "fmus",
                        format!("instance \"{instance}\" is connected but not declared"),
                    ));
                }
            }
        }

        Ok(CouplingConfig {
            weather_instance: source.instance.to_string(),
            panel_instance: target.instance.to_string(),
        })
    }
}

impl ScenarioConfig {
    /// Parses a scenario from a co-simulation JSON string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the JSON is malformed or the document is
    /// not a weather-to-panel fixed-step setup.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        CosimDocument::from_json_str(s)?.into_scenario()
    }

    /// Parses a scenario from a co-simulation JSON file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or is not a valid
    /// co-simulation document.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("cosim", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "fmus": {
            "{weather}": "WeatherModel.fmu",
            "{panel}": "SolarPanelModel.fmu"
        },
        "connections": {
            "{weather}.WeatherModel.irradiance": ["{panel}.SolarPanelModel.irradiance"]
        },
        "parameters": {
            "{weather}.WeatherModel.maxIrradiance": 950.0,
            "{weather}.WeatherModel.dayLength": 13.0,
            "{weather}.WeatherModel.timeOffset": 5.5,
            "{weather}.WeatherModel.cloudFactor": 0.7,
            "{panel}.SolarPanelModel.panelArea": 1.6,
            "{panel}.SolarPanelModel.efficiency": 0.21
        },
        "algorithm": { "type": "fixed-step", "size": 120 },
        "startTime": 0,
        "endTime": 43200
    }"#;

    #[test]
    fn full_document_maps_every_field() {
        let cfg = ScenarioConfig::from_json_str(FULL).expect("document should load");
        assert_eq!(cfg.simulation.step_size, 120.0);
        assert_eq!(cfg.simulation.end_time, 43_200.0);
        assert_eq!(cfg.weather.max_irradiance, 950.0);
        assert_eq!(cfg.weather.day_length, 13.0);
        assert_eq!(cfg.weather.time_offset, 5.5);
        assert_eq!(cfg.weather.cloud_factor, 0.7);
        assert_eq!(cfg.panel.panel_area, 1.6);
        assert_eq!(cfg.panel.efficiency, 0.21);
        assert_eq!(cfg.coupling.weather_instance, "{weather}");
        assert_eq!(cfg.coupling.panel_instance, "{panel}");
    }

    #[test]
    fn empty_document_is_default_scenario() {
        let cfg = ScenarioConfig::from_json_str("{}").expect("empty object is valid");
        assert_eq!(cfg, ScenarioConfig::default());
    }

    #[test]
    fn rejects_variable_step_algorithm() {
        let err = ScenarioConfig::from_json_str(r#"{"algorithm": {"type": "var-step"}}"#);
        assert!(matches!(err, Err(ConfigError { ref field, .. }) if field == "algorithm.type"));
    }

    #[test]
    fn rejects_unknown_parameter() {
        let err = ScenarioConfig::from_json_str(
            r#"{"parameters": {"{panel}.SolarPanelModel.tilt": 30}}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn rejects_parameter_on_wrong_model() {
        let err = ScenarioConfig::from_json_str(
            r#"{"parameters": {"{weather}.WeatherModel.efficiency": 0.9}}"#,
        );
        assert!(
            matches!(err, Err(ConfigError { ref field, .. }) if field == "parameters.{weather}.WeatherModel.efficiency")
        );

        let err = ScenarioConfig::from_json_str(
            r#"{"parameters": {"{panel}.SolarPanelModel.maxIrradiance": 10}}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn rejects_parameter_on_uncoupled_instance() {
        let doc = r#"{
            "connections": {
                "{weather}.WeatherModel.irradiance": ["{panel}.SolarPanelModel.irradiance"]
            },
            "parameters": { "{spare}.SolarPanelModel.panelArea": 4.0 }
        }"#;
        assert!(ScenarioConfig::from_json_str(doc).is_err());
    }

    #[test]
    fn rejects_parameter_on_undeclared_instance() {
        let doc = r#"{
            "fmus": { "{weather}": "WeatherModel.fmu", "{panel}": "SolarPanelModel.fmu" },
            "parameters": { "{roof}.SolarPanelModel.efficiency": 0.3 }
        }"#;
        assert!(ScenarioConfig::from_json_str(doc).is_err());
    }

    #[test]
    fn rejects_malformed_parameter_name() {
        assert!(ScenarioConfig::from_json_str(r#"{"parameters": {"efficiency": 0.3}}"#).is_err());
    }

    #[test]
    fn rejects_reversed_connection() {
        let doc = r#"{"connections": {
            "{panel}.SolarPanelModel.power": ["{weather}.WeatherModel.irradiance"]
        }}"#;
        assert!(ScenarioConfig::from_json_str(doc).is_err());
    }

    #[test]
    fn rejects_fan_out() {
        let doc = r#"{"connections": {
            "{weather}.WeatherModel.irradiance": [
                "{panel}.SolarPanelModel.irradiance",
                "{other}.SolarPanelModel.irradiance"
            ]
        }}"#;
        assert!(ScenarioConfig::from_json_str(doc).is_err());
    }

    #[test]
    fn rejects_undeclared_instance() {
        let doc = r#"{
            "fmus": { "{weather}": "WeatherModel.fmu" },
            "connections": {
                "{weather}.WeatherModel.irradiance": ["{panel}.SolarPanelModel.irradiance"]
            }
        }"#;
        let err = ScenarioConfig::from_json_str(doc);
        assert!(matches!(err, Err(ConfigError { ref field, .. }) if field == "fmus"));
    }

    #[test]
    fn custom_instance_names_are_kept() {
        let doc = r#"{"connections": {
            "site.a.WeatherModel.irradiance": ["roof_1.SolarPanelModel.irradiance"]
        }}"#;
        let cfg = ScenarioConfig::from_json_str(doc).expect("valid wiring");
        assert_eq!(cfg.coupling.weather_instance, "site.a");
        assert_eq!(cfg.coupling.panel_instance, "roof_1");
    }

    #[test]
    fn malformed_json_is_error() {
        assert!(ScenarioConfig::from_json_str("{not json").is_err());
    }

    #[test]
    fn signal_ref_parsing() {
        assert_eq!(
            SignalRef::parse("{w}.WeatherModel.irradiance"),
            Some(SignalRef {
                instance: "{w}",
                model: "WeatherModel",
                signal: "irradiance",
            })
        );
        assert_eq!(SignalRef::parse("irradiance"), None);
        assert_eq!(SignalRef::parse(".WeatherModel.irradiance"), None);
    }
}
