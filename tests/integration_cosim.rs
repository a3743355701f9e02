//! Integration tests for co-simulation documents and CSV interchange.

mod common;

use std::path::Path;

use solar_twin::ImportError;
use solar_twin::config::ScenarioConfig;
use solar_twin::io::export::{ColumnNames, export_csv, write_csv};
use solar_twin::io::import::{import_csv, read_csv};
use solar_twin::sim::engine::Engine;
use solar_twin::sim::types::SimulationResult;

fn run(scenario: &ScenarioConfig) -> SimulationResult {
    Engine::new(
        scenario.clock(),
        scenario.irradiance_parameters(),
        scenario.panel_parameters(),
    )
    .expect("valid scenario")
    .run()
}

#[test]
fn cosim_document_matches_default_toml_scenario() {
    let json = ScenarioConfig::from_json_file(Path::new("scenarios/solar_panel_cosim.json"))
        .expect("bundled cosim document parses");
    let toml = ScenarioConfig::from_toml_file(Path::new("scenarios/default.toml"))
        .expect("bundled toml scenario parses");

    assert_eq!(json, toml);
    assert_eq!(run(&json), common::default_run());
}

#[test]
fn cosim_instances_drive_qualified_columns() {
    let json = r#"{
        "connections": { "sky.WeatherModel.irradiance": ["roof.SolarPanelModel.irradiance"] },
        "parameters": { "roof.SolarPanelModel.panelArea": 2.5 },
        "algorithm": { "type": "fixed-step", "size": 3600 },
        "startTime": 0,
        "endTime": 86400
    }"#;
    let scenario = ScenarioConfig::from_json_str(json).expect("valid document");
    assert_eq!(scenario.panel.panel_area, 2.5);

    let columns = scenario.column_names(true);
    assert_eq!(columns.irradiance, "sky.WeatherModel.irradiance");
    assert_eq!(columns.power, "roof.SolarPanelModel.power");

    let result = run(&scenario);
    let mut buf = Vec::new();
    write_csv(&result, &columns, &mut buf).expect("in-memory write");
    let text = String::from_utf8(buf).expect("utf-8");
    assert_eq!(
        text.lines().next(),
        Some("time,sky.WeatherModel.irradiance,roof.SolarPanelModel.power")
    );
    assert_eq!(text.lines().count(), 26);

    let reread = read_csv(text.as_bytes()).expect("qualified columns import");
    assert_eq!(reread, result);
}

#[test]
fn variable_step_algorithm_is_rejected() {
    let json = r#"{
        "connections": { "w.WeatherModel.irradiance": ["p.SolarPanelModel.irradiance"] },
        "algorithm": { "type": "variable-step", "size": 60 }
    }"#;
    assert!(ScenarioConfig::from_json_str(json).is_err());
}

#[test]
fn csv_file_round_trip_is_exact() {
    let result = common::default_run();
    let path = common::temp_path("round-trip.csv");

    export_csv(&result, &ColumnNames::default(), &path).expect("write csv");
    let reread = import_csv(&path).expect("read csv");
    let _ = std::fs::remove_file(&path);

    assert_eq!(reread.len(), 1441);
    assert_eq!(reread, result);
}

#[test]
fn import_reports_missing_power_column() {
    let err = read_csv("time,irradiance\n0,0\n".as_bytes()).err();
    assert!(matches!(err, Some(ImportError::MissingColumn(_))));
}

#[test]
fn import_missing_file_is_an_error() {
    assert!(import_csv(&common::temp_path("does-not-exist.csv")).is_err());
}

#[test]
fn import_rejects_nan_time_instead_of_panicking() {
    let err = read_csv("time,irradiance,power\nNaN,0,0\n60,0,0\n".as_bytes()).err();
    assert!(matches!(err, Some(ImportError::InvalidTime { row: 1, .. })));
}

#[test]
fn cosim_parameter_must_belong_to_its_model() {
    let json = r#"{"parameters": {"{weather}.WeatherModel.efficiency": 0.9}}"#;
    let err = ScenarioConfig::from_json_str(json).err();
    assert!(
        err.as_ref()
            .is_some_and(|e| e.field == "parameters.{weather}.WeatherModel.efficiency"),
        "cross-model parameter should be rejected: {err:?}"
    );
}
