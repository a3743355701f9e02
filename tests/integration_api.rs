//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use solar_twin::api::{AppState, router};
use solar_twin::config::ScenarioConfig;
use solar_twin::sim::engine::run_simulation;
use solar_twin::sim::summary::RunSummary;

/// Runs the default scenario at one-minute steps and returns the API state.
fn build_api_state() -> Arc<AppState> {
    let scenario = ScenarioConfig::default_scenario();
    let result = run_simulation(
        &scenario.clock(),
        &scenario.irradiance_parameters(),
        &scenario.panel_parameters(),
    )
    .expect("default scenario is valid");
    let summary = RunSummary::from_result(&result);

    Arc::new(AppState {
        scenario,
        summary,
        result,
    })
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(build_api_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn full_scenario_state_endpoint() {
    let (status, json) = get_json("/state").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["scenario"]["simulation"]["step_size"], 60.0);
    assert_eq!(json["scenario"]["coupling"]["weather_instance"], "{weather}");
    assert_eq!(json["summary"]["sample_count"], 1441);
    assert!(json["summary"]["energy_wh"].as_f64().unwrap().is_finite());
    assert_eq!(json["latest_sample"]["time"], 86_400.0);
}

#[tokio::test]
async fn full_scenario_telemetry_endpoint() {
    let (status, json) = get_json("/telemetry").await;
    assert_eq!(status, StatusCode::OK);

    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 1441);

    let first = &records[0];
    assert_eq!(first["time"], 0.0);
    assert_eq!(first["irradiance"], 0.0);
    assert_eq!(first["power"], 0.0);
    assert!(first.get("irradiance_wm2").is_none());
    assert!(first.get("power_w").is_none());
}

#[tokio::test]
async fn full_scenario_telemetry_range() {
    // 11:00 to 13:00 inclusive at one-minute steps
    let (status, json) = get_json("/telemetry?from=39600&to=46800").await;
    assert_eq!(status, StatusCode::OK);

    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 121);
    assert_eq!(records[0]["time"], 39_600.0);
    assert_eq!(records[120]["time"], 46_800.0);
    assert!(
        records
            .iter()
            .all(|r| r["power"].as_f64().unwrap() > 150.0)
    );
}

#[tokio::test]
async fn inverted_range_is_bad_request() {
    let (status, json) = get_json("/telemetry?from=10&to=5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}
