//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, StateResponse, TelemetryQuery, TelemetryRecord};

/// Returns scenario, run summary, and latest sample.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(StateResponse {
        scenario: state.scenario.clone(),
        summary: state.summary.clone(),
        latest_sample: state.result.last().map(TelemetryRecord::from),
    })
}

/// Returns samples, optionally filtered by a time range in seconds.
///
/// `GET /telemetry` → 200 + `Vec<TelemetryRecord>` JSON
/// `GET /telemetry?from=A&to=B` → filtered range (inclusive)
/// `GET /telemetry?from=600&to=300` → 400 + `ErrorResponse`
pub async fn get_telemetry(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TelemetryQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(f64::NEG_INFINITY);
    let to = query.to.unwrap_or(f64::INFINITY);

    if from.is_nan() || to.is_nan() || from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<TelemetryRecord> = state
        .result
        .in_range(from, to)
        .map(TelemetryRecord::from)
        .collect();

    Ok(Json(records))
}
