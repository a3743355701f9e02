//! REST API for a completed simulation run.
//!
//! Provides two GET endpoints:
//! - `/state`: scenario, run summary, and latest sample
//! - `/telemetry`: all samples with optional time-range filtering

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::config::ScenarioConfig;
use crate::sim::summary::RunSummary;
use crate::sim::types::SimulationResult;

pub use types::{ErrorResponse, StateResponse, TelemetryQuery, TelemetryRecord};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the simulation run completes and wrapped in
/// `Arc`; no locks needed since all data is read-only.
pub struct AppState {
    /// Scenario used for this run.
    pub scenario: ScenarioConfig,
    /// Post-hoc run summary.
    pub summary: RunSummary,
    /// Recorded samples.
    pub result: SimulationResult,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/telemetry", get(handlers::get_telemetry))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
