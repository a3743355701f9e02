//! Solar panel digital twin: an irradiance generator coupled to a linear
//! panel model over a fixed-step clock.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod cosim;
pub mod error;
/// CSV export and import of recorded runs.
pub mod io;
pub mod models;
/// Simulation clock, stepper, recorder and summary.
pub mod sim;
pub mod telemetry;
#[cfg(feature = "tui")]
pub mod tui;

pub use error::{ImportError, SimError};
pub use sim::engine::run_simulation;
