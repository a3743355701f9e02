//! Tabular export and import of simulation results.

pub mod export;
pub mod import;
