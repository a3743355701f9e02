//! Error types shared across the crate.

use thiserror::Error;

/// Failure of a simulation run.
///
/// A run either completes fully or fails here before the first step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The simulation clock cannot produce a finite, ordered time grid.
    #[error("invalid configuration: {field} {message}")]
    InvalidConfiguration {
        /// Offending clock field (e.g. `"step_size"`).
        field: &'static str,
        /// Constraint that was violated.
        message: String,
    },
}

/// Failure while re-reading an exported results table.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Underlying CSV or I/O failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// A required column is not present in the header.
    #[error("missing column: {0}")]
    MissingColumn(&'static str),
    /// A cell could not be parsed as a number.
    #[error("row {row}: column \"{column}\" has non-numeric value \"{value}\"")]
    InvalidNumber {
        /// 1-based data row index.
        row: usize,
        /// Column header.
        column: String,
        /// Raw cell content.
        value: String,
    },
    /// A time cell parsed but is NaN or infinite.
    #[error("row {row}: time must be finite, got {time}")]
    InvalidTime {
        /// 1-based data row index.
        row: usize,
        /// Offending time value.
        time: f64,
    },
    /// Time decreased between consecutive rows.
    #[error("row {row}: time {time} precedes previous row")]
    OutOfOrder {
        /// 1-based data row index.
        row: usize,
        /// Offending time value in seconds.
        time: f64,
    },
}
