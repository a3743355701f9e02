//! Re-reading exported tables, as a downstream plotting consumer would.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ImportError;
use crate::sim::types::{SimulationResult, SimulationSample};

/// Finds a column named exactly `name` or ending in `.name`.
fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    let suffix = format!(".{name}");
    headers
        .iter()
        .position(|h| h == name)
        .or_else(|| headers.iter().position(|h| h.ends_with(&suffix)))
}

fn parse_cell(
    record: &csv::StringRecord,
    headers: &csv::StringRecord,
    idx: usize,
    row: usize,
) -> Result<f64, ImportError> {
    let raw = record.get(idx).unwrap_or("").trim();
    // Missing values read as zero, matching the plotting consumer.
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse().map_err(|_| ImportError::InvalidNumber {
        row,
        column: headers.get(idx).unwrap_or_default().to_string(),
        value: raw.to_string(),
    })
}

/// Reads a results table from any reader.
///
/// Accepts both plain (`irradiance`, `power`) and qualified
/// (`{weather}.WeatherModel.irradiance`) column names. Extra columns are
/// ignored.
///
/// # Errors
///
/// Returns an [`ImportError`] if the table is malformed, a column is
/// missing, a value is not numeric, a time is not finite, or time goes
/// backwards.
pub fn read_csv(reader: impl Read) -> Result<SimulationResult, ImportError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let time_idx = find_column(&headers, "time").ok_or(ImportError::MissingColumn("time"))?;
    let irr_idx =
        find_column(&headers, "irradiance").ok_or(ImportError::MissingColumn("irradiance"))?;
    let power_idx = find_column(&headers, "power").ok_or(ImportError::MissingColumn("power"))?;

    let mut samples: Vec<SimulationSample> = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let sample = SimulationSample {
            time_seconds: parse_cell(&record, &headers, time_idx, row)?,
            irradiance_wm2: parse_cell(&record, &headers, irr_idx, row)?,
            power_w: parse_cell(&record, &headers, power_idx, row)?,
        };
        if !sample.time_seconds.is_finite() {
            return Err(ImportError::InvalidTime {
                row,
                time: sample.time_seconds,
            });
        }
        if let Some(prev) = samples.last() {
            if sample.time_seconds < prev.time_seconds {
                return Err(ImportError::OutOfOrder {
                    row,
                    time: sample.time_seconds,
                });
            }
        }
        samples.push(sample);
    }

    Ok(SimulationResult::from_ordered(samples))
}

/// Reads a results table from a CSV file.
///
/// # Errors
///
/// Returns an [`ImportError`] if the file cannot be opened or parsed.
pub fn import_csv(path: &Path) -> Result<SimulationResult, ImportError> {
    let file = File::open(path).map_err(csv::Error::from)?;
    read_csv(file)
}
