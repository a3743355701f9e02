//! CSV export for simulation results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::models::{Model, SolarPanelModel, WeatherModel};
use crate::sim::types::SimulationResult;

/// Column labels used for the exported table.
///
/// The default labels are `time,irradiance,power`. The qualified form
/// embeds instance and model names the way the co-simulation output does,
/// e.g. `{weather}.WeatherModel.irradiance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnNames {
    /// Time column (seconds).
    pub time: String,
    /// Irradiance column (W/m²).
    pub irradiance: String,
    /// Power column (W).
    pub power: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            time: "time".to_string(),
            irradiance: WeatherModel::default().output_name().to_string(),
            power: SolarPanelModel::default().output_name().to_string(),
        }
    }
}

impl ColumnNames {
    /// Qualified labels for the given weather and panel instance names.
    ///
    /// ```
    /// use solar_twin::io::export::ColumnNames;
    ///
    /// let names = ColumnNames::qualified("{weather}", "{panel}");
    /// assert_eq!(names.irradiance, "{weather}.WeatherModel.irradiance");
    /// assert_eq!(names.power, "{panel}.SolarPanelModel.power");
    /// ```
    pub fn qualified(weather_instance: &str, panel_instance: &str) -> Self {
        Self {
            time: "time".to_string(),
            irradiance: WeatherModel::default().qualified_output(weather_instance),
            power: SolarPanelModel::default().qualified_output(panel_instance),
        }
    }

    fn header(&self) -> [&str; 3] {
        [self.time.as_str(), self.irradiance.as_str(), self.power.as_str()]
    }
}

/// Exports simulation results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per sample. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `result` - Completed simulation run
/// * `columns` - Column labels
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(result: &SimulationResult, columns: &ColumnNames, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(result, columns, buf)
}

/// Writes simulation results as CSV to any writer.
///
/// Numbers are written in their shortest round-trip form, so re-reading the
/// table reproduces every value exactly.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(
    result: &SimulationResult,
    columns: &ColumnNames,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(columns.header())?;

    for s in result {
        wtr.write_record(&[
            s.time_seconds.to_string(),
            s.irradiance_wm2.to_string(),
            s.power_w.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
