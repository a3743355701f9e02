//! Equation models of the solar panel twin.

/// Linear irradiance-to-power conversion.
pub mod panel;
pub mod types;
/// Synthetic irradiance generator.
pub mod weather;

pub use panel::{PanelParameters, SolarPanelModel, compute_power};
pub use types::Model;
pub use weather::{IrradianceParameters, WeatherModel, compute_irradiance};
