//! Common trait for the equation models coupled by the stepper.

/// A stateless equation model mapping one scalar input to one scalar output.
///
/// Each model stands in for one compiled unit of the co-simulation: it has
/// a model name (the unit it represents) and a named output signal. The
/// stepper feeds the output of one model into the input of the next.
pub trait Model {
    /// Evaluates the model for the given input.
    ///
    /// # Arguments
    ///
    /// * `input` - Input signal value (units depend on the model)
    ///
    /// # Returns
    ///
    /// The output signal value for this input.
    fn evaluate(&self, input: f64) -> f64;

    /// Returns the model name, e.g. `"WeatherModel"`.
    fn model_name(&self) -> &'static str;

    /// Returns the name of the output signal, e.g. `"irradiance"`.
    fn output_name(&self) -> &'static str;

    /// Builds the fully qualified output signal name for a model instance.
    ///
    /// ```
    /// use solar_twin::models::{Model, WeatherModel};
    ///
    /// let weather = WeatherModel::default();
    /// assert_eq!(
    ///     weather.qualified_output("{weather}"),
    ///     "{weather}.WeatherModel.irradiance"
    /// );
    /// ```
    fn qualified_output(&self, instance: &str) -> String {
        format!("{instance}.{}.{}", self.model_name(), self.output_name())
    }
}
