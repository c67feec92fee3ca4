/// Mean-value summary per column.
pub struct DeterministicForecaster;

impl DeterministicForecaster {
    pub fn new() -> Self {
        Self
    }

    /// Arithmetic mean of the present values, or `None` when the column
    /// has no present values.
    pub fn forecast(&self, series: &[f64]) -> Option<f64> {
        if series.is_empty() {
            return None;
        }
        Some(series.iter().sum::<f64>() / series.len() as f64)
    }
}

impl Default for DeterministicForecaster {
    fn default() -> Self {
        Self::new()
    }
}
