/// Combines the deterministic mean with the quantile median.
pub struct EnsembleForecaster;

impl EnsembleForecaster {
    pub fn new() -> Self {
        Self
    }

    /// Elementwise average of the two inputs. Undefined inputs propagate:
    /// a missing mean or median yields an undefined ensemble, never zero.
    pub fn combine(&self, mean: Option<f64>, median: Option<f64>) -> Option<f64> {
        match (mean, median) {
            (Some(mean), Some(median)) => Some((mean + median) / 2.0),
            _ => None,
        }
    }
}

impl Default for EnsembleForecaster {
    fn default() -> Self {
        Self::new()
    }
}
