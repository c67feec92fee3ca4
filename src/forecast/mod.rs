pub mod deterministic;
pub mod ensemble;
pub mod quantile;
pub mod sequence;

pub use deterministic::DeterministicForecaster;
pub use ensemble::EnsembleForecaster;
pub use quantile::{QuantileForecaster, Quantiles};
pub use sequence::SequenceForecaster;

use std::fmt;

use crate::dataset::Dataset;
use crate::models::NumericColumn;

/// Forecast results for one numeric column across all four models.
#[derive(Debug, Clone)]
pub struct ColumnForecasts {
    pub column: NumericColumn,
    pub mean: Option<f64>,
    pub quantiles: Option<Quantiles>,
    pub ensemble: Option<f64>,
    pub extrapolated: Option<f64>,
}

/// Per-model, per-column results in the fixed report order.
#[derive(Debug, Clone)]
pub struct ForecastReport {
    pub columns: Vec<ColumnForecasts>,
}

/// Fit all four models over the dataset.
///
/// Columns are visited in schema order; each model sees only the present
/// values of a column, in stored row order.
pub fn run_models(dataset: &Dataset) -> ForecastReport {
    let deterministic = DeterministicForecaster::new();
    let quantile = QuantileForecaster::new();
    let ensemble = EnsembleForecaster::new();
    let sequence = SequenceForecaster::new();

    let columns = NumericColumn::ALL
        .iter()
        .map(|&column| {
            let series = dataset.series(column);
            let mean = deterministic.forecast(&series);
            let quantiles = quantile.forecast(&series);
            let median = quantiles.as_ref().map(|q| q.q50);

            ColumnForecasts {
                column,
                mean,
                quantiles,
                ensemble: ensemble.combine(mean, median),
                extrapolated: sequence.forecast(&series),
            }
        })
        .collect();

    ForecastReport { columns }
}

impl ForecastReport {
    pub fn column(&self, column: NumericColumn) -> Option<&ColumnForecasts> {
        self.columns.iter().find(|c| c.column == column)
    }
}

fn scalar_line(column: NumericColumn, value: Option<f64>, missing: &str) -> String {
    match value {
        Some(value) => format!("  {}: {:.3}", column, value),
        None => format!("  {}: {}", column, missing),
    }
}

impl fmt::Display for ForecastReport {
    /// Models print in the order Deterministic, Quantile, Ensemble,
    /// Sequence; columns in schema order within each model.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();

        lines.push("Deterministic forecast:".to_string());
        for c in &self.columns {
            lines.push(scalar_line(c.column, c.mean, "undefined"));
        }

        lines.push("Quantile forecast (q25 / q50 / q75):".to_string());
        for c in &self.columns {
            lines.push(match &c.quantiles {
                Some(q) => format!(
                    "  {}: {:.3} / {:.3} / {:.3}",
                    c.column, q.q25, q.q50, q.q75
                ),
                None => format!("  {}: undefined", c.column),
            });
        }

        lines.push("Ensemble forecast:".to_string());
        for c in &self.columns {
            lines.push(scalar_line(c.column, c.ensemble, "undefined"));
        }

        lines.push("Sequence forecast:".to_string());
        for c in &self.columns {
            lines.push(scalar_line(c.column, c.extrapolated, "not available"));
        }

        f.write_str(&lines.join("\n"))
    }
}
