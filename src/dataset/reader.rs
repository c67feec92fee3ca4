use std::path::PathBuf;

use crate::error::{PipelineError, Result};
use crate::models::{NumericColumn, Observation, HEADER};

/// In-memory table loaded from the dataset file, in stored row order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub observations: Vec<Observation>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Present values of one numeric column, preserving row order.
    /// Missing fields are skipped, not coerced to zero.
    pub fn series(&self, column: NumericColumn) -> Vec<f64> {
        self.observations
            .iter()
            .filter_map(|row| row.value(column))
            .collect()
    }
}

pub struct DatasetReader {
    path: PathBuf,
}

impl DatasetReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the dataset file.
    ///
    /// The header line is verified against the fixed schema before any row
    /// is parsed; a file with a header and no rows yields an empty table.
    pub fn read(&self) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let found: Vec<&str> = reader.headers()?.iter().collect();
        if found != HEADER {
            return Err(PipelineError::HeaderMismatch {
                expected: HEADER.join(","),
                found: found.join(","),
            });
        }

        let mut observations = Vec::new();
        for row in reader.deserialize() {
            observations.push(row?);
        }

        Ok(Dataset { observations })
    }
}
