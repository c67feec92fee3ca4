use std::collections::HashSet;
use std::path::PathBuf;

use tracing::debug;

use crate::dataset::DatasetReader;
use crate::error::Result;
use crate::models::{Observation, HEADER};

/// Persists collected rows to the dataset file.
///
/// Collection runs merge rather than overwrite: rows whose `(time, source)`
/// key is already stored are dropped, so re-running the collector over an
/// overlapping range never duplicates rows. Even when no row survives the
/// merge the file is written with its header line, so readers never see a
/// missing file.
pub struct DatasetWriter {
    path: PathBuf,
}

impl DatasetWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Merge `rows` into the dataset and rewrite it. Returns the number of
    /// rows actually added. Rows carrying no measurements at all are
    /// skipped; a bare timestamp adds nothing worth storing.
    pub fn append(&self, rows: &[Observation]) -> Result<usize> {
        let mut merged = if self.path.exists() {
            DatasetReader::new(&self.path).read()?.observations
        } else {
            Vec::new()
        };

        let mut seen: HashSet<(String, String)> = merged
            .iter()
            .map(|row| (row.time.clone(), row.source.clone()))
            .collect();

        let mut added = 0;
        for row in rows {
            if !row.has_measurements() {
                continue;
            }
            if seen.insert((row.time.clone(), row.source.clone())) {
                merged.push(row.clone());
                added += 1;
            }
        }

        debug!(
            added,
            dropped = rows.len() - added,
            total = merged.len(),
            "merging rows into dataset"
        );

        self.write_all(&merged)?;
        Ok(added)
    }

    /// Write the fixed header followed by `rows`, replacing any previous
    /// file content.
    pub fn write_all(&self, rows: &[Observation]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;

        writer.write_record(HEADER)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        Ok(())
    }
}
