use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::sink::{DatasetSink, SinkError};

/// A named CSV dataset with full-overwrite replace semantics.
///
/// Rows are written to a temporary file in the destination directory and
/// atomically renamed over the final path, so a reader either sees the
/// previous complete dataset or the new complete dataset, never a partial
/// write.
#[derive(Debug, Clone)]
pub struct CsvDataset {
    path: PathBuf
}

impl CsvDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSink for CsvDataset {
    fn replace<T: Serialize>(&self, headers: &[&str], rows: &[T]) -> Result<(), SinkError> {
        // Staging in the destination directory keeps the rename on one
        // filesystem, which is what makes persist atomic.
        let directory = self.path.parent().unwrap_or_else(|| Path::new("."));
        let staged = NamedTempFile::new_in(directory)
            .map_err(|error| SinkError::stage(&self.path, error))?;

        // The header row is written explicitly so an empty dataset still
        // carries its schema.
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(staged.as_file());

        writer
            .write_record(headers)
            .map_err(|error| SinkError::serialize(&self.path, error))?;

        for row in rows {
            writer
                .serialize(row)
                .map_err(|error| SinkError::serialize(&self.path, error))?;
        }

        writer
            .flush()
            .map_err(|error| SinkError::stage(&self.path, error))?;
        drop(writer);

        staged
            .persist(&self.path)
            .map_err(|error| SinkError::replace(&self.path, error.error))?;

        debug!("Replaced sink [{}] with {} rows", self.path.display(), rows.len());

        Ok(())
    }
}
