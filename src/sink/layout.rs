use std::fs;
use std::path::{Path, PathBuf};

use crate::sink::{CsvDataset, SinkError};

const CLEAN_SINK: &str = "clean_transactions.csv";
const ALERT_SINK: &str = "fraud_alerts.csv";
const ALERT_EXPORT_SINK: &str = "fraud_alerts_today.csv";

/// The three named sinks of one pipeline run, grouped under a single output
/// directory. Built once at run start and passed explicitly through the
/// pipeline; there is no ambient output location.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    directory: PathBuf,
    /// Cleared transactions, business fields only.
    pub clean: CsvDataset,
    /// Flagged transactions with their fraud score.
    pub alerts: CsvDataset,
    /// Narrow alert extract for downstream reporting.
    pub alert_export: CsvDataset
}

impl OutputLayout {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        let directory = directory.as_ref().to_path_buf();

        Self {
            clean: CsvDataset::new(directory.join(CLEAN_SINK)),
            alerts: CsvDataset::new(directory.join(ALERT_SINK)),
            alert_export: CsvDataset::new(directory.join(ALERT_EXPORT_SINK)),
            directory
        }
    }

    /// Ensures the output directory exists. Files other than the three
    /// named sinks are left untouched; each sink replaces only itself.
    pub fn prepare(&self) -> Result<(), SinkError> {
        fs::create_dir_all(&self.directory)
            .map_err(|error| SinkError::stage(&self.directory, error))
    }
}
