mod csv_dataset;
mod errors;
mod layout;
mod records;

use serde::Serialize;

pub use csv_dataset::CsvDataset;
pub use errors::SinkError;
pub use layout::OutputLayout;
pub use records::{AlertExportRow, AlertRecord, CleanRecord};

/// A durable, named output location with full-overwrite semantics.
///
/// A write either fully replaces the prior content or fails leaving it
/// intact; no reader ever observes a mix of old and new data.
pub trait DatasetSink: Send + Sync + 'static {
    fn replace<T: Serialize>(&self, headers: &[&str], rows: &[T]) -> Result<(), SinkError>;
}
