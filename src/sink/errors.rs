use std::io;
use std::path::Path;

use thiserror::Error;

/// A sink could not be fully written or replaced.
///
/// Sink failures are fatal and never leave the destination with a mix of
/// old and new content; the replacement file is staged next to the target
/// and either fully renamed over it or discarded.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Could not stage sink [{path}]: {source}")]
    Stage {
        path: String,
        source: io::Error
    },
    #[error("Could not serialize row for sink [{path}]: {source}")]
    Serialize {
        path: String,
        source: csv::Error
    },
    #[error("Could not replace sink [{path}]: {source}")]
    Replace {
        path: String,
        source: io::Error
    }
}

impl SinkError {
    pub fn stage(path: &Path, source: io::Error) -> Self {
        Self::Stage {
            path: path.display().to_string(),
            source
        }
    }

    pub fn serialize(path: &Path, source: csv::Error) -> Self {
        Self::Serialize {
            path: path.display().to_string(),
            source
        }
    }

    pub fn replace(path: &Path, source: io::Error) -> Self {
        Self::Replace {
            path: path.display().to_string(),
            source
        }
    }
}
