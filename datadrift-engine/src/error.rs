use std::path::PathBuf;

use thiserror::Error;

use datadrift_core::errors::DriftError;

/// Errors raised while reading the snapshot store or detecting changes.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("metric key not found in snapshot store: {0}")]
    NotFound(String),
    #[error("failed to read snapshot store at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot store at {path} is corrupt: {message}")]
    CorruptStore { path: String, message: String },
    #[error("snapshot series contains no observations")]
    EmptySeries,
}

impl HistoryError {
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HistoryError::Io {
            path: path.into().display().to_string(),
            source,
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        HistoryError::CorruptStore {
            path: path.into().display().to_string(),
            message: message.into(),
        }
    }
}

impl From<HistoryError> for DriftError {
    fn from(value: HistoryError) -> Self {
        DriftError::HistoryError(value.to_string())
    }
}
