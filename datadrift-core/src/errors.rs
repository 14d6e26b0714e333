use std::io;

use thiserror::Error;

/// Result type used across the DataDrift core crate.
pub type Result<T> = std::result::Result<T, DriftError>;

/// Canonical error representation shared by the pipeline stages.
#[derive(Debug, Error)]
pub enum DriftError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("snapshot history error: {0}")]
    HistoryError(String),

    #[error("chart service error: {0}")]
    ChartServiceError(String),

    #[error("report publish error: {0}")]
    PublishError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for DriftError {
    fn from(err: serde_json::Error) -> Self {
        DriftError::SerializationError(err.to_string())
    }
}

impl From<anyhow::Error> for DriftError {
    fn from(err: anyhow::Error) -> Self {
        DriftError::Internal(err.to_string())
    }
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {key}: {message}")]
    InvalidEnvVar { key: &'static str, message: String },
}

impl From<ConfigError> for DriftError {
    fn from(value: ConfigError) -> Self {
        DriftError::ConfigError(value.to_string())
    }
}
