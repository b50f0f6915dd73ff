//! Error handling for ETL runs.
//!
//! Every failure aborts the run; nothing here is recovered from inside the
//! pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Source directory unavailable: {path}")]
    SourceUnavailable { path: PathBuf },

    #[error("Malformed input in file: {path} - {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    #[error("Missing field '{field}' in file: {path}")]
    MissingField { path: PathBuf, field: String },

    #[error("I/O failure on {path}: {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl EtlError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_field(path: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        Self::MissingField {
            path: path.into(),
            field: field.into(),
        }
    }

    pub(crate) fn io_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoFailure {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
