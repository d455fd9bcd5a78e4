//! Error handling for wildlife data exploration.
//!
//! Provides error types with context for data source loading,
//! configuration validation, and export failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WildlifeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Dataset not found at path: {path}")]
    DatasetNotFound { path: PathBuf },

    #[error("Missing required columns in {path}: {}", columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    #[error("Invalid data source {path} - {reason}")]
    InvalidSource { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Export failed: {reason}")]
    Export { reason: String },

    #[error("Session closed")]
    SessionClosed,

    #[error("Session task failed: {reason}")]
    SessionFailed { reason: String },

    #[error("Interrupted: {reason}")]
    Interrupted { reason: String },
}

impl WildlifeError {
    /// True for failures that stop a session from starting (the source is
    /// missing, unreadable or malformed).
    pub fn is_data_source(&self) -> bool {
        matches!(
            self,
            WildlifeError::DatasetNotFound { .. }
                | WildlifeError::MissingColumns { .. }
                | WildlifeError::InvalidSource { .. }
                | WildlifeError::Polars(_)
                | WildlifeError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, WildlifeError>;
