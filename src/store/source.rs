//! Raw occurrence table sources
//!
//! A source only has to produce a flat polars frame. Column renaming,
//! coercion and record filtering happen in the store.

use crate::config::SourceConfig;
use crate::error::{Result, WildlifeError};

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Anything that can yield the raw occurrence table
pub trait RecordSource {
    /// Where the data came from, used in error messages and summaries
    fn origin(&self) -> PathBuf;

    /// Read the complete raw table
    fn read_frame(&self, config: &SourceConfig) -> Result<DataFrame>;
}

/// Delimited text file on disk
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvSource {
    fn origin(&self) -> PathBuf {
        self.path.clone()
    }

    fn read_frame(&self, config: &SourceConfig) -> Result<DataFrame> {
        if !self.path.is_file() {
            return Err(WildlifeError::DatasetNotFound {
                path: self.path.clone(),
            });
        }

        debug!("Reading occurrence table from {}", self.path.display());

        // Every column is read as text; the store coerces coordinates itself
        let delimiter = config.delimiter;
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .map_parse_options(|options| options.with_separator(delimiter))
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .map_err(|e| WildlifeError::InvalidSource {
                path: self.path.clone(),
                reason: e.to_string(),
            })?
            .finish()
            .map_err(|e| WildlifeError::InvalidSource {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            "Read {} rows x {} columns from {}",
            frame.height(),
            frame.width(),
            self.path.display()
        );

        Ok(frame)
    }
}

/// Table already held in memory
#[derive(Debug, Clone)]
pub struct FrameSource {
    frame: DataFrame,
    origin: PathBuf,
}

impl FrameSource {
    pub fn new(frame: DataFrame) -> Self {
        Self {
            frame,
            origin: PathBuf::from("<memory>"),
        }
    }

    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = origin.into();
        self
    }
}

impl RecordSource for FrameSource {
    fn origin(&self) -> PathBuf {
        self.origin.clone()
    }

    fn read_frame(&self, _config: &SourceConfig) -> Result<DataFrame> {
        Ok(self.frame.clone())
    }
}
