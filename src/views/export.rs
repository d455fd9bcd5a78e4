//! CSV export of the filtered subset
//!
//! Serialisation goes through a polars frame so quoting and number
//! formatting match what the loader reads back. Writing the file is the
//! only async step and happens outside the recomputation pipeline.

use crate::config::ExportConfig;
use crate::constants::{LATITUDE_COLUMN, LONGITUDE_COLUMN};
use crate::engine::Subset;
use crate::error::{Result, WildlifeError};
use crate::models::{Record, RecordColumn};

use chrono::{Local, NaiveDate};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// A ready-to-download export.
///
/// The content depends only on the subset. The file name carries the
/// date the file is offered or written, so it is resolved on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_prefix: String,
    pub mime_type: String,
    pub content: String,
    pub row_count: usize,
}

impl CsvExport {
    pub fn build(subset: &Subset, columns: &[RecordColumn], config: &ExportConfig) -> Result<Self> {
        let records: Vec<&Record> = subset.iter().collect();
        let content = serialize_records(&records, columns)?;

        Ok(Self {
            file_prefix: config.file_prefix.clone(),
            mime_type: config.mime_type.clone(),
            content,
            row_count: records.len(),
        })
    }

    /// File name for today's local date
    pub fn file_name(&self) -> String {
        self.file_name_on(Local::now().date_naive())
    }

    pub fn file_name_on(&self, date: NaiveDate) -> String {
        export_file_name(&self.file_prefix, date)
    }

    /// Write the export into a directory under today's name
    pub async fn write_to(&self, directory: &Path) -> Result<PathBuf> {
        self.write_dated(directory, Local::now().date_naive()).await
    }

    /// Write the export into a directory, returning the file path
    pub async fn write_dated(&self, directory: &Path, date: NaiveDate) -> Result<PathBuf> {
        fs::create_dir_all(directory).await?;
        let path = directory.join(self.file_name_on(date));
        fs::write(&path, self.content.as_bytes()).await?;

        info!("Exported {} records to {}", self.row_count, path.display());
        Ok(path)
    }
}

/// `<prefix>-<YYYY-MM-DD>.csv`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.csv", prefix, date.format("%Y-%m-%d"))
}

/// Header row plus one comma separated line per record, no index column
pub fn serialize_records(records: &[&Record], columns: &[RecordColumn]) -> Result<String> {
    let frame_columns: Vec<Column> = columns
        .iter()
        .map(|column| match column {
            RecordColumn::Category(field) => {
                let values: Vec<Option<&str>> = records.iter().map(|r| r.field(*field)).collect();
                Column::new(field.column_name().into(), values)
            }
            RecordColumn::Latitude => {
                let values: Vec<f64> = records.iter().map(|r| r.latitude).collect();
                Column::new(LATITUDE_COLUMN.into(), values)
            }
            RecordColumn::Longitude => {
                let values: Vec<f64> = records.iter().map(|r| r.longitude).collect();
                Column::new(LONGITUDE_COLUMN.into(), values)
            }
        })
        .collect();

    let mut frame = DataFrame::new(frame_columns)?;
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut frame)?;

    debug!(
        "Serialised {} records ({} bytes)",
        records.len(),
        buffer.len()
    );

    String::from_utf8(buffer).map_err(|e| WildlifeError::Export {
        reason: format!("CSV output was not valid UTF-8: {}", e),
    })
}
