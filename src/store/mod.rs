//! Immutable occurrence record store.
//!
//! Loads the raw table once per session, renames the coordinate
//! columns to their canonical names, coerces types, and drops every
//! record without usable coordinates. The store never changes after
//! loading; a new dataset means a new store.

pub mod source;

#[cfg(test)]
pub mod tests;

pub use self::source::{CsvSource, FrameSource, RecordSource};

use crate::config::SourceConfig;
use crate::constants::{
    LATITUDE_COLUMN, LATITUDE_RANGE, LONGITUDE_COLUMN, LONGITUDE_RANGE, MISSING_VALUE_MARKERS,
};
use crate::error::{Result, WildlifeError};
use crate::models::{FilterField, Record, RecordColumn};

use polars::prelude::*;
use std::path::PathBuf;
use tokio::task;
use tracing::{debug, info, warn};

/// Load statistics for a store
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub origin: PathBuf,
    pub source_rows: usize,
    pub retained: usize,
    pub dropped: usize,
}

/// Immutable collection of occurrence records
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    columns: Vec<RecordColumn>,
    summary: DatasetSummary,
}

impl RecordStore {
    /// Load and normalise the records of a source
    pub fn load(source: &dyn RecordSource, config: &SourceConfig) -> Result<Self> {
        let origin = source.origin();
        let frame = source.read_frame(config)?;
        let source_rows = frame.height();

        let columns = resolve_columns(&frame, config, &origin)?;
        let normalised = normalise_frame(frame, &columns, config)?;
        let records = extract_records(&normalised)?;

        let summary = DatasetSummary {
            origin,
            source_rows,
            retained: records.len(),
            dropped: source_rows - records.len(),
        };

        if summary.dropped > 0 {
            warn!(
                "Dropped {} of {} records without valid coordinates",
                summary.dropped, summary.source_rows
            );
        }
        info!(
            "Loaded {} occurrence records from {}",
            summary.retained,
            summary.origin.display()
        );

        Ok(Self {
            records,
            columns,
            summary,
        })
    }

    /// Load on the blocking pool so the runtime stays responsive
    pub async fn load_async<S>(source: S, config: SourceConfig) -> Result<Self>
    where
        S: RecordSource + Send + 'static,
    {
        let origin = source.origin();
        task::spawn_blocking(move || Self::load(&source, &config))
            .await
            .map_err(|e| WildlifeError::InvalidSource {
                path: origin,
                reason: format!("loader task failed: {}", e),
            })?
    }

    /// Build a store from records already in memory.
    ///
    /// Records with non-finite coordinates are dropped, the same as at load.
    pub fn from_records(records: Vec<Record>) -> Self {
        let source_rows = records.len();
        let records: Vec<Record> = records.into_iter().filter(has_coordinates).collect();

        let summary = DatasetSummary {
            origin: PathBuf::from("<memory>"),
            source_rows,
            retained: records.len(),
            dropped: source_rows - records.len(),
        };

        Self {
            records,
            columns: RecordColumn::canonical_order(),
            summary,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column order of the source file
    pub fn columns(&self) -> &[RecordColumn] {
        &self.columns
    }

    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }
}

/// Map source columns to record columns, keeping source order
fn resolve_columns(
    frame: &DataFrame,
    config: &SourceConfig,
    origin: &std::path::Path,
) -> Result<Vec<RecordColumn>> {
    let mut columns = Vec::new();

    for name in frame.get_column_names() {
        let name = name.as_str();
        let column = if name == config.longitude_column {
            Some(RecordColumn::Longitude)
        } else if name == config.latitude_column {
            Some(RecordColumn::Latitude)
        } else {
            FilterField::ALL
                .into_iter()
                .find(|field| field.column_name() == name)
                .map(RecordColumn::Category)
        };

        match column {
            Some(column) if !columns.contains(&column) => columns.push(column),
            Some(_) => {}
            None => debug!("Ignoring column '{}'", name),
        }
    }

    let missing: Vec<String> = RecordColumn::canonical_order()
        .into_iter()
        .filter(|column| !columns.contains(column))
        .map(|column| match column {
            RecordColumn::Longitude => config.longitude_column.clone(),
            RecordColumn::Latitude => config.latitude_column.clone(),
            RecordColumn::Category(field) => field.column_name().to_string(),
        })
        .collect();

    if !missing.is_empty() {
        return Err(WildlifeError::MissingColumns {
            path: origin.to_path_buf(),
            columns: missing,
        });
    }

    Ok(columns)
}

/// Rename coordinates, coerce types and drop records without coordinates
fn normalise_frame(
    frame: DataFrame,
    columns: &[RecordColumn],
    config: &SourceConfig,
) -> Result<DataFrame> {
    let selection: Vec<Expr> = columns
        .iter()
        .map(|column| match column {
            RecordColumn::Category(field) => col(field.column_name()).cast(DataType::String),
            RecordColumn::Longitude => col(config.longitude_column.as_str())
                .cast(DataType::Float64)
                .alias(LONGITUDE_COLUMN),
            RecordColumn::Latitude => col(config.latitude_column.as_str())
                .cast(DataType::Float64)
                .alias(LATITUDE_COLUMN),
        })
        .collect();

    let mut keep = col(LATITUDE_COLUMN)
        .is_not_null()
        .and(col(LONGITUDE_COLUMN).is_not_null());

    if config.validate_coordinate_range {
        keep = keep
            .and(col(LATITUDE_COLUMN).gt_eq(lit(LATITUDE_RANGE.0)))
            .and(col(LATITUDE_COLUMN).lt_eq(lit(LATITUDE_RANGE.1)))
            .and(col(LONGITUDE_COLUMN).gt_eq(lit(LONGITUDE_RANGE.0)))
            .and(col(LONGITUDE_COLUMN).lt_eq(lit(LONGITUDE_RANGE.1)));
    }

    let normalised = frame.lazy().select(selection).filter(keep).collect()?;
    Ok(normalised)
}

fn extract_records(frame: &DataFrame) -> Result<Vec<Record>> {
    let latitudes = frame.column(LATITUDE_COLUMN)?.as_materialized_series().f64()?;
    let longitudes = frame.column(LONGITUDE_COLUMN)?.as_materialized_series().f64()?;

    let mut records: Vec<Record> = latitudes
        .into_iter()
        .zip(longitudes)
        .map(|(lat, lon)| Record::new(lat.unwrap_or(f64::NAN), lon.unwrap_or(f64::NAN)))
        .collect();

    for field in FilterField::ALL {
        let values = frame
            .column(field.column_name())?
            .as_materialized_series()
            .str()?;
        for (record, value) in records.iter_mut().zip(values) {
            record.set(field, normalise_category(value));
        }
    }

    records.retain(has_coordinates);
    Ok(records)
}

/// Trim a categorical value, mapping blanks and NA markers to missing
pub fn normalise_category(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if MISSING_VALUE_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn has_coordinates(record: &Record) -> bool {
    record.latitude.is_finite() && record.longitude.is_finite()
}
