//! Configuration management and validation.
//!
//! Provides configuration structures for source loading, table
//! presentation, the map layer and CSV export, with validation of
//! the values a user can override from the command line.

use crate::constants::{
    CSV_MIME_TYPE, DEFAULT_EXPORT_PREFIX, DEFAULT_MAP_TILES, DEFAULT_MAP_ZOOM,
    DEFAULT_MAX_MAP_POINTS, DEFAULT_PAGE_SIZE, SOURCE_LATITUDE_COLUMN, SOURCE_LONGITUDE_COLUMN,
};
use crate::error::{Result, WildlifeError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the raw occurrence table is read and normalised
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source column renamed to `longitude`
    pub longitude_column: String,

    /// Source column renamed to `latitude`
    pub latitude_column: String,

    /// Drop records outside the WGS84 latitude/longitude bounds
    pub validate_coordinate_range: bool,

    /// Field delimiter of the source file
    pub delimiter: u8,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            longitude_column: SOURCE_LONGITUDE_COLUMN.to_string(),
            latitude_column: SOURCE_LATITUDE_COLUMN.to_string(),
            validate_coordinate_range: true,
            delimiter: b',',
        }
    }
}

/// Row selection behaviour requested from the table widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    None,
    SingleRow,
    MultiRow,
}

/// Table sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub page_size: usize,
    pub horizontal_scroll: bool,
    pub selection: SelectionMode,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            horizontal_scroll: true,
            selection: SelectionMode::SingleRow,
        }
    }
}

/// Point layer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Upper bound on markers handed to the map sink (None = unbounded)
    pub max_points: Option<usize>,
    pub zoom: u8,
    pub tiles: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            max_points: Some(DEFAULT_MAX_MAP_POINTS),
            zoom: DEFAULT_MAP_ZOOM,
            tiles: DEFAULT_MAP_TILES.to_string(),
        }
    }
}

/// CSV export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// File name prefix, the ISO date and `.csv` are appended
    pub file_prefix: String,
    pub mime_type: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            mime_type: CSV_MIME_TYPE.to_string(),
        }
    }
}

/// Global configuration for an exploration session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorerConfig {
    pub source: SourceConfig,
    pub table: TableConfig,
    pub map: MapConfig,
    pub export: ExportConfig,
}

impl ExplorerConfig {
    /// Use different source names for the coordinate columns
    pub fn with_coordinate_columns(
        mut self,
        longitude: impl Into<String>,
        latitude: impl Into<String>,
    ) -> Self {
        self.source.longitude_column = longitude.into();
        self.source.latitude_column = latitude.into();
        self
    }

    /// Keep out-of-range coordinates instead of dropping them
    pub fn without_range_validation(mut self) -> Self {
        self.source.validate_coordinate_range = false;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.table.page_size = page_size;
        self
    }

    pub fn with_max_points(mut self, max_points: Option<usize>) -> Self {
        self.map.max_points = max_points;
        self
    }

    pub fn with_export_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.export.file_prefix = prefix.into();
        self
    }

    /// Check the configuration for values that cannot work
    pub fn validate(&self) -> Result<()> {
        let source = &self.source;
        if source.longitude_column.trim().is_empty() || source.latitude_column.trim().is_empty() {
            return Err(configuration("coordinate column names must not be empty"));
        }
        if source.longitude_column == source.latitude_column {
            return Err(configuration(format!(
                "longitude and latitude cannot both read column '{}'",
                source.longitude_column
            )));
        }
        if self.table.page_size == 0 {
            return Err(configuration("table page size must be at least 1"));
        }
        if self.map.max_points == Some(0) {
            return Err(configuration("map point limit must be at least 1"));
        }
        if self.export.file_prefix.trim().is_empty() {
            return Err(configuration("export file prefix must not be empty"));
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}

fn configuration(message: impl Into<String>) -> WildlifeError {
    WildlifeError::Configuration {
        message: message.into(),
    }
}
