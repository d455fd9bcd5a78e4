//! Application constants for the wildlife explorer
//!
//! This module contains the default column names, sentinel labels, the
//! conservation status vocabulary and the map palette used throughout
//! the explorer.

// =============================================================================
// Source Columns
// =============================================================================

/// Longitude column name in the occurrence export before renaming
pub const SOURCE_LONGITUDE_COLUMN: &str = "lon_keep";

/// Latitude column name in the occurrence export before renaming
pub const SOURCE_LATITUDE_COLUMN: &str = "lat_keep";

/// Canonical coordinate column names after loading
pub const LONGITUDE_COLUMN: &str = "longitude";
pub const LATITUDE_COLUMN: &str = "latitude";

/// Valid WGS84 coordinate bounds
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Values treated as missing when normalising categorical fields
pub const MISSING_VALUE_MARKERS: &[&str] = &["", "nan", "NaN", "NA"];

// =============================================================================
// Labels
// =============================================================================

/// Label shown for the "no restriction" choice of every selector
pub const ALL_LABEL: &str = "All";

/// Shown for the modal status when the subset has no status values
pub const NO_DATA_LABEL: &str = "No data";

/// Shown for a metric whose view could not be computed
pub const NOT_AVAILABLE_LABEL: &str = "N/A";

// =============================================================================
// Conservation Status
// =============================================================================

/// IUCN Red List category codes and names
pub const IUCN_CATEGORIES: &[(&str, &str)] = &[
    ("LC", "Least Concern"),
    ("NT", "Near Threatened"),
    ("VU", "Vulnerable"),
    ("EN", "Endangered"),
    ("CR", "Critically Endangered"),
    ("EW", "Extinct in the Wild"),
    ("EX", "Extinct"),
    ("DD", "Data Deficient"),
    ("NE", "Not Evaluated"),
];

/// Marker colours keyed by status code.
///
/// Only five categories have a colour of their own. Every other status,
/// including missing or unrecognised ones, falls back to
/// [`FALLBACK_STATUS_COLOR`], so EW, EX, DD and NE share one colour.
pub const STATUS_PALETTE: &[(&str, &str)] = &[
    ("LC", "#2ecc71"),
    ("NT", "#f1c40f"),
    ("VU", "#e67e22"),
    ("EN", "#e74c3c"),
    ("CR", "#9b59b6"),
];

/// Colour for any status outside [`STATUS_PALETTE`]
pub const FALLBACK_STATUS_COLOR: &str = "#95a5a6";

// =============================================================================
// Presentation Defaults
// =============================================================================

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_MAX_MAP_POINTS: usize = 1000;
pub const DEFAULT_MAP_ZOOM: u8 = 4;
pub const DEFAULT_MAP_TILES: &str = "CartoDB positron";
pub const DEFAULT_EXPORT_PREFIX: &str = "wildlife-data";
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Look up the human readable name of a status code
pub fn iucn_label(code: &str) -> Option<&'static str> {
    IUCN_CATEGORIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}
