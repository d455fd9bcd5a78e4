//! Wildlife Explorer Library
//!
//! Interactive exploration of wildlife occurrence records: load a table of
//! georeferenced observations once, then narrow it with a free-text search
//! and per-field selections and get consistent summary views of whatever
//! remains.
//!
//! This library provides tools for:
//! - Loading and normalising occurrence tables with polars
//! - Building the choice lists offered by each filter control
//! - Filtering records by text search and exact field selections
//! - Deriving metrics, a coloured point layer, a paged table and CSV exports
//! - Recomputing every view once per change through a per-session controller

pub mod cli;
pub mod config;
pub mod constants;
pub mod controller;
pub mod engine;
pub mod error;
pub mod models;
pub mod sinks;
pub mod store;
pub mod views;

// Re-export commonly used types
pub use config::ExplorerConfig;
pub use controller::{FilterEvent, Notice, ReactivityController, SessionHandle, Snapshot};
pub use engine::{FilterState, OptionIndex, Subset};
pub use error::{Result, WildlifeError};
pub use models::{FilterField, Record, Selection};
pub use store::{CsvSource, RecordStore};
pub use views::{DerivedViews, ViewOutcome};
