//! Views derived from the filtered subset.
//!
//! Every view is a pure function of the subset and the configuration.
//! Views are computed independently: one failing view is reported as
//! degraded while the others are still delivered.

pub mod export;
pub mod metrics;
pub mod points;
pub mod table;

#[cfg(test)]
pub mod tests;

pub use self::export::{CsvExport, export_file_name, serialize_records};
pub use self::metrics::{Metrics, ModalStatus};
pub use self::points::{LegendEntry, Marker, PointLayer, PopupPayload, status_color};
pub use self::table::{SortOrder, TableView};

use crate::config::ExplorerConfig;
use crate::engine::Subset;
use crate::error::Result;

use tracing::warn;

/// Result of computing one view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome<T> {
    Ready(T),
    /// The view could not be computed; sinks show a placeholder
    Degraded { reason: String },
}

impl<T> ViewOutcome<T> {
    /// Turn a failed computation into a degraded view, logging the cause
    pub fn from_result(view: &str, result: Result<T>) -> Self {
        match result {
            Ok(value) => ViewOutcome::Ready(value),
            Err(error) => {
                warn!("{} view degraded: {:#}", view, error);
                ViewOutcome::Degraded {
                    reason: error.to_string(),
                }
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewOutcome::Ready(value) => Some(value),
            ViewOutcome::Degraded { .. } => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ViewOutcome::Degraded { .. })
    }
}

/// All views of one recomputation
#[derive(Debug, Clone)]
pub struct DerivedViews {
    pub metrics: ViewOutcome<Metrics>,
    pub points: ViewOutcome<PointLayer>,
    pub table: ViewOutcome<TableView>,
    pub export: ViewOutcome<CsvExport>,
}

impl DerivedViews {
    pub fn compute(subset: &Subset, config: &ExplorerConfig) -> Self {
        let metrics = ViewOutcome::Ready(Metrics::compute(subset.iter()));
        let points = ViewOutcome::Ready(PointLayer::build(subset.iter(), &config.map));
        let table = ViewOutcome::Ready(TableView::new(subset.clone(), &config.table));
        let export = ViewOutcome::from_result(
            "export",
            CsvExport::build(subset, subset.store().columns(), &config.export),
        );

        Self {
            metrics,
            points,
            table,
            export,
        }
    }
}
