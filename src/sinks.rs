//! Output sinks
//!
//! A sink is whatever renders a snapshot: a terminal, a web page, a test
//! recorder. [`present`] pushes every view of a snapshot into a sink in a
//! fixed order. Degraded views are reported through
//! [`ViewSink::view_unavailable`] and never stop the remaining views.

use crate::controller::{Notice, Snapshot};
use crate::views::{CsvExport, Marker, Metrics, PointLayer, TableView, ViewOutcome};

/// Receiver for rendered views. Every method defaults to doing nothing.
pub trait ViewSink {
    /// Species, observations, countries and most common status
    fn show_metrics(&mut self, _values: &[String; 4]) {}

    /// Drop every marker from the previous snapshot
    fn clear_markers(&mut self) {}

    fn add_marker(&mut self, _marker: &Marker) {}

    /// Called after the markers of a layer have been added
    fn show_layer(&mut self, _layer: &PointLayer) {}

    fn show_table(&mut self, _table: &TableView) {}

    fn offer_export(&mut self, _export: &CsvExport) {}

    fn show_notice(&mut self, _notice: &Notice) {}

    fn view_unavailable(&mut self, _view: &str, _reason: &str) {}
}

/// Render one snapshot into a sink
pub fn present(snapshot: &Snapshot, sink: &mut dyn ViewSink) {
    let views = &snapshot.views;

    sink.show_metrics(&Metrics::display_values(&views.metrics));
    if let ViewOutcome::Degraded { reason } = &views.metrics {
        sink.view_unavailable("metrics", reason);
    }

    // Markers never accumulate across snapshots
    sink.clear_markers();
    match &views.points {
        ViewOutcome::Ready(layer) => {
            for marker in &layer.markers {
                sink.add_marker(marker);
            }
            sink.show_layer(layer);
        }
        ViewOutcome::Degraded { reason } => sink.view_unavailable("map", reason),
    }

    match &views.table {
        ViewOutcome::Ready(table) => sink.show_table(table),
        ViewOutcome::Degraded { reason } => sink.view_unavailable("table", reason),
    }

    match &views.export {
        ViewOutcome::Ready(export) => sink.offer_export(export),
        ViewOutcome::Degraded { reason } => sink.view_unavailable("export", reason),
    }

    for notice in &snapshot.notices {
        sink.show_notice(notice);
    }
}
