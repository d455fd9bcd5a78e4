//! Coloured terminal rendering of snapshots

use crate::controller::Notice;
use crate::sinks::ViewSink;
use crate::views::{CsvExport, Marker, PointLayer, TableView};

use colored::*;
use std::collections::BTreeMap;

const METRIC_LABELS: [&str; 4] = ["Species", "Observations", "Countries", "Most common status"];
const MAX_CELL_WIDTH: usize = 24;

/// Writes views to stdout
#[derive(Debug, Default)]
pub struct TerminalSink {
    page: usize,
    marker_colors: BTreeMap<&'static str, usize>,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table page shown by the next render (zero based)
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn page(&self) -> usize {
        self.page
    }
}

impl ViewSink for TerminalSink {
    fn show_metrics(&mut self, values: &[String; 4]) {
        println!();
        for (label, value) in METRIC_LABELS.iter().zip(values) {
            println!("  {:<20} {}", label.bright_white(), value.bright_green().bold());
        }
    }

    fn clear_markers(&mut self) {
        self.marker_colors.clear();
    }

    fn add_marker(&mut self, marker: &Marker) {
        *self.marker_colors.entry(marker.color).or_default() += 1;
    }

    fn show_layer(&mut self, layer: &PointLayer) {
        println!();
        let heading = match layer.sampled_from {
            Some(total) => format!("Map: {} of {} points", layer.len(), total),
            None => format!("Map: {} points", layer.len()),
        };
        println!("{}", heading.bright_cyan().bold());

        if let Some((latitude, longitude)) = layer.center {
            println!(
                "  {}",
                format!(
                    "centre {:.4}, {:.4} (zoom {}, {})",
                    latitude, longitude, layer.zoom, layer.tiles
                )
                .bright_black()
            );
        }

        for entry in PointLayer::legend() {
            let count = self.marker_colors.get(entry.color).copied().unwrap_or(0);
            let label = if entry.code.is_empty() {
                entry.label.to_string()
            } else {
                format!("{} ({})", entry.label, entry.code)
            };
            println!("  {} {:<28} {}", swatch(entry.color), label, count);
        }
    }

    fn show_table(&mut self, table: &TableView) {
        let page_count = table.page_count();
        let page = self.page.min(page_count - 1);

        println!();
        println!(
            "{}",
            format!(
                "Records: {} (page {} of {})",
                table.row_count(),
                page + 1,
                page_count
            )
            .bright_cyan()
            .bold()
        );

        let header: Vec<String> = table.header().iter().map(|name| fit(name)).collect();
        println!("  {}", header.join(" | ").bright_white().bold());
        for record in table.page(page) {
            let cells: Vec<String> = table.cells(record).iter().map(|cell| fit(cell)).collect();
            println!("  {}", cells.join(" | "));
        }
    }

    fn offer_export(&mut self, export: &CsvExport) {
        println!();
        println!(
            "{} {} ({} rows, {})",
            "Export:".bright_white(),
            export.file_name().bright_yellow(),
            export.row_count,
            export.mime_type
        );
    }

    fn show_notice(&mut self, notice: &Notice) {
        let message = match notice {
            Notice::EmptyResult => "No records match the current filters".to_string(),
            Notice::StaleSelection { field, value } => {
                format!("{} '{}' is not present in the loaded data", field, value)
            }
        };
        println!("{} {}", "Note:".yellow().bold(), message.yellow());
    }

    fn view_unavailable(&mut self, view: &str, reason: &str) {
        println!("{} {} view unavailable: {}", "Error:".red().bold(), view, reason);
    }
}

/// Pad or truncate a cell to a fixed width
fn fit(value: &str) -> String {
    let count = value.chars().count();
    if count > MAX_CELL_WIDTH {
        let cut: String = value.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{}~", cut)
    } else {
        format!("{:<width$}", value, width = MAX_CELL_WIDTH)
    }
}

/// Coloured block for a `#rrggbb` colour
fn swatch(hex: &str) -> ColoredString {
    match parse_hex(hex) {
        Some((r, g, b)) => "■".truecolor(r, g, b),
        None => "■".normal(),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
