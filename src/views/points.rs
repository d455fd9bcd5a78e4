//! Coloured point layer for the map sink
//!
//! Markers are coloured by conservation status from a fixed five colour
//! palette. The status vocabulary is larger than the palette, so every
//! status without its own entry shares the fallback colour.

use crate::config::MapConfig;
use crate::constants::{FALLBACK_STATUS_COLOR, STATUS_PALETTE, iucn_label};
use crate::models::{FilterField, Record};

use serde::Serialize;
use tracing::debug;

/// Structured popup content; formatting is left to the sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupPayload {
    pub species: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country_code: Option<String>,
    pub landcover: Option<String>,
    pub status: Option<String>,
}

impl PopupPayload {
    pub fn from_record(record: &Record) -> Self {
        let get = |field| record.field(field).map(str::to_string);
        Self {
            species: get(FilterField::Species),
            phylum: get(FilterField::Phylum),
            class: get(FilterField::Class),
            county: get(FilterField::County),
            state: get(FilterField::State),
            country_code: get(FilterField::CountryCode),
            landcover: get(FilterField::Landcover),
            status: get(FilterField::IucnRedListCategory),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub color: &'static str,
    pub popup: PopupPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub code: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

/// Marker colour for a status. Surrounding whitespace is ignored.
pub fn status_color(status: Option<&str>) -> &'static str {
    let Some(status) = status.map(str::trim) else {
        return FALLBACK_STATUS_COLOR;
    };

    STATUS_PALETTE
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_STATUS_COLOR)
}

/// Every marker of the current subset plus map hints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointLayer {
    pub markers: Vec<Marker>,
    /// Size of the subset when the markers are a sample of it
    pub sampled_from: Option<usize>,
    /// Mean marker position as (latitude, longitude)
    pub center: Option<(f64, f64)>,
    pub zoom: u8,
    pub tiles: String,
}

impl PointLayer {
    pub fn build<'a>(records: impl IntoIterator<Item = &'a Record>, config: &MapConfig) -> Self {
        let records: Vec<&Record> = records.into_iter().collect();
        let total = records.len();

        let (chosen, sampled_from) = match config.max_points {
            Some(limit) if total > limit => {
                debug!("Sampling {} of {} records for the map", limit, total);
                (stride_sample(&records, limit), Some(total))
            }
            _ => (records, None),
        };

        let markers: Vec<Marker> = chosen
            .into_iter()
            .map(|record| Marker {
                latitude: record.latitude,
                longitude: record.longitude,
                color: status_color(record.field(FilterField::IucnRedListCategory)),
                popup: PopupPayload::from_record(record),
            })
            .collect();

        let center = mean_position(&markers);

        Self {
            markers,
            sampled_from,
            center,
            zoom: config.zoom,
            tiles: config.tiles.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Palette entries followed by the shared fallback entry
    pub fn legend() -> Vec<LegendEntry> {
        STATUS_PALETTE
            .iter()
            .map(|&(code, color)| LegendEntry {
                code,
                label: iucn_label(code).unwrap_or(code),
                color,
            })
            .chain(std::iter::once(LegendEntry {
                code: "",
                label: "Other / unknown",
                color: FALLBACK_STATUS_COLOR,
            }))
            .collect()
    }
}

/// Evenly spaced, order preserving sample of `limit` items
fn stride_sample<'a>(records: &[&'a Record], limit: usize) -> Vec<&'a Record> {
    let total = records.len();
    (0..limit).map(|i| records[i * total / limit]).collect()
}

fn mean_position(markers: &[Marker]) -> Option<(f64, f64)> {
    if markers.is_empty() {
        return None;
    }
    let count = markers.len() as f64;
    let latitude = markers.iter().map(|m| m.latitude).sum::<f64>() / count;
    let longitude = markers.iter().map(|m| m.longitude).sum::<f64>() / count;
    Some((latitude, longitude))
}
