//! Tests for CSV export

use super::*;
use crate::config::ExportConfig;
use crate::engine::Subset;
use crate::models::RecordColumn;
use crate::views::{CsvExport, export_file_name};

use chrono::NaiveDate;
use tempfile::TempDir;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

fn canonical_export(subset: &Subset) -> CsvExport {
    let columns = RecordColumn::canonical_order();
    CsvExport::build(subset, &columns, &ExportConfig::default()).unwrap()
}

#[test]
fn test_file_name_embeds_iso_date() {
    assert_eq!(export_file_name("wildlife-data", date()), "wildlife-data-2024-03-09.csv");
}

#[test]
fn test_two_records_give_three_lines() {
    let subset = full_subset(vec![
        animal("Lion", "KE", Some("VU")),
        animal("Tiger", "IN", Some("EN")),
    ]);

    let export = canonical_export(&subset);

    let lines: Vec<&str> = export.content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "phylum,class,species,continent,countryCode,state,county,landcover,iucnRedListCategory,latitude,longitude"
    );
    assert_eq!(lines[1].split(',').count(), 11);
    assert!(lines[1].contains("Lion"));
    assert!(lines[2].contains("Tiger"));
    assert_eq!(export.row_count, 2);
    assert_eq!(export.mime_type, "text/csv");
    assert_eq!(export.file_name_on(date()), "wildlife-data-2024-03-09.csv");
}

#[test]
fn test_empty_subset_exports_header_only() {
    let subset = full_subset(Vec::new());
    let export = canonical_export(&subset);

    assert_eq!(export.content.lines().count(), 1);
    assert!(export.content.starts_with("phylum,"));
}

#[test]
fn test_export_follows_given_column_order() {
    let subset = full_subset(vec![animal("Lion", "KE", None)]);
    let columns = vec![
        RecordColumn::Longitude,
        RecordColumn::Category(FilterField::Species),
    ];

    let export = CsvExport::build(&subset, &columns, &ExportConfig::default()).unwrap();

    let lines: Vec<&str> = export.content.lines().collect();
    assert_eq!(lines[0], "longitude,species");
    assert_eq!(lines[1], "2.0,Lion");
}

#[tokio::test]
async fn test_write_to_directory() {
    let temp_dir = TempDir::new().unwrap();
    let subset = full_subset(vec![animal("Lion", "KE", None)]);
    let export = canonical_export(&subset);

    let path = export
        .write_dated(&temp_dir.path().join("downloads"), date())
        .await
        .unwrap();

    assert!(path.ends_with("wildlife-data-2024-03-09.csv"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, export.content);
}
