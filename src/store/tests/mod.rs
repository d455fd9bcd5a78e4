//! Record store loading tests
//!
//! Exercise the CSV source end to end using temporary files.

use crate::config::{ExplorerConfig, SourceConfig};
use crate::error::WildlifeError;
use crate::models::{FilterField, Record, RecordColumn};
use crate::store::{CsvSource, FrameSource, RecordStore, normalise_category};

use polars::prelude::*;
use std::fs;
use tempfile::TempDir;

const HEADER: &str =
    "phylum,class,species,continent,countryCode,state,county,landcover,iucnRedListCategory,lon_keep,lat_keep";

fn write_csv(temp_dir: &TempDir, rows: &[&str]) -> std::path::PathBuf {
    let path = temp_dir.path().join("occurrences.csv");
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_renames_coordinates_and_keeps_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        &[
            "Chordata,Mammalia,Lion,Africa,KE,Nairobi,Kajiado,Savanna,VU,36.8,-1.3",
            "Chordata,Mammalia,Tiger,Asia,IN,Assam,Golaghat,Forest,EN,93.4,26.6",
        ],
    );

    let store = RecordStore::load(&CsvSource::new(&path), &SourceConfig::default()).unwrap();

    assert_eq!(store.len(), 2);
    let first = &store.records()[0];
    assert_eq!(first.field(FilterField::Species), Some("Lion"));
    assert_eq!(first.longitude, 36.8);
    assert_eq!(first.latitude, -1.3);
    assert_eq!(store.records()[1].field(FilterField::Species), Some("Tiger"));

    let names: Vec<&str> = store.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names[0], "phylum");
    assert_eq!(names[9], "longitude");
    assert_eq!(names[10], "latitude");
}

#[test]
fn test_load_drops_missing_and_invalid_coordinates() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        &[
            "Chordata,Mammalia,Lion,Africa,KE,Nairobi,Kajiado,Savanna,VU,36.8,-1.3",
            "Chordata,Mammalia,Lion,Africa,KE,Nairobi,Kajiado,Savanna,VU,,-1.3",
            "Chordata,Mammalia,Lion,Africa,KE,Nairobi,Kajiado,Savanna,VU,36.8,not-a-number",
            "Chordata,Mammalia,Lion,Africa,KE,Nairobi,Kajiado,Savanna,VU,36.8,95.0",
            "Chordata,Mammalia,Lion,Africa,KE,Nairobi,Kajiado,Savanna,VU,200.0,10.0",
        ],
    );

    let store = RecordStore::load(&CsvSource::new(&path), &SourceConfig::default()).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.summary().source_rows, 5);
    assert_eq!(store.summary().dropped, 4);
}

#[test]
fn test_range_validation_can_be_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        &["Chordata,Mammalia,Lion,Africa,KE,Nairobi,Kajiado,Savanna,VU,200.0,10.0"],
    );

    let config = ExplorerConfig::default().without_range_validation();
    let store = RecordStore::load(&CsvSource::new(&path), &config.source).unwrap();

    assert_eq!(store.len(), 1);
}

#[test]
fn test_blank_categories_become_missing() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        &["Chordata,,Lion,Africa,KE,, ,Savanna,nan,36.8,-1.3"],
    );

    let store = RecordStore::load(&CsvSource::new(&path), &SourceConfig::default()).unwrap();
    let record = &store.records()[0];

    assert_eq!(record.field(FilterField::Class), None);
    assert_eq!(record.field(FilterField::State), None);
    assert_eq!(record.field(FilterField::County), None);
    assert_eq!(record.field(FilterField::IucnRedListCategory), None);
    assert_eq!(record.field(FilterField::Phylum), Some("Chordata"));
}

fn lion_row(county: &str, longitude: &str) -> String {
    format!("Chordata,Mammalia,Lion,Africa,KE,Nairobi,{county},Savanna,VU,{longitude},-1.3")
}

#[test]
fn test_decimal_coordinates_after_integer_rows() {
    let temp_dir = TempDir::new().unwrap();
    let mut rows: Vec<String> = (0..1000).map(|_| lion_row("Kajiado", "36")).collect();
    rows.push(lion_row("Kajiado", "36.8"));
    rows.push(lion_row("Kajiado", "east"));
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let path = write_csv(&temp_dir, &rows);

    let store = RecordStore::load(&CsvSource::new(&path), &SourceConfig::default()).unwrap();

    assert_eq!(store.len(), 1001);
    assert_eq!(store.records()[0].longitude, 36.0);
    assert_eq!(store.records()[1000].longitude, 36.8);
    assert_eq!(store.summary().dropped, 1);
}

#[test]
fn test_text_categories_after_numeric_rows() {
    let temp_dir = TempDir::new().unwrap();
    let mut rows: Vec<String> = (0..1000).map(|_| lion_row("101", "36.8")).collect();
    rows.push(lion_row("Kajiado", "36.8"));
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let path = write_csv(&temp_dir, &rows);

    let store = RecordStore::load(&CsvSource::new(&path), &SourceConfig::default()).unwrap();

    assert_eq!(store.len(), 1001);
    assert_eq!(store.records()[0].field(FilterField::County), Some("101"));
    assert_eq!(store.records()[1000].field(FilterField::County), Some("Kajiado"));
}

#[test]
fn test_numeric_looking_category_keeps_exact_text() {
    use crate::config::ExportConfig;
    use crate::engine::{FilterState, OptionIndex, Subset};
    use crate::models::Selection;
    use crate::views::CsvExport;
    use std::sync::Arc;

    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(&temp_dir, &[&lion_row("007", "36.8")]);

    let store = Arc::new(
        RecordStore::load(&CsvSource::new(&path), &SourceConfig::default()).unwrap(),
    );
    assert_eq!(store.records()[0].field(FilterField::County), Some("007"));

    let options = OptionIndex::build(store.records());
    assert_eq!(options.values(FilterField::County), ["007"]);

    let mut state = FilterState::new();
    state.select(FilterField::County, Selection::only("007"));
    let subset = Subset::compute(Arc::clone(&store), &state);
    assert_eq!(subset.len(), 1);

    let export = CsvExport::build(&subset, store.columns(), &ExportConfig::default()).unwrap();
    let row = export.content.lines().nth(1).unwrap();
    assert!(row.contains(",007,"));
}

#[test]
fn test_missing_file_is_dataset_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.csv");

    let result = RecordStore::load(&CsvSource::new(&path), &SourceConfig::default());

    match result {
        Err(WildlifeError::DatasetNotFound { path: reported }) => assert_eq!(reported, path),
        other => panic!("Expected DatasetNotFound, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_missing_columns_are_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("partial.csv");
    fs::write(&path, "species,lon_keep\nLion,36.8\n").unwrap();

    let result = RecordStore::load(&CsvSource::new(&path), &SourceConfig::default());

    match result {
        Err(WildlifeError::MissingColumns { columns, .. }) => {
            assert!(columns.contains(&"lat_keep".to_string()));
            assert!(columns.contains(&"countryCode".to_string()));
            assert!(!columns.contains(&"species".to_string()));
        }
        other => panic!("Expected MissingColumns, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_custom_coordinate_columns_from_frame() {
    let frame = df!(
        "species" => ["Lion"],
        "phylum" => ["Chordata"],
        "class" => ["Mammalia"],
        "continent" => ["Africa"],
        "countryCode" => ["KE"],
        "state" => ["Nairobi"],
        "county" => ["Kajiado"],
        "landcover" => ["Savanna"],
        "iucnRedListCategory" => ["VU"],
        "lat" => [-1.3],
        "lng" => [36.8],
        "gbifID" => [42i64],
    )
    .unwrap();

    let config = ExplorerConfig::default().with_coordinate_columns("lng", "lat");
    let store = RecordStore::load(&FrameSource::new(frame), &config.source).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.columns()[0], RecordColumn::Category(FilterField::Species));
    assert_eq!(store.columns().len(), 11);
    assert_eq!(store.records()[0].longitude, 36.8);
}

#[test]
fn test_from_records_enforces_coordinates() {
    let store = RecordStore::from_records(vec![
        Record::new(1.0, 2.0),
        Record::new(f64::NAN, 2.0),
    ]);

    assert_eq!(store.len(), 1);
    assert_eq!(store.summary().dropped, 1);
}

#[tokio::test]
async fn test_load_async() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        &["Chordata,Mammalia,Lion,Africa,KE,Nairobi,Kajiado,Savanna,VU,36.8,-1.3"],
    );

    let store = RecordStore::load_async(CsvSource::new(path), SourceConfig::default())
        .await
        .unwrap();

    assert_eq!(store.len(), 1);
}

#[test]
fn test_normalise_category() {
    assert_eq!(normalise_category(Some("  Lion ")), Some("Lion".to_string()));
    assert_eq!(normalise_category(Some("")), None);
    assert_eq!(normalise_category(Some("NA")), None);
    assert_eq!(normalise_category(None), None);
}
