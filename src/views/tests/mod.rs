//! Tests for derived views

pub mod export_tests;

use crate::engine::Subset;
use crate::models::{FilterField, Record};
use crate::store::RecordStore;
use std::sync::Arc;

pub fn animal(species: &str, country: &str, status: Option<&str>) -> Record {
    let record = Record::new(1.0, 2.0)
        .with(FilterField::Species, species)
        .with(FilterField::CountryCode, country);
    match status {
        Some(status) => record.with(FilterField::IucnRedListCategory, status),
        None => record,
    }
}

pub fn full_subset(records: Vec<Record>) -> Subset {
    Subset::full(Arc::new(RecordStore::from_records(records)))
}
