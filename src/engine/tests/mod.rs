//! Tests for the filtering engine
//!
//! Shared fixtures live here; each component has its own test module.


use crate::models::{FilterField, Record};
use crate::store::RecordStore;
use std::sync::Arc;

/// Build a record from (field, value) pairs
pub fn record(latitude: f64, longitude: f64, fields: &[(FilterField, &str)]) -> Record {
    fields
        .iter()
        .fold(Record::new(latitude, longitude), |record, (field, value)| {
            record.with(*field, *value)
        })
}

/// Five records across three countries and three statuses
pub fn sample_records() -> Vec<Record> {
    use FilterField::{Class, CountryCode, IucnRedListCategory, Landcover, Phylum, Species, State};

    vec![
        record(
            -1.3,
            36.8,
            &[
                (Phylum, "Chordata"),
                (Class, "Mammalia"),
                (Species, "Panthera leo"),
                (CountryCode, "KE"),
                (State, "Nairobi"),
                (Landcover, "Savanna"),
                (IucnRedListCategory, "VU"),
            ],
        ),
        record(
            26.6,
            93.4,
            &[
                (Phylum, "Chordata"),
                (Class, "Mammalia"),
                (Species, "Panthera tigris"),
                (CountryCode, "IN"),
                (State, "Assam"),
                (Landcover, "Forest"),
                (IucnRedListCategory, "EN"),
            ],
        ),
        record(
            44.4,
            -110.6,
            &[
                (Phylum, "Chordata"),
                (Class, "Aves"),
                (Species, "Haliaeetus leucocephalus"),
                (CountryCode, "US"),
                (State, "Wyoming"),
                (Landcover, "Forest"),
                (IucnRedListCategory, "LC"),
            ],
        ),
        record(
            -2.1,
            37.2,
            &[
                (Phylum, "Chordata"),
                (Class, "Mammalia"),
                (Species, "Loxodonta africana"),
                (CountryCode, "KE"),
                (Landcover, "Savanna"),
                (IucnRedListCategory, "EN"),
            ],
        ),
        record(
            36.1,
            -112.1,
            &[
                (Phylum, "Arthropoda"),
                (Class, "Insecta"),
                (Species, "Danaus plexippus"),
                (CountryCode, "US"),
                (State, "Arizona"),
                (IucnRedListCategory, "VU"),
            ],
        ),
    ]
}

pub fn sample_store() -> Arc<RecordStore> {
    Arc::new(RecordStore::from_records(sample_records()))
}
