//! Predicate composition over the record store
//!
//! The free-text query is applied first (OR across the searchable
//! fields), then every concrete field selection (AND). Filtering is
//! stable: survivors keep their store order.

use super::state::FilterState;
use crate::models::{FilterField, Record};
use crate::store::RecordStore;

use std::sync::Arc;
use tracing::debug;

/// Compiled form of a [`FilterState`]
#[derive(Debug, Clone)]
pub struct FilterPredicate<'s> {
    needle: Option<String>,
    selections: Vec<(FilterField, &'s str)>,
}

impl<'s> FilterPredicate<'s> {
    pub fn compile(state: &'s FilterState) -> Self {
        let needle = if state.query().is_empty() {
            None
        } else {
            Some(state.query().to_lowercase())
        };

        Self {
            needle,
            selections: state.active_selections().collect(),
        }
    }

    /// True when the predicate keeps every record
    pub fn is_identity(&self) -> bool {
        self.needle.is_none() && self.selections.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_query(record) && self.matches_selections(record)
    }

    /// Case-insensitive substring match against any searchable field.
    /// Missing values never match a non-empty query.
    fn matches_query(&self, record: &Record) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };

        FilterField::SEARCHABLE.iter().any(|field| {
            record
                .field(*field)
                .is_some_and(|value| value.to_lowercase().contains(needle.as_str()))
        })
    }

    fn matches_selections(&self, record: &Record) -> bool {
        self.selections
            .iter()
            .all(|(field, selected)| record.field(*field) == Some(*selected))
    }
}

/// Filter a record slice, preserving order
pub fn apply<'r>(records: &'r [Record], state: &FilterState) -> Vec<&'r Record> {
    let predicate = FilterPredicate::compile(state);
    records.iter().filter(|record| predicate.matches(record)).collect()
}

/// Records of a store that survive a filter state, held as store positions
#[derive(Debug, Clone)]
pub struct Subset {
    store: Arc<RecordStore>,
    indices: Arc<[usize]>,
}

impl Subset {
    /// Every record of the store
    pub fn full(store: Arc<RecordStore>) -> Self {
        let indices: Arc<[usize]> = (0..store.len()).collect();
        Self { store, indices }
    }

    /// Evaluate a filter state against a store
    pub fn compute(store: Arc<RecordStore>, state: &FilterState) -> Self {
        let predicate = FilterPredicate::compile(state);
        if predicate.is_identity() {
            return Self::full(store);
        }

        let indices: Arc<[usize]> = store
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| predicate.matches(record))
            .map(|(index, _)| index)
            .collect();

        debug!(
            "Filtered {} -> {} records (query: {:?}, {} field selections)",
            store.len(),
            indices.len(),
            state.query(),
            state.active_selections().count()
        );

        Self { store, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Store positions of the surviving records, strictly increasing
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        let records = self.store.records();
        self.indices.iter().map(move |&index| &records[index])
    }

    /// Owned copy of the surviving records
    pub fn to_records(&self) -> Vec<Record> {
        self.iter().cloned().collect()
    }
}

impl PartialEq for Subset {
    fn eq(&self, other: &Self) -> bool {
        self.indices == other.indices
            && (Arc::ptr_eq(&self.store, &other.store)
                || self.store.records() == other.store.records())
    }
}
