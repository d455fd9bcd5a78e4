//! Selectable values per filter field
//!
//! Options are always derived from the whole store, never from the
//! filtered subset, so narrowing one selector never hides the choices
//! of another.

use crate::models::{FilterField, Record, Selection};

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Sorted distinct values observed for each filter field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionIndex {
    values: BTreeMap<FilterField, Vec<String>>,
}

impl OptionIndex {
    /// Collect the distinct non-missing values of every field, sorted by
    /// byte order (case-sensitive)
    pub fn build(records: &[Record]) -> Self {
        let mut distinct: BTreeMap<FilterField, BTreeSet<&str>> = FilterField::ALL
            .into_iter()
            .map(|field| (field, BTreeSet::new()))
            .collect();

        for record in records {
            for (field, seen) in distinct.iter_mut() {
                if let Some(value) = record.field(*field) {
                    seen.insert(value);
                }
            }
        }

        let values: BTreeMap<FilterField, Vec<String>> = distinct
            .into_iter()
            .map(|(field, seen)| (field, seen.into_iter().map(str::to_string).collect()))
            .collect();

        debug!(
            "Built option index: {}",
            values
                .iter()
                .map(|(field, v)| format!("{}={}", field.column_name(), v.len()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self { values }
    }

    /// Observed values of a field, without the "All" choice
    pub fn values(&self, field: FilterField) -> &[String] {
        self.values.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every choice a selector offers: `All` first, then each observed value
    pub fn choices(&self, field: FilterField) -> Vec<Selection> {
        std::iter::once(Selection::All)
            .chain(self.values(field).iter().cloned().map(Selection::Only))
            .collect()
    }

    /// Choice labels as shown by a selector
    pub fn labels(&self, field: FilterField) -> Vec<String> {
        self.choices(field).iter().map(Selection::to_string).collect()
    }

    /// Whether a selection can currently match anything
    pub fn offers(&self, field: FilterField, selection: &Selection) -> bool {
        match selection {
            Selection::All => true,
            Selection::Only(value) => self
                .values(field)
                .binary_search_by(|probe| probe.as_str().cmp(value))
                .is_ok(),
        }
    }
}
