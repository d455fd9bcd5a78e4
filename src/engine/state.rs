//! Current value of every filter control

use crate::models::{FilterField, Selection};

use serde::{Deserialize, Serialize};

/// Search text plus one selection per filter field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    query: String,
    selections: [Selection; 9],
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self, field: FilterField) -> &Selection {
        &self.selections[field.index()]
    }

    /// Replace the search text. Returns whether anything changed.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if self.query == query {
            return false;
        }
        self.query = query;
        true
    }

    /// Replace one field's selection. Returns whether anything changed.
    pub fn select(&mut self, field: FilterField, selection: Selection) -> bool {
        let slot = &mut self.selections[field.index()];
        if *slot == selection {
            return false;
        }
        *slot = selection;
        true
    }

    /// Clear the query and set every field to `All` in one step.
    /// Returns whether anything changed.
    pub fn reset(&mut self) -> bool {
        if self.is_default() {
            return false;
        }
        *self = Self::default();
        true
    }

    /// Empty query and every field unrestricted
    pub fn is_default(&self) -> bool {
        self.query.is_empty() && self.selections.iter().all(Selection::is_all)
    }

    /// Fields with a concrete selection, in control panel order
    pub fn active_selections(&self) -> impl Iterator<Item = (FilterField, &str)> {
        FilterField::ALL
            .into_iter()
            .filter_map(|field| self.selection(field).value().map(|value| (field, value)))
    }
}
