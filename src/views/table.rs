//! Paginated, sortable table rows
//!
//! The table view is the filtered subset itself plus the column order
//! and widget configuration. Paging and sorting only reorder borrowed
//! rows and never copy records.

use crate::config::TableConfig;
use crate::engine::Subset;
use crate::models::{Record, RecordColumn};

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone)]
pub struct TableView {
    subset: Subset,
    columns: Vec<RecordColumn>,
    config: TableConfig,
}

impl TableView {
    pub fn new(subset: Subset, config: &TableConfig) -> Self {
        let columns = subset.store().columns().to_vec();
        Self {
            subset,
            columns,
            config: config.clone(),
        }
    }

    pub fn columns(&self) -> &[RecordColumn] {
        &self.columns
    }

    pub fn header(&self) -> Vec<&'static str> {
        self.columns.iter().map(RecordColumn::name).collect()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn row_count(&self) -> usize {
        self.subset.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &Record> {
        self.subset.iter()
    }

    /// Number of pages; an empty table still has one (empty) page
    pub fn page_count(&self) -> usize {
        self.row_count().div_ceil(self.config.page_size).max(1)
    }

    /// Rows of a zero-based page, empty past the last page
    pub fn page(&self, page: usize) -> Vec<&Record> {
        self.rows()
            .skip(page.saturating_mul(self.config.page_size))
            .take(self.config.page_size)
            .collect()
    }

    /// Rows ordered by one column. The sort is stable and missing
    /// values always come last.
    pub fn sorted_by(&self, column: RecordColumn, order: SortOrder) -> Vec<&Record> {
        let mut rows: Vec<&Record> = self.rows().collect();
        rows.sort_by(|a, b| compare_cells(a, b, column, order));
        rows
    }

    /// Cell text of a row in column order
    pub fn cells(&self, record: &Record) -> Vec<String> {
        self.columns.iter().map(|column| record.cell(*column)).collect()
    }
}

fn compare_cells(a: &Record, b: &Record, column: RecordColumn, order: SortOrder) -> Ordering {
    let directed = |ordering: Ordering| match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    };

    match column {
        RecordColumn::Category(field) => match (a.field(field), b.field(field)) {
            (Some(x), Some(y)) => directed(x.cmp(y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        RecordColumn::Latitude => directed(a.latitude.total_cmp(&b.latitude)),
        RecordColumn::Longitude => directed(a.longitude.total_cmp(&b.longitude)),
    }
}
