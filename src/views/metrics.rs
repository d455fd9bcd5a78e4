//! Summary metrics over the filtered subset

use crate::constants::{NO_DATA_LABEL, NOT_AVAILABLE_LABEL};
use crate::models::{FilterField, Record};

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::ViewOutcome;

/// Most frequent conservation status of a subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalStatus {
    Status(String),
    /// No record in the subset carries a status
    NoData,
}

impl fmt::Display for ModalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalStatus::Status(status) => f.write_str(status),
            ModalStatus::NoData => f.write_str(NO_DATA_LABEL),
        }
    }
}

/// The four headline values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    pub species_count: usize,
    pub observation_count: usize,
    pub country_count: usize,
    pub modal_status: ModalStatus,
}

impl Metrics {
    pub fn compute<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut species = HashSet::new();
        let mut countries = HashSet::new();
        let mut statuses = StatusTally::default();
        let mut observation_count = 0;

        for record in records {
            observation_count += 1;
            if let Some(value) = record.field(FilterField::Species) {
                species.insert(value);
            }
            if let Some(value) = record.field(FilterField::CountryCode) {
                countries.insert(value);
            }
            if let Some(value) = record.field(FilterField::IucnRedListCategory) {
                statuses.add(value);
            }
        }

        Self {
            species_count: species.len(),
            observation_count,
            country_count: countries.len(),
            modal_status: statuses.mode(),
        }
    }

    /// Display strings in headline order
    pub fn display_values(outcome: &ViewOutcome<Metrics>) -> [String; 4] {
        match outcome {
            ViewOutcome::Ready(metrics) => [
                metrics.species_count.to_string(),
                metrics.observation_count.to_string(),
                metrics.country_count.to_string(),
                metrics.modal_status.to_string(),
            ],
            ViewOutcome::Degraded { .. } => {
                std::array::from_fn(|_| NOT_AVAILABLE_LABEL.to_string())
            }
        }
    }
}

/// Frequency count that remembers first appearance for tie-breaks
#[derive(Default)]
struct StatusTally<'a> {
    counts: HashMap<&'a str, (usize, usize)>,
    seen: usize,
}

impl<'a> StatusTally<'a> {
    fn add(&mut self, status: &'a str) {
        let order = self.seen;
        self.counts.entry(status).or_insert((0, order)).0 += 1;
        self.seen += 1;
    }

    /// Highest count wins; ties go to the status seen first
    fn mode(&self) -> ModalStatus {
        self.counts
            .iter()
            .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
                count_a.cmp(count_b).then(first_b.cmp(first_a))
            })
            .map(|(status, _)| ModalStatus::Status(status.to_string()))
            .unwrap_or(ModalStatus::NoData)
    }
}
