//! Recomputation controller.
//!
//! Holds one session's store and filter state and owns the dependency
//! graph between them:
//!
//! ```text
//! RecordStore ──► OptionIndex
//!      │
//!      └──► Subset (+ FilterState) ──► DerivedViews ──► Snapshot
//! ```
//!
//! Each derived node is memoised on the revisions of its inputs. Events
//! only mutate inputs and mark the controller as recomputing; `settle`
//! then walks the graph once, so any number of events applied before a
//! settle cost a single recomputation.

pub mod session;

#[cfg(test)]
pub mod tests;

pub use self::session::SessionHandle;

use crate::config::ExplorerConfig;
use crate::engine::{FilterState, OptionIndex, Subset};
use crate::models::{FilterField, Selection};
use crate::store::RecordStore;
use crate::views::{DerivedViews, Metrics, ViewOutcome};

use std::sync::Arc;
use tracing::{debug, info, warn};

/// A user or data driven change
#[derive(Debug, Clone)]
pub enum FilterEvent {
    SetQuery(String),
    Select(FilterField, Selection),
    /// Clear the query and every selection as one update
    Reset,
    ReplaceStore(Arc<RecordStore>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Stable,
    Recomputing,
}

/// Conditions worth telling the user about that are not errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The filters leave no records
    EmptyResult,
    /// A selection names a value the store no longer contains
    StaleSelection { field: FilterField, value: String },
}

/// Everything the sinks need, computed from one consistent
/// (store, filter state) pair
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Number of recomputations up to and including this one
    pub revision: u64,
    pub state: FilterState,
    pub options: Arc<OptionIndex>,
    pub subset: Subset,
    pub views: Arc<DerivedViews>,
    pub notices: Vec<Notice>,
}

impl Snapshot {
    pub fn metrics(&self) -> &ViewOutcome<Metrics> {
        &self.views.metrics
    }
}

/// Single-entry cache keyed on input revisions
#[derive(Debug)]
struct Memo<K, T> {
    entry: Option<(K, T)>,
}

impl<K: PartialEq + Copy, T: Clone> Memo<K, T> {
    fn new() -> Self {
        Self { entry: None }
    }

    fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> T) -> T {
        match &self.entry {
            Some((cached, value)) if *cached == key => value.clone(),
            _ => {
                let value = compute();
                self.entry = Some((key, value.clone()));
                value
            }
        }
    }
}

/// Per-session recomputation controller
#[derive(Debug)]
pub struct ReactivityController {
    config: ExplorerConfig,
    store: Arc<RecordStore>,
    state: FilterState,
    store_revision: u64,
    state_revision: u64,
    phase: Phase,
    options: Memo<u64, Arc<OptionIndex>>,
    subset: Memo<(u64, u64), Subset>,
    views: Memo<(u64, u64), Arc<DerivedViews>>,
    recomputations: u64,
    current: Option<Arc<Snapshot>>,
}

impl ReactivityController {
    /// Start a session. The first snapshot is computed on demand.
    pub fn new(store: Arc<RecordStore>, config: ExplorerConfig) -> Self {
        Self {
            config,
            store,
            state: FilterState::default(),
            store_revision: 0,
            state_revision: 0,
            phase: Phase::Recomputing,
            options: Memo::new(),
            subset: Memo::new(),
            views: Memo::new(),
            recomputations: 0,
            current: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Number of completed recomputation passes
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Options for the current store
    pub fn options(&mut self) -> Arc<OptionIndex> {
        let store = Arc::clone(&self.store);
        self.options.get_or_compute(self.store_revision, || {
            Arc::new(OptionIndex::build(store.records()))
        })
    }

    /// Apply one event without recomputing. Returns whether an input changed.
    pub fn apply(&mut self, event: FilterEvent) -> bool {
        let changed = match event {
            FilterEvent::SetQuery(query) => self.state.set_query(query),
            FilterEvent::Select(field, selection) => {
                if !self.options().offers(field, &selection) {
                    debug!(
                        "Selection '{}' is not among the current {} options",
                        selection, field
                    );
                }
                self.state.select(field, selection)
            }
            FilterEvent::Reset => self.state.reset(),
            FilterEvent::ReplaceStore(store) => {
                self.store = store;
                self.store_revision += 1;
                true
            }
        };

        if changed {
            self.state_revision += 1;
            self.phase = Phase::Recomputing;
        }
        changed
    }

    /// Recompute if inputs changed since the last pass
    pub fn settle(&mut self) -> Option<Arc<Snapshot>> {
        if self.phase == Phase::Stable {
            return None;
        }
        Some(self.recompute())
    }

    /// Apply a batch of events and recompute at most once
    pub fn dispatch(
        &mut self,
        events: impl IntoIterator<Item = FilterEvent>,
    ) -> Option<Arc<Snapshot>> {
        for event in events {
            self.apply(event);
        }
        self.settle()
    }

    /// Latest snapshot, recomputing first if anything is pending
    pub fn snapshot(&mut self) -> Arc<Snapshot> {
        if self.phase == Phase::Stable {
            if let Some(current) = &self.current {
                return Arc::clone(current);
            }
        }
        self.recompute()
    }

    fn recompute(&mut self) -> Arc<Snapshot> {
        let key = (self.store_revision, self.state_revision);

        let options = self.options();

        let store = Arc::clone(&self.store);
        let state = &self.state;
        let subset = self.subset.get_or_compute(key, || Subset::compute(store, state));

        let config = &self.config;
        let views = self
            .views
            .get_or_compute(key, || Arc::new(DerivedViews::compute(&subset, config)));

        let notices = collect_notices(&self.state, &options, &subset);
        for notice in &notices {
            match notice {
                Notice::EmptyResult => info!("Current filters match no records"),
                Notice::StaleSelection { field, value } => {
                    warn!("{} selection '{}' matches no loaded record", field, value)
                }
            }
        }

        self.recomputations += 1;
        let snapshot = Arc::new(Snapshot {
            revision: self.recomputations,
            state: self.state.clone(),
            options,
            subset,
            views,
            notices,
        });

        debug!(
            "Recomputation {} complete: {} of {} records",
            snapshot.revision,
            snapshot.subset.len(),
            self.store.len()
        );

        self.current = Some(Arc::clone(&snapshot));
        self.phase = Phase::Stable;
        snapshot
    }
}

fn collect_notices(state: &FilterState, options: &OptionIndex, subset: &Subset) -> Vec<Notice> {
    let mut notices: Vec<Notice> = state
        .active_selections()
        .filter(|(field, value)| !options.offers(*field, &Selection::only(*value)))
        .map(|(field, value)| Notice::StaleSelection {
            field,
            value: value.to_string(),
        })
        .collect();

    if subset.is_empty() {
        notices.push(Notice::EmptyResult);
    }
    notices
}
