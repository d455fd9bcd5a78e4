//! Filtering engine.
//!
//! Turns the record store and the current filter state into the
//! filtered subset, and derives the selectable options of every
//! filter field from the store.

pub mod filter;
pub mod options;
pub mod state;

#[cfg(test)]
pub mod tests;

pub use self::filter::{FilterPredicate, Subset, apply};
pub use self::options::OptionIndex;
pub use self::state::FilterState;
