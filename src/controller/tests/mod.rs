//! Tests for the recomputation controller and session runtime

pub mod session_tests;

use crate::config::ExplorerConfig;
use crate::controller::ReactivityController;
use crate::engine::tests::sample_store;

pub fn controller() -> ReactivityController {
    ReactivityController::new(sample_store(), ExplorerConfig::default())
}
