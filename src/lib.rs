#![doc(test(attr(deny(warnings))))]

//! Budget Planner projects what-if scenarios onto a monthly budget plan:
//! apply a scenario's changes to a copy of the budget, measure the
//! difference, and classify how risky it is, without touching the real plan.

pub mod budget;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod horizon;
pub mod scenario;
pub mod simulation;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Budget Planner tracing initialized.");
    });
}
