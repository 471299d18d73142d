#![doc(test(attr(deny(warnings))))]

//! Budget Split offers the core model for percentage-based personal budgets:
//! category state, derived totals, shareable budget codes, and local
//! persistence for the current and saved budgets.

pub mod domain;
pub mod errors;
pub mod metrics;
pub mod share;
pub mod state;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Split tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
