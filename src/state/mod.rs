//! Reducer-driven state transitions and the state container that owns them.

pub mod action;
pub mod reducer;
pub mod store;

pub use action::Action;
pub use reducer::reduce;
pub use store::BudgetStore;
