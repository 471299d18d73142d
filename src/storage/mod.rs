//! Key-value persistence: a backend trait with file and in-memory
//! implementations, plus the two independently keyed budget stores built on
//! top of it.

pub mod current;
pub mod json_backend;
pub mod memory;
pub mod saved;

use crate::errors::BudgetError;

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Well-known key holding the single auto-saved current budget.
pub const CURRENT_BUDGET_KEY: &str = "current_budget";
/// Well-known key holding the user-managed list of saved budgets.
pub const SAVED_BUDGETS_KEY: &str = "saved_budgets";

/// Abstraction over synchronous key-value storage. Implementations persist
/// whole string values per key; there are no incremental writes.
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub use current::CurrentBudgetStore;
pub use json_backend::JsonFileBackend;
pub use memory::MemoryBackend;
pub use saved::{SavedBudget, SavedBudgetStore};
