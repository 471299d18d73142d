//! Budget domain models: items, categories, target percentages, and the
//! overall budget state shape.

pub mod category;
pub mod item;
pub mod state;
pub mod targets;

pub use category::{BudgetCategory, Categories, CategoryName, Selection};
pub use item::BudgetItem;
pub use state::BudgetState;
pub use targets::TargetPercentages;
