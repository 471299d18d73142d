use uuid::Uuid;

use crate::domain::{BudgetItem, BudgetState, CategoryName, Selection, TargetPercentages};
use crate::share::SerializedBudget;

/// Every way the budget state can change. The reducer applies these as pure
/// transitions; validation of labels and amounts is a caller concern.
#[derive(Debug, Clone)]
pub enum Action {
    /// Append a new item with a freshly generated id.
    AddItem {
        category: CategoryName,
        label: String,
        amount: f64,
    },
    /// Drop an item by id; a missing id is a documented no-op.
    RemoveItem {
        category: CategoryName,
        item_id: Uuid,
    },
    /// Replace the item with a matching id in place; unknown ids are a no-op.
    UpdateItem {
        category: CategoryName,
        item: BudgetItem,
    },
    SetSelection(Option<Selection>),
    SetTargetPercentages(TargetPercentages),
    SetCurrentBudgetName(Option<String>),
    /// Reset everything to the initial empty state.
    ClearAll,
    /// Full-state replace from a decoded share payload; never a merge.
    ImportBudget(SerializedBudget),
    /// Wholesale replacement, used once at startup.
    LoadFromStorage(BudgetState),
}
