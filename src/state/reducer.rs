use crate::domain::{BudgetItem, BudgetState, CategoryName};
use crate::share::SerializedBudget;

use super::action::Action;

/// Pure state transition: applies one action to a state and returns the next
/// state. Never fails; inputs the state cannot honor (unknown ids, unbalanced
/// targets) leave the state unchanged.
pub fn reduce(state: &BudgetState, action: Action) -> BudgetState {
    match action {
        Action::AddItem {
            category,
            label,
            amount,
        } => {
            let mut next = state.clone();
            next.categories
                .get_mut(category)
                .items
                .push(BudgetItem::new(label, amount));
            next
        }
        Action::RemoveItem { category, item_id } => {
            // Explicit no-op when the id is absent.
            if state.categories.get(category).item(item_id).is_none() {
                return state.clone();
            }
            let mut next = state.clone();
            next.categories
                .get_mut(category)
                .items
                .retain(|item| item.id != item_id);
            next
        }
        Action::UpdateItem { category, item } => {
            let Some(position) = state
                .categories
                .get(category)
                .items
                .iter()
                .position(|existing| existing.id == item.id)
            else {
                // Explicit no-op when no id matches.
                return state.clone();
            };
            let mut next = state.clone();
            next.categories.get_mut(category).items[position] = item;
            next
        }
        Action::SetSelection(selection) => {
            let mut next = state.clone();
            next.selected = selection;
            next
        }
        Action::SetTargetPercentages(targets) => {
            // The core owns the sum-to-100 policy: clamp components, ignore
            // triples that do not balance.
            let clamped = targets.clamped();
            if !clamped.is_balanced() {
                return state.clone();
            }
            let mut next = state.clone();
            next.target_percentages = clamped;
            next
        }
        Action::SetCurrentBudgetName(name) => {
            let mut next = state.clone();
            next.current_budget_name = name;
            next
        }
        Action::ClearAll => BudgetState::new(),
        Action::ImportBudget(data) => import(data),
        Action::LoadFromStorage(loaded) => loaded,
    }
}

/// Rebuilds all four categories from a serialized payload, minting fresh item
/// ids so repeated imports never collide.
fn import(data: SerializedBudget) -> BudgetState {
    let mut next = BudgetState::new();
    for name in CategoryName::ALL {
        let items = &mut next.categories.get_mut(name).items;
        for entry in data.items.get(name) {
            items.push(BudgetItem::new(entry.label.clone(), entry.amount));
        }
    }
    next.target_percentages = data.targets.unwrap_or_default();
    next.selected = None;
    next
}
