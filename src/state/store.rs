use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{BudgetItem, BudgetState, CategoryName, Selection, TargetPercentages};
use crate::share::SerializedBudget;
use crate::storage::{CurrentBudgetStore, StorageBackend};

use super::{action::Action, reducer::reduce};

type ChangeListener = Box<dyn Fn(&BudgetState)>;

/// Owns the live budget state and coordinates reducer, persistence, and
/// change notification: dispatch runs the pure reducer, mirrors the new
/// state to storage, then notifies listeners.
///
/// This is the explicit state-container replacement for a UI-framework
/// provider; the convenience dispatchers below are its complete public
/// mutation surface.
pub struct BudgetStore {
    state: BudgetState,
    current: CurrentBudgetStore,
    listeners: Vec<ChangeListener>,
}

impl BudgetStore {
    /// Opens a store over the given backend, restoring the persisted current
    /// budget when one exists.
    pub fn open(backend: Arc<dyn StorageBackend>) -> Self {
        let current = CurrentBudgetStore::new(backend);
        let mut store = Self {
            state: BudgetState::new(),
            current,
            listeners: Vec::new(),
        };
        if let Some(loaded) = store.current.load() {
            store.state = reduce(&store.state, Action::LoadFromStorage(loaded));
        }
        store
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    /// Registers a callback invoked after every dispatched action.
    pub fn subscribe(&mut self, listener: impl Fn(&BudgetState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Applies one action, auto-saves the result, and notifies listeners.
    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(&self.state, action);
        self.current.save(&self.state);
        for listener in &self.listeners {
            listener(&self.state);
        }
    }

    pub fn add_item(&mut self, category: CategoryName, label: impl Into<String>, amount: f64) {
        self.dispatch(Action::AddItem {
            category,
            label: label.into(),
            amount,
        });
    }

    pub fn remove_item(&mut self, category: CategoryName, item_id: Uuid) {
        self.dispatch(Action::RemoveItem { category, item_id });
    }

    pub fn update_item(&mut self, category: CategoryName, item: BudgetItem) {
        self.dispatch(Action::UpdateItem { category, item });
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.dispatch(Action::SetSelection(selection));
    }

    pub fn set_target_percentages(&mut self, targets: TargetPercentages) {
        self.dispatch(Action::SetTargetPercentages(targets));
    }

    pub fn set_current_budget_name(&mut self, name: Option<String>) {
        self.dispatch(Action::SetCurrentBudgetName(name));
    }

    pub fn import_budget(&mut self, data: SerializedBudget) {
        self.dispatch(Action::ImportBudget(data));
    }

    pub fn clear_all(&mut self) {
        self.dispatch(Action::ClearAll);
    }
}
