use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::BudgetState;
use crate::share::{serialize, SerializedBudget};

use super::{StorageBackend, SAVED_BUDGETS_KEY};

/// A named snapshot in the saved-budgets list, independent of the live
/// current budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedBudget {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    pub data: SerializedBudget,
}

type Listener = Box<dyn Fn() + Send + Sync>;

/// CRUD over the saved-budgets list, stored newest-first under one key.
///
/// Registered listeners are notified after every successful write so
/// consumers can cache the last snapshot until invalidated. Backend failures
/// are logged and degrade (empty list on read, dropped write) rather than
/// propagate.
pub struct SavedBudgetStore {
    backend: Arc<dyn StorageBackend>,
    listeners: RwLock<Vec<Listener>>,
}

impl SavedBudgetStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Registers a callback fired after every successful write.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        listeners.push(Box::new(listener));
    }

    /// All saved budgets, most recently saved first. A failed or corrupt
    /// read behaves as an empty list.
    pub fn list(&self) -> Vec<SavedBudget> {
        let raw = match self.backend.read(SAVED_BUDGETS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!("failed to read saved budgets: {err}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!("stored saved-budgets list is not valid JSON: {err}");
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: Uuid) -> Option<SavedBudget> {
        self.list().into_iter().find(|entry| entry.id == id)
    }

    /// Snapshots the current state under `name`, prepending it to the list.
    pub fn save(&self, name: impl Into<String>, state: &BudgetState) -> SavedBudget {
        let now = Utc::now();
        let record = SavedBudget {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now,
            last_modified_at: now,
            data: serialize(state),
        };
        let mut list = self.list();
        list.insert(0, record.clone());
        self.write_list(&list);
        record
    }

    /// Renames a saved budget, refreshing `last_modified_at`. Returns `None`
    /// when the id is unknown.
    pub fn rename(&self, id: Uuid, name: impl Into<String>) -> Option<SavedBudget> {
        let mut list = self.list();
        let entry = list.iter_mut().find(|entry| entry.id == id)?;
        entry.name = name.into();
        entry.last_modified_at = Utc::now();
        let updated = entry.clone();
        self.write_list(&list);
        Some(updated)
    }

    /// Overwrites a saved budget's snapshot data with the given state.
    /// Returns `None` when the id is unknown.
    pub fn update(&self, id: Uuid, state: &BudgetState) -> Option<SavedBudget> {
        let mut list = self.list();
        let entry = list.iter_mut().find(|entry| entry.id == id)?;
        entry.data = serialize(state);
        entry.last_modified_at = Utc::now();
        let updated = entry.clone();
        self.write_list(&list);
        Some(updated)
    }

    /// Deletes by id; reports whether anything was actually removed.
    pub fn delete(&self, id: Uuid) -> bool {
        let mut list = self.list();
        let before = list.len();
        list.retain(|entry| entry.id != id);
        if list.len() == before {
            return false;
        }
        self.write_list(&list);
        true
    }

    fn write_list(&self, list: &[SavedBudget]) {
        let json = match serde_json::to_string(list) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("failed to serialize saved budgets: {err}");
                return;
            }
        };
        if let Err(err) = self.backend.write(SAVED_BUDGETS_KEY, &json) {
            tracing::warn!("failed to persist saved budgets: {err}");
            return;
        }
        self.notify();
    }

    fn notify(&self) {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for listener in listeners.iter() {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetItem, CategoryName};
    use crate::storage::MemoryBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store() -> SavedBudgetStore {
        SavedBudgetStore::new(Arc::new(MemoryBackend::new()))
    }

    fn state_with_salary() -> BudgetState {
        let mut state = BudgetState::new();
        state
            .categories
            .get_mut(CategoryName::Income)
            .items
            .push(BudgetItem::new("Salary", 5000.0));
        state
    }

    #[test]
    fn empty_store_lists_nothing() {
        assert!(store().list().is_empty());
    }

    #[test]
    fn save_prepends_newest_first() {
        let store = store();
        let first = store.save("January", &state_with_salary());
        let second = store.save("February", &state_with_salary());
        let list = store.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, second.id);
        assert_eq!(list[1].id, first.id);
    }

    #[test]
    fn rename_updates_name_and_modified_stamp_only() {
        let store = store();
        let record = store.save("March", &state_with_salary());
        let renamed = store.rename(record.id, "March Final").expect("rename");
        assert_eq!(renamed.name, "March Final");
        assert_eq!(renamed.created_at, record.created_at);
        assert!(renamed.last_modified_at >= record.last_modified_at);

        let fetched = store.get(record.id).expect("fetch");
        assert_eq!(fetched.name, "March Final");
        assert_eq!(fetched.created_at, record.created_at);
    }

    #[test]
    fn rename_unknown_id_returns_none() {
        let store = store();
        store.save("March", &state_with_salary());
        assert!(store.rename(Uuid::new_v4(), "Ghost").is_none());
    }

    #[test]
    fn update_replaces_snapshot_data() {
        let store = store();
        let record = store.save("March", &state_with_salary());
        let mut richer = state_with_salary();
        richer
            .categories
            .get_mut(CategoryName::Needs)
            .items
            .push(BudgetItem::new("Rent", 1500.0));
        let updated = store.update(record.id, &richer).expect("update");
        assert_eq!(updated.data.items.needs.len(), 1);
        assert_eq!(updated.created_at, record.created_at);
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let store = store();
        let record = store.save("March", &state_with_salary());
        assert!(store.delete(record.id));
        assert!(!store.delete(record.id));
        assert!(store.list().is_empty());
    }

    #[test]
    fn listeners_fire_after_successful_writes() {
        let store = store();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let record = store.save("March", &state_with_salary());
        store.rename(record.id, "March Final");
        store.delete(record.id);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn corrupt_list_degrades_to_empty() {
        let backend = Arc::new(MemoryBackend::new());
        backend.write(SAVED_BUDGETS_KEY, "[{broken").unwrap();
        let store = SavedBudgetStore::new(backend);
        assert!(store.list().is_empty());
    }
}
