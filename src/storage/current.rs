use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{BudgetItem, BudgetState, CategoryName, TargetPercentages};

use super::{StorageBackend, CURRENT_BUDGET_KEY};

/// Persists the single auto-saved current budget under one well-known key.
///
/// Every write replaces the whole record. Reads are tolerant: partially
/// corrupt stored data degrades to defaults instead of failing, and backend
/// errors are logged and swallowed so the in-memory session stays
/// authoritative.
pub struct CurrentBudgetStore {
    backend: Arc<dyn StorageBackend>,
}

impl CurrentBudgetStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Reads the persisted current budget, if any. A failed read behaves as
    /// "no data".
    pub fn load(&self) -> Option<BudgetState> {
        let raw = match self.backend.read(CURRENT_BUDGET_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!("failed to read current budget: {err}");
                return None;
            }
        };
        let persisted: PersistedState = match serde_json::from_str(&raw) {
            Ok(persisted) => persisted,
            Err(err) => {
                tracing::warn!("stored current budget is not valid JSON: {err}");
                return None;
            }
        };
        Some(persisted.into_state())
    }

    /// Writes the whole state. A failed write is logged and dropped.
    pub fn save(&self, state: &BudgetState) {
        let persisted = PersistedState::from_state(state);
        let json = match serde_json::to_string(&persisted) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("failed to serialize current budget: {err}");
                return;
            }
        };
        if let Err(err) = self.backend.write(CURRENT_BUDGET_KEY, &json) {
            tracing::warn!("failed to persist current budget: {err}");
        }
    }

    /// Removes the persisted record; used by clear flows.
    pub fn wipe(&self) {
        if let Err(err) = self.backend.remove(CURRENT_BUDGET_KEY) {
            tracing::warn!("failed to remove current budget: {err}");
        }
    }
}

/// Stored layout of the current budget. Field-level `default` +
/// `ok_or_default` make the reader tolerant of missing or malformed pieces.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    #[serde(default, deserialize_with = "ok_or_default")]
    categories: PersistedCategories,
    #[serde(default, deserialize_with = "ok_or_default")]
    target_percentages: TargetPercentages,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_budget_name: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedCategories {
    #[serde(default, deserialize_with = "ok_or_default")]
    needs: PersistedCategory,
    #[serde(default, deserialize_with = "ok_or_default")]
    wants: PersistedCategory,
    #[serde(default, deserialize_with = "ok_or_default")]
    savings: PersistedCategory,
    #[serde(default, deserialize_with = "ok_or_default")]
    income: PersistedCategory,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedCategory {
    #[serde(default, deserialize_with = "ok_or_default")]
    items: Vec<BudgetItem>,
}

impl PersistedState {
    fn from_state(state: &BudgetState) -> Self {
        let category = |name: CategoryName| PersistedCategory {
            items: state.categories.get(name).items.clone(),
        };
        Self {
            categories: PersistedCategories {
                needs: category(CategoryName::Needs),
                wants: category(CategoryName::Wants),
                savings: category(CategoryName::Savings),
                income: category(CategoryName::Income),
            },
            target_percentages: state.target_percentages,
            current_budget_name: state.current_budget_name.clone(),
        }
    }

    fn into_state(self) -> BudgetState {
        let mut state = BudgetState::new();
        state.categories.get_mut(CategoryName::Needs).items = self.categories.needs.items;
        state.categories.get_mut(CategoryName::Wants).items = self.categories.wants.items;
        state.categories.get_mut(CategoryName::Savings).items = self.categories.savings.items;
        state.categories.get_mut(CategoryName::Income).items = self.categories.income.items;
        state.target_percentages = self.target_percentages;
        state.current_budget_name = self.current_budget_name;
        if state.current_budget_name.is_none() && state.has_budget_items() {
            state.current_budget_name = Some(generated_budget_name());
        }
        state
    }
}

/// Display name assigned to unnamed budgets that already hold items.
fn generated_budget_name() -> String {
    format!("Budget {}", Local::now().format("%b %-d, %Y"))
}

/// Accepts any JSON for the field and falls back to the default value when it
/// does not match the expected shape.
fn ok_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
