use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single labelled amount inside a budget category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetItem {
    pub id: Uuid,
    pub label: String,
    pub amount: f64,
}

impl BudgetItem {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            amount,
        }
    }
}
