use super::{
    category::{Categories, Selection},
    targets::TargetPercentages,
};

/// The complete budgeting state. Constructed empty, mutated exclusively
/// through reducer actions, replaced wholesale on storage load or import.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BudgetState {
    pub categories: Categories,
    pub target_percentages: TargetPercentages,
    pub selected: Option<Selection>,
    pub current_budget_name: Option<String>,
}

impl BudgetState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any category holds at least one item.
    pub fn has_budget_items(&self) -> bool {
        self.categories.iter().any(|category| !category.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetItem, CategoryName};

    #[test]
    fn new_state_is_empty_with_default_targets() {
        let state = BudgetState::new();
        assert!(!state.has_budget_items());
        assert_eq!(state.target_percentages, TargetPercentages::default());
        assert!(state.selected.is_none());
        assert!(state.current_budget_name.is_none());
        for name in CategoryName::ALL {
            assert!(state.categories.get(name).is_empty());
        }
    }

    #[test]
    fn has_budget_items_sees_any_category() {
        let mut state = BudgetState::new();
        state
            .categories
            .get_mut(CategoryName::Income)
            .items
            .push(BudgetItem::new("Salary", 5000.0));
        assert!(state.has_budget_items());
    }
}
