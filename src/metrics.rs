//! Derived metrics over a [`BudgetState`]. Everything here is computed on
//! demand and never stored.

use crate::domain::{BudgetState, CategoryName};

impl BudgetState {
    /// Sum of item amounts in one category.
    pub fn total_for(&self, category: CategoryName) -> f64 {
        self.categories
            .get(category)
            .items
            .iter()
            .map(|item| item.amount)
            .sum()
    }

    pub fn total_income(&self) -> f64 {
        self.total_for(CategoryName::Income)
    }

    /// Needs + wants + savings; income is deliberately excluded.
    pub fn total_spending(&self) -> f64 {
        CategoryName::SPENDING
            .iter()
            .map(|name| self.total_for(*name))
            .sum()
    }

    /// Income minus spending. Negative means overspending, which is a valid
    /// displayed state rather than an error.
    pub fn unbudgeted_amount(&self) -> f64 {
        self.total_income() - self.total_spending()
    }

    /// Share of income consumed by a category, as a percentage. Returns 0
    /// when there is no income rather than NaN or infinity.
    pub fn percentage_of_income(&self, category: CategoryName) -> f64 {
        let income = self.total_income();
        if income == 0.0 {
            return 0.0;
        }
        self.total_for(category) / income * 100.0
    }

    /// Share of total budgeted spending, with the same zero guard. Answers a
    /// different question than [`percentage_of_income`] and both are used.
    ///
    /// [`percentage_of_income`]: BudgetState::percentage_of_income
    pub fn percentage_of_spending(&self, category: CategoryName) -> f64 {
        let spending = self.total_spending();
        if spending == 0.0 {
            return 0.0;
        }
        self.total_for(category) / spending * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{reduce, Action};

    fn add(state: &BudgetState, category: CategoryName, label: &str, amount: f64) -> BudgetState {
        reduce(
            state,
            Action::AddItem {
                category,
                label: label.into(),
                amount,
            },
        )
    }

    #[test]
    fn salary_and_rent_scenario() {
        let state = BudgetState::new();
        let state = add(&state, CategoryName::Income, "Salary", 5000.0);
        let state = add(&state, CategoryName::Needs, "Rent", 1500.0);

        assert_eq!(state.total_income(), 5000.0);
        assert_eq!(state.total_spending(), 1500.0);
        assert_eq!(state.percentage_of_income(CategoryName::Needs), 30.0);
        assert_eq!(state.unbudgeted_amount(), 3500.0);
    }

    #[test]
    fn zero_income_percentage_is_zero_not_nan() {
        let state = add(&BudgetState::new(), CategoryName::Needs, "Rent", 1500.0);
        let pct = state.percentage_of_income(CategoryName::Needs);
        assert_eq!(pct, 0.0);
        assert!(pct.is_finite());
    }

    #[test]
    fn zero_spending_percentage_is_zero_not_nan() {
        let state = add(&BudgetState::new(), CategoryName::Income, "Salary", 100.0);
        assert_eq!(state.percentage_of_spending(CategoryName::Needs), 0.0);
    }

    #[test]
    fn overspending_yields_a_negative_unbudgeted_amount() {
        let state = add(&BudgetState::new(), CategoryName::Income, "Salary", 1000.0);
        let state = add(&state, CategoryName::Wants, "Travel", 1800.0);
        assert!(state.unbudgeted_amount() < 0.0);
        assert_eq!(state.unbudgeted_amount(), -800.0);
    }

    #[test]
    fn spending_share_differs_from_income_share() {
        let state = add(&BudgetState::new(), CategoryName::Income, "Salary", 4000.0);
        let state = add(&state, CategoryName::Needs, "Rent", 1000.0);
        let state = add(&state, CategoryName::Wants, "Dining", 1000.0);

        assert_eq!(state.percentage_of_income(CategoryName::Needs), 25.0);
        assert_eq!(state.percentage_of_spending(CategoryName::Needs), 50.0);
    }

    #[test]
    fn totals_sum_every_item_in_the_category() {
        let state = add(&BudgetState::new(), CategoryName::Savings, "Index fund", 250.0);
        let state = add(&state, CategoryName::Savings, "Emergency", 150.0);
        assert_eq!(state.total_for(CategoryName::Savings), 400.0);
    }
}
