use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::item::BudgetItem;

/// The four top-level groupings a budget item can belong to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CategoryName {
    Needs,
    Wants,
    Savings,
    Income,
}

impl CategoryName {
    /// All four categories, in display order.
    pub const ALL: [CategoryName; 4] = [
        CategoryName::Needs,
        CategoryName::Wants,
        CategoryName::Savings,
        CategoryName::Income,
    ];

    /// The three categories subject to percentage targets.
    pub const SPENDING: [CategoryName; 3] = [
        CategoryName::Needs,
        CategoryName::Wants,
        CategoryName::Savings,
    ];

    pub fn is_spending(self) -> bool {
        !matches!(self, CategoryName::Income)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryName::Needs => "needs",
            CategoryName::Wants => "wants",
            CategoryName::Savings => "savings",
            CategoryName::Income => "income",
        }
    }

    /// Parses the lowercase wire name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "needs" => Some(CategoryName::Needs),
            "wants" => Some(CategoryName::Wants),
            "savings" => Some(CategoryName::Savings),
            "income" => Some(CategoryName::Income),
            _ => None,
        }
    }

    /// Display color metadata consumed by presentation layers.
    pub fn color(self) -> &'static str {
        match self {
            CategoryName::Needs => "#3b82f6",
            CategoryName::Wants => "#a855f7",
            CategoryName::Savings => "#22c55e",
            CategoryName::Income => "#14b8a6",
        }
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the detail view is focused on; lives in shared state because several
/// consumers read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Category(CategoryName),
    Unbudgeted,
}

/// One budget category and its items, kept in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetCategory {
    pub name: CategoryName,
    pub items: Vec<BudgetItem>,
}

impl BudgetCategory {
    pub fn empty(name: CategoryName) -> Self {
        Self {
            name,
            items: Vec::new(),
        }
    }

    pub fn item(&self, id: Uuid) -> Option<&BudgetItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fixed set of the four categories; all keys always present by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Categories {
    pub needs: BudgetCategory,
    pub wants: BudgetCategory,
    pub savings: BudgetCategory,
    pub income: BudgetCategory,
}

impl Categories {
    pub fn get(&self, name: CategoryName) -> &BudgetCategory {
        match name {
            CategoryName::Needs => &self.needs,
            CategoryName::Wants => &self.wants,
            CategoryName::Savings => &self.savings,
            CategoryName::Income => &self.income,
        }
    }

    pub fn get_mut(&mut self, name: CategoryName) -> &mut BudgetCategory {
        match name {
            CategoryName::Needs => &mut self.needs,
            CategoryName::Wants => &mut self.wants,
            CategoryName::Savings => &mut self.savings,
            CategoryName::Income => &mut self.income,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &BudgetCategory> {
        CategoryName::ALL.iter().map(move |name| self.get(*name))
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self {
            needs: BudgetCategory::empty(CategoryName::Needs),
            wants: BudgetCategory::empty(CategoryName::Wants),
            savings: BudgetCategory::empty(CategoryName::Savings),
            income: BudgetCategory::empty(CategoryName::Income),
        }
    }
}
