use serde::{Deserialize, Serialize};

use super::category::CategoryName;

/// Percentage of income each spending category is expected to consume.
/// Convention (not a hard invariant of the data type) is that the three
/// components sum to 100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetPercentages {
    pub needs: u8,
    pub wants: u8,
    pub savings: u8,
}

impl TargetPercentages {
    pub fn new(needs: u8, wants: u8, savings: u8) -> Self {
        Self {
            needs,
            wants,
            savings,
        }
    }

    /// Target for one spending category; income has no target.
    pub fn for_category(&self, name: CategoryName) -> Option<u8> {
        match name {
            CategoryName::Needs => Some(self.needs),
            CategoryName::Wants => Some(self.wants),
            CategoryName::Savings => Some(self.savings),
            CategoryName::Income => None,
        }
    }

    /// Clamps each component to the 0..=100 range.
    pub fn clamped(&self) -> Self {
        Self {
            needs: self.needs.min(100),
            wants: self.wants.min(100),
            savings: self.savings.min(100),
        }
    }

    pub fn is_balanced(&self) -> bool {
        u16::from(self.needs) + u16::from(self.wants) + u16::from(self.savings) == 100
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for TargetPercentages {
    fn default() -> Self {
        Self {
            needs: 50,
            wants: 30,
            savings: 20,
        }
    }
}
