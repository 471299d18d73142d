//! Compact, URL-safe budget codes for sharing and importing budgets.

pub mod codec;

pub use codec::{
    decode, encode, preview, serialize, share_url, BudgetPreview, CategoryPreview,
    SerializedBudget, SerializedItem, SerializedItems,
};
