use std::io::{Read, Write};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::{read::DeflateDecoder, write::DeflateEncoder, Compression};
use serde::{Deserialize, Serialize};

use crate::domain::{BudgetState, CategoryName, TargetPercentages};
use crate::errors::BudgetError;

/// Query parameter carrying a share code in generated URLs.
pub const SHARE_QUERY_PARAM: &str = "budget";

/// One item as it crosses the sharing boundary. Ids are never serialized;
/// they are regenerated on import so every import gets a fresh identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializedItem {
    pub label: String,
    pub amount: f64,
}

/// Per-category item lists of a serialized budget. Individual lists default
/// to empty so a partially stripped payload still decodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SerializedItems {
    #[serde(default)]
    pub needs: Vec<SerializedItem>,
    #[serde(default)]
    pub wants: Vec<SerializedItem>,
    #[serde(default)]
    pub savings: Vec<SerializedItem>,
    #[serde(default)]
    pub income: Vec<SerializedItem>,
}

impl SerializedItems {
    pub fn get(&self, name: CategoryName) -> &[SerializedItem] {
        match name {
            CategoryName::Needs => &self.needs,
            CategoryName::Wants => &self.wants,
            CategoryName::Savings => &self.savings,
            CategoryName::Income => &self.income,
        }
    }

    fn get_mut(&mut self, name: CategoryName) -> &mut Vec<SerializedItem> {
        match name {
            CategoryName::Needs => &mut self.needs,
            CategoryName::Wants => &mut self.wants,
            CategoryName::Savings => &mut self.savings,
            CategoryName::Income => &mut self.income,
        }
    }
}

/// The only format crossing the sharing boundary. `targets` is present only
/// when it differs from the 50/30/20 default; omission means "use defaults".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializedBudget {
    pub items: SerializedItems,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<TargetPercentages>,
}

/// Strips ids and drops default targets, producing the wire form of a state.
pub fn serialize(state: &BudgetState) -> SerializedBudget {
    let mut items = SerializedItems::default();
    for name in CategoryName::ALL {
        let list = items.get_mut(name);
        for item in &state.categories.get(name).items {
            list.push(SerializedItem {
                label: item.label.clone(),
                amount: item.amount,
            });
        }
    }
    let targets = if state.target_percentages.is_default() {
        None
    } else {
        Some(state.target_percentages)
    };
    SerializedBudget { items, targets }
}

/// Encodes a state as a compact share code: JSON, DEFLATE-compressed, then
/// URL-safe base64 without padding.
pub fn encode(state: &BudgetState) -> Result<String, BudgetError> {
    let json = serde_json::to_vec(&serialize(state))?;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

/// Decodes a share code back into its serialized form. Returns `None` on any
/// failure (malformed base64, corrupt stream, invalid JSON, missing `items`)
/// so callers can probe arbitrary pasted text without error handling.
pub fn decode(code: &str) -> Option<SerializedBudget> {
    let normalized: String = code
        .trim()
        .chars()
        .filter(|c| *c != '=')
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let compressed = URL_SAFE_NO_PAD.decode(normalized.as_bytes()).ok()?;
    let mut json = Vec::new();
    DeflateDecoder::new(compressed.as_slice())
        .read_to_end(&mut json)
        .ok()?;
    serde_json::from_slice(&json).ok()
}

/// Builds `<base>?budget=<code>` for the given state.
pub fn share_url(base: &str, state: &BudgetState) -> Result<String, BudgetError> {
    let code = encode(state)?;
    Ok(format!("{}?{}={}", base, SHARE_QUERY_PARAM, code))
}

/// Per-category roll-up shown before committing an import.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryPreview {
    pub total: f64,
    pub item_count: usize,
}

/// Summary of a serialized budget, computed without touching live state.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetPreview {
    pub needs: CategoryPreview,
    pub wants: CategoryPreview,
    pub savings: CategoryPreview,
    pub income: CategoryPreview,
    pub has_custom_targets: bool,
}

impl BudgetPreview {
    pub fn get(&self, name: CategoryName) -> CategoryPreview {
        match name {
            CategoryName::Needs => self.needs,
            CategoryName::Wants => self.wants,
            CategoryName::Savings => self.savings,
            CategoryName::Income => self.income,
        }
    }
}

/// Summarizes a decoded budget for an import preview.
pub fn preview(data: &SerializedBudget) -> BudgetPreview {
    let summarize = |name: CategoryName| {
        let items = data.items.get(name);
        CategoryPreview {
            total: items.iter().map(|item| item.amount).sum(),
            item_count: items.len(),
        }
    };
    BudgetPreview {
        needs: summarize(CategoryName::Needs),
        wants: summarize(CategoryName::Wants),
        savings: summarize(CategoryName::Savings),
        income: summarize(CategoryName::Income),
        has_custom_targets: data.targets.is_some(),
    }
}
