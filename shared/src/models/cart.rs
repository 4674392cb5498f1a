//! Cart Model
//!
//! A cart is an explicit value owned by the calling session. The engines
//! never keep cart state of their own; every mutation takes `&mut Cart`.

use serde::{Deserialize, Serialize};

/// Where a selected choice is defined
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChoiceOrigin {
    /// One of the product's own option groups
    Product,
    /// A category-wide option
    Category,
}

/// Caller-side reference to a catalog choice
///
/// Carries names only; the price delta is resolved from the catalog when
/// the line is built, never taken from the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceRef {
    /// Option group name; category options repeat the option name here
    pub group: String,
    pub name: String,
    pub origin: ChoiceOrigin,
}

/// A choice frozen into a cart line, catalog price attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedChoice {
    pub group: String,
    pub name: String,
    /// Price delta in currency units, resolved from the catalog
    pub price: f64,
    pub origin: ChoiceOrigin,
}

/// One cart line: a product plus a frozen selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Deterministic identity of (product, selection), hex digest
    pub line_key: String,
    /// Product reference (String ID)
    pub product_id: String,
    pub product_name: String,
    /// Effective tax-inclusive unit price (base + choice deltas)
    pub unit_price: f64,
    pub quantity: u32,
    pub choices: Vec<SelectedChoice>,
}

/// Session-owned cart value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by its key
    pub fn line(&self, line_key: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.line_key == line_key)
    }

    /// Total number of units across all lines
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
