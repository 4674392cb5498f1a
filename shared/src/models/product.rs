//! Product Model

use serde::{Deserialize, Serialize};

/// Selectable choice inside a product option group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChoice {
    pub name: String,
    /// Price delta in currency units (never negative)
    pub price: f64,
}

/// Named option group attached to a product ("Size", "Milk", ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionGroup {
    pub name: String,
    pub choices: Vec<OptionChoice>,
}

/// Product entity (catalog read model)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Category reference (String ID)
    pub category: String,
    /// Tax-inclusive base price in currency units
    pub price: f64,
    pub is_available: bool,
    #[serde(default)]
    pub option_groups: Vec<OptionGroup>,
}

impl Product {
    /// Look up an option group by name
    pub fn option_group(&self, name: &str) -> Option<&OptionGroup> {
        self.option_groups.iter().find(|g| g.name == name)
    }
}

impl OptionGroup {
    /// Look up a choice by name
    pub fn choice(&self, name: &str) -> Option<&OptionChoice> {
        self.choices.iter().find(|c| c.name == name)
    }
}
