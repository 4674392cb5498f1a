//! Category Model

use serde::{Deserialize, Serialize};

/// Category-wide option applying to every product in the category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryOption {
    pub name: String,
    /// Price delta applied on top of the product base price (never negative)
    pub price_change: f64,
}

/// Category entity (catalog read model)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub options: Vec<CategoryOption>,
}

impl Category {
    /// Look up a category option by name
    pub fn option(&self, name: &str) -> Option<&CategoryOption> {
        self.options.iter().find(|o| o.name == name)
    }
}
