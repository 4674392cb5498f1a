//! Tax Type Model

use serde::{Deserialize, Serialize};

/// Tax type entity ("TVA 10%", "TVA 21%", ...)
///
/// Rates are tax-inclusive percentages; the net/VAT split of an order is
/// derived from its gross total by reverse decomposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxType {
    pub id: String,
    /// Display label, unique per till
    pub label: String,
    /// Percent rate (e.g. 21.0 = 21%, 5.5 = 5.5%)
    pub rate: f64,
}
