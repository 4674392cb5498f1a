//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::SelectedChoice;
use super::tax_type::TaxType;

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    InProgress,
    Ready,
    Paid,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no further transition
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }

    /// Items may only change while the order is in progress
    pub fn allows_item_changes(self) -> bool {
        matches!(self, OrderStatus::InProgress)
    }

    /// Legal lifecycle edges:
    /// in_progress → ready → paid, cancellation from either non-terminal state
    pub fn can_transition(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (InProgress, Ready) | (Ready, Paid) | (InProgress, Cancelled) | (Ready, Cancelled)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Ready => "READY",
            OrderStatus::Paid => "PAID",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method recorded on completion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Till operator role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperatorRole {
    Admin,
    Cashier,
}

/// Operator identity stamped on orders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Operator {
    pub username: String,
    pub role: OperatorRole,
}

/// Order item: a cart line frozen at order build time
///
/// Prices and choices are copies; later catalog edits never touch an
/// existing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Line identity inherited from the cart (hex digest)
    pub line_key: String,
    /// Product reference (String ID)
    pub product_id: String,
    pub name: String,
    /// Frozen effective unit price in currency units
    pub price: f64,
    pub quantity: u32,
    pub choices: Vec<SelectedChoice>,
}

/// Order aggregate
///
/// The total is derived state, recomputed from items on demand; it is
/// deliberately not a stored field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    /// Tax type frozen at build time (absent ⇒ rate 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<TaxType>,
    /// Set exactly once, on completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Operator>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Tax percent rate for decomposition (0 when no tax type is set)
    pub fn tax_rate(&self) -> f64 {
        self.tax_type.as_ref().map(|t| t.rate).unwrap_or(0.0)
    }

    /// Look up an item by its line key
    pub fn item(&self, line_key: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.line_key == line_key)
    }
}
