use chrono::NaiveDate;
use shared::models::OrderStatus;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid selection for product '{product_id}': {reason}")]
    InvalidSelection { product_id: String, reason: String },

    #[error("Invalid transition from {from} to {to} for order '{order_id}'")]
    InvalidTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Order '{order_id}' is {status}, items can no longer change")]
    OrderLocked {
        order_id: String,
        status: OrderStatus,
    },

    #[error("Total mismatch for order '{order_id}': claimed {claimed:.2}, derived {derived:.2}")]
    TotalMismatch {
        order_id: String,
        claimed: f64,
        derived: f64,
    },

    #[error("Day {date} is not opened")]
    DayNotOpened { date: NaiveDate },

    #[error("Day {date} is already closed")]
    DayAlreadyClosed { date: NaiveDate },

    #[error("Unknown report mode '{0}', expected 'simple' or 'detailed'")]
    UnknownMode(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Order '{0}' not found")]
    OrderNotFound(String),

    #[error("Tax type '{0}' not found")]
    TaxTypeNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    pub fn invalid_selection(product_id: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidSelection {
            product_id: product_id.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
