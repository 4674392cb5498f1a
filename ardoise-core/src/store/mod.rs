//! Storage collaborator traits
//!
//! Persistence lives outside the core. The engines consume these narrow
//! traits and treat every failure as fatal for the invoking operation;
//! nothing is retried and no partial state is left behind. `MemoryStore`
//! is the reference implementation shipped with the crate.

use chrono::{DateTime, NaiveDate, Utc};
use shared::models::{DailyReport, DayLedger, Order, TaxType};
use thiserror::Error;

mod memory;

pub use memory::MemoryStore;

/// Storage failure surfaced to the engines
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),
    /// Conditional write lost: duplicate insert, unknown row, closed day
    #[error("Storage conflict: {0}")]
    Conflict(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Order persistence
pub trait OrderStore: Send + Sync {
    /// Insert a new order; conflicts on a duplicate id
    fn insert_order(&self, order: &Order) -> StoreResult<()>;

    /// Replace a stored order; conflicts on an unknown id
    fn update_order(&self, order: &Order) -> StoreResult<()>;

    fn order(&self, order_id: &str) -> StoreResult<Option<Order>>;

    /// Paid orders with `created_at` in `[start, end)`
    fn paid_orders_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Order>>;
}

/// Tax type catalog lookup
pub trait TaxTypeStore: Send + Sync {
    fn tax_type(&self, tax_type_id: &str) -> StoreResult<Option<TaxType>>;

    fn tax_types(&self) -> StoreResult<Vec<TaxType>>;
}

/// Daily ledger persistence
pub trait LedgerStore: Send + Sync {
    fn day(&self, date: NaiveDate) -> StoreResult<Option<DayLedger>>;

    /// Record an opening unless one exists already; returns the surviving
    /// entry, so the first opening timestamp always wins. Never conflicts:
    /// a closed day simply returns its closed entry unchanged
    fn record_opening(&self, date: NaiveDate, opened_at: DateTime<Utc>) -> StoreResult<DayLedger>;

    /// Write the frozen snapshot and the closing timestamp as one unit;
    /// conflicts when the date is already closed (or never opened)
    fn record_closing(
        &self,
        date: NaiveDate,
        closed_at: DateTime<Utc>,
        snapshot: DailyReport,
    ) -> StoreResult<DayLedger>;
}

/// Full collaborator surface the engines consume
pub trait Store: OrderStore + TaxTypeStore + LedgerStore {}

impl<T: OrderStore + TaxTypeStore + LedgerStore> Store for T {}
