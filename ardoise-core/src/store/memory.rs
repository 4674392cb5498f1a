//! In-memory reference store
//!
//! Backs the test suite and serves as the contract model for real
//! implementations. `record_closing` performs its conditional check and
//! both writes under one lock acquisition, the same all-or-nothing shape
//! a transactional backend must provide.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use shared::models::{DailyReport, DayLedger, Order, OrderStatus, TaxType};

use super::{LedgerStore, OrderStore, StoreError, StoreResult, TaxTypeStore};

#[derive(Default)]
pub struct MemoryStore {
    orders: RwLock<HashMap<String, Order>>,
    tax_types: RwLock<HashMap<String, TaxType>>,
    days: RwLock<HashMap<NaiveDate, DayLedger>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tax type (bootstrap and test helper)
    pub fn put_tax_type(&self, tax_type: TaxType) {
        self.tax_types
            .write()
            .insert(tax_type.id.clone(), tax_type);
    }
}

impl OrderStore for MemoryStore {
    fn insert_order(&self, order: &Order) -> StoreResult<()> {
        let mut orders = self.orders.write();
        if orders.contains_key(&order.id) {
            return Err(StoreError::Conflict(format!(
                "order '{}' already exists",
                order.id
            )));
        }
        orders.insert(order.id.clone(), order.clone());
        Ok(())
    }

    fn update_order(&self, order: &Order) -> StoreResult<()> {
        let mut orders = self.orders.write();
        match orders.get_mut(&order.id) {
            Some(stored) => {
                *stored = order.clone();
                Ok(())
            }
            None => Err(StoreError::Conflict(format!(
                "order '{}' does not exist",
                order.id
            ))),
        }
    }

    fn order(&self, order_id: &str) -> StoreResult<Option<Order>> {
        Ok(self.orders.read().get(order_id).cloned())
    }

    fn paid_orders_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Order>> {
        Ok(self
            .orders
            .read()
            .values()
            .filter(|o| o.status == OrderStatus::Paid)
            .filter(|o| o.created_at >= start && o.created_at < end)
            .cloned()
            .collect())
    }
}

impl TaxTypeStore for MemoryStore {
    fn tax_type(&self, tax_type_id: &str) -> StoreResult<Option<TaxType>> {
        Ok(self.tax_types.read().get(tax_type_id).cloned())
    }

    fn tax_types(&self) -> StoreResult<Vec<TaxType>> {
        let mut all: Vec<TaxType> = self.tax_types.read().values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }
}

impl LedgerStore for MemoryStore {
    fn day(&self, date: NaiveDate) -> StoreResult<Option<DayLedger>> {
        Ok(self.days.read().get(&date).cloned())
    }

    fn record_opening(&self, date: NaiveDate, opened_at: DateTime<Utc>) -> StoreResult<DayLedger> {
        let mut days = self.days.write();
        let entry = days.entry(date).or_insert_with(|| DayLedger {
            date,
            opened_at: None,
            closed_at: None,
            snapshot: None,
        });
        entry.opened_at.get_or_insert(opened_at);
        Ok(entry.clone())
    }

    fn record_closing(
        &self,
        date: NaiveDate,
        closed_at: DateTime<Utc>,
        snapshot: DailyReport,
    ) -> StoreResult<DayLedger> {
        let mut days = self.days.write();
        let entry = days
            .get_mut(&date)
            .filter(|e| e.is_opened())
            .ok_or_else(|| StoreError::Conflict(format!("day {} not opened", date)))?;
        if entry.is_closed() {
            return Err(StoreError::Conflict(format!("day {} already closed", date)));
        }
        entry.closed_at = Some(closed_at);
        entry.snapshot = Some(snapshot);
        Ok(entry.clone())
    }
}
