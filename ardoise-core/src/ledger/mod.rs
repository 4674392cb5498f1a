//! Daily ledger lifecycle
//!
//! One entry per calendar date: unopened → opened → closed. Opening is
//! idempotent and keeps the first timestamp; closing happens exactly once,
//! under per-date mutual exclusion, and freezes the detailed report as the
//! day's snapshot. After a failed close the day stays opened.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use parking_lot::Mutex;
use shared::models::{DayLedger, DayState, Order, ReportSource};

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::store::{Store, StoreError};
use crate::time;

pub(crate) mod aggregate;

/// Daily ledger operations
pub struct LedgerManager {
    store: Arc<dyn Store>,
    config: CoreConfig,
    /// Close serialization, one lock per date
    close_locks: Mutex<HashMap<NaiveDate, Arc<Mutex<()>>>>,
}

impl LedgerManager {
    pub fn new(store: Arc<dyn Store>, config: CoreConfig) -> Self {
        Self {
            store,
            config,
            close_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Record the opening for a date
    ///
    /// Idempotent: an already opened or already closed day returns its
    /// existing entry with the original timestamps, so retries and races
    /// are never hard failures. Only future dates are rejected.
    pub fn open_day(&self, date: NaiveDate) -> Result<DayLedger> {
        time::validate_not_future(date, self.config.timezone)?;

        if let Some(existing) = self.store.day(date)? {
            match existing.state() {
                DayState::Opened | DayState::Closed => {
                    tracing::debug!(%date, state = ?existing.state(), "Day already recorded, returning existing entry");
                    return Ok(existing);
                }
                DayState::Unopened => {}
            }
        }

        let entry = self.store.record_opening(date, Utc::now())?;
        tracing::info!(%date, "Day opened");
        Ok(entry)
    }

    /// Close a date exactly once
    ///
    /// Aggregates the day's paid orders, freezes the detailed report as
    /// the snapshot, and flips the state. The snapshot write and the state
    /// flip are one conditional store write executed under the per-date
    /// lock; when that write fails the day remains opened.
    pub fn close_day(&self, date: NaiveDate) -> Result<DayLedger> {
        time::validate_not_future(date, self.config.timezone)?;
        let lock = self.close_lock(date);
        let _guard = lock.lock();

        let day = self
            .store
            .day(date)?
            .ok_or(CoreError::DayNotOpened { date })?;
        match day.state() {
            DayState::Unopened => return Err(CoreError::DayNotOpened { date }),
            DayState::Closed => return Err(CoreError::DayAlreadyClosed { date }),
            DayState::Opened => {}
        }

        let closed_at = Utc::now();
        let orders = paid_orders_for_date(self.store.as_ref(), date, self.config.timezone)?;
        let snapshot = aggregate::build_report(
            date,
            &orders,
            aggregate::ReportMeta {
                is_started: true,
                is_closed: true,
                opening_time: day.opened_at,
                closing_time: Some(closed_at),
                source: ReportSource::Snapshot,
            },
        );
        let tickets = snapshot.totals.ticket_count;
        let total = snapshot.totals.total_ttc;

        let entry = self
            .store
            .record_closing(date, closed_at, snapshot)
            .map_err(|e| match e {
                StoreError::Conflict(_) => CoreError::DayAlreadyClosed { date },
                other => CoreError::Store(other),
            })?;
        tracing::info!(%date, tickets, total, "Day closed");
        Ok(entry)
    }

    /// Ledger entry for a date, if one exists
    pub fn day(&self, date: NaiveDate) -> Result<Option<DayLedger>> {
        Ok(self.store.day(date)?)
    }

    fn close_lock(&self, date: NaiveDate) -> Arc<Mutex<()>> {
        self.close_locks.lock().entry(date).or_default().clone()
    }
}

/// Paid orders whose creation timestamp falls on `date` in the business
/// time zone (half-open day window)
pub(crate) fn paid_orders_for_date(
    store: &dyn Store,
    date: NaiveDate,
    tz: Tz,
) -> Result<Vec<Order>> {
    let (start, end) = time::day_window_utc(date, tz);
    Ok(store.paid_orders_between(start, end)?)
}
