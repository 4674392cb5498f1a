//! Daily Ledger Model (日结)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::daily_report::DailyReport;

/// Ledger lifecycle state for one calendar date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayState {
    Unopened,
    Opened,
    Closed,
}

/// Per-date ledger entry
///
/// At most one opening and one closing event exist per date. The frozen
/// snapshot is written together with `closed_at` and never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayLedger {
    pub date: NaiveDate,
    pub opened_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Detailed report payload frozen at close
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<DailyReport>,
}

impl DayLedger {
    pub fn is_opened(&self) -> bool {
        self.opened_at.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }

    pub fn state(&self) -> DayState {
        if self.is_closed() {
            DayState::Closed
        } else if self.is_opened() {
            DayState::Opened
        } else {
            DayState::Unopened
        }
    }
}
