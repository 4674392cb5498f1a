//! Reporting facade
//!
//! Shapes the ledger's report data for consumers: `simple` carries the
//! metadata and global totals, `detailed` adds the tax and payment
//! breakdowns plus the ticket list. A closed day serves its frozen
//! snapshot verbatim; any other day is recomputed live from the current
//! paid orders. No computation happens here beyond picking the source
//! and dropping sections.

use std::sync::Arc;

use chrono::NaiveDate;
use shared::models::{DailyReport, ReportMode, ReportSource};

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::ledger::{self, aggregate};
use crate::store::Store;
use crate::time;

/// Parse a report mode string; absent means detailed
pub fn parse_mode(mode: Option<&str>) -> Result<ReportMode> {
    match mode {
        None => Ok(ReportMode::Detailed),
        Some("simple") => Ok(ReportMode::Simple),
        Some("detailed") => Ok(ReportMode::Detailed),
        Some(other) => Err(CoreError::UnknownMode(other.to_string())),
    }
}

/// Read-side report access
pub struct ReportService {
    store: Arc<dyn Store>,
    config: CoreConfig,
}

impl ReportService {
    pub fn new(store: Arc<dyn Store>, config: CoreConfig) -> Self {
        Self { store, config }
    }

    /// Report for a date, shaped by mode
    ///
    /// `date` defaults to today in the business time zone; future dates
    /// are rejected. Closed days return the frozen snapshot, everything
    /// else is computed live; an unopened day with paid orders still
    /// reports them (opening is an operational marker, not a gate).
    pub fn daily_report(&self, date: Option<NaiveDate>, mode: ReportMode) -> Result<DailyReport> {
        let date = date.unwrap_or_else(|| time::today_in(self.config.timezone));
        time::validate_not_future(date, self.config.timezone)?;

        let day = self.store.day(date)?;

        if let Some(entry) = day.as_ref().filter(|d| d.is_closed()) {
            // Frozen at close as a detailed payload, only shaped here
            let snapshot = entry
                .snapshot
                .clone()
                .ok_or_else(|| CoreError::validation(format!("Day {} closed without snapshot", date)))?;
            tracing::debug!(%date, mode = mode.as_str(), "Serving snapshot report");
            return Ok(shape(snapshot, mode));
        }

        let orders = ledger::paid_orders_for_date(self.store.as_ref(), date, self.config.timezone)?;
        let live = aggregate::build_report(
            date,
            &orders,
            aggregate::ReportMeta {
                is_started: day.as_ref().is_some_and(|d| d.is_opened()),
                is_closed: false,
                opening_time: day.as_ref().and_then(|d| d.opened_at),
                closing_time: None,
                source: ReportSource::Live,
            },
        );
        tracing::debug!(
            %date,
            mode = mode.as_str(),
            tickets = live.totals.ticket_count,
            "Serving live report"
        );
        Ok(shape(live, mode))
    }

    /// `daily_report` with raw string inputs from a transport boundary
    pub fn daily_report_raw(&self, date: Option<&str>, mode: Option<&str>) -> Result<DailyReport> {
        let mode = parse_mode(mode)?;
        let date = date.map(time::parse_date).transpose()?;
        self.daily_report(date, mode)
    }
}

fn shape(report: DailyReport, mode: ReportMode) -> DailyReport {
    match mode {
        ReportMode::Simple => report.into_simple(),
        ReportMode::Detailed => report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;
    use shared::models::{
        Order, OrderItem, OrderStatus, PaymentMethod, TaxType,
    };
    use crate::ledger::LedgerManager;
    use crate::store::{MemoryStore, OrderStore};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn paid_order(id: &str, total: f64, method: PaymentMethod) -> Order {
        Order {
            id: id.to_string(),
            status: OrderStatus::Paid,
            items: vec![OrderItem {
                line_key: format!("k-{id}"),
                product_id: "p".into(),
                name: "Item".into(),
                price: total,
                quantity: 1,
                choices: vec![],
            }],
            tax_type: Some(TaxType {
                id: "t10".into(),
                label: "TVA 10%".into(),
                rate: 10.0,
            }),
            payment_method: Some(method),
            created_by: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    fn setup() -> (Arc<MemoryStore>, ReportService, LedgerManager) {
        let store = Arc::new(MemoryStore::new());
        let config = CoreConfig::with_timezone(Tz::UTC);
        let service = ReportService::new(store.clone(), config.clone());
        let ledger = LedgerManager::new(store.clone(), config);
        (store, service, ledger)
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode(None).unwrap(), ReportMode::Detailed);
        assert_eq!(parse_mode(Some("simple")).unwrap(), ReportMode::Simple);
        assert_eq!(parse_mode(Some("detailed")).unwrap(), ReportMode::Detailed);
        assert!(matches!(
            parse_mode(Some("full")),
            Err(CoreError::UnknownMode(m)) if m == "full"
        ));
        assert!(parse_mode(Some("Simple")).is_err());
        assert!(parse_mode(Some("")).is_err());
    }

    #[test]
    fn test_unopened_day_with_paid_orders_reports_live() {
        let (store, service, _) = setup();
        store
            .insert_order(&paid_order("a", 110.0, PaymentMethod::Cash))
            .unwrap();

        let report = service
            .daily_report(Some(date()), ReportMode::Detailed)
            .unwrap();
        assert_eq!(report.source, ReportSource::Live);
        assert!(!report.is_started);
        assert!(!report.is_closed);
        assert!(report.opening_time.is_none());
        assert_eq!(report.totals.ticket_count, 1);
        assert_eq!(report.totals.total_ttc, 110.00);
    }

    #[test]
    fn test_opened_day_reports_live_with_opening_time() {
        let (_, service, ledger) = setup();
        let opened = ledger.open_day(date()).unwrap();

        let report = service
            .daily_report(Some(date()), ReportMode::Detailed)
            .unwrap();
        assert!(report.is_started);
        assert!(!report.is_closed);
        assert_eq!(report.opening_time, opened.opened_at);
        assert!(report.closing_time.is_none());
        assert_eq!(report.source, ReportSource::Live);
    }

    #[test]
    fn test_simple_mode_drops_breakdown_sections() {
        let (store, service, _) = setup();
        store
            .insert_order(&paid_order("a", 110.0, PaymentMethod::Cash))
            .unwrap();

        let report = service
            .daily_report(Some(date()), ReportMode::Simple)
            .unwrap();
        assert_eq!(report.report_mode, ReportMode::Simple);
        assert!(report.by_tax_type.is_none());
        assert!(report.payment_methods.is_none());
        assert!(report.tickets.is_none());
        assert_eq!(report.totals.ticket_count, 1);
    }

    #[test]
    fn test_closed_day_serves_the_snapshot_even_after_order_edits() {
        let (store, service, ledger) = setup();
        store
            .insert_order(&paid_order("a", 110.0, PaymentMethod::Cash))
            .unwrap();
        ledger.open_day(date()).unwrap();
        ledger.close_day(date()).unwrap();

        let before = service
            .daily_report(Some(date()), ReportMode::Detailed)
            .unwrap();
        assert_eq!(before.source, ReportSource::Snapshot);
        assert!(before.is_closed);
        assert!(before.closing_time.is_some());

        // Mutate the stored paid order behind the ledger's back
        let mut altered = paid_order("a", 110.0, PaymentMethod::Cash);
        altered.items[0].price = 999.0;
        store.update_order(&altered).unwrap();
        store
            .insert_order(&paid_order("b", 50.0, PaymentMethod::Card))
            .unwrap();

        let after = service
            .daily_report(Some(date()), ReportMode::Detailed)
            .unwrap();
        assert_eq!(after, before);
        assert_eq!(after.totals.total_ttc, 110.00);
    }

    #[test]
    fn test_raw_boundary_parsing() {
        let (_, service, _) = setup();
        assert!(service.daily_report_raw(Some("2024-01-01"), Some("simple")).is_ok());
        assert!(matches!(
            service.daily_report_raw(Some("2024-01-01"), Some("verbose")),
            Err(CoreError::UnknownMode(_))
        ));
        assert!(matches!(
            service.daily_report_raw(Some("01-01-2024"), None),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_future_date_rejected() {
        let (_, service, _) = setup();
        let tomorrow = time::today_in(Tz::UTC).succ_opt().unwrap();
        assert!(matches!(
            service.daily_report(Some(tomorrow), ReportMode::Detailed),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_date_defaults_to_today() {
        let (_, service, _) = setup();
        let report = service.daily_report(None, ReportMode::Simple).unwrap();
        assert_eq!(report.report_date, time::today_in(Tz::UTC));
        assert_eq!(report.totals.ticket_count, 0);
    }
}
