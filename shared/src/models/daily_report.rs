//! Daily Report Model (日结报告)
//!
//! Serialized field names are the wire contract consumed by embedding
//! frontends; renaming a field here is a breaking change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::order::{OperatorRole, PaymentMethod};

/// Report shaping mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Metadata and global totals only
    Simple,
    /// Full breakdowns and ticket list
    #[default]
    Detailed,
}

impl ReportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportMode::Simple => "simple",
            ReportMode::Detailed => "detailed",
        }
    }
}

/// Where the report data came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportSource {
    /// Recomputed from current paid orders
    Live,
    /// Frozen payload stored at day close
    Snapshot,
}

/// Global totals block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportTotals {
    pub ticket_count: i64,
    /// Net amount (before tax)
    pub total_ht: f64,
    /// Tax amount
    pub total_vat: f64,
    /// Gross amount (after tax)
    pub total_ttc: f64,
    /// Gross divided by ticket count (0 for an empty day)
    pub average_ticket: f64,
}

/// Per-tax-type bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxTypeBreakdown {
    /// None for the synthetic bucket of orders without a tax type
    pub tax_type_id: Option<String>,
    /// Display label ("TVA 21%", "No tax")
    pub tax_type: String,
    /// Percent rate
    pub tax_rate: f64,
    pub ticket_count: i64,
    pub total_ht: f64,
    pub total_vat: f64,
    pub total_ttc: f64,
}

/// Per-payment-method bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethodBreakdown {
    pub method: PaymentMethod,
    pub ticket_count: i64,
    /// Gross amount taken through this method
    pub total_amount: f64,
}

/// One ticket line per paid order (detailed mode only)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketLine {
    pub order_id: String,
    pub created_at: DateTime<Utc>,
    pub created_by_username: Option<String>,
    pub created_by_role: Option<OperatorRole>,
    /// Net amount
    pub ht: f64,
    /// Tax amount
    pub vat: f64,
    /// Gross amount
    pub ttc: f64,
}

/// Daily report payload
///
/// The detailed form carries every section; simple mode omits the
/// breakdown sections from the serialized output entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyReport {
    pub report_date: NaiveDate,
    pub report_mode: ReportMode,
    /// Whether an opening was recorded for the date
    pub is_started: bool,
    pub is_closed: bool,
    pub opening_time: Option<DateTime<Utc>>,
    pub closing_time: Option<DateTime<Utc>>,
    pub source: ReportSource,
    pub totals: ReportTotals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_tax_type: Option<Vec<TaxTypeBreakdown>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Vec<PaymentMethodBreakdown>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickets: Option<Vec<TicketLine>>,
}

impl DailyReport {
    /// Drop the sections simple mode does not carry
    pub fn into_simple(mut self) -> Self {
        self.report_mode = ReportMode::Simple;
        self.by_tax_type = None;
        self.payment_methods = None;
        self.tickets = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(mode: ReportMode) -> DailyReport {
        DailyReport {
            report_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            report_mode: mode,
            is_started: true,
            is_closed: false,
            opening_time: None,
            closing_time: None,
            source: ReportSource::Live,
            totals: ReportTotals::default(),
            by_tax_type: Some(vec![]),
            payment_methods: Some(vec![]),
            tickets: Some(vec![]),
        }
    }

    #[test]
    fn detailed_report_serializes_every_section() {
        let value = serde_json::to_value(report(ReportMode::Detailed)).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "report_date",
            "report_mode",
            "is_started",
            "is_closed",
            "opening_time",
            "closing_time",
            "source",
            "totals",
            "by_tax_type",
            "payment_methods",
            "tickets",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["report_mode"], "detailed");
        assert_eq!(obj["source"], "live");
    }

    #[test]
    fn simple_report_omits_breakdown_sections() {
        let value = serde_json::to_value(report(ReportMode::Detailed).into_simple()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["report_mode"], "simple");
        assert!(!obj.contains_key("by_tax_type"));
        assert!(!obj.contains_key("payment_methods"));
        assert!(!obj.contains_key("tickets"));
        assert!(obj.contains_key("totals"));
    }

    #[test]
    fn totals_field_names_follow_the_wire_contract() {
        let value = serde_json::to_value(ReportTotals::default()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "ticket_count",
            "total_ht",
            "total_vat",
            "total_ttc",
            "average_ticket",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }
}
