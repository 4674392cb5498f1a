//! Daily aggregation
//!
//! Pure fold from a day's paid orders to the report payload. Orders are
//! canonically sorted by (created_at, order id) before folding, so the
//! result is identical for any permutation of the same order set; buckets
//! keep the first-occurrence order of the canonical sequence. All sums are
//! accumulated unrounded and rounded once into the payload.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::models::{
    DailyReport, Order, OrderStatus, PaymentMethod, PaymentMethodBreakdown, ReportMode,
    ReportSource, ReportTotals, TaxTypeBreakdown, TicketLine,
};

use crate::money::{decompose_tax_inclusive, to_decimal, to_f64};
use crate::orders::derived_total;

/// Label used for the synthetic bucket of orders without a tax type
const NO_TAX_LABEL: &str = "No tax";

/// Report metadata resolved by the caller (ledger state and sourcing)
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReportMeta {
    pub is_started: bool,
    pub is_closed: bool,
    pub opening_time: Option<DateTime<Utc>>,
    pub closing_time: Option<DateTime<Utc>>,
    pub source: ReportSource,
}

struct TaxBucket {
    tax_type_id: Option<String>,
    label: String,
    rate: f64,
    count: i64,
    net: Decimal,
    tax: Decimal,
    gross: Decimal,
}

struct MethodBucket {
    method: PaymentMethod,
    count: i64,
    gross: Decimal,
}

/// Fold a day's paid orders into the detailed report payload
pub(crate) fn build_report(date: NaiveDate, orders: &[Order], meta: ReportMeta) -> DailyReport {
    let mut ordered: Vec<&Order> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Paid)
        .collect();
    ordered.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut total_net = Decimal::ZERO;
    let mut total_tax = Decimal::ZERO;
    let mut total_gross = Decimal::ZERO;
    let mut tax_buckets: Vec<TaxBucket> = Vec::new();
    let mut method_buckets: Vec<MethodBucket> = Vec::new();
    let mut tickets = Vec::with_capacity(ordered.len());

    for &order in &ordered {
        let gross = derived_total(order);
        let rate = order.tax_rate();
        let parts = decompose_tax_inclusive(gross, to_decimal(rate));

        total_net += parts.net;
        total_tax += parts.tax;
        total_gross += gross;

        let key = order.tax_type.as_ref().map(|t| t.id.as_str());
        match tax_buckets
            .iter_mut()
            .find(|b| b.tax_type_id.as_deref() == key)
        {
            Some(bucket) => {
                bucket.count += 1;
                bucket.net += parts.net;
                bucket.tax += parts.tax;
                bucket.gross += gross;
            }
            None => tax_buckets.push(TaxBucket {
                tax_type_id: key.map(str::to_string),
                label: order
                    .tax_type
                    .as_ref()
                    .map(|t| t.label.clone())
                    .unwrap_or_else(|| NO_TAX_LABEL.to_string()),
                rate,
                count: 1,
                net: parts.net,
                tax: parts.tax,
                gross,
            }),
        }

        match order.payment_method {
            Some(method) => match method_buckets.iter_mut().find(|b| b.method == method) {
                Some(bucket) => {
                    bucket.count += 1;
                    bucket.gross += gross;
                }
                None => method_buckets.push(MethodBucket {
                    method,
                    count: 1,
                    gross,
                }),
            },
            // Paid orders always carry a method through the engine; a bare
            // one is a data fault, keep it out of the method buckets only
            None => {
                tracing::warn!(order_id = %order.id, "Paid order without payment method")
            }
        }

        tickets.push(TicketLine {
            order_id: order.id.clone(),
            created_at: order.created_at,
            created_by_username: order.created_by.as_ref().map(|o| o.username.clone()),
            created_by_role: order.created_by.as_ref().map(|o| o.role),
            ht: to_f64(parts.net),
            vat: to_f64(parts.tax),
            ttc: to_f64(gross),
        });
    }

    let ticket_count = ordered.len() as i64;
    let average = if ticket_count > 0 {
        total_gross / Decimal::from(ticket_count)
    } else {
        Decimal::ZERO
    };

    DailyReport {
        report_date: date,
        report_mode: ReportMode::Detailed,
        is_started: meta.is_started,
        is_closed: meta.is_closed,
        opening_time: meta.opening_time,
        closing_time: meta.closing_time,
        source: meta.source,
        totals: ReportTotals {
            ticket_count,
            total_ht: to_f64(total_net),
            total_vat: to_f64(total_tax),
            total_ttc: to_f64(total_gross),
            average_ticket: to_f64(average),
        },
        by_tax_type: Some(
            tax_buckets
                .into_iter()
                .map(|b| TaxTypeBreakdown {
                    tax_type_id: b.tax_type_id,
                    tax_type: b.label,
                    tax_rate: b.rate,
                    ticket_count: b.count,
                    total_ht: to_f64(b.net),
                    total_vat: to_f64(b.tax),
                    total_ttc: to_f64(b.gross),
                })
                .collect(),
        ),
        payment_methods: Some(
            method_buckets
                .into_iter()
                .map(|b| PaymentMethodBreakdown {
                    method: b.method,
                    ticket_count: b.count,
                    total_amount: to_f64(b.gross),
                })
                .collect(),
        ),
        tickets: Some(tickets),
    }
}
