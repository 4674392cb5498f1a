//! Order lifecycle engine
//!
//! Orders freeze cart lines at build time; the total is derived from items
//! on demand and never stored. Lifecycle edges are validated before any
//! state is touched, so a failed call leaves the order exactly as it was.
//!
//! The manager persists through the storage collaborator and enforces the
//! closed-day guard: once a business date is closed, it accepts no new
//! orders and no completions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{
    Cart, CategoryOption, ChoiceRef, Operator, Order, OrderItem, OrderStatus, PaymentMethod,
    Product, TaxType,
};
use uuid::Uuid;

use crate::cart::line_key;
use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::money::{self, to_decimal, to_f64, MONEY_TOLERANCE};
use crate::pricing;
use crate::store::Store;
use crate::time;

/// Build an order draft from a non-empty cart
///
/// Items are frozen copies of the cart lines; later catalog edits never
/// touch an existing order. The tax type (when given) is frozen whole for
/// the same reason.
pub fn build_order(
    cart: &Cart,
    tax_type: Option<TaxType>,
    created_by: Option<Operator>,
) -> Result<Order> {
    if cart.is_empty() {
        return Err(CoreError::validation(
            "Cannot build an order from an empty cart",
        ));
    }
    if let Some(tax) = &tax_type {
        money::validate_tax_rate(tax.rate)?;
    }
    for line in &cart.lines {
        money::validate_price(line.unit_price, "line unit price")?;
        money::validate_quantity(line.quantity)?;
    }

    Ok(Order {
        id: Uuid::new_v4().to_string(),
        status: OrderStatus::InProgress,
        items: cart
            .lines
            .iter()
            .map(|line| OrderItem {
                line_key: line.line_key.clone(),
                product_id: line.product_id.clone(),
                name: line.product_name.clone(),
                price: line.unit_price,
                quantity: line.quantity,
                choices: line.choices.clone(),
            })
            .collect(),
        tax_type,
        payment_method: None,
        created_by,
        created_at: Utc::now(),
    })
}

/// Derived order total: Σ item price × quantity, in calculation space
pub fn derived_total(order: &Order) -> Decimal {
    order
        .items
        .iter()
        .map(|item| to_decimal(item.price) * Decimal::from(item.quantity))
        .sum()
}

/// Check a caller-claimed total against the derived total
pub fn verify_total(order: &Order, claimed: f64) -> Result<()> {
    money::require_finite(claimed, "claimed total")?;
    let derived = derived_total(order);
    if (to_decimal(claimed) - derived).abs() >= MONEY_TOLERANCE {
        return Err(CoreError::TotalMismatch {
            order_id: order.id.clone(),
            claimed,
            derived: to_f64(derived),
        });
    }
    Ok(())
}

/// Apply a lifecycle transition, rejecting illegal edges
pub fn apply_transition(order: &mut Order, to: OrderStatus) -> Result<()> {
    if !order.status.can_transition(to) {
        return Err(CoreError::InvalidTransition {
            order_id: order.id.clone(),
            from: order.status,
            to,
        });
    }
    order.status = to;
    Ok(())
}

/// Complete an order: ready → paid, recording the payment method
pub fn complete(order: &mut Order, method: PaymentMethod) -> Result<()> {
    apply_transition(order, OrderStatus::Paid)?;
    order.payment_method = Some(method);
    Ok(())
}

fn ensure_items_mutable(order: &Order) -> Result<()> {
    if !order.status.allows_item_changes() {
        return Err(CoreError::OrderLocked {
            order_id: order.id.clone(),
            status: order.status,
        });
    }
    Ok(())
}

/// Add a selection to an in-progress order, merging like the cart does
pub fn add_item(
    order: &mut Order,
    product: &Product,
    category_options: &[CategoryOption],
    selection: &[ChoiceRef],
    quantity: u32,
) -> Result<String> {
    ensure_items_mutable(order)?;
    money::validate_quantity(quantity)?;
    if !product.is_available {
        return Err(CoreError::validation(format!(
            "Product '{}' is not available",
            product.id
        )));
    }

    let (choices, unit) = pricing::price_selection(product, category_options, selection)?;
    let key = line_key(&product.id, &choices);

    match order.items.iter_mut().find(|i| i.line_key == key) {
        Some(existing) => {
            let merged = existing.quantity.saturating_add(quantity);
            money::validate_quantity(merged)?;
            existing.quantity = merged;
            existing.price = to_f64(unit);
        }
        None => order.items.push(OrderItem {
            line_key: key.clone(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: to_f64(unit),
            quantity,
            choices,
        }),
    }
    Ok(key)
}

/// Remove an item from an in-progress order by line key
pub fn remove_item(order: &mut Order, line_key: &str) -> Result<()> {
    ensure_items_mutable(order)?;
    let before = order.items.len();
    order.items.retain(|i| i.line_key != line_key);
    if order.items.len() == before {
        return Err(CoreError::validation(format!(
            "No order item with key '{}'",
            line_key
        )));
    }
    Ok(())
}

/// Storage-backed order operations
pub struct OrderManager {
    store: Arc<dyn Store>,
    config: CoreConfig,
}

impl OrderManager {
    pub fn new(store: Arc<dyn Store>, config: CoreConfig) -> Self {
        Self { store, config }
    }

    /// Build an order from the cart and persist it
    ///
    /// The tax type is resolved from the store and frozen onto the order.
    /// Rejected when the ledger for the order's business date is closed.
    pub fn submit_order(
        &self,
        cart: &Cart,
        tax_type_id: Option<&str>,
        created_by: Option<Operator>,
    ) -> Result<Order> {
        let tax_type = match tax_type_id {
            Some(id) => Some(
                self.store
                    .tax_type(id)?
                    .ok_or_else(|| CoreError::TaxTypeNotFound(id.to_string()))?,
            ),
            None => None,
        };

        let order = build_order(cart, tax_type, created_by)?;
        self.ensure_day_accepts_facts(order.created_at)?;
        self.store.insert_order(&order)?;
        tracing::info!(
            order_id = %order.id,
            items = order.items.len(),
            total = to_f64(derived_total(&order)),
            "Order submitted"
        );
        Ok(order)
    }

    /// in_progress → ready
    pub fn mark_ready(&self, order_id: &str) -> Result<Order> {
        self.transition_order(order_id, OrderStatus::Ready)
    }

    /// Cancel from either non-terminal state
    pub fn cancel_order(&self, order_id: &str) -> Result<Order> {
        self.transition_order(order_id, OrderStatus::Cancelled)
    }

    /// Apply a lifecycle transition and persist the result
    ///
    /// The paid target is refused here; completion needs a payment method
    /// and goes through `complete_order`.
    pub fn transition_order(&self, order_id: &str, to: OrderStatus) -> Result<Order> {
        if to == OrderStatus::Paid {
            return Err(CoreError::validation(
                "The paid target requires a payment method, use complete_order",
            ));
        }
        let mut order = self.fetch(order_id)?;
        apply_transition(&mut order, to)?;
        self.store.update_order(&order)?;
        tracing::info!(order_id = %order.id, status = %order.status, "Order transitioned");
        Ok(order)
    }

    /// ready → paid with the payment method recorded
    ///
    /// The closed-day guard applies: a payment is a new accounting fact for
    /// the order's business date.
    pub fn complete_order(&self, order_id: &str, method: PaymentMethod) -> Result<Order> {
        let mut order = self.fetch(order_id)?;
        self.ensure_day_accepts_facts(order.created_at)?;
        complete(&mut order, method)?;
        self.store.update_order(&order)?;
        tracing::info!(
            order_id = %order.id,
            method = %method,
            total = to_f64(derived_total(&order)),
            "Order completed"
        );
        Ok(order)
    }

    /// Merge a selection into a stored in-progress order
    pub fn add_item(
        &self,
        order_id: &str,
        product: &Product,
        category_options: &[CategoryOption],
        selection: &[ChoiceRef],
        quantity: u32,
    ) -> Result<Order> {
        let mut order = self.fetch(order_id)?;
        add_item(&mut order, product, category_options, selection, quantity)?;
        self.store.update_order(&order)?;
        Ok(order)
    }

    /// Remove an item from a stored in-progress order
    pub fn remove_item(&self, order_id: &str, line_key: &str) -> Result<Order> {
        let mut order = self.fetch(order_id)?;
        remove_item(&mut order, line_key)?;
        self.store.update_order(&order)?;
        Ok(order)
    }

    fn fetch(&self, order_id: &str) -> Result<Order> {
        self.store
            .order(order_id)?
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))
    }

    fn ensure_day_accepts_facts(&self, at: DateTime<Utc>) -> Result<()> {
        let date = time::business_date_of(at, self.config.timezone);
        if let Some(day) = self.store.day(date)? {
            if day.is_closed() {
                tracing::warn!(%date, "Rejected accounting fact for closed day");
                return Err(CoreError::DayAlreadyClosed { date });
            }
        }
        Ok(())
    }
}
