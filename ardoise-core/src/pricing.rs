//! Line pricing
//!
//! Effective unit price = product base price + selected choice deltas.
//! Callers reference catalog choices by name; the price deltas are resolved
//! from the catalog here and never taken from caller input.

use rust_decimal::Decimal;
use shared::models::{CategoryOption, ChoiceOrigin, ChoiceRef, Product, SelectedChoice};

use crate::error::{CoreError, Result};
use crate::money::{self, to_decimal};

/// Resolve a caller selection against the catalog, attaching price deltas
///
/// Fails with `InvalidSelection` when a group or choice name does not
/// exist for this product (or its category options).
pub fn resolve_selection(
    product: &Product,
    category_options: &[CategoryOption],
    selection: &[ChoiceRef],
) -> Result<Vec<SelectedChoice>> {
    let mut resolved = Vec::with_capacity(selection.len());
    for choice in selection {
        let price = match choice.origin {
            ChoiceOrigin::Product => {
                let group = product.option_group(&choice.group).ok_or_else(|| {
                    CoreError::invalid_selection(
                        &product.id,
                        format!("unknown option group '{}'", choice.group),
                    )
                })?;
                group
                    .choice(&choice.name)
                    .ok_or_else(|| {
                        CoreError::invalid_selection(
                            &product.id,
                            format!("unknown choice '{}' in group '{}'", choice.name, choice.group),
                        )
                    })?
                    .price
            }
            ChoiceOrigin::Category => {
                category_options
                    .iter()
                    .find(|o| o.name == choice.name)
                    .ok_or_else(|| {
                        CoreError::invalid_selection(
                            &product.id,
                            format!("unknown category option '{}'", choice.name),
                        )
                    })?
                    .price_change
            }
        };
        // Catalog data sanity: deltas are finite and never negative
        money::validate_price(price, "choice price delta")?;
        resolved.push(SelectedChoice {
            group: choice.group.clone(),
            name: choice.name.clone(),
            price,
            origin: choice.origin,
        });
    }
    Ok(resolved)
}

/// Effective tax-inclusive unit price: base price + Σ choice deltas
///
/// A plain sum, so any permutation of the same selection prices the same.
pub fn unit_price(base_price: f64, choices: &[SelectedChoice]) -> Decimal {
    let deltas: Decimal = choices.iter().map(|c| to_decimal(c.price)).sum();
    to_decimal(base_price) + deltas
}

/// Line total: unit price × quantity
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Validate the selection and price it in one step
///
/// Returns the frozen choices together with the effective unit price.
pub fn price_selection(
    product: &Product,
    category_options: &[CategoryOption],
    selection: &[ChoiceRef],
) -> Result<(Vec<SelectedChoice>, Decimal)> {
    money::validate_price(product.price, "product price")?;
    let choices = resolve_selection(product, category_options, selection)?;
    let unit = unit_price(product.price, &choices);
    Ok((choices, unit))
}
