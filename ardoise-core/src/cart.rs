//! Cart operations
//!
//! Line identity is content-addressed: SHA-256 over the product id and the
//! sorted selected choices. Adding the same (product, selection) pair again
//! merges into the existing line; any difference in the selection starts a
//! new line. The effective unit price is recomputed from the catalog on
//! every merge.

use sha2::{Digest, Sha256};
use shared::models::{Cart, CartLine, CategoryOption, ChoiceRef, Product, SelectedChoice};

use crate::error::{CoreError, Result};
use crate::money::{self, to_f64};
use crate::pricing;

/// Deterministic line identity for a (product, selection) pair
///
/// Choices are keyed by group-qualified name and sorted before hashing, so
/// selection order never changes the key while same-named choices from
/// different groups stay distinct.
pub fn line_key(product_id: &str, choices: &[SelectedChoice]) -> String {
    let mut names: Vec<String> = choices
        .iter()
        .map(|c| format!("{}\u{1}{}", c.group, c.name))
        .collect();
    names.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(product_id.as_bytes());
    for name in &names {
        hasher.update(b"|");
        hasher.update(name.as_bytes());
    }
    let result = hasher.finalize();
    hex::encode(&result[..16])
}

/// Add a selection to the cart, merging into an existing identical line
///
/// Validates quantity, product availability, and the selection itself;
/// returns the key of the affected line. A merged line keeps one freshly
/// computed unit price for all of its units.
pub fn merge_line(
    cart: &mut Cart,
    product: &Product,
    category_options: &[CategoryOption],
    selection: &[ChoiceRef],
    quantity: u32,
) -> Result<String> {
    money::validate_quantity(quantity)?;
    if !product.is_available {
        return Err(CoreError::validation(format!(
            "Product '{}' is not available",
            product.id
        )));
    }

    let (choices, unit) = pricing::price_selection(product, category_options, selection)?;
    let key = line_key(&product.id, &choices);

    match cart.lines.iter_mut().find(|l| l.line_key == key) {
        Some(existing) => {
            let merged = existing.quantity.saturating_add(quantity);
            money::validate_quantity(merged)?;
            existing.quantity = merged;
            existing.unit_price = to_f64(unit);
        }
        None => cart.lines.push(CartLine {
            line_key: key.clone(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            unit_price: to_f64(unit),
            quantity,
            choices,
        }),
    }
    Ok(key)
}

/// Remove a line by key
pub fn remove_line(cart: &mut Cart, line_key: &str) -> Result<()> {
    let before = cart.lines.len();
    cart.lines.retain(|l| l.line_key != line_key);
    if cart.lines.len() == before {
        return Err(CoreError::validation(format!(
            "No cart line with key '{}'",
            line_key
        )));
    }
    Ok(())
}

/// Set the quantity of an existing line (use `remove_line` to drop it)
pub fn set_quantity(cart: &mut Cart, line_key: &str, quantity: u32) -> Result<()> {
    money::validate_quantity(quantity)?;
    let line = cart
        .lines
        .iter_mut()
        .find(|l| l.line_key == line_key)
        .ok_or_else(|| CoreError::validation(format!("No cart line with key '{}'", line_key)))?;
    line.quantity = quantity;
    Ok(())
}
