//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done using `Decimal` internally; `f64` values cross the
//! model boundary exact at two decimal places. Prices are tax-inclusive, the
//! net/VAT split of a gross amount is derived by reverse decomposition and
//! kept unrounded until a presentation value is produced.

use rust_decimal::prelude::*;

use crate::error::{CoreError, Result};

/// Rounding precision for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per unit
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: u32 = 9999;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub(crate) fn require_finite(value: f64, field_name: &str) -> Result<()> {
    if !value.is_finite() {
        return Err(CoreError::validation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a price-like value: finite, non-negative, bounded
pub(crate) fn validate_price(value: f64, field_name: &str) -> Result<()> {
    require_finite(value, field_name)?;
    if value < 0.0 {
        return Err(CoreError::validation(format!(
            "{} must be non-negative, got {}",
            field_name, value
        )));
    }
    if value > MAX_PRICE {
        return Err(CoreError::validation(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_PRICE, value
        )));
    }
    Ok(())
}

/// Validate a line quantity: positive and within bounds
pub(crate) fn validate_quantity(quantity: u32) -> Result<()> {
    if quantity == 0 {
        return Err(CoreError::validation("Quantity must be positive, got 0"));
    }
    if quantity > MAX_QUANTITY {
        return Err(CoreError::validation(format!(
            "Quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// Validate a percent tax rate: finite and in [0, 100]
pub(crate) fn validate_tax_rate(rate: f64) -> Result<()> {
    require_finite(rate, "tax rate")?;
    if !(0.0..=100.0).contains(&rate) {
        return Err(CoreError::validation(format!(
            "Tax rate must be between 0 and 100, got {}",
            rate
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via `require_finite()` at the boundary.
/// If NaN/Infinity somehow reaches here, logs an error and returns ZERO
/// to avoid silent data corruption in financial calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with bounded inputs is always
        // within f64 representable range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Net and tax parts of a tax-inclusive gross amount, in calculation space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxParts {
    /// Net amount (before tax)
    pub net: Decimal,
    /// Tax amount
    pub tax: Decimal,
}

/// Split a tax-inclusive gross amount into net and tax
///
/// Formula: tax = gross × rate / (100 + rate). A zero rate yields zero tax
/// and the full gross as net. Parts stay unrounded so aggregation can sum
/// them first; `net + tax` equals `gross` exactly.
pub fn decompose_tax_inclusive(gross: Decimal, rate: Decimal) -> TaxParts {
    let tax = if rate > Decimal::ZERO {
        gross * rate / (Decimal::ONE_HUNDRED + rate)
    } else {
        Decimal::ZERO
    };
    TaxParts {
        net: gross - tax,
        tax,
    }
}

/// Compare two monetary values for equality (differences under 0.01;
/// a full cent apart is unequal)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

/// `money_eq` for values still in calculation space
pub fn money_eq_dec(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        assert_eq!(to_decimal(10.99), Decimal::new(1099, 2));
        assert_eq!(to_decimal(0.1), Decimal::new(1, 1));
        assert_eq!(to_decimal(0.0), Decimal::ZERO);
    }

    #[test]
    fn test_to_decimal_nan_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn test_to_decimal_infinity_becomes_zero() {
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
        assert_eq!(to_decimal(f64::NEG_INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(to_f64(Decimal::new(12345, 3)), 12.35); // 12.345 → 12.35
        assert_eq!(to_f64(Decimal::new(12344, 3)), 12.34); // 12.344 → 12.34
    }

    #[test]
    fn test_money_eq() {
        assert!(money_eq(10.00, 10.005));
        assert!(money_eq(10.00, 10.00));
        assert!(!money_eq(10.00, 10.01));
        assert!(!money_eq(10.00, 10.02));
    }

    #[test]
    fn test_decompose_zero_rate_is_identity() {
        let parts = decompose_tax_inclusive(to_decimal(121.0), Decimal::ZERO);
        assert_eq!(parts.tax, Decimal::ZERO);
        assert_eq!(parts.net, to_decimal(121.0));
    }

    #[test]
    fn test_decompose_121_at_21_percent() {
        let parts = decompose_tax_inclusive(to_decimal(121.0), to_decimal(21.0));
        assert_eq!(to_f64(parts.tax), 21.00);
        assert_eq!(to_f64(parts.net), 100.00);
    }

    #[test]
    fn test_decompose_parts_always_rebuild_the_gross() {
        for (gross, rate) in [
            (0.0, 21.0),
            (1.0, 21.0),
            (9.99, 10.0),
            (121.0, 21.0),
            (55.0, 5.0),
            (37.5, 5.5),
            (1234.56, 2.1),
        ] {
            let parts = decompose_tax_inclusive(to_decimal(gross), to_decimal(rate));
            // Exact in calculation space
            assert_eq!(parts.net + parts.tax, to_decimal(gross));
            // Within tolerance after independent rounding
            assert!(
                money_eq(to_f64(parts.net) + to_f64(parts.tax), gross),
                "rounded parts of {} at {}% drifted",
                gross,
                rate
            );
        }
    }

    #[test]
    fn test_validate_price_rejects_bad_values() {
        assert!(validate_price(10.0, "price").is_ok());
        assert!(validate_price(0.0, "price").is_ok());
        assert!(validate_price(-0.01, "price").is_err());
        assert!(validate_price(f64::NAN, "price").is_err());
        assert!(validate_price(MAX_PRICE + 1.0, "price").is_err());
    }

    #[test]
    fn test_validate_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bounds() {
        assert!(validate_tax_rate(0.0).is_ok());
        assert!(validate_tax_rate(21.0).is_ok());
        assert!(validate_tax_rate(5.5).is_ok());
        assert!(validate_tax_rate(-1.0).is_err());
        assert!(validate_tax_rate(100.1).is_err());
        assert!(validate_tax_rate(f64::NAN).is_err());
    }
}
