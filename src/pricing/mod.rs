//! Price Calculator
//!
//! Computes the effective price of a training or service from its base
//! price and an optional configured discount. Uses rust_decimal for exact
//! arithmetic; rows store prices as f64 and convert at this boundary.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Discount kind configured on a training or service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum DiscountKind {
    Percentage,
    Flat,
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Effective price after applying the configured discount.
///
/// - zero/absent discount value or absent kind: base price unchanged
/// - `PERCENTAGE`: `base - base * value / 100`
/// - `FLAT`: `base - value`
///
/// The result is not clamped: a flat discount larger than the base price
/// yields a negative effective price. That is the documented behavior of
/// this backend, not an error case.
pub fn effective_price(
    base: Decimal,
    discount_value: Option<Decimal>,
    discount_kind: Option<DiscountKind>,
) -> Decimal {
    let (value, kind) = match (discount_value, discount_kind) {
        (Some(v), Some(k)) if !v.is_zero() => (v, k),
        _ => return base,
    };

    match kind {
        DiscountKind::Percentage => base - base * value / Decimal::ONE_HUNDRED,
        DiscountKind::Flat => base - value,
    }
}

/// f64 convenience wrapper for response shaping from stored row values
pub fn effective_price_f64(
    base: f64,
    discount_value: Option<f64>,
    discount_kind: Option<DiscountKind>,
) -> f64 {
    to_f64(effective_price(
        to_decimal(base),
        discount_value.map(to_decimal),
        discount_kind,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn test_percentage_discount() {
        let price = effective_price(dec(100), Some(dec(10)), Some(DiscountKind::Percentage));
        assert_eq!(price, dec(90));
    }

    #[test]
    fn test_flat_discount() {
        let price = effective_price(dec(100), Some(dec(10)), Some(DiscountKind::Flat));
        assert_eq!(price, dec(90));
    }

    #[test]
    fn test_no_discount_returns_base() {
        assert_eq!(effective_price(dec(100), None, None), dec(100));
    }

    #[test]
    fn test_zero_discount_returns_base() {
        let price = effective_price(dec(100), Some(dec(0)), Some(DiscountKind::Percentage));
        assert_eq!(price, dec(100));
    }

    #[test]
    fn test_value_without_kind_returns_base() {
        assert_eq!(effective_price(dec(100), Some(dec(25)), None), dec(100));
    }

    #[test]
    fn test_flat_discount_exceeding_base_goes_negative() {
        // Not clamped: oversized discounts produce a negative price.
        let price = effective_price(dec(50), Some(dec(80)), Some(DiscountKind::Flat));
        assert_eq!(price, dec(-30));
    }

    #[test]
    fn test_percentage_is_exact() {
        // 33% off 100 = 67 exactly, no float drift
        let price = effective_price(dec(100), Some(dec(33)), Some(DiscountKind::Percentage));
        assert_eq!(price, dec(67));
    }

    #[test]
    fn test_f64_boundary_rounding() {
        // 15% off 99.99 = 84.9915 → 84.99 after 2dp rounding
        let price = effective_price_f64(99.99, Some(15.0), Some(DiscountKind::Percentage));
        assert_eq!(price, 84.99);
    }
}
