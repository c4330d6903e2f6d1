//! Money calculation utilities using rust_decimal for precision
//!
//! Prices travel as `f64` on the wire. Arithmetic is done in `Decimal`,
//! then rounded back to 2 places for display and serialization.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// `unit_price * quantity`
#[inline]
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum of f64 prices without accumulating float error
pub fn sum_prices(prices: impl IntoIterator<Item = f64>) -> Decimal {
    prices.into_iter().map(to_decimal).sum()
}

/// Amount in minor units (cents), as payment providers expect
pub fn to_minor_units(value: f64) -> i64 {
    (to_decimal(value) * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
