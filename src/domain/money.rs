//! Monetary types and output rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Number of decimal places used for every monetary figure at output.
pub const MONEY_SCALE: u32 = 2;

/// Round a monetary value to cents, half away from zero, always carrying two
/// decimal places (`57.5` becomes `57.50`).
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}
