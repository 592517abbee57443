//! Fixed-point rounding for money amounts.
//!
//! Uses `rust_decimal` for exact decimal arithmetic, avoiding
//! floating-point rounding errors in subtotal/fee/price calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Scale (decimal places) of every stored money amount.
pub const AMOUNT_SCALE: u32 = 8;

/// Round an amount to 8 decimal places, half away from zero.
///
/// Every subtotal, fee, spread and price in the system passes through
/// this before being stored or compared. Rounding happens once per
/// derived quantity, never on intermediate products.
#[inline]
#[must_use]
pub fn round8(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round8_truncates_excess_scale() {
        assert_eq!(round8(dec!(1.123456789)), dec!(1.12345679));
    }

    #[test]
    fn test_round8_midpoint_goes_away_from_zero() {
        assert_eq!(round8(dec!(0.000000005)), dec!(0.00000001));
        assert_eq!(round8(dec!(-0.000000005)), dec!(-0.00000001));
    }

    #[test]
    fn test_round8_is_identity_below_scale() {
        assert_eq!(round8(dec!(201)), dec!(201));
        assert_eq!(round8(dec!(0.25)), dec!(0.25));
    }
}
