//! Fee and spread model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use swap_core::{round8, Side};

/// Output of the pricing model: final price plus its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedAmount {
    /// User-facing total: what a buyer pays or a seller receives.
    pub total: Decimal,
    pub fee: Decimal,
    pub spread: Decimal,
}

/// Apply fee and spread on a raw subtotal.
///
/// `spread = round8(subtotal * spread_pct)`,
/// `fee = round8(subtotal * fee_pct)`; a buyer pays
/// `subtotal + spread + fee`, a seller receives
/// `subtotal - spread - fee`, each rounded to 8 places.
///
/// Pure and deterministic. Runs once at quote time on the walked
/// subtotal and once at settlement on the venue's executed subtotal;
/// the settlement keeps the second result.
pub fn price_with_fees(
    subtotal: Decimal,
    fee_pct: Decimal,
    spread_pct: Decimal,
    side: Side,
) -> PricedAmount {
    let spread = round8(subtotal * spread_pct);
    let fee = round8(subtotal * fee_pct);
    let total = match side {
        Side::Buy => round8(subtotal + spread + fee),
        Side::Sell => round8(subtotal - spread - fee),
    };
    PricedAmount { total, fee, spread }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use swap_core::round8;

    #[test]
    fn test_buy_adds_fee_and_spread() {
        let priced = price_with_fees(dec!(200), dec!(0.001), dec!(0.01), Side::Buy);
        assert_eq!(priced.spread, dec!(2));
        assert_eq!(priced.fee, dec!(0.2));
        assert_eq!(priced.total, dec!(202.2));
    }

    #[test]
    fn test_sell_subtracts_fee_and_spread() {
        let priced = price_with_fees(dec!(200), dec!(0.001), dec!(0.01), Side::Sell);
        assert_eq!(priced.total, dec!(197.8));
    }

    #[test]
    fn test_buy_total_exceeds_subtotal_exceeds_sell_total() {
        let subtotal = dec!(1234.56789);
        let buy = price_with_fees(subtotal, dec!(0.002), dec!(0.01), Side::Buy);
        let sell = price_with_fees(subtotal, dec!(0.002), dec!(0.01), Side::Sell);
        assert!(buy.total > subtotal);
        assert!(sell.total < subtotal);
        assert!(buy.total > sell.total);
    }

    #[test]
    fn test_zero_rates_are_identity() {
        let priced = price_with_fees(dec!(50), dec!(0), dec!(0), Side::Buy);
        assert_eq!(priced.total, dec!(50));
        assert_eq!(priced.fee, dec!(0));
        assert_eq!(priced.spread, dec!(0));
    }

    #[test]
    fn test_components_round_independently() {
        // Each component rounds to 8 places before the total is formed.
        let priced = price_with_fees(dec!(0.123456789), dec!(0.001), dec!(0.01), Side::Buy);
        assert_eq!(priced.fee, round8(dec!(0.123456789) * dec!(0.001)));
        assert_eq!(priced.spread, round8(dec!(0.123456789) * dec!(0.01)));
        assert_eq!(
            priced.total,
            round8(dec!(0.123456789) + priced.spread + priced.fee)
        );
    }
}
