//! Venue wire types: depth snapshots and execution reports.

use crate::pair::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One resting level of a depth ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

impl BookLevel {
    pub fn new(price: Decimal, quantity: Decimal) -> Self {
        Self { price, quantity }
    }
}

/// Depth-of-book snapshot for one symbol, best price first on each side.
///
/// The snapshot is mirrored exactly as the venue provided it; levels are
/// not filtered or re-sorted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    pub asks: Vec<BookLevel>,
    pub bids: Vec<BookLevel>,
}

impl DepthSnapshot {
    /// Ladder a taker on the given side consumes: asks for Buy,
    /// bids for Sell.
    pub fn ladder_for(&self, side: Side) -> &[BookLevel] {
        match side {
            Side::Buy => &self.asks,
            Side::Sell => &self.bids,
        }
    }
}

/// Result of a market order executed at the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Venue-assigned order reference.
    pub order_ref: String,
    /// Quote-asset value actually executed (the venue's cumulative
    /// quote quantity). May differ from the quoted subtotal.
    pub executed_subtotal: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ladder_for_side() {
        let snapshot = DepthSnapshot {
            asks: vec![BookLevel::new(dec!(101), dec!(1))],
            bids: vec![BookLevel::new(dec!(99), dec!(2))],
        };
        assert_eq!(snapshot.ladder_for(Side::Buy), &snapshot.asks[..]);
        assert_eq!(snapshot.ladder_for(Side::Sell), &snapshot.bids[..]);
    }
}
