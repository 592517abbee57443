//! Price estimate: a time-bounded, user-scoped quote.

use crate::ids::{EstimateId, UserId};
use crate::pair::Side;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A priced, time-bounded offer to trade.
///
/// Read-only after creation. Expiry is derived from `expires_at` at
/// evaluation time, never stored as a flag; consumption is recorded by
/// the settlement that references this estimate, not on the estimate
/// itself.
///
/// Invariant: `price` equals the pricing model applied to
/// `(subtotal, fee%, spread%, side)` at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub id: EstimateId,
    pub user_id: UserId,
    /// Market symbol of the quoted pair.
    pub symbol: String,
    pub side: Side,
    /// Requested base-asset volume.
    pub volume: Decimal,
    /// Walked volume-weighted subtotal, pre fee/spread.
    pub subtotal: Decimal,
    pub spread: Decimal,
    pub fee: Decimal,
    /// User-facing price (subtotal adjusted by fee and spread).
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PriceEstimate {
    /// Whether the validity window has passed at `now`.
    ///
    /// The boundary instant itself is still valid: an estimate expires
    /// strictly after `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn estimate(expires_at: DateTime<Utc>) -> PriceEstimate {
        PriceEstimate {
            id: EstimateId::generate(),
            user_id: UserId::from("u1"),
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy,
            volume: dec!(1),
            subtotal: dec!(100),
            spread: dec!(1),
            fee: dec!(0.1),
            price: dec!(101.1),
            created_at: expires_at - Duration::seconds(30),
            expires_at,
        }
    }

    #[test]
    fn test_expiry_is_strictly_after_deadline() {
        let now = Utc::now();
        assert!(estimate(now - Duration::milliseconds(1)).is_expired(now));
        assert!(!estimate(now).is_expired(now));
        assert!(!estimate(now + Duration::milliseconds(1)).is_expired(now));
    }
}
