//! Settlement: the durable record of one executed, ledger-applied trade.

use crate::ids::{EstimateId, SettlementId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One executed swap, tied 1:1 to its originating estimate.
///
/// Created only inside the settlement commit and never mutated
/// afterward. The fee/spread/total here are recomputed from the
/// venue's actual executed subtotal, not copied from the estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: SettlementId,
    /// Originating estimate. At most one settlement may reference a
    /// given estimate; the store enforces this.
    pub estimate_id: EstimateId,
    pub user_id: UserId,
    /// Venue-assigned order reference.
    pub order_ref: String,
    /// Subtotal actually executed at the venue.
    pub executed_subtotal: Decimal,
    pub fee: Decimal,
    pub spread: Decimal,
    /// Final settled amount in quote asset.
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}
