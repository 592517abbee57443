//! Trading pair reference data and trade direction.

use crate::error::CoreError;
use crate::ids::AssetId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction from the taker's point of view.
///
/// Buy consumes the ask ladder and pays quote asset; Sell consumes the
/// bid ladder and receives quote asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Wire representation used by the venue API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(CoreError::InvalidSide(other.to_string())),
        }
    }
}

/// Immutable reference data for one tradable pair.
///
/// Carries the per-pair pricing policy (fee, spread, notional floor)
/// and the optional venue proxy symbol used when the venue lists the
/// pair under a different name (e.g., AAVEUSDC traded as AAVEUSDT).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingPair {
    /// Market symbol as known to this system (e.g., "BTCUSDT").
    pub symbol: String,
    /// Base asset (the asset being bought/sold).
    pub base: AssetId,
    /// Quote asset (the asset the price is denominated in).
    pub quote: AssetId,
    /// Symbol to use against the venue if it differs from `symbol`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_proxy_symbol: Option<String>,
    /// Minimum acceptable walked subtotal for a quote.
    pub notional: Decimal,
    /// Fee rate applied on the subtotal (e.g., 0.001 = 10 bps).
    pub fee_percentage: Decimal,
    /// Spread rate applied on the subtotal (e.g., 0.01 = 1%).
    pub spread_percentage: Decimal,
}

impl TradingPair {
    /// Symbol to send to the venue: proxy symbol when set, otherwise
    /// the market symbol itself.
    pub fn venue_symbol(&self) -> &str {
        self.venue_proxy_symbol.as_deref().unwrap_or(&self.symbol)
    }

    /// Asset the taker spends for the given side.
    ///
    /// Buy spends quote asset; Sell spends base asset.
    pub fn spend_asset(&self, side: Side) -> &AssetId {
        match side {
            Side::Buy => &self.quote,
            Side::Sell => &self.base,
        }
    }

    /// Asset the taker receives for the given side.
    pub fn receive_asset(&self, side: Side) -> &AssetId {
        match side {
            Side::Buy => &self.base,
            Side::Sell => &self.quote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pair(proxy: Option<&str>) -> TradingPair {
        TradingPair {
            symbol: "AAVEUSDC".to_string(),
            base: AssetId::new("AAVE"),
            quote: AssetId::new("USDC"),
            venue_proxy_symbol: proxy.map(str::to_string),
            notional: dec!(5),
            fee_percentage: dec!(0.002),
            spread_percentage: dec!(0.01),
        }
    }

    #[test]
    fn test_venue_symbol_prefers_proxy() {
        assert_eq!(pair(Some("AAVEUSDT")).venue_symbol(), "AAVEUSDT");
        assert_eq!(pair(None).venue_symbol(), "AAVEUSDC");
    }

    #[test]
    fn test_spend_and_receive_assets_by_side() {
        let p = pair(None);
        assert_eq!(p.spend_asset(Side::Buy), &AssetId::new("USDC"));
        assert_eq!(p.receive_asset(Side::Buy), &AssetId::new("AAVE"));
        assert_eq!(p.spend_asset(Side::Sell), &AssetId::new("AAVE"));
        assert_eq!(p.receive_asset(Side::Sell), &AssetId::new("USDC"));
    }

    #[test]
    fn test_side_serde_is_uppercase() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), "\"BUY\"");
        let side: Side = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(side, Side::Sell);
    }

    #[test]
    fn test_side_from_str() {
        assert_eq!("BUY".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!("SELL".parse::<Side>().unwrap(), Side::Sell);
        assert!("buy".parse::<Side>().is_err());
    }
}
