//! Symbol-keyed pair registry with validation at load.

use crate::error::{RegistryError, RegistryResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use swap_core::{AssetId, TradingPair};
use tracing::info;

/// Read-only lookup from market symbol to pair policy.
///
/// Pricing policy lives here so the pricing model itself stays pure;
/// callers resolve a pair once and pass its rates down.
#[derive(Debug, Clone, Default)]
pub struct PairRegistry {
    pairs: HashMap<String, TradingPair>,
}

impl PairRegistry {
    /// Build a registry from pair definitions, validating each one.
    ///
    /// Rejects duplicate symbols, non-positive notional, and negative
    /// fee or spread rates.
    pub fn new(pairs: Vec<TradingPair>) -> RegistryResult<Self> {
        let mut map = HashMap::with_capacity(pairs.len());
        for pair in pairs {
            validate(&pair)?;
            if map.contains_key(&pair.symbol) {
                return Err(RegistryError::DuplicateSymbol(pair.symbol));
            }
            info!(
                symbol = %pair.symbol,
                venue_symbol = %pair.venue_symbol(),
                notional = %pair.notional,
                "Registered trading pair"
            );
            map.insert(pair.symbol.clone(), pair);
        }
        Ok(Self { pairs: map })
    }

    /// Registry with the built-in seed pairs.
    pub fn with_seed_pairs() -> Self {
        Self::new(seed_pairs()).expect("seed pairs are valid")
    }

    /// Look up a pair by its market symbol.
    pub fn pair(&self, symbol: &str) -> Option<&TradingPair> {
        self.pairs.get(symbol)
    }

    /// Number of registered pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate registered pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &TradingPair> {
        self.pairs.values()
    }
}

fn validate(pair: &TradingPair) -> RegistryResult<()> {
    let reject = |reason: &str| {
        Err(RegistryError::InvalidPair {
            symbol: pair.symbol.clone(),
            reason: reason.to_string(),
        })
    };
    if pair.symbol.is_empty() {
        return reject("empty symbol");
    }
    if pair.base == pair.quote {
        return reject("base and quote assets are identical");
    }
    if pair.notional <= Decimal::ZERO {
        return reject("notional must be positive");
    }
    if pair.fee_percentage < Decimal::ZERO || pair.spread_percentage < Decimal::ZERO {
        return reject("fee and spread rates must be non-negative");
    }
    Ok(())
}

/// Built-in reference pairs used when no pairs are configured.
pub fn seed_pairs() -> Vec<TradingPair> {
    vec![
        TradingPair {
            symbol: "BTCUSDT".to_string(),
            base: AssetId::new("BTC"),
            quote: AssetId::new("USDT"),
            venue_proxy_symbol: None,
            notional: dec!(5),
            fee_percentage: dec!(0.001),
            spread_percentage: dec!(0.01),
        },
        TradingPair {
            symbol: "ETHUSDT".to_string(),
            base: AssetId::new("ETH"),
            quote: AssetId::new("USDT"),
            venue_proxy_symbol: None,
            notional: dec!(5),
            fee_percentage: dec!(0.001),
            spread_percentage: dec!(0.01),
        },
        // The venue does not list AAVEUSDC; quote it through AAVEUSDT.
        TradingPair {
            symbol: "AAVEUSDC".to_string(),
            base: AssetId::new("AAVE"),
            quote: AssetId::new("USDC"),
            venue_proxy_symbol: Some("AAVEUSDT".to_string()),
            notional: dec!(5),
            fee_percentage: dec!(0.002),
            spread_percentage: dec!(0.01),
        },
    ]
}
