//! Application configuration.

use crate::error::{AppError, AppResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use swap_core::{AssetId, Side, TradingPair};

/// Venue connectivity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueMode {
    /// In-process mock venue with a synthetic book; full quote/settle.
    #[default]
    Mock,
    /// Live REST depth; quotes only (order placement needs signed
    /// requests, which this binary does not carry).
    Rest,
}

/// Venue section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    #[serde(default)]
    pub mode: VenueMode,
    /// Base URL for REST mode.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable holding the API key, if any.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

fn default_base_url() -> String {
    "https://testnet.binance.vision".to_string()
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            mode: VenueMode::Mock,
            base_url: default_base_url(),
            api_key_env: None,
        }
    }
}

/// Engine section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Estimate validity window (seconds). Default: 30.
    #[serde(default = "default_validity_window_secs")]
    pub validity_window_secs: u64,
    /// Depth levels requested per snapshot. Default: 1000.
    #[serde(default = "default_depth_limit")]
    pub depth_limit: u32,
}

fn default_validity_window_secs() -> u64 {
    30
}

fn default_depth_limit() -> u32 {
    1000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validity_window_secs: default_validity_window_secs(),
            depth_limit: default_depth_limit(),
        }
    }
}

/// Settlement journal section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Directory for JSON Lines settlement files.
    pub dir: String,
}

/// One pair definition from config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairConfig {
    pub symbol: String,
    pub base: String,
    pub quote: String,
    #[serde(default)]
    pub venue_proxy_symbol: Option<String>,
    pub notional: Decimal,
    pub fee_percentage: Decimal,
    pub spread_percentage: Decimal,
}

impl From<PairConfig> for TradingPair {
    fn from(cfg: PairConfig) -> Self {
        TradingPair {
            symbol: cfg.symbol,
            base: AssetId::new(cfg.base),
            quote: AssetId::new(cfg.quote),
            venue_proxy_symbol: cfg.venue_proxy_symbol,
            notional: cfg.notional,
            fee_percentage: cfg.fee_percentage,
            spread_percentage: cfg.spread_percentage,
        }
    }
}

/// One scripted trade for the simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeConfig {
    pub symbol: String,
    pub side: Side,
    pub volume: Decimal,
}

/// Simulation section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Acting user id.
    #[serde(default = "default_user")]
    pub user: String,
    /// Starting balance credited per asset.
    #[serde(default = "default_seed_balance")]
    pub seed_balance: Decimal,
    /// Trades to run, in order.
    #[serde(default = "default_trades")]
    pub trades: Vec<TradeConfig>,
}

fn default_user() -> String {
    "demo".to_string()
}

fn default_seed_balance() -> Decimal {
    dec!(100)
}

fn default_trades() -> Vec<TradeConfig> {
    vec![
        TradeConfig {
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy,
            volume: dec!(0.5),
        },
        TradeConfig {
            symbol: "BTCUSDT".to_string(),
            side: Side::Sell,
            volume: dec!(0.25),
        },
    ]
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            seed_balance: default_seed_balance(),
            trades: default_trades(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub venue: VenueConfig,
    pub engine: EngineConfig,
    pub journal: Option<JournalConfig>,
    /// Pair definitions; built-in seed pairs when empty.
    pub pairs: Vec<PairConfig>,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Load configuration: explicit path, `SWAPD_CONFIG`, or defaults.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let env_path = std::env::var("SWAPD_CONFIG").ok();
        let path = path.map(str::to_string).or(env_path);

        match path {
            Some(p) if Path::new(&p).exists() => Self::from_file(&p),
            Some(p) => Err(AppError::Config(format!("config file not found: {p}"))),
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Pair definitions to register, falling back to the seed set.
    pub fn trading_pairs(&self) -> Vec<TradingPair> {
        if self.pairs.is_empty() {
            swap_registry::seed_pairs()
        } else {
            self.pairs.iter().cloned().map(Into::into).collect()
        }
    }

    /// Resolved API key for REST mode, if configured and present.
    pub fn api_key(&self) -> Option<String> {
        self.venue
            .api_key_env
            .as_ref()
            .and_then(|var| std::env::var(var).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let config = AppConfig::default();
        assert_eq!(config.engine.validity_window_secs, 30);
        assert_eq!(config.engine.depth_limit, 1000);
        assert_eq!(config.venue.mode, VenueMode::Mock);
        assert_eq!(config.trading_pairs().len(), 3);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [venue]
            mode = "rest"
            base_url = "https://example.test"

            [engine]
            validity_window_secs = 10

            [[pairs]]
            symbol = "BTCUSDT"
            base = "BTC"
            quote = "USDT"
            notional = "5"
            fee_percentage = "0.001"
            spread_percentage = "0.01"

            [[simulation.trades]]
            symbol = "BTCUSDT"
            side = "BUY"
            volume = "0.5"
            "#,
        )
        .unwrap();

        assert_eq!(config.venue.mode, VenueMode::Rest);
        assert_eq!(config.engine.validity_window_secs, 10);
        assert_eq!(config.engine.depth_limit, 1000);
        assert_eq!(config.trading_pairs().len(), 1);
        assert_eq!(config.simulation.trades[0].side, Side::Buy);
    }
}
