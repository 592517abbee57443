//! Core domain types for the swap engine.
//!
//! This crate provides fundamental types used throughout the system:
//! - `UserId`, `AssetId`, `EstimateId`, `SettlementId`: identifiers
//! - `TradingPair`, `Side`: reference data and trade direction
//! - `PriceEstimate`, `Settlement`: the quote lifecycle records
//! - `DepthSnapshot`, `BookLevel`, `ExecutionReport`: venue wire types
//! - `round8`: the fixed 8-decimal rounding used for all money amounts

pub mod decimal;
pub mod error;
pub mod estimate;
pub mod ids;
pub mod pair;
pub mod settlement;
pub mod types;

pub use decimal::{round8, AMOUNT_SCALE};
pub use error::{CoreError, ErrorKind, Result};
pub use estimate::PriceEstimate;
pub use ids::{AssetId, EstimateId, SettlementId, UserId};
pub use pair::{Side, TradingPair};
pub use settlement::Settlement;
pub use types::{BookLevel, DepthSnapshot, ExecutionReport};
