//! Quote and settlement orchestration.
//!
//! `SwapService` wires the pair registry, the venue providers and the
//! store into the two public operations: `quote` (issue a time-bounded
//! price estimate) and `settle` (convert an estimate into an executed,
//! ledger-applied trade exactly once).

pub mod error;
pub mod service;

pub use error::{SwapError, SwapResult};
pub use service::{QuoteReceipt, SettlementReceipt, SwapService, SwapServiceConfig};
