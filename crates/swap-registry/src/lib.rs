//! Trading pair reference data.
//!
//! Holds the immutable per-pair pricing policy (fee, spread, notional
//! floor) and venue symbol mapping, keyed by market symbol. Built once
//! at startup from configuration; read-only afterward.

pub mod error;
pub mod registry;

pub use error::{RegistryError, RegistryResult};
pub use registry::{seed_pairs, PairRegistry};
