//! State storage for the swap engine.
//!
//! `SwapStore` holds estimates, settlements and per-(user, asset)
//! balances behind a single lock so that the settlement commit —
//! uniqueness check, conditional debit, credit, record insert — is one
//! atomic unit. `SettlementJournal` appends committed settlements to a
//! JSON Lines audit file.

pub mod error;
pub mod journal;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use journal::SettlementJournal;
pub use store::{BalanceChange, SwapStore};
