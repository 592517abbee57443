//! Store error types.

use swap_core::{AssetId, EstimateId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A settlement already references this estimate.
    #[error("Estimate {0} is already settled")]
    AlreadySettled(EstimateId),

    /// Conditional debit failed: balance below the required amount.
    #[error("Insufficient funds in {0}")]
    InsufficientFunds(AssetId),

    /// A mutation that can never be valid (negative amounts, debit and
    /// credit on the same asset). Indicates a caller bug, not user error.
    #[error("Invalid balance mutation: {0}")]
    InvalidMutation(String),

    #[error("Journal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Journal encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
