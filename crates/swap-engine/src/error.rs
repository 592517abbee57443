//! Engine error types.

use rust_decimal::Decimal;
use swap_core::{ErrorKind, EstimateId};
use swap_venue::VenueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwapError {
    #[error("Unknown pair: {0}")]
    PairNotFound(String),

    #[error("Estimate not found: {0}")]
    EstimateNotFound(EstimateId),

    #[error("Requested volume cannot be covered by available orders")]
    InsufficientLiquidity { symbol: String, volume: Decimal },

    #[error("Notional value is too low")]
    NotionalTooLow { subtotal: Decimal, notional: Decimal },

    #[error("Estimate {0} has expired")]
    EstimateExpired(EstimateId),

    #[error("Estimate {0} is already settled")]
    AlreadySettled(EstimateId),

    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Depth snapshot could not be fetched; the quote is abandoned.
    #[error("Depth snapshot unavailable: {0}")]
    DepthUnavailable(#[source] VenueError),

    /// Venue execution failed or its outcome is unknown. Nothing was
    /// recorded; the estimate stays unconsumed and may be retried.
    #[error("Venue execution failed: {0}")]
    ExecutionFailed(#[source] VenueError),

    /// Broken invariant or malformed stored record. Not a user error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SwapError {
    /// Classification for transports mapping errors to status codes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PairNotFound(_)
            | Self::EstimateNotFound(_)
            | Self::InsufficientLiquidity { .. } => ErrorKind::NotFound,
            Self::NotionalTooLow { .. }
            | Self::EstimateExpired(_)
            | Self::InsufficientFunds => ErrorKind::BadRequest,
            Self::AlreadySettled(_) => ErrorKind::Conflict,
            Self::DepthUnavailable(_) | Self::ExecutionFailed(_) => ErrorKind::ExecutionFailed,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

pub type SwapResult<T> = Result<T, SwapError>;
