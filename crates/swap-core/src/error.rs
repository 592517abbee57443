//! Error types for swap-core and the shared user-visible taxonomy.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid side: {0} (expected BUY or SELL)")]
    InvalidSide(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// User-visible error classification shared across the workspace.
///
/// Every service-level error maps to exactly one kind; transports can
/// translate kinds to their own status codes without inspecting the
/// concrete error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown pair, unresolvable estimate, insufficient liquidity.
    NotFound,
    /// Notional too low, expired estimate, insufficient funds.
    BadRequest,
    /// Estimate already settled.
    Conflict,
    /// Venue execution failed or outcome is unknown; nothing recorded.
    ExecutionFailed,
    /// Invariant violation or malformed stored record.
    Internal,
}
