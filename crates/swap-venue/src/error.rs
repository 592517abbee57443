//! Venue error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VenueError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Venue request failed: {0}")]
    Transport(String),

    #[error("Venue rejected the request: {0}")]
    Rejected(String),

    /// The order may or may not have executed (timeout, truncated
    /// response). Callers must not assume success and must not retry
    /// blindly; the venue call is not idempotent.
    #[error("Venue execution outcome unknown: {0}")]
    AmbiguousOutcome(String),

    #[error("Malformed venue response: {0}")]
    Malformed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type VenueResult<T> = Result<T, VenueError>;
