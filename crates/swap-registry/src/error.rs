//! Registry error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate pair symbol: {0}")]
    DuplicateSymbol(String),

    #[error("Invalid pair {symbol}: {reason}")]
    InvalidPair { symbol: String, reason: String },
}

pub type RegistryResult<T> = Result<T, RegistryError>;
