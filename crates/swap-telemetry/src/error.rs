//! Telemetry error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Subscriber initialization failed: {0}")]
    Init(String),
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
