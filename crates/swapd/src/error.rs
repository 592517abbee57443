//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registry error: {0}")]
    Registry(#[from] swap_registry::RegistryError),

    #[error("Venue error: {0}")]
    Venue(#[from] swap_venue::VenueError),

    #[error("Store error: {0}")]
    Store(#[from] swap_store::StoreError),

    #[error("Swap error: {0}")]
    Swap(#[from] swap_engine::SwapError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] swap_telemetry::TelemetryError),
}

pub type AppResult<T> = Result<T, AppError>;
