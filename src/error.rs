//! Error types for the growth_forecast crate

use thiserror::Error;

/// Custom error types for the growth_forecast crate
#[derive(Debug, Error)]
pub enum GrowthError {
    /// The upstream data source has no channel with the given handle
    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    /// The upstream data source could not be reached
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Not enough snapshot history for the requested operation
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error reading or writing the snapshot store
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, GrowthError>;

impl From<serde_json::Error> for GrowthError {
    fn from(err: serde_json::Error) -> Self {
        GrowthError::PersistenceError(err.to_string())
    }
}
