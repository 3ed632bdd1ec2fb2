//! Statistics error types

use thiserror::Error;

/// Result type for analysis operations
pub type StatsResult<T> = std::result::Result<T, StatsError>;

/// Errors that can occur while configuring or running an analysis
#[derive(Debug, Error)]
pub enum StatsError {
    /// The analysis configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serializing a report column failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
