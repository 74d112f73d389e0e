//! Configuration errors raised while compiling dialect requests

/// Fatal input errors. Surfaced immediately, never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Unknown temporal granularity: {0}")]
    UnknownGranularity(String),

    #[error("Unknown interval unit: {0}")]
    UnknownIntervalUnit(String),

    #[error("Invalid offset amount: {0} (expected a whole number of units)")]
    InvalidOffsetAmount(String),

    #[error("Invalid host: {0}")]
    InvalidHost(String),
}
