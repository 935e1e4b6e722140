//! Error types for the trend_forecast crate

use thiserror::Error;

/// Errors raised while fitting or projecting a model
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Not enough observations to fit the model
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Input that breaks the series contract
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from the numeric helpers
    #[error("Math error: {0}")]
    MathError(#[from] trend_math::MathError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
