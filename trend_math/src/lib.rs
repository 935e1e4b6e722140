//! # Trend Math
//!
//! Numeric building blocks for comparing search-interest categories.
//! This crate provides percentage growth, share and compound growth
//! calculations plus the fitting routines used by the forecasting crate.
//!
//! Every ratio that can hit a zero denominator returns `Option<f64>`:
//! `None` means "undefined", which is never the same thing as `0.0`.

use thiserror::Error;

pub mod growth;
pub mod regression;
pub mod smoothing;

pub use growth::{cagr_pct, pct_change, round_to, share_pct};
pub use regression::LinearRegression;
pub use smoothing::DoubleExponentialSmoothing;

/// Errors that can occur in trend calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for trend math operations
pub type Result<T> = std::result::Result<T, MathError>;
