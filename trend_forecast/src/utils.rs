//! Utility functions for the trend_forecast crate

use crate::error::{ForecastError, Result};
use serde::Serialize;

/// Calculate accuracy metrics for fitted values vs actual values
pub fn forecast_accuracy(fitted: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if fitted.len() != actual.len() || fitted.is_empty() {
        return Err(ForecastError::ValidationError(
            "Fitted and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = fitted.len() as f64;
    let errors: Vec<f64> = fitted
        .iter()
        .zip(actual.iter())
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let rmse = (errors.iter().map(|e| e.powi(2)).sum::<f64>() / n).sqrt();

    // Percentage error is only defined where the actual value is nonzero
    let defined: Vec<f64> = actual
        .iter()
        .zip(errors.iter())
        .filter(|(a, _)| **a != 0.0)
        .map(|(&a, &e)| (e.abs() / a.abs()) * 100.0)
        .collect();
    let mape = if defined.is_empty() {
        None
    } else {
        Some(defined.iter().sum::<f64>() / defined.len() as f64)
    };

    Ok(ForecastAccuracy { mae, rmse, mape })
}

/// Sample standard deviation of the residuals `actual - fitted`.
///
/// Zero when there are fewer than two residuals.
pub fn residual_std(fitted: &[f64], actual: &[f64]) -> Result<f64> {
    if fitted.len() != actual.len() {
        return Err(ForecastError::ValidationError(format!(
            "Fitted length ({}) doesn't match actual length ({})",
            fitted.len(),
            actual.len()
        )));
    }
    if fitted.len() < 2 {
        return Ok(0.0);
    }

    let residuals: Vec<f64> = actual.iter().zip(fitted).map(|(a, f)| a - f).collect();
    let mean = residuals.iter().sum::<f64>() / residuals.len() as f64;
    let variance = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
        / (residuals.len() - 1) as f64;

    Ok(variance.sqrt())
}

/// In-sample accuracy of a fitted model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error over nonzero actuals
    pub mape: Option<f64>,
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MAE {:.2}, RMSE {:.2}", self.mae, self.rmse)?;
        if let Some(mape) = self.mape {
            write!(f, ", MAPE {:.2}%", mape)?;
        }
        Ok(())
    }
}
