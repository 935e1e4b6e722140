//! Ordinary least squares fit of a straight line
//!
//! Used to project yearly totals forward. Points are fitted on their actual
//! x values, so gaps in the x axis (missing years) are respected.

use crate::{MathError, Result};

/// Fitted linear regression `y = slope * x + intercept`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    slope: f64,
    intercept: f64,
    points: usize,
    r_squared: Option<f64>,
}

impl LinearRegression {
    /// Fit a line through `(x, y)` points
    pub fn fit(points: &[(f64, f64)]) -> Result<Self> {
        if points.len() < 2 {
            return Err(MathError::InsufficientData(
                "Need at least 2 points for linear regression".to_string(),
            ));
        }

        let n = points.len() as f64;
        let x_mean = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for &(x, y) in points {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        // Coefficient of determination; undefined for a flat series
        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;
        for &(x, y) in points {
            let y_pred = slope * x + intercept;
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - y_pred).powi(2);
        }
        let r_squared = if ss_total.abs() < 1e-10 {
            None
        } else {
            Some(1.0 - ss_residual / ss_total)
        };

        Ok(Self {
            slope,
            intercept,
            points: points.len(),
            r_squared,
        })
    }

    /// Predict y for a given x
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Slope of the fitted line (trend direction and strength)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Intercept of the fitted line
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of points the line was fitted on
    pub fn points(&self) -> usize {
        self.points
    }

    /// R-squared of the fit, `None` when the observed values are constant
    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }
}
