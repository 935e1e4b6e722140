//! Double exponential smoothing (Holt's linear trend method)

use crate::{MathError, Result};

/// Holt's linear trend smoother
///
/// Keeps a level and a trend, updated once per observation. Before each
/// update the one-step-ahead prediction (`level + trend`) is recorded, so the
/// in-sample fit can be compared with the observations.
#[derive(Debug, Clone)]
pub struct DoubleExponentialSmoothing {
    alpha: f64,
    beta: f64,
    level: Option<f64>,
    trend: Option<f64>,
    fitted: Vec<f64>,
}

impl DoubleExponentialSmoothing {
    /// Create a new smoother with level factor `alpha` and trend factor `beta`
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(MathError::InvalidInput(
                "Alpha must be between 0 and 1 (exclusive)".to_string(),
            ));
        }
        if beta <= 0.0 || beta >= 1.0 {
            return Err(MathError::InvalidInput(
                "Beta must be between 0 and 1 (exclusive)".to_string(),
            ));
        }

        Ok(Self {
            alpha,
            beta,
            level: None,
            trend: None,
            fitted: Vec::new(),
        })
    }

    /// Feed one observation
    pub fn update(&mut self, value: f64) {
        match (self.level, self.trend) {
            (Some(prev_level), Some(prev_trend)) => {
                self.fitted.push(prev_level + prev_trend);

                let level = self.alpha * value + (1.0 - self.alpha) * (prev_level + prev_trend);
                let trend = self.beta * (level - prev_level) + (1.0 - self.beta) * prev_trend;
                self.level = Some(level);
                self.trend = Some(trend);
            }
            (Some(prev_level), None) => {
                // Second observation seeds the trend
                self.fitted.push(prev_level);
                self.level = Some(value);
                self.trend = Some(value - prev_level);
            }
            _ => {
                self.fitted.push(value);
                self.level = Some(value);
            }
        }
    }

    /// Feed every observation in order
    pub fn fit(mut self, values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(
                "Need at least 2 observations to estimate a trend".to_string(),
            ));
        }
        for &value in values {
            self.update(value);
        }
        Ok(self)
    }

    /// Forecast `h` steps past the last observation
    pub fn forecast(&self, h: usize) -> Result<f64> {
        match (self.level, self.trend) {
            (Some(level), Some(trend)) => Ok(level + (h as f64) * trend),
            _ => Err(MathError::InsufficientData(
                "Not enough data to make a forecast".to_string(),
            )),
        }
    }

    /// One-step-ahead predictions, one per observation seen
    pub fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}
