//! Forecasting models for yearly series

use crate::error::{ForecastError, Result};
use crate::series::YearlySeries;
use crate::utils::ForecastAccuracy;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Longest projection a model will produce, in years
pub const MAX_HORIZON: usize = 100;

/// Reject horizons outside `1..=MAX_HORIZON`
pub fn check_horizon(horizon: usize) -> Result<()> {
    if horizon == 0 {
        return Err(ForecastError::InvalidParameter(
            "Forecast horizon must be at least 1 year".to_string(),
        ));
    }
    if horizon > MAX_HORIZON {
        return Err(ForecastError::InvalidParameter(format!(
            "Forecast horizon must be at most {} years, got {}",
            MAX_HORIZON, horizon
        )));
    }
    Ok(())
}

/// The year `step` years after `last_year`
pub fn year_after(last_year: i32, step: usize) -> Result<i32> {
    i32::try_from(step)
        .ok()
        .and_then(|step| last_year.checked_add(step))
        .ok_or_else(|| {
            ForecastError::InvalidParameter(format!(
                "Year {} plus {} is out of range",
                last_year, step
            ))
        })
}

/// Projected values keyed by year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    /// Name of the model that produced the projection
    model: String,
    /// Projected value per future year
    values: BTreeMap<i32, f64>,
    /// Lower and upper bound per future year (optional)
    intervals: Option<BTreeMap<i32, (f64, f64)>>,
    /// Confidence level of the intervals
    confidence: Option<f64>,
    /// How well the model reproduced the observed years
    accuracy: Option<ForecastAccuracy>,
}

impl ForecastResult {
    /// Key `values` by the years following `last_year`
    pub fn new(model: &str, last_year: i32, values: Vec<f64>) -> Result<Self> {
        check_horizon(values.len())?;

        let values = values
            .into_iter()
            .enumerate()
            .map(|(offset, value)| -> Result<(i32, f64)> {
                Ok((year_after(last_year, offset + 1)?, value))
            })
            .collect::<Result<BTreeMap<i32, f64>>>()?;

        Ok(Self {
            model: model.to_string(),
            values,
            intervals: None,
            confidence: None,
            accuracy: None,
        })
    }

    /// Attach symmetric intervals at `level`, widening with the square root of
    /// the distance from the last observation
    pub fn with_intervals(mut self, level: f64, residual_std: f64) -> Result<Self> {
        if level <= 0.0 || level >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }
        if !residual_std.is_finite() || residual_std < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Residual standard deviation must be non-negative, got {}",
                residual_std
            )));
        }

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
        let z_score = normal.inverse_cdf(0.5 + level / 2.0);

        let intervals = self
            .values
            .iter()
            .enumerate()
            .map(|(step, (&year, &value))| {
                let margin = z_score * residual_std * ((step + 1) as f64).sqrt();
                (year, ((value - margin).max(0.0), value + margin))
            })
            .collect();

        self.intervals = Some(intervals);
        self.confidence = Some(level);
        Ok(self)
    }

    /// Attach the in-sample accuracy of the model that produced the projection
    pub fn with_accuracy(mut self, accuracy: ForecastAccuracy) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Projected value per year
    pub fn values(&self) -> &BTreeMap<i32, f64> {
        &self.values
    }

    /// Projected years in ascending order
    pub fn years(&self) -> Vec<i32> {
        self.values.keys().copied().collect()
    }

    /// Projected value for one year
    pub fn get(&self, year: i32) -> Option<f64> {
        self.values.get(&year).copied()
    }

    /// Furthest projected year and its value
    pub fn last(&self) -> Option<(i32, f64)> {
        self.values.iter().next_back().map(|(&y, &v)| (y, v))
    }

    /// Number of projected years
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Intervals, if attached
    pub fn intervals(&self) -> Option<&BTreeMap<i32, (f64, f64)>> {
        self.intervals.as_ref()
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub fn accuracy(&self) -> Option<&ForecastAccuracy> {
        self.accuracy.as_ref()
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Project `horizon` years past the last observed year
    fn forecast(&self, horizon: usize) -> Result<ForecastResult>;

    /// In-sample fitted value per observed year
    fn fitted(&self) -> &[f64];

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a yearly series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a yearly series
    fn train(&self, series: &YearlySeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod holt;
pub mod linear_trend;
