//! # Trend Forecast
//!
//! Projects yearly totals past the last observed year.
//!
//! ## Contract
//!
//! - Input: `(year, total)` pairs with at least two distinct, increasing years
//! - Output: one projected value per future year, keyed by year, for years
//!   `last + 1 ..= last + horizon`
//!
//! ## Models
//!
//! - [`LinearTrend`]: least squares line through the yearly totals
//! - [`HoltLinear`]: double exponential smoothing over consecutive years
//!
//! ## Quick Start
//!
//! ```rust
//! use trend_forecast::models::linear_trend::LinearTrend;
//! use trend_forecast::models::{ForecastModel, TrainedForecastModel};
//! use trend_forecast::YearlySeries;
//!
//! let series = YearlySeries::new(vec![(2021, 100.0), (2022, 120.0), (2023, 140.0)])?;
//! let trained = LinearTrend::new().train(&series)?;
//! let forecast = trained.forecast(2)?;
//!
//! assert_eq!(forecast.years(), vec![2024, 2025]);
//! # Ok::<(), trend_forecast::ForecastError>(())
//! ```

pub mod error;
pub mod models;
pub mod series;
pub mod utils;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use crate::error::{ForecastError, Result};
pub use crate::models::holt::HoltLinear;
pub use crate::models::linear_trend::LinearTrend;
pub use crate::models::{
    check_horizon, ForecastModel, ForecastResult, TrainedForecastModel, MAX_HORIZON,
};
pub use crate::series::YearlySeries;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default confidence level for projection intervals
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Model selectable from configuration or a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    #[default]
    Linear,
    Holt,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Linear => f.write_str("linear"),
            ModelKind::Holt => f.write_str("holt"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(ModelKind::Linear),
            "holt" => Ok(ModelKind::Holt),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unknown forecast model: {}",
                other
            ))),
        }
    }
}

/// Train the chosen model on `series` and project `horizon` years.
///
/// The result carries the in-sample accuracy of the trained model. When
/// `confidence` is given, intervals are attached at that level.
pub fn forecast_yearly(
    kind: ModelKind,
    series: &YearlySeries,
    horizon: usize,
    confidence: Option<f64>,
) -> Result<ForecastResult> {
    check_horizon(horizon)?;

    match kind {
        ModelKind::Linear => run(&LinearTrend::new(), series, horizon, confidence),
        ModelKind::Holt => run(&HoltLinear::default(), series, horizon, confidence),
    }
}

fn run<M: ForecastModel>(
    model: &M,
    series: &YearlySeries,
    horizon: usize,
    confidence: Option<f64>,
) -> Result<ForecastResult> {
    let trained = model.train(series)?;
    let accuracy = utils::forecast_accuracy(trained.fitted(), series.values())?;
    let forecast = trained.forecast(horizon)?.with_accuracy(accuracy);
    log::debug!(
        "{} projected {} years past {}",
        trained.name(),
        horizon,
        series.last_year()
    );

    match confidence {
        Some(level) => {
            let sigma = utils::residual_std(trained.fitted(), series.values())?;
            forecast.with_intervals(level, sigma)
        }
        None => Ok(forecast),
    }
}
