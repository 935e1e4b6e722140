//! Holt's linear trend model (double exponential smoothing)

use crate::error::{ForecastError, Result};
use crate::models::{check_horizon, ForecastModel, ForecastResult, TrainedForecastModel};
use crate::series::YearlySeries;
use trend_math::DoubleExponentialSmoothing;

/// Double exponential smoothing over consecutive years
#[derive(Debug, Clone)]
pub struct HoltLinear {
    /// Name of the model
    name: String,
    /// Level smoothing factor
    alpha: f64,
    /// Trend smoothing factor
    beta: f64,
}

/// Trained Holt model
#[derive(Debug, Clone)]
pub struct TrainedHoltLinear {
    /// Name of the model
    name: String,
    /// Smoother after seeing every observation
    smoother: DoubleExponentialSmoothing,
    /// Last observed year
    last_year: i32,
}

impl HoltLinear {
    /// Create a new model; both factors must lie strictly between 0 and 1
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        // Validate up front so a bad model fails before training
        DoubleExponentialSmoothing::new(alpha, beta)?;

        Ok(Self {
            name: format!("Holt Linear (alpha={}, beta={})", alpha, beta),
            alpha,
            beta,
        })
    }
}

impl Default for HoltLinear {
    fn default() -> Self {
        Self {
            name: "Holt Linear (alpha=0.8, beta=0.2)".to_string(),
            alpha: 0.8,
            beta: 0.2,
        }
    }
}

impl ForecastModel for HoltLinear {
    type Trained = TrainedHoltLinear;

    fn train(&self, series: &YearlySeries) -> Result<Self::Trained> {
        // One smoothing step per year; a gap would silently shrink the trend
        if !series.is_consecutive() {
            return Err(ForecastError::ValidationError(format!(
                "{} needs one observation per year between {} and {}",
                self.name,
                series.first_year(),
                series.last_year()
            )));
        }

        let smoother = DoubleExponentialSmoothing::new(self.alpha, self.beta)?.fit(series.values())?;

        Ok(TrainedHoltLinear {
            name: self.name.clone(),
            smoother,
            last_year: series.last_year(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedHoltLinear {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        check_horizon(horizon)?;

        let values = (1..=horizon)
            .map(|step| self.smoother.forecast(step).map(|v| v.max(0.0)))
            .collect::<std::result::Result<Vec<f64>, _>>()?;

        ForecastResult::new(&self.name, self.last_year, values)
    }

    fn fitted(&self) -> &[f64] {
        self.smoother.fitted()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holt_follows_trend() {
        let series = YearlySeries::new(vec![
            (2019, 10.0),
            (2020, 20.0),
            (2021, 30.0),
            (2022, 40.0),
        ])
        .unwrap();

        let forecast = HoltLinear::default().train(&series).unwrap().forecast(2).unwrap();
        assert!((forecast.get(2023).unwrap() - 50.0).abs() < 1e-6);
        assert!((forecast.get(2024).unwrap() - 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_holt_rejects_gaps() {
        let series = YearlySeries::new(vec![(2019, 10.0), (2021, 30.0)]).unwrap();
        assert!(matches!(
            HoltLinear::default().train(&series),
            Err(ForecastError::ValidationError(_))
        ));
    }

    #[test]
    fn test_holt_parameter_validation() {
        assert!(HoltLinear::new(1.5, 0.2).is_err());
        assert!(HoltLinear::new(0.5, 0.2).is_ok());
    }
}
