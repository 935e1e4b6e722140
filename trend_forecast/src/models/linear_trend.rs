//! Linear trend model over yearly totals

use crate::error::Result;
use crate::models::{
    check_horizon, year_after, ForecastModel, ForecastResult, TrainedForecastModel,
};
use crate::series::YearlySeries;
use trend_math::LinearRegression;

/// Least squares line through `(year, value)`
///
/// Years are used as the x axis directly, so a skipped year keeps its place
/// on the line. Projections are floored at zero since totals cannot be
/// negative.
#[derive(Debug, Clone)]
pub struct LinearTrend {
    /// Name of the model
    name: String,
}

/// Trained linear trend
#[derive(Debug, Clone)]
pub struct TrainedLinearTrend {
    /// Name of the model
    name: String,
    /// Fitted line
    regression: LinearRegression,
    /// Last observed year
    last_year: i32,
    /// Fitted value per observed year
    fitted: Vec<f64>,
}

impl LinearTrend {
    pub fn new() -> Self {
        Self {
            name: "Linear Trend".to_string(),
        }
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedLinearTrend;

    fn train(&self, series: &YearlySeries) -> Result<Self::Trained> {
        let points: Vec<(f64, f64)> = series
            .points()
            .into_iter()
            .map(|(year, value)| (f64::from(year), value))
            .collect();

        let regression = LinearRegression::fit(&points)?;
        let fitted = points
            .iter()
            .map(|&(x, _)| regression.predict(x))
            .collect();

        Ok(TrainedLinearTrend {
            name: self.name.clone(),
            regression,
            last_year: series.last_year(),
            fitted,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedLinearTrend {
    /// Yearly change of the fitted line
    pub fn slope(&self) -> f64 {
        self.regression.slope()
    }

    /// Goodness of fit, `None` for a flat series
    pub fn r_squared(&self) -> Option<f64> {
        self.regression.r_squared()
    }
}

impl TrainedForecastModel for TrainedLinearTrend {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        check_horizon(horizon)?;

        let values = (1..=horizon)
            .map(|step| -> Result<f64> {
                let year = year_after(self.last_year, step)?;
                Ok(self.regression.predict(f64::from(year)).max(0.0))
            })
            .collect::<Result<Vec<f64>>>()?;

        ForecastResult::new(&self.name, self.last_year, values)
    }

    fn fitted(&self) -> &[f64] {
        &self.fitted
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_trend_extends_line() {
        let series = YearlySeries::new(vec![(2019, 100.0), (2020, 150.0), (2021, 200.0)]).unwrap();
        let trained = LinearTrend::new().train(&series).unwrap();

        let forecast = trained.forecast(2).unwrap();
        assert!((forecast.get(2022).unwrap() - 250.0).abs() < 1e-6);
        assert!((forecast.get(2023).unwrap() - 300.0).abs() < 1e-6);
        assert!((trained.slope() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_projection_floors_at_zero() {
        let series = YearlySeries::new(vec![(2019, 30.0), (2020, 20.0), (2021, 10.0)]).unwrap();
        let forecast = LinearTrend::new().train(&series).unwrap().forecast(3).unwrap();

        assert!(forecast.get(2022).unwrap().abs() < 1e-6);
        assert_eq!(forecast.get(2024), Some(0.0));
    }

    #[test]
    fn test_zero_horizon_is_rejected() {
        let series = YearlySeries::new(vec![(2019, 1.0), (2020, 2.0)]).unwrap();
        let trained = LinearTrend::new().train(&series).unwrap();
        assert!(trained.forecast(0).is_err());
    }
}
