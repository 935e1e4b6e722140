//! Yearly series handed to the forecasting models

use crate::error::{ForecastError, Result};
use trend_data::metrics::{forecast_input, YearlyTotal};

/// Yearly observations, strictly increasing by year, at least two of them
#[derive(Debug, Clone, PartialEq)]
pub struct YearlySeries {
    years: Vec<i32>,
    values: Vec<f64>,
}

impl YearlySeries {
    /// Validate and wrap `(year, value)` pairs
    pub fn new(points: Vec<(i32, f64)>) -> Result<Self> {
        if points.len() < 2 {
            return Err(ForecastError::InsufficientData(format!(
                "Need at least 2 years of data to forecast, got {}",
                points.len()
            )));
        }

        if let Some(pair) = points.windows(2).find(|pair| pair[0].0 >= pair[1].0) {
            return Err(ForecastError::ValidationError(format!(
                "Years must be strictly increasing: {} followed by {}",
                pair[0].0, pair[1].0
            )));
        }

        if let Some((year, _)) = points.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ForecastError::ValidationError(format!(
                "Value for {} is not a finite number",
                year
            )));
        }

        let (years, values) = points.into_iter().unzip();
        Ok(Self { years, values })
    }

    /// Build the EV series from yearly totals
    pub fn from_totals(totals: &[YearlyTotal]) -> Result<Self> {
        Self::new(forecast_input(totals))
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(year, value)` pairs in order
    pub fn points(&self) -> Vec<(i32, f64)> {
        self.years
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .collect()
    }

    pub fn first_year(&self) -> i32 {
        self.years[0]
    }

    pub fn last_year(&self) -> i32 {
        self.years[self.years.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Always false; a series holds at least two points
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// True when no year is skipped between first and last
    pub fn is_consecutive(&self) -> bool {
        self.years.windows(2).all(|pair| pair[1] == pair[0] + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_validation() {
        assert!(matches!(
            YearlySeries::new(vec![(2020, 1.0)]),
            Err(ForecastError::InsufficientData(_))
        ));
        assert!(matches!(
            YearlySeries::new(vec![(2021, 1.0), (2020, 2.0)]),
            Err(ForecastError::ValidationError(_))
        ));
        assert!(matches!(
            YearlySeries::new(vec![(2020, 1.0), (2021, f64::NAN)]),
            Err(ForecastError::ValidationError(_))
        ));
    }

    #[test]
    fn test_series_accessors() {
        let series = YearlySeries::new(vec![(2019, 5.0), (2020, 6.0), (2022, 9.0)]).unwrap();
        assert_eq!(series.first_year(), 2019);
        assert_eq!(series.last_year(), 2022);
        assert_eq!(series.len(), 3);
        assert!(!series.is_consecutive());
        assert_eq!(series.points()[2], (2022, 9.0));
    }
}
