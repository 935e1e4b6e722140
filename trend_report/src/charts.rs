//! Chart data prepared from the trend tables
//!
//! Nothing in here touches a drawing backend; [`crate::render`] turns these
//! values into pixels.

use chrono::NaiveDate;
use trend_data::filter::{rank_by_share, top_by_interest};
use trend_data::metrics::{forecast_input, yearly_ev_share, RegionShare, YearlyTotal};
use trend_data::{Category, RegionRecord, TimeSeriesRecord, YoYRecord};
use trend_forecast::{forecast_yearly, ForecastResult, ModelKind, YearlySeries, DEFAULT_CONFIDENCE};

/// Colour of the EV share and forecast lines
pub const SHARE_RGB: (u8, u8, u8) = (31, 119, 180);
/// Colour of the projected segment
pub const PROJECTION_RGB: (u8, u8, u8) = (255, 127, 14);

/// One labelled line
#[derive(Debug, Clone, PartialEq)]
pub struct Series<X> {
    pub label: String,
    pub rgb: (u8, u8, u8),
    pub points: Vec<(X, f64)>,
}

/// Upper bound for a value axis: 10% headroom, never below 1
fn padded_max<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let max = values.into_iter().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

/// Interest over time, one line per selected category
#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub title: String,
    pub series: Vec<Series<NaiveDate>>,
}

impl TrendChart {
    pub fn new(records: &[TimeSeriesRecord], categories: &[Category]) -> Self {
        let series = categories
            .iter()
            .map(|&category| Series {
                label: category.label().to_string(),
                rgb: category.rgb(),
                points: records
                    .iter()
                    .map(|r| (r.date, f64::from(r.value(category))))
                    .collect(),
            })
            .collect();

        Self {
            title: "Electric vs Petrol Cars - Trend (India)".to_string(),
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// First and last date on the x axis; a single date is widened by a day
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        let first = dates.clone().min()?;
        let last = dates.max()?;

        if last > first {
            Some((first, last))
        } else {
            Some((first, first.succ_opt().unwrap_or(first)))
        }
    }

    pub fn y_max(&self) -> f64 {
        padded_max(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)))
    }
}

/// Labelled vertical bars in display order
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub rgb: (u8, u8, u8),
    pub bars: Vec<(String, f64)>,
}

impl BarChart {
    /// The `n` regions with the most EV interest
    pub fn top_regions(regions: &[RegionRecord], n: usize) -> Self {
        let bars = top_by_interest(regions, n)
            .into_iter()
            .map(|r| (r.geoname, f64::from(r.electric_cars)))
            .collect();

        Self {
            title: format!("Top {} States by EV Adoption", n),
            x_desc: "State".to_string(),
            y_desc: "EV interest".to_string(),
            rgb: Category::ElectricCars.rgb(),
            bars,
        }
    }

    /// EV share per region, ranked; regions without a share have no bar
    pub fn region_shares(shares: &[RegionShare]) -> Self {
        let bars = rank_by_share(shares)
            .into_iter()
            .filter_map(|row| row.ev_share_pct.map(|share| (row.region.geoname, share)))
            .collect();

        Self {
            title: "EV Share % by State".to_string(),
            x_desc: "State".to_string(),
            y_desc: "EV Share %".to_string(),
            rgb: Category::ElectricCars.rgb(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn y_max(&self) -> f64 {
        padded_max(self.bars.iter().map(|b| b.1))
    }
}

/// Side-by-side growth bars per year
#[derive(Debug, Clone, PartialEq)]
pub struct YoYChart {
    pub title: String,
    pub years: Vec<i32>,
    pub ev: Vec<Option<f64>>,
    pub petrol: Vec<Option<f64>>,
}

impl YoYChart {
    pub fn new(yoy: &[YoYRecord]) -> Self {
        Self {
            title: "Year-over-Year Growth % - EV vs Petrol".to_string(),
            years: yoy.iter().map(|r| r.year).collect(),
            ev: yoy.iter().map(|r| r.ev_yoy_pct).collect(),
            petrol: yoy.iter().map(|r| r.petrol_yoy_pct).collect(),
        }
    }

    /// True when no year has a defined growth value
    pub fn is_empty(&self) -> bool {
        self.ev.iter().chain(&self.petrol).all(Option::is_none)
    }

    /// Value axis spanning every defined bar and zero
    pub fn y_range(&self) -> (f64, f64) {
        let defined: Vec<f64> = self.ev.iter().chain(&self.petrol).flatten().copied().collect();
        let low = defined.iter().copied().fold(0.0_f64, f64::min);
        let high = padded_max(defined.iter().copied());
        (low * 1.1, high)
    }
}

/// EV share of the combined yearly totals
#[derive(Debug, Clone, PartialEq)]
pub struct ShareChart {
    pub title: String,
    pub series: Series<i32>,
}

impl ShareChart {
    /// Years whose share is undefined are left out of the line
    pub fn new(yoy: &[YoYRecord]) -> Self {
        let points = yearly_ev_share(yoy)
            .into_iter()
            .filter_map(|(year, share)| share.map(|s| (year, s)))
            .collect();

        Self {
            title: "EV Share of Total Cars (%)".to_string(),
            series: Series {
                label: "EV share %".to_string(),
                rgb: SHARE_RGB,
                points,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.points.is_empty()
    }
}

/// Observed yearly EV totals followed by the projection
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastChart {
    pub title: String,
    pub observed: Series<i32>,
    /// Starts at the last observed point so the two lines join
    pub projected: Series<i32>,
    /// `(year, low, high)` per projected year
    pub band: Vec<(i32, f64, f64)>,
}

impl ForecastChart {
    pub fn new(series: &YearlySeries, forecast: &ForecastResult) -> Self {
        let observed = series.points();

        let mut projected: Vec<(i32, f64)> = observed.last().copied().into_iter().collect();
        projected.extend(forecast.values().iter().map(|(&year, &value)| (year, value)));

        let band = forecast
            .intervals()
            .map(|intervals| {
                intervals
                    .iter()
                    .map(|(&year, &(low, high))| (year, low, high))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            title: "EV Adoption Forecast".to_string(),
            observed: Series {
                label: "Observed".to_string(),
                rgb: Category::ElectricCars.rgb(),
                points: observed,
            },
            projected: Series {
                label: format!("Projected ({})", forecast.model()),
                rgb: PROJECTION_RGB,
                points: projected,
            },
            band,
        }
    }

    /// Fit `model` on the yearly EV totals and chart `horizon` projected years
    pub fn project(
        totals: &[YearlyTotal],
        model: ModelKind,
        horizon: usize,
    ) -> trend_forecast::Result<(Self, ForecastResult)> {
        let series = YearlySeries::new(forecast_input(totals))?;
        let forecast = forecast_yearly(model, &series, horizon, Some(DEFAULT_CONFIDENCE))?;
        Ok((Self::new(&series, &forecast), forecast))
    }

    pub fn is_empty(&self) -> bool {
        self.observed.points.is_empty()
    }

    /// First and last year on the x axis
    pub fn year_span(&self) -> (i32, i32) {
        let years = self
            .observed
            .points
            .iter()
            .chain(&self.projected.points)
            .map(|p| p.0);
        let first = years.clone().min().unwrap_or_default();
        let last = years.max().unwrap_or(first);
        (first, last)
    }

    pub fn y_max(&self) -> f64 {
        padded_max(
            self.observed
                .points
                .iter()
                .chain(&self.projected.points)
                .map(|p| p.1)
                .chain(self.band.iter().map(|b| b.2)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trend_chart_follows_selection() {
        let records = vec![
            TimeSeriesRecord::new(date(2020, 1, 5), 10, 80),
            TimeSeriesRecord::new(date(2020, 1, 12), 12, 75),
        ];

        let chart = TrendChart::new(&records, &[Category::PetrolCars]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].label, "Petrol Cars");
        assert_eq!(chart.series[0].points[1], (date(2020, 1, 12), 75.0));
        assert_eq!(chart.date_range(), Some((date(2020, 1, 5), date(2020, 1, 12))));
        assert!((chart.y_max() - 88.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_chart_single_date_is_widened() {
        let records = vec![TimeSeriesRecord::new(date(2021, 6, 6), 1, 1)];
        let chart = TrendChart::new(&records, &Category::ALL);
        assert_eq!(chart.date_range(), Some((date(2021, 6, 6), date(2021, 6, 7))));

        let empty = TrendChart::new(&[], &Category::ALL);
        assert!(empty.is_empty());
        assert_eq!(empty.date_range(), None);
    }

    #[test]
    fn test_yoy_range_includes_negative_growth() {
        let yoy = vec![
            YoYRecord {
                year: 2020,
                total_ev: 10,
                total_petrol: 100,
                ev_yoy_pct: None,
                petrol_yoy_pct: None,
            },
            YoYRecord {
                year: 2021,
                total_ev: 15,
                total_petrol: 90,
                ev_yoy_pct: Some(50.0),
                petrol_yoy_pct: Some(-10.0),
            },
        ];

        let chart = YoYChart::new(&yoy);
        assert!(!chart.is_empty());
        let (low, high) = chart.y_range();
        assert!((low + 11.0).abs() < 1e-9);
        assert!((high - 55.0).abs() < 1e-9);

        assert!(YoYChart::new(&yoy[..1]).is_empty());
    }

    #[test]
    fn test_padded_max_floor() {
        assert_eq!(padded_max(Vec::new()), 1.0);
        assert_eq!(padded_max(vec![0.0, 0.0]), 1.0);
    }
}
