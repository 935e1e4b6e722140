//! Query parameters and response bodies of the dashboard API

use serde::{Deserialize, Serialize};
use trend_data::filter::YearRange;
use trend_data::metrics::RegionShare;
use trend_data::TimeSeriesRecord;

/// `GET /api/health` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiHealth {
    pub healthy: bool,
    pub version: String,
}

/// Error body returned with a non-2xx status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Inclusive year bounds; absent bounds default to the observed span
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearRangeParams {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionParams {
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastParams {
    pub horizon: Option<usize>,
    /// `linear` or `holt`
    pub model: Option<String>,
}

/// Filters of the HTML page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub region: Option<String>,
    /// Comma separated category columns, both when absent
    pub metrics: Option<String>,
    pub model: Option<String>,
}

/// `GET /api/timeseries` response
#[derive(Debug, Clone, Serialize)]
pub struct ApiTimeseries {
    /// Applied range, absent when there is no data
    pub range: Option<YearRange>,
    pub records: Vec<TimeSeriesRecord>,
}

/// `GET /api/regions` response
#[derive(Debug, Clone, Serialize)]
pub struct ApiRegions {
    pub region: String,
    /// Ranked by EV share, undefined shares last
    pub rows: Vec<RegionShare>,
}
