//! # EV Trends
//!
//! `ev_trends` compares search interest in "Electric Cars" and "Petrol Cars"
//! over time and by region. It ties the workspace crates together:
//!
//! - [`math`]: growth, share and CAGR helpers plus the regression and
//!   smoothing used for forecasting
//! - [`data`]: records, CSV store, configuration, derived metrics, filters
//!   and sample data
//! - [`forecast`]: yearly projection models
//! - [`report`]: static chart rendering
//! - [`dashboard`]: interactive web dashboard
//!
//! ## Example
//!
//! ```
//! use ev_trends::data::metrics::year_over_year;
//! use ev_trends::data::TimeSeriesRecord;
//! use chrono::NaiveDate;
//!
//! let records = vec![
//!     TimeSeriesRecord::new(NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(), 10, 100),
//!     TimeSeriesRecord::new(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(), 15, 90),
//! ];
//!
//! let yoy = year_over_year(&records);
//! assert_eq!(yoy[0].ev_yoy_pct, None);
//! assert_eq!(yoy[1].ev_yoy_pct, Some(50.0));
//! assert_eq!(yoy[1].petrol_yoy_pct, Some(-10.0));
//! ```

use std::path::{Path, PathBuf};

pub use trend_dashboard as dashboard;
pub use trend_data as data;
pub use trend_forecast as forecast;
pub use trend_math as math;
pub use trend_report as report;

pub use trend_data::{AppConfig, DataError, DataPaths};

/// Resolve the run configuration.
///
/// Reads `config_file` when given (defaults otherwise) and applies the
/// command line `base_dir` on top.
pub fn load_config(config_file: Option<&Path>, base_dir: Option<PathBuf>) -> data::Result<AppConfig> {
    let config = match config_file {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    let config = match base_dir {
        Some(dir) => config.with_base_dir(dir),
        None => config,
    };

    config.validate()?;
    log::debug!("Using base directory {}", config.base_dir.display());
    Ok(config)
}
