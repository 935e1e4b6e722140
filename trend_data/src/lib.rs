//! # Trend Data
//!
//! `trend_data` holds the records behind the EV vs petrol comparison, reads
//! and writes them as CSV, and turns the raw series into the aggregates the
//! charts consume.
//!
//! ## Tables
//!
//! - **Time series**: one [`TimeSeriesRecord`] per sampling interval, strictly
//!   increasing by date
//! - **Regions**: one [`RegionRecord`] per region name
//! - **Year over year**: one [`YoYRecord`] per year, derived from the time
//!   series and persisted as a cache
//!
//! ## Usage Example
//!
//! ```no_run
//! use trend_data::config::AppConfig;
//! use trend_data::metrics::year_over_year;
//! use trend_data::store::{DataLoader, DataWriter};
//!
//! let config = AppConfig::default().with_base_dir("/srv/ev-trends");
//! let paths = config.paths();
//!
//! let records = DataLoader::timeseries_from_csv(paths.timeseries_csv()).unwrap();
//! let yoy = year_over_year(&records);
//! DataWriter::yoy_to_csv(paths.yoy_csv(), &yoy).unwrap();
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub mod config;
pub mod filter;
pub mod metrics;
pub mod sample;
pub mod store;

pub use config::{AppConfig, DataPaths};
pub use filter::{RegionSelector, YearRange};
pub use metrics::{RegionShare, Summary, YearlyTotal};
pub use store::{derive_yoy, DataLoader, DataWriter, TrendTables};

/// Errors that can occur while loading or deriving trend data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Input file has no data rows: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("Column '{column}' missing from {}", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for trend data operations
pub type Result<T> = std::result::Result<T, DataError>;

impl From<toml::de::Error> for DataError {
    fn from(err: toml::de::Error) -> Self {
        DataError::Config(err.to_string())
    }
}

/// One of the two keyword categories being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// "Electric Cars" search interest
    ElectricCars,
    /// "Petrol Cars" search interest
    PetrolCars,
}

impl Category {
    /// Both categories, in display order
    pub const ALL: [Category; 2] = [Category::ElectricCars, Category::PetrolCars];

    /// Normalized CSV column name
    pub fn column(self) -> &'static str {
        match self {
            Category::ElectricCars => "electric_cars",
            Category::PetrolCars => "petrol_cars",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            Category::ElectricCars => "Electric Cars",
            Category::PetrolCars => "Petrol Cars",
        }
    }

    /// Chart colour as RGB
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Category::ElectricCars => (0, 128, 0),
            Category::PetrolCars => (255, 0, 0),
        }
    }

    /// Parse a comma separated list of category columns.
    ///
    /// Unknown names are skipped; an empty result means both categories.
    pub fn parse_list(input: &str) -> Vec<Category> {
        let mut selected: Vec<Category> = Vec::new();
        for category in input.split(',').filter_map(|s| s.parse::<Category>().ok()) {
            if !selected.contains(&category) {
                selected.push(category);
            }
        }

        if selected.is_empty() {
            Category::ALL.to_vec()
        } else {
            selected
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match store::normalize_header(s).as_str() {
            "electric_cars" => Ok(Category::ElectricCars),
            "petrol_cars" => Ok(Category::PetrolCars),
            other => Err(DataError::InvalidParameter(format!(
                "Unknown category: {}",
                other
            ))),
        }
    }
}

/// Search interest for both categories at one sampling interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesRecord {
    /// Start of the sampling interval
    pub date: NaiveDate,
    /// Interest score for "Electric Cars"
    pub electric_cars: u32,
    /// Interest score for "Petrol Cars"
    pub petrol_cars: u32,
}

impl TimeSeriesRecord {
    pub fn new(date: NaiveDate, electric_cars: u32, petrol_cars: u32) -> Self {
        Self {
            date,
            electric_cars,
            petrol_cars,
        }
    }

    /// Calendar year the record falls in
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Interest score for the given category
    pub fn value(&self, category: Category) -> u32 {
        match category {
            Category::ElectricCars => self.electric_cars,
            Category::PetrolCars => self.petrol_cars,
        }
    }
}

/// Search interest for both categories in one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    /// Region name, unique within a table
    pub geoname: String,
    /// Interest score for "Electric Cars"
    pub electric_cars: u32,
    /// Interest score for "Petrol Cars"
    pub petrol_cars: u32,
}

impl RegionRecord {
    pub fn new(geoname: impl Into<String>, electric_cars: u32, petrol_cars: u32) -> Self {
        Self {
            geoname: geoname.into(),
            electric_cars,
            petrol_cars,
        }
    }

    /// EV share of the region's combined interest, `None` when both are zero
    pub fn ev_share_pct(&self) -> Option<f64> {
        trend_math::share_pct(f64::from(self.electric_cars), f64::from(self.petrol_cars))
    }
}

/// Yearly totals with growth relative to the preceding year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoYRecord {
    pub year: i32,
    pub total_ev: u64,
    pub total_petrol: u64,
    /// Absent for the first year and after a zero total
    pub ev_yoy_pct: Option<f64>,
    /// Absent for the first year and after a zero total
    pub petrol_yoy_pct: Option<f64>,
}

impl YoYRecord {
    /// EV share of the year's combined totals
    pub fn ev_share_pct(&self) -> Option<f64> {
        trend_math::share_pct(self.total_ev as f64, self.total_petrol as f64)
    }
}
