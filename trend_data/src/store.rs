//! CSV persistence for the trend tables
//!
//! Headers are normalized on read (trimmed, lowercased, spaces replaced with
//! underscores), so `Electric Cars` and `electric_cars` name the same column.
//! Columns the records do not use, such as `isPartial`, are ignored.

use crate::config::DataPaths;
use crate::{DataError, RegionRecord, Result, TimeSeriesRecord, YoYRecord};
use chrono::NaiveDate;
use csv::{Reader, ReaderBuilder, StringRecord, Trim, Writer};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::Path;

/// Normalize a column name: trim, lowercase, spaces to underscores
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Time series row as it appears on disk
#[derive(Debug, Deserialize)]
struct RawTimeSeriesRow {
    date: String,
    electric_cars: u32,
    petrol_cars: u32,
}

/// Parse `YYYY-MM-DD`, ignoring any trailing time component
fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let day = trimmed
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| DataError::InvalidRecord(format!("Invalid date '{}': {}", raw, e)))
}

/// Loader for the persisted trend tables
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load the raw time series; dates must be strictly increasing
    pub fn timeseries_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<TimeSeriesRecord>> {
        let path = path.as_ref();
        let rows: Vec<RawTimeSeriesRow> =
            Self::read_rows(path, &["date", "electric_cars", "petrol_cars"])?;

        let mut records: Vec<TimeSeriesRecord> = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let date = parse_date(&row.date)?;
            if let Some(previous) = records.last() {
                if date <= previous.date {
                    return Err(DataError::InvalidRecord(format!(
                        "row {}: date {} is not after {}",
                        index + 1,
                        date,
                        previous.date
                    )));
                }
            }
            records.push(TimeSeriesRecord::new(date, row.electric_cars, row.petrol_cars));
        }

        log::info!(
            "Loaded {} time series records from {}",
            records.len(),
            path.display()
        );
        Ok(records)
    }

    /// Load the region table; region names must be unique
    pub fn regions_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RegionRecord>> {
        let path = path.as_ref();
        let records: Vec<RegionRecord> =
            Self::read_rows(path, &["geoname", "electric_cars", "petrol_cars"])?;

        {
            let mut seen = HashSet::with_capacity(records.len());
            for record in &records {
                if !seen.insert(record.geoname.as_str()) {
                    return Err(DataError::InvalidRecord(format!(
                        "duplicate region '{}'",
                        record.geoname
                    )));
                }
            }
        }

        log::info!(
            "Loaded {} regions from {}",
            records.len(),
            path.display()
        );
        Ok(records)
    }

    /// Load the derived year-over-year table
    pub fn yoy_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<YoYRecord>> {
        let path = path.as_ref();
        let records: Vec<YoYRecord> = Self::read_rows(
            path,
            &[
                "year",
                "total_ev",
                "total_petrol",
                "ev_yoy_pct",
                "petrol_yoy_pct",
            ],
        )?;

        log::info!(
            "Loaded {} yearly records from {}",
            records.len(),
            path.display()
        );
        Ok(records)
    }

    /// Open a CSV file and install normalized headers
    fn open(path: &Path, required: &[&str]) -> Result<Reader<File>> {
        if !path.exists() {
            return Err(DataError::MissingFile(path.to_path_buf()));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(path)?;

        let headers: StringRecord = reader.headers()?.iter().map(normalize_header).collect();
        if headers.is_empty() || headers.iter().all(str::is_empty) {
            return Err(DataError::EmptyFile(path.to_path_buf()));
        }

        for column in required {
            if !headers.iter().any(|h| h == *column) {
                return Err(DataError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }

        reader.set_headers(headers);
        Ok(reader)
    }

    /// Deserialize every row, failing on an empty table
    fn read_rows<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
        let mut reader = Self::open(path, required)?;
        let rows = reader
            .deserialize::<T>()
            .collect::<std::result::Result<Vec<T>, csv::Error>>()?;

        if rows.is_empty() {
            return Err(DataError::EmptyFile(path.to_path_buf()));
        }
        Ok(rows)
    }
}

/// Writer for the trend tables
#[derive(Debug)]
pub struct DataWriter;

impl DataWriter {
    /// Persist the derived year-over-year table
    ///
    /// Growth values are written as stored in the records; undefined growth is
    /// an empty cell. The same records always produce the same bytes.
    pub fn yoy_to_csv<P: AsRef<Path>>(path: P, records: &[YoYRecord]) -> Result<()> {
        Self::write_rows(path.as_ref(), records)
    }

    /// Persist a raw time series table
    pub fn timeseries_to_csv<P: AsRef<Path>>(path: P, records: &[TimeSeriesRecord]) -> Result<()> {
        Self::write_rows(path.as_ref(), records)
    }

    /// Persist a raw region table
    pub fn regions_to_csv<P: AsRef<Path>>(path: P, records: &[RegionRecord]) -> Result<()> {
        Self::write_rows(path.as_ref(), records)
    }

    fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = Writer::from_path(path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        log::debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}

/// The three tables loaded together, read-only once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct TrendTables {
    pub timeseries: Vec<TimeSeriesRecord>,
    pub regions: Vec<RegionRecord>,
    pub yoy: Vec<YoYRecord>,
}

impl TrendTables {
    /// Load all tables from their configured locations
    pub fn load(paths: &DataPaths) -> Result<Self> {
        Ok(Self {
            timeseries: DataLoader::timeseries_from_csv(paths.timeseries_csv())?,
            regions: DataLoader::regions_from_csv(paths.regions_csv())?,
            yoy: DataLoader::yoy_from_csv(paths.yoy_csv())?,
        })
    }
}

/// Rebuild the year-over-year table from the raw time series and persist it
pub fn derive_yoy(paths: &DataPaths) -> Result<Vec<YoYRecord>> {
    let records = DataLoader::timeseries_from_csv(paths.timeseries_csv())?;
    let yoy = crate::metrics::year_over_year(&records);
    DataWriter::yoy_to_csv(paths.yoy_csv(), &yoy)?;

    log::info!(
        "Derived {} yearly rows from {} records into {}",
        yoy.len(),
        records.len(),
        paths.yoy_csv().display()
    );
    Ok(yoy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" Electric Cars "), "electric_cars");
        assert_eq!(normalize_header("geoName"), "geoname");
        assert_eq!(normalize_header("isPartial"), "ispartial");
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2019, 1, 6).unwrap();
        assert_eq!(parse_date("2019-01-06").unwrap(), expected);
        assert_eq!(parse_date("2019-01-06 00:00:00").unwrap(), expected);
        assert_eq!(parse_date("2019-01-06T00:00:00Z").unwrap(), expected);
        assert_eq!(parse_date("2019-1-6 00:00").unwrap(), expected);
        assert_eq!(parse_date(" 2019-1-6 ").unwrap(), expected);
        assert!(parse_date("06/01/2019").is_err());
        assert!(parse_date("").is_err());
    }
}
