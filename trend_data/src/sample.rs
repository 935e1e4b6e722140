//! Deterministic sample tables
//!
//! Produces data shaped like a trends export (weekly samples scaled so the
//! peak is 100, plus a state-level table) so every command can run without
//! the external API. The same seed always yields the same tables.

use crate::config::DataPaths;
use crate::store::DataWriter;
use crate::{DataError, RegionRecord, Result, TimeSeriesRecord};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Region names used by the generated region table
const REGIONS: [&str; 16] = [
    "Andhra Pradesh",
    "Assam",
    "Bihar",
    "Delhi",
    "Goa",
    "Gujarat",
    "Haryana",
    "Karnataka",
    "Kerala",
    "Lakshadweep",
    "Madhya Pradesh",
    "Maharashtra",
    "Punjab",
    "Rajasthan",
    "Tamil Nadu",
    "Telangana",
];

/// Parameters for the generated tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleOptions {
    /// RNG seed
    pub seed: u64,
    /// First weekly sample
    pub start: NaiveDate,
    /// No sample is generated after this date
    pub end: NaiveDate,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            start: NaiveDate::from_ymd_opt(2019, 1, 6).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2025, 8, 29).unwrap_or(NaiveDate::MAX),
        }
    }
}

/// Weekly interest with EV rising and petrol drifting down
pub fn generate_timeseries(options: &SampleOptions) -> Result<Vec<TimeSeriesRecord>> {
    if options.start > options.end {
        return Err(DataError::InvalidParameter(format!(
            "Sample start {} is after end {}",
            options.start, options.end
        )));
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut raw: Vec<(NaiveDate, f64, f64)> = Vec::new();
    let mut date = options.start;
    let mut week = 0u32;

    while date <= options.end {
        let t = f64::from(week);
        // Seasonal wobble so yearly totals are not perfectly linear
        let season = (t / 52.0 * std::f64::consts::TAU).sin();
        let ev = 8.0 + 0.12 * t + 3.0 * season + rng.gen_range(-2.0..2.0);
        let petrol = 45.0 - 0.03 * t + 4.0 * season + rng.gen_range(-3.0..3.0);
        raw.push((date, ev.max(0.0), petrol.max(0.0)));

        week += 1;
        date = match date.checked_add_days(Days::new(7)) {
            Some(next) => next,
            None => break,
        };
    }

    // Trends data is relative: the busiest week scores 100
    let peak = raw
        .iter()
        .map(|(_, ev, petrol)| ev.max(*petrol))
        .fold(0.0_f64, f64::max);
    let scale = if peak > 0.0 { 100.0 / peak } else { 0.0 };

    Ok(raw
        .into_iter()
        .map(|(date, ev, petrol)| {
            TimeSeriesRecord::new(date, (ev * scale).round() as u32, (petrol * scale).round() as u32)
        })
        .collect())
}

/// One row per region; Lakshadweep has no interest in either category
pub fn generate_regions(options: &SampleOptions) -> Vec<RegionRecord> {
    let mut rng = StdRng::seed_from_u64(options.seed.wrapping_add(1));

    REGIONS
        .iter()
        .map(|&name| {
            if name == "Lakshadweep" {
                return RegionRecord::new(name, 0, 0);
            }
            let ev: u32 = rng.gen_range(5..=60);
            let petrol: u32 = rng.gen_range(20..=100);
            RegionRecord::new(name, ev, petrol)
        })
        .collect()
}

/// Write both raw tables to their configured locations
pub fn write_sample(paths: &DataPaths, options: &SampleOptions) -> Result<()> {
    let timeseries = generate_timeseries(options)?;
    let regions = generate_regions(options);

    DataWriter::timeseries_to_csv(paths.timeseries_csv(), &timeseries)?;
    DataWriter::regions_to_csv(paths.regions_csv(), &regions)?;

    log::info!(
        "Generated {} weekly samples and {} regions (seed {})",
        timeseries.len(),
        regions.len(),
        options.seed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let options = SampleOptions::default();
        assert_eq!(
            generate_timeseries(&options).unwrap(),
            generate_timeseries(&options).unwrap()
        );
        assert_eq!(generate_regions(&options), generate_regions(&options));
    }

    #[test]
    fn test_timeseries_shape() {
        let records = generate_timeseries(&SampleOptions::default()).unwrap();

        assert!(records.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(records.first().unwrap().year(), 2019);
        assert_eq!(records.last().unwrap().year(), 2025);

        let peak = records
            .iter()
            .map(|r| r.electric_cars.max(r.petrol_cars))
            .max()
            .unwrap();
        assert_eq!(peak, 100);
    }

    #[test]
    fn test_rejects_inverted_dates() {
        let options = SampleOptions {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            ..SampleOptions::default()
        };
        assert!(generate_timeseries(&options).is_err());
    }
}
