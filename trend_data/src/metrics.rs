//! Derived metrics built from the raw tables
//!
//! Everything here is a pure function of its inputs. The year-over-year table
//! is rebuilt from scratch on every run; its persisted copy is only a cache.

use crate::{RegionRecord, TimeSeriesRecord, YoYRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use trend_math::{cagr_pct, pct_change, round_to, share_pct};

/// Decimal places kept for persisted percentages
pub const PCT_DECIMALS: u32 = 2;

/// Sums of both categories over one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearlyTotal {
    pub year: i32,
    pub total_ev: u64,
    pub total_petrol: u64,
    /// Number of records that fell in the year
    pub samples: usize,
}

/// A region with its EV share attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionShare {
    #[serde(flatten)]
    pub region: RegionRecord,
    /// `None` when the region has no interest in either category
    pub ev_share_pct: Option<f64>,
}

impl From<RegionRecord> for RegionShare {
    fn from(region: RegionRecord) -> Self {
        let ev_share_pct = region.ev_share_pct();
        Self {
            region,
            ev_share_pct,
        }
    }
}

/// Headline figures shown above the charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_ev: u64,
    pub total_petrol: u64,
    /// EV share of the most recent year in the year-over-year table
    pub latest_ev_share_pct: Option<f64>,
    pub ev_cagr_pct: Option<f64>,
    pub top_region: Option<String>,
}

/// Sum both categories per calendar year, ascending by year
pub fn yearly_totals(records: &[TimeSeriesRecord]) -> Vec<YearlyTotal> {
    let mut by_year: BTreeMap<i32, YearlyTotal> = BTreeMap::new();

    for record in records {
        let year = record.year();
        let entry = by_year.entry(year).or_insert(YearlyTotal {
            year,
            total_ev: 0,
            total_petrol: 0,
            samples: 0,
        });
        entry.total_ev += u64::from(record.electric_cars);
        entry.total_petrol += u64::from(record.petrol_cars);
        entry.samples += 1;
    }

    by_year.into_values().collect()
}

/// Attach growth against the preceding year to a run of yearly totals
pub fn growth_from_totals(totals: &[YearlyTotal]) -> Vec<YoYRecord> {
    let mut out: Vec<YoYRecord> = Vec::with_capacity(totals.len());
    let mut previous: Option<&YearlyTotal> = None;

    for total in totals {
        let (ev_yoy_pct, petrol_yoy_pct) = match previous {
            Some(prev) => (
                growth_pct(prev.total_ev, total.total_ev),
                growth_pct(prev.total_petrol, total.total_petrol),
            ),
            None => (None, None),
        };

        out.push(YoYRecord {
            year: total.year,
            total_ev: total.total_ev,
            total_petrol: total.total_petrol,
            ev_yoy_pct,
            petrol_yoy_pct,
        });
        previous = Some(total);
    }

    out
}

/// Year-over-year table for the whole time series
pub fn year_over_year(records: &[TimeSeriesRecord]) -> Vec<YoYRecord> {
    growth_from_totals(&yearly_totals(records))
}

fn growth_pct(previous: u64, current: u64) -> Option<f64> {
    pct_change(previous as f64, current as f64).map(|pct| round_to(pct, PCT_DECIMALS))
}

/// EV share per region, in input order
pub fn region_shares(regions: &[RegionRecord]) -> Vec<RegionShare> {
    regions.iter().cloned().map(RegionShare::from).collect()
}

/// EV share of the combined totals, per year
pub fn yearly_ev_share(yoy: &[YoYRecord]) -> Vec<(i32, Option<f64>)> {
    yoy.iter()
        .map(|record| (record.year, record.ev_share_pct()))
        .collect()
}

/// Compound annual growth of EV interest.
///
/// Only years with at least `min_samples` records take part, so a year with
/// a single sample cannot anchor either end of the span. Growth is compounded
/// over `last_year - first_year` periods. `None` when fewer than two years
/// qualify or the first qualifying total is zero.
pub fn ev_cagr(totals: &[YearlyTotal], min_samples: usize) -> Option<f64> {
    let mut complete = totals.iter().filter(|t| t.samples >= min_samples);
    let first = complete.next()?;
    let last = complete.last()?;

    let periods = u32::try_from(last.year - first.year).ok()?;
    cagr_pct(first.total_ev as f64, last.total_ev as f64, periods)
}

/// Region with the highest defined EV share; the earlier row wins a tie
pub fn top_region(shares: &[RegionShare]) -> Option<&RegionShare> {
    let mut best: Option<(&RegionShare, f64)> = None;

    for row in shares {
        if let Some(share) = row.ev_share_pct {
            match best {
                Some((_, best_share)) if share <= best_share => {}
                _ => best = Some((row, share)),
            }
        }
    }

    best.map(|(row, _)| row)
}

/// `(year, total_ev)` pairs handed to the forecasting collaborator
pub fn forecast_input(totals: &[YearlyTotal]) -> Vec<(i32, f64)> {
    totals
        .iter()
        .map(|total| (total.year, total.total_ev as f64))
        .collect()
}

/// Headline figures for the dashboard and report
pub fn summarize(
    records: &[TimeSeriesRecord],
    regions: &[RegionRecord],
    yoy: &[YoYRecord],
    min_samples: usize,
) -> Summary {
    let total_ev = records.iter().map(|r| u64::from(r.electric_cars)).sum();
    let total_petrol = records.iter().map(|r| u64::from(r.petrol_cars)).sum();

    let latest_ev_share_pct = yoy
        .last()
        .and_then(|latest| share_pct(latest.total_ev as f64, latest.total_petrol as f64))
        .map(|share| round_to(share, PCT_DECIMALS));

    let shares = region_shares(regions);
    let top_region = top_region(&shares).map(|row| row.region.geoname.clone());

    Summary {
        total_ev,
        total_petrol,
        latest_ev_share_pct,
        ev_cagr_pct: ev_cagr(&yearly_totals(records), min_samples),
        top_region,
    }
}
