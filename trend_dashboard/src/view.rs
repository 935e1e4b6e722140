//! Filtered view of the loaded tables for one request

use crate::models::PageParams;
use trend_data::filter::{filter_by_years, filter_regions, rank_by_share, RegionSelector, YearRange};
use trend_data::metrics::{region_shares, RegionShare};
use trend_data::{Category, TimeSeriesRecord, TrendTables};

/// Resolve user bounds against the years present in `records`.
///
/// `Ok(None)` when there are no records at all.
pub fn resolve_range(
    records: &[TimeSeriesRecord],
    start: Option<i32>,
    end: Option<i32>,
) -> trend_data::Result<Option<YearRange>> {
    match YearRange::full_span(records) {
        Some(span) => YearRange::from_bounds(span, start, end).map(Some),
        None => Ok(None),
    }
}

/// Region rows matching `selector`, ranked by EV share
pub fn ranked_regions(tables: &TrendTables, selector: &RegionSelector) -> Vec<RegionShare> {
    rank_by_share(&region_shares(&filter_regions(&tables.regions, selector)))
}

/// Everything the page shows for one set of filters
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Years present in the data
    pub span: Option<YearRange>,
    /// Years shown
    pub range: Option<YearRange>,
    pub selector: RegionSelector,
    pub categories: Vec<Category>,
    pub records: Vec<TimeSeriesRecord>,
    pub regions: Vec<RegionShare>,
    /// Problems with the filters, shown above the charts
    pub notices: Vec<String>,
}

impl DashboardView {
    pub fn build(tables: &TrendTables, params: &PageParams) -> Self {
        let span = YearRange::full_span(&tables.timeseries);
        let mut notices = Vec::new();

        let range = match resolve_range(&tables.timeseries, params.start_year, params.end_year) {
            Ok(range) => range,
            Err(err) => {
                notices.push(format!("{}; showing every year", err));
                span
            }
        };

        let records = match range {
            Some(range) => filter_by_years(&tables.timeseries, &range),
            None => Vec::new(),
        };
        if let (Some(range), true) = (range, records.is_empty()) {
            notices.push(format!("No records between {}", range));
        }

        let selector = params
            .region
            .as_deref()
            .map(RegionSelector::parse)
            .unwrap_or_default();
        let regions = ranked_regions(tables, &selector);
        if regions.is_empty() {
            if let RegionSelector::Only(name) = &selector {
                notices.push(format!("No data for region '{}'", name));
            }
        }

        let categories = Category::parse_list(params.metrics.as_deref().unwrap_or_default());

        Self {
            span,
            range,
            selector,
            categories,
            records,
            regions,
            notices,
        }
    }
}
