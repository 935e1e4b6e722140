//! Filters and orderings applied by the presentation layer
//!
//! Filters never touch the tables they are given; they return new vectors.
//! Applying the same filter to its own output returns the output unchanged.

use crate::metrics::RegionShare;
use crate::{DataError, RegionRecord, Result, TimeSeriesRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Sentinel region selector value meaning "every region"
pub const ALL_REGIONS: &str = "All";

/// Inclusive range of calendar years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// Create a range; `start` must not be after `end`
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(DataError::InvalidParameter(format!(
                "Year range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The span of years present in the records, `None` for no records
    pub fn full_span(records: &[TimeSeriesRecord]) -> Option<Self> {
        let start = records.iter().map(TimeSeriesRecord::year).min()?;
        let end = records.iter().map(TimeSeriesRecord::year).max()?;
        Some(Self { start, end })
    }

    /// Build a range from optional user bounds, filling absent ones from `span`.
    ///
    /// Given bounds are kept as they are, so a range past the data selects
    /// nothing. A filled bound never lands on the wrong side of a given one.
    pub fn from_bounds(span: YearRange, start: Option<i32>, end: Option<i32>) -> Result<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            (Some(start), None) => Self::new(start, span.end.max(start)),
            (None, Some(end)) => Self::new(span.start.min(end), end),
            (None, None) => Ok(span),
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Region filter chosen in the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegionSelector {
    /// No filtering
    #[default]
    All,
    /// Exactly one region, matched by name
    Only(String),
}

impl RegionSelector {
    /// `"All"` (any case, surrounding whitespace ignored) selects every region
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_REGIONS) {
            RegionSelector::All
        } else {
            RegionSelector::Only(trimmed.to_string())
        }
    }

    pub fn matches(&self, geoname: &str) -> bool {
        match self {
            RegionSelector::All => true,
            RegionSelector::Only(name) => name == geoname,
        }
    }
}

impl fmt::Display for RegionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionSelector::All => f.write_str(ALL_REGIONS),
            RegionSelector::Only(name) => f.write_str(name),
        }
    }
}

/// Records whose year falls within `range`
pub fn filter_by_years(records: &[TimeSeriesRecord], range: &YearRange) -> Vec<TimeSeriesRecord> {
    records
        .iter()
        .filter(|record| range.contains(record.year()))
        .copied()
        .collect()
}

/// Regions matching `selector`; an unknown name yields an empty result
pub fn filter_regions(regions: &[RegionRecord], selector: &RegionSelector) -> Vec<RegionRecord> {
    regions
        .iter()
        .filter(|region| selector.matches(&region.geoname))
        .cloned()
        .collect()
}

/// Order rows by EV share, highest first.
///
/// The sort is stable, so ties keep their input order. Rows without a defined
/// share go last.
pub fn rank_by_share(rows: &[RegionShare]) -> Vec<RegionShare> {
    let mut ranked = rows.to_vec();
    ranked.sort_by(|a, b| match (a.ev_share_pct, b.ev_share_pct) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked
}

/// The `n` regions with the most EV interest, highest first (stable)
pub fn top_by_interest(regions: &[RegionRecord], n: usize) -> Vec<RegionRecord> {
    let mut ranked = regions.to_vec();
    ranked.sort_by(|a, b| b.electric_cars.cmp(&a.electric_cars));
    ranked.truncate(n);
    ranked
}

/// Sorted, de-duplicated region names for the selector widget
pub fn region_names(regions: &[RegionRecord]) -> Vec<String> {
    let mut names: Vec<String> = regions.iter().map(|r| r.geoname.clone()).collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_parse() {
        assert_eq!(RegionSelector::parse("All"), RegionSelector::All);
        assert_eq!(RegionSelector::parse(" all "), RegionSelector::All);
        assert_eq!(RegionSelector::parse(""), RegionSelector::All);
        assert_eq!(
            RegionSelector::parse("Kerala"),
            RegionSelector::Only("Kerala".to_string())
        );
        assert_eq!(RegionSelector::parse("Kerala").to_string(), "Kerala");
    }

    #[test]
    fn test_year_range_validation() {
        assert!(YearRange::new(2021, 2020).is_err());
        let range = YearRange::new(2020, 2021).unwrap();
        assert!(range.contains(2020));
        assert!(range.contains(2021));
        assert!(!range.contains(2022));
        assert_eq!(range.to_string(), "2020-2021");
    }

    #[test]
    fn test_from_bounds_fills_missing_from_span() {
        let span = YearRange::new(2019, 2025).unwrap();
        assert_eq!(YearRange::from_bounds(span, None, None).unwrap(), span);

        let range = YearRange::from_bounds(span, Some(2021), None).unwrap();
        assert_eq!((range.start(), range.end()), (2021, 2025));

        let range = YearRange::from_bounds(span, Some(2010), None).unwrap();
        assert_eq!((range.start(), range.end()), (2010, 2025));

        let range = YearRange::from_bounds(span, Some(2030), Some(2035)).unwrap();
        assert_eq!((range.start(), range.end()), (2030, 2035));

        let range = YearRange::from_bounds(span, Some(2030), None).unwrap();
        assert_eq!((range.start(), range.end()), (2030, 2030));

        let range = YearRange::from_bounds(span, None, Some(2010)).unwrap();
        assert_eq!((range.start(), range.end()), (2010, 2010));

        assert!(YearRange::from_bounds(span, Some(2024), Some(2020)).is_err());
    }

    #[test]
    fn test_top_by_interest_is_stable() {
        let regions = vec![
            RegionRecord::new("A", 10, 0),
            RegionRecord::new("B", 30, 0),
            RegionRecord::new("C", 10, 0),
        ];
        let names: Vec<String> = top_by_interest(&regions, 2)
            .into_iter()
            .map(|r| r.geoname)
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
