use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use trend_data::filter::{
    filter_by_years, filter_regions, rank_by_share, region_names, RegionSelector, YearRange,
};
use trend_data::metrics::region_shares;
use trend_data::sample::{generate_regions, generate_timeseries, SampleOptions};
use trend_data::{RegionRecord, TimeSeriesRecord};

fn sample_records() -> Vec<TimeSeriesRecord> {
    generate_timeseries(&SampleOptions::default()).unwrap()
}

#[test]
fn test_full_span_filter_is_identity() {
    let records = sample_records();
    let span = YearRange::full_span(&records).unwrap();

    assert_eq!((span.start(), span.end()), (2019, 2025));
    assert_eq!(filter_by_years(&records, &span), records);
    assert_eq!(
        filter_regions(&generate_regions(&SampleOptions::default()), &RegionSelector::All),
        generate_regions(&SampleOptions::default())
    );
}

#[test]
fn test_full_span_of_nothing() {
    assert_eq!(YearRange::full_span(&[]), None);
}

#[rstest]
#[case(2019, 2019)]
#[case(2020, 2022)]
#[case(2024, 2025)]
#[case(2025, 2025)]
fn test_year_filter_is_idempotent_and_non_destructive(#[case] start: i32, #[case] end: i32) {
    let records = sample_records();
    let before = records.clone();
    let range = YearRange::new(start, end).unwrap();

    let once = filter_by_years(&records, &range);
    let twice = filter_by_years(&once, &range);

    assert_eq!(once, twice);
    assert_eq!(records, before);
    assert!(!once.is_empty());
    assert!(once.iter().all(|r| (start..=end).contains(&r.year())));
}

#[test]
fn test_year_filter_outside_data_is_empty() {
    let records = vec![TimeSeriesRecord::new(
        NaiveDate::from_ymd_opt(2020, 5, 3).unwrap(),
        1,
        2,
    )];
    let range = YearRange::new(2021, 2023).unwrap();
    assert!(filter_by_years(&records, &range).is_empty());
}

#[rstest]
#[case("All", 3)]
#[case("Kerala", 1)]
#[case("Atlantis", 0)]
#[case("kerala", 0)]
fn test_region_selector(#[case] input: &str, #[case] expected: usize) {
    let regions = vec![
        RegionRecord::new("Goa", 0, 0),
        RegionRecord::new("Kerala", 30, 70),
        RegionRecord::new("Delhi", 9, 0),
    ];
    let selector = RegionSelector::parse(input);

    let once = filter_regions(&regions, &selector);
    assert_eq!(once.len(), expected);
    assert_eq!(filter_regions(&once, &selector), once);
}

#[test]
fn test_rank_by_share_is_stable_with_undefined_last() {
    let regions = vec![
        RegionRecord::new("Goa", 0, 0),
        RegionRecord::new("Kerala", 30, 70),
        RegionRecord::new("Delhi", 9, 0),
        RegionRecord::new("Punjab", 3, 7),
        RegionRecord::new("Lakshadweep", 0, 0),
        RegionRecord::new("Assam", 1, 1),
    ];

    let ranked: Vec<String> = rank_by_share(&region_shares(&regions))
        .into_iter()
        .map(|row| row.region.geoname)
        .collect();

    assert_eq!(
        ranked,
        vec!["Delhi", "Assam", "Kerala", "Punjab", "Goa", "Lakshadweep"]
    );
}

#[test]
fn test_region_names_sorted_unique() {
    let regions = vec![
        RegionRecord::new("Kerala", 1, 1),
        RegionRecord::new("Assam", 1, 1),
        RegionRecord::new("Goa", 1, 1),
    ];
    assert_eq!(region_names(&regions), vec!["Assam", "Goa", "Kerala"]);
}
