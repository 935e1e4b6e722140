use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::tempdir;
use trend_data::config::AppConfig;
use trend_data::metrics::{region_shares, year_over_year, yearly_totals};
use trend_data::sample::{write_sample, SampleOptions};
use trend_data::store::{derive_yoy, DataWriter};
use trend_data::{DataError, RegionRecord, TimeSeriesRecord};
use trend_forecast::ModelKind;
use trend_report::{
    generate_report, BarChart, ForecastChart, ReportError, ShareChart, YoYChart, FORECAST_PNG,
    SHARE_PNG, TOP_STATES_PNG, TRENDS_PNG, YOY_PNG,
};

fn regions() -> Vec<RegionRecord> {
    vec![
        RegionRecord::new("Goa", 0, 0),
        RegionRecord::new("Kerala", 40, 60),
        RegionRecord::new("Delhi", 90, 10),
        RegionRecord::new("Punjab", 40, 10),
    ]
}

#[test]
fn test_top_regions_by_interest() {
    let chart = BarChart::top_regions(&regions(), 2);

    assert_eq!(
        chart.bars,
        vec![("Delhi".to_string(), 90.0), ("Kerala".to_string(), 40.0)]
    );
    assert_eq!(chart.title, "Top 2 States by EV Adoption");
}

#[test]
fn test_region_share_bars_are_ranked() {
    let chart = BarChart::region_shares(&region_shares(&regions()));

    let names: Vec<&str> = chart.bars.iter().map(|(name, _)| name.as_str()).collect();
    // Goa has no share and therefore no bar
    assert_eq!(names, vec!["Delhi", "Punjab", "Kerala"]);
    assert!((chart.bars[0].1 - 90.0).abs() < 1e-9);
}

#[test]
fn test_share_chart_skips_undefined_years() {
    let records = vec![
        TimeSeriesRecord::new(NaiveDate::from_ymd_opt(2020, 1, 5).unwrap(), 0, 0),
        TimeSeriesRecord::new(NaiveDate::from_ymd_opt(2021, 1, 3).unwrap(), 25, 75),
    ];

    let chart = ShareChart::new(&year_over_year(&records));
    assert_eq!(chart.series.points, vec![(2021, 25.0)]);
}

#[rstest]
#[case(ModelKind::Linear)]
#[case(ModelKind::Holt)]
fn test_forecast_chart_joins_observed_and_projected(#[case] model: ModelKind) {
    let dir = tempdir().unwrap();
    let config = AppConfig::default().with_base_dir(dir.path());
    write_sample(&config.paths(), &SampleOptions::default()).unwrap();
    let records =
        trend_data::DataLoader::timeseries_from_csv(config.paths().timeseries_csv()).unwrap();

    let (chart, forecast) = ForecastChart::project(&yearly_totals(&records), model, 6).unwrap();

    assert_eq!(chart.observed.points.len(), 7);
    assert_eq!(chart.projected.points.first(), chart.observed.points.last());
    assert_eq!(chart.projected.points.len(), 7);
    assert_eq!(chart.band.len(), 6);
    assert_eq!(forecast.years(), (2026..=2031).collect::<Vec<i32>>());
    assert_eq!(chart.year_span(), (2019, 2031));
}

#[test]
fn test_forecast_chart_needs_two_years() {
    let records = vec![TimeSeriesRecord::new(
        NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
        5,
        9,
    )];

    assert!(ForecastChart::project(&yearly_totals(&records), ModelKind::Linear, 6).is_err());
}

#[test]
fn test_yoy_chart_keeps_every_year() {
    let records = vec![
        TimeSeriesRecord::new(NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(), 10, 100),
        TimeSeriesRecord::new(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(), 15, 90),
    ];

    let chart = YoYChart::new(&year_over_year(&records));
    assert_eq!(chart.years, vec![2020, 2021]);
    assert_eq!(chart.ev, vec![None, Some(50.0)]);
    assert_eq!(chart.petrol, vec![None, Some(-10.0)]);
}

#[test]
fn test_report_requires_derived_table() {
    let dir = tempdir().unwrap();
    let config = AppConfig::default().with_base_dir(dir.path());
    write_sample(&config.paths(), &SampleOptions::default()).unwrap();

    let result = generate_report(&config, ModelKind::Linear);
    assert!(matches!(
        result,
        Err(ReportError::Data(DataError::MissingFile(_)))
    ));
}

#[test]
fn test_report_writes_chart_files() {
    let dir = tempdir().unwrap();
    let config = AppConfig::default().with_base_dir(dir.path());
    let paths = config.paths();
    write_sample(&paths, &SampleOptions::default()).unwrap();
    derive_yoy(&paths).unwrap();

    let outcome = generate_report(&config, ModelKind::Linear).unwrap();

    let expected: Vec<_> = [TRENDS_PNG, TOP_STATES_PNG, YOY_PNG, SHARE_PNG, FORECAST_PNG]
        .iter()
        .map(|name| paths.result_file(name))
        .collect();
    assert_eq!(outcome.written, expected);
    assert!(outcome.skipped.is_empty());
    assert!(expected.iter().all(|path| path.exists()));
}

#[test]
fn test_report_skips_forecast_for_single_year() {
    let dir = tempdir().unwrap();
    let config = AppConfig::default().with_base_dir(dir.path());
    let paths = config.paths();
    let records = vec![
        TimeSeriesRecord::new(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(), 5, 9),
        TimeSeriesRecord::new(NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(), 6, 8),
    ];
    DataWriter::timeseries_to_csv(paths.timeseries_csv(), &records).unwrap();
    DataWriter::regions_to_csv(paths.regions_csv(), &regions()).unwrap();
    derive_yoy(&paths).unwrap();

    let outcome = generate_report(&config, ModelKind::Linear).unwrap();

    assert_eq!(outcome.written.len(), 4);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].0, FORECAST_PNG);
    assert!(!paths.result_file(FORECAST_PNG).exists());
}
