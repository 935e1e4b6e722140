use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};
use trend_data::config::DataPaths;
use trend_data::metrics::year_over_year;
use trend_data::sample::{write_sample, SampleOptions};
use trend_data::store::{derive_yoy, DataLoader, DataWriter, TrendTables};
use trend_data::{DataError, RegionRecord, TimeSeriesRecord, YoYRecord};

fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_timeseries_headers_are_normalized() {
    // Layout of a raw trends export: title-cased headers and an extra column
    let file = csv_file(&[
        "date, Electric Cars ,Petrol Cars,isPartial",
        "2019-01-06,5,40,False",
        "2019-01-13,6,38,False",
        "2019-01-20 00:00:00,7,41,True",
    ]);

    let records = DataLoader::timeseries_from_csv(file.path()).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(
        records[2],
        TimeSeriesRecord::new(NaiveDate::from_ymd_opt(2019, 1, 20).unwrap(), 7, 41)
    );
}

#[test]
fn test_timeseries_rejects_out_of_order_dates() {
    let file = csv_file(&[
        "date,electric_cars,petrol_cars",
        "2019-01-13,6,38",
        "2019-01-13,7,41",
    ]);

    let result = DataLoader::timeseries_from_csv(file.path());
    assert!(matches!(result, Err(DataError::InvalidRecord(_))));
}

#[test]
fn test_timeseries_rejects_negative_scores() {
    let file = csv_file(&["date,electric_cars,petrol_cars", "2019-01-13,-6,38"]);

    let result = DataLoader::timeseries_from_csv(file.path());
    assert!(matches!(result, Err(DataError::Csv(_))));
}

#[test]
fn test_missing_and_empty_files_are_errors() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.csv");
    assert!(matches!(
        DataLoader::timeseries_from_csv(&missing),
        Err(DataError::MissingFile(_))
    ));

    let empty = csv_file(&[]);
    assert!(matches!(
        DataLoader::regions_from_csv(empty.path()),
        Err(DataError::EmptyFile(_))
    ));

    let header_only = csv_file(&["geoName,Electric Cars,Petrol Cars"]);
    assert!(matches!(
        DataLoader::regions_from_csv(header_only.path()),
        Err(DataError::EmptyFile(_))
    ));
}

#[test]
fn test_missing_column_is_reported() {
    let file = csv_file(&["geoName,Electric Cars", "Goa,3"]);

    match DataLoader::regions_from_csv(file.path()) {
        Err(DataError::MissingColumn { column, .. }) => assert_eq!(column, "petrol_cars"),
        other => panic!("Expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn test_regions_load_and_reject_duplicates() {
    let file = csv_file(&["geoName,Electric Cars,Petrol Cars", "Goa,0,0", "Kerala,30,70"]);
    let regions = DataLoader::regions_from_csv(file.path()).unwrap();
    assert_eq!(
        regions,
        vec![
            RegionRecord::new("Goa", 0, 0),
            RegionRecord::new("Kerala", 30, 70)
        ]
    );

    let duplicate = csv_file(&["geoname,electric_cars,petrol_cars", "Goa,1,2", "Goa,3,4"]);
    assert!(matches!(
        DataLoader::regions_from_csv(duplicate.path()),
        Err(DataError::InvalidRecord(_))
    ));
}

#[test]
fn test_yoy_csv_is_reproducible() {
    let dir = tempdir().unwrap();
    let records = vec![
        TimeSeriesRecord::new(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(), 10, 100),
        TimeSeriesRecord::new(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(), 15, 90),
        TimeSeriesRecord::new(NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(), 20, 60),
    ];
    let yoy = year_over_year(&records);

    let first = dir.path().join("first.csv");
    let second = dir.path().join("nested").join("second.csv");
    DataWriter::yoy_to_csv(&first, &yoy).unwrap();
    DataWriter::yoy_to_csv(&second, &year_over_year(&records)).unwrap();

    let bytes = fs::read(&first).unwrap();
    assert_eq!(bytes, fs::read(&second).unwrap());
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "year,total_ev,total_petrol,ev_yoy_pct,petrol_yoy_pct\n\
         2020,10,100,,\n\
         2021,15,90,50.0,-10.0\n\
         2022,20,60,33.33,-33.33\n"
    );

    let loaded: Vec<YoYRecord> = DataLoader::yoy_from_csv(&first).unwrap();
    assert_eq!(loaded, yoy);
}

#[test]
fn test_tables_load_from_sample_directory() {
    let dir = tempdir().unwrap();
    let paths = DataPaths::new(dir.path());

    write_sample(&paths, &SampleOptions::default()).unwrap();
    let derived = derive_yoy(&paths).unwrap();

    let tables = TrendTables::load(&paths).unwrap();
    assert_eq!(tables.yoy, derived);
    assert_eq!(tables.yoy, year_over_year(&tables.timeseries));
    assert_eq!(tables.yoy.first().unwrap().year, 2019);
    assert_eq!(tables.yoy.last().unwrap().year, 2025);
    assert!(tables
        .regions
        .iter()
        .any(|r| r.geoname == "Lakshadweep" && r.ev_share_pct().is_none()));
}
