use approx::assert_relative_eq;
use rstest::rstest;
use trend_math::{cagr_pct, pct_change, round_to, share_pct, LinearRegression};

#[rstest]
#[case(10.0, 15.0, 50.0)]
#[case(100.0, 90.0, -10.0)]
#[case(40.0, 40.0, 0.0)]
#[case(3.0, 4.0, 33.333_333_333_333_336)]
fn test_pct_change_cases(#[case] previous: f64, #[case] current: f64, #[case] expected: f64) {
    assert_relative_eq!(
        pct_change(previous, current).unwrap(),
        expected,
        epsilon = 1e-9
    );
}

#[rstest]
#[case(0.0, 0.0)]
#[case(1.0, 0.0)]
#[case(0.0, 1.0)]
#[case(37.0, 63.0)]
#[case(1_000_000.0, 1.0)]
fn test_share_is_within_bounds_when_defined(#[case] part: f64, #[case] rest: f64) {
    match share_pct(part, rest) {
        Some(share) => {
            assert!((0.0..=100.0).contains(&share));
            assert!(part + rest > 0.0);
        }
        None => assert_eq!(part + rest, 0.0),
    }
}

#[test]
fn test_cagr_matches_compounding() {
    let first = 250.0;
    let rate = 0.07_f64;
    let last = first * (1.0 + rate).powi(5);

    assert_relative_eq!(cagr_pct(first, last, 5).unwrap(), 7.0, epsilon = 1e-9);
}

#[test]
fn test_rounding_is_stable_for_persisted_values() {
    let value = pct_change(3.0, 4.0).unwrap();
    let rounded = round_to(value, 2);
    assert_eq!(rounded, 33.33);
    // Rounding an already rounded value changes nothing
    assert_eq!(round_to(rounded, 2), rounded);
}

#[test]
fn test_regression_on_yearly_totals() {
    let points: Vec<(f64, f64)> = (2019..=2024)
        .map(|year| (f64::from(year), 120.0 + 15.0 * f64::from(year - 2019)))
        .collect();

    let lr = LinearRegression::fit(&points).unwrap();
    assert_relative_eq!(lr.slope(), 15.0, epsilon = 1e-6);
    assert_relative_eq!(lr.predict(2030.0), 285.0, epsilon = 1e-6);
}
