//! Growth and share calculations
//!
//! Contains the ratio helpers shared by the derived-metrics builder:
//! - Percentage change between two consecutive totals
//! - Share of one category in a two-category total
//! - Compound annual growth rate
//! - Decimal rounding used before persisting derived values

/// Percentage change from `previous` to `current`.
///
/// Returns `None` when `previous` is zero, since growth from nothing has no
/// meaningful percentage.
///
/// # Examples
///
/// ```
/// use trend_math::pct_change;
///
/// assert_eq!(pct_change(10.0, 15.0), Some(50.0));
/// assert_eq!(pct_change(0.0, 15.0), None);
/// ```
pub fn pct_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }

    Some(100.0 * (current - previous) / previous)
}

/// Share of `part` in `part + rest`, as a percentage.
///
/// Returns `None` when both inputs are zero.
///
/// # Examples
///
/// ```
/// use trend_math::share_pct;
///
/// assert_eq!(share_pct(25.0, 75.0), Some(25.0));
/// assert_eq!(share_pct(0.0, 0.0), None);
/// ```
pub fn share_pct(part: f64, rest: f64) -> Option<f64> {
    let total = part + rest;
    if total == 0.0 {
        return None;
    }

    Some(100.0 * part / total)
}

/// Compound growth rate per period, as a percentage.
///
/// `periods` is the number of compounding steps between `first` and `last`
/// (for yearly totals, `last_year - first_year`).
///
/// Returns `None` when there is no period to compound over, or when the
/// starting value is not strictly positive.
pub fn cagr_pct(first: f64, last: f64, periods: u32) -> Option<f64> {
    if periods == 0 || first <= 0.0 || last < 0.0 {
        return None;
    }

    let ratio = last / first;
    Some((ratio.powf(1.0 / f64::from(periods)) - 1.0) * 100.0)
}

/// Round `value` to `decimals` decimal places, halves away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_change() {
        assert!((pct_change(10.0, 15.0).unwrap() - 50.0).abs() < 1e-9);
        assert!((pct_change(100.0, 90.0).unwrap() + 10.0).abs() < 1e-9);
        assert_eq!(pct_change(0.0, 0.0), None);
        assert_eq!(pct_change(0.0, 42.0), None);
    }

    #[test]
    fn test_share_pct_bounds() {
        assert_eq!(share_pct(0.0, 10.0), Some(0.0));
        assert_eq!(share_pct(10.0, 0.0), Some(100.0));
        assert_eq!(share_pct(0.0, 0.0), None);
    }

    #[test]
    fn test_cagr_pct() {
        // 100 -> 121 over two years is 10% per year
        let cagr = cagr_pct(100.0, 121.0, 2).unwrap();
        assert!((cagr - 10.0).abs() < 1e-9);

        assert_eq!(cagr_pct(0.0, 121.0, 2), None);
        assert_eq!(cagr_pct(100.0, 121.0, 0), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333_333, 2), 33.33);
        assert_eq!(round_to(-10.0, 2), -10.0);
        assert_eq!(round_to(2.675_1, 2), 2.68);
        assert_eq!(round_to(-0.125_1, 2), -0.13);
    }
}
