//! Shared value types: ordinal tiers and guarded numeric helpers.

mod tiers;

use chrono::{NaiveDate, TimeDelta};

pub use tiers::{Controllability, ImpactTier, SeverityTier, TimeHorizon, TrendDirection};

/// Clamp into `[0, 1]`. NaN collapses to the lower bound.
pub fn clamp_unit(value: f64) -> f64 {
    clamp_range(value, 0.0, 1.0)
}

/// Clamp into `[min, max]`. NaN collapses to `min`.
pub fn clamp_range(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// `numerator / denominator`, or 0 when the quotient is undefined.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// `date` shifted by `days`, pinned to the calendar's ends instead of overflowing.
pub fn add_days_saturating(date: NaiveDate, days: i64) -> NaiveDate {
    let bound = if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX };
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(0.42), 0.42);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
    }

    #[test]
    fn test_clamp_range_bounds() {
        assert_eq!(clamp_range(12.0, 1.0, 10.0), 10.0);
        assert_eq!(clamp_range(f64::NAN, 1.0, 10.0), 1.0);
    }

    #[test]
    fn test_safe_ratio_guards_zero_and_infinity() {
        assert_eq!(safe_ratio(5.0, 0.0), 0.0);
        assert_eq!(safe_ratio(5.0, f64::INFINITY), 0.0);
        assert_eq!(safe_ratio(3.0, 4.0), 0.75);
    }

    #[test]
    fn test_add_days_saturates_at_calendar_ends() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            add_days_saturating(day, 7),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
        );
        assert_eq!(add_days_saturating(day, 800_000_000), NaiveDate::MAX);
        assert_eq!(add_days_saturating(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(add_days_saturating(day, i64::MAX), NaiveDate::MAX);
        assert_eq!(add_days_saturating(day, i64::MIN), NaiveDate::MIN);
    }
}
