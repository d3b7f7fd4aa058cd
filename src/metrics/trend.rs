//! Two-window trend signal and horizon projection.
//!
//! The trend is a plain delta between the mean of the last three points and
//! the mean of the three points before them. Severity and confidence
//! thresholds downstream are tuned to this exact signal, so it is not a
//! regression and must not become one.

use crate::core::{clamp_unit, TimeHorizon, TrendDirection};
use crate::metrics::aggregate::{mean, variance};

pub const TREND_WINDOW: usize = 3;
pub const TREND_DEADBAND: f64 = 0.05;

/// `avg(recent) - avg(older)` over the tail of `series`.
pub fn trend<T>(series: &[T], select: impl Fn(&T) -> f64) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }

    let recent_start = series.len().saturating_sub(TREND_WINDOW);
    let older_start = recent_start.saturating_sub(TREND_WINDOW);

    let recent: Vec<f64> = series[recent_start..].iter().map(&select).collect();
    let older: Vec<f64> = series[older_start..recent_start].iter().map(&select).collect();

    if recent.is_empty() || older.is_empty() {
        return 0.0;
    }

    mean(&recent) - mean(&older)
}

pub fn classify_trend(delta: f64) -> TrendDirection {
    if delta > TREND_DEADBAND {
        TrendDirection::Improving
    } else if delta < -TREND_DEADBAND {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

pub fn projection_multiplier(horizon: TimeHorizon) -> f64 {
    match horizon {
        TimeHorizon::OneWeek => 0.02,
        TimeHorizon::OneMonth => 0.08,
        TimeHorizon::ThreeMonths => 0.25,
        TimeHorizon::SixMonths => 0.5,
        TimeHorizon::OneYear => 1.0,
    }
}

/// Extend `current` by the scaled trend and clamp into `[0, 1]`.
pub fn project_forward(current: f64, trend_delta: f64, horizon: TimeHorizon) -> f64 {
    clamp_unit(current + trend_delta * projection_multiplier(horizon))
}

/// Confidence in a projection from the spread of its history.
pub fn confidence_from_variance(series: &[f64]) -> f64 {
    if series.len() < 3 {
        return 0.5;
    }
    (1.0 - variance(series)).clamp(0.5, 1.0)
}
