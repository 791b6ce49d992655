use crate::core::{IntradayPoint, TrendPoint};

/// Minimum number of points (and of finite `y` values) a trend series needs.
pub const MIN_TREND_POINTS: usize = 2;

/// The intraday chart draws as soon as there is one sample.
#[must_use]
pub fn is_renderable_intraday(points: &[IntradayPoint]) -> bool {
    !points.is_empty()
}

/// The trend chart needs at least two points, two of them with a finite `y`.
#[must_use]
pub fn is_renderable_trend(points: &[TrendPoint]) -> bool {
    points.len() >= MIN_TREND_POINTS
        && points.iter().filter(|point| point.y.is_finite()).count() >= MIN_TREND_POINTS
}
