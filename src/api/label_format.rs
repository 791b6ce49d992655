use chrono::{DateTime, Datelike};

use super::DisplayTimezone;

/// Value-axis label with a fixed number of decimals (`1.5` -> `1.500`).
#[must_use]
pub fn format_fixed_decimals(value: f64, decimals: u8) -> String {
    format!("{value:.prec$}", prec = usize::from(decimals))
}

/// Number rendered the way JavaScript stringifies it: shortest round-trip
/// digits, no trailing `.0`, and exponent form (`1e+21`, `1.5e-7`) outside
/// `[1e-6, 1e21)`.
#[must_use]
pub fn format_plain_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        }
    } else if value == 0.0 {
        "0".to_owned()
    } else if (1e-6..1e21).contains(&value.abs()) {
        format!("{value}")
    } else {
        let scientific = format!("{value:e}");
        match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => scientific,
        }
    }
}

/// Time-axis label `month-day` without zero padding (`2024-03-05` -> `3-5`).
///
/// Returns an empty string for timestamps outside the supported date range.
#[must_use]
pub fn format_month_day(epoch_millis: i64, timezone: DisplayTimezone) -> String {
    DateTime::from_timestamp_millis(epoch_millis)
        .map(|utc| {
            let local = utc.with_timezone(&timezone.fixed_offset());
            format!("{}-{}", local.month(), local.day())
        })
        .unwrap_or_default()
}

/// Tooltip date `YYYY-MM-DD`, empty for unrepresentable timestamps.
#[must_use]
pub fn format_iso_date(epoch_millis: i64, timezone: DisplayTimezone) -> String {
    DateTime::from_timestamp_millis(epoch_millis)
        .map(|utc| {
            utc.with_timezone(&timezone.fixed_offset())
                .format("%Y-%m-%d")
                .to_string()
        })
        .unwrap_or_default()
}

/// Same as [`format_month_day`] for an axis position that may be fractional.
#[must_use]
pub fn format_month_day_at(position: f64, timezone: DisplayTimezone) -> String {
    if !position.is_finite() {
        return String::new();
    }
    format_month_day(position.round() as i64, timezone)
}
