use fund_chart_rs::api::DisplayTimezone;
use fund_chart_rs::api::label_format::{
    format_fixed_decimals, format_iso_date, format_month_day, format_month_day_at,
    format_plain_number,
};
use fund_chart_rs::api::{AxisLabelFormatter, TooltipFormatter};
use fund_chart_rs::core::IntradayPoint;

#[test]
fn fixed_decimals_pad_and_round() {
    assert_eq!(format_fixed_decimals(1.5, 3), "1.500");
    assert_eq!(format_fixed_decimals(1.23456, 3), "1.235");
    assert_eq!(format_fixed_decimals(-0.5, 1), "-0.5");
    assert_eq!(format_fixed_decimals(2.0, 0), "2");
}

#[test]
fn plain_numbers_drop_trailing_zeros() {
    assert_eq!(format_plain_number(1.0), "1");
    assert_eq!(format_plain_number(1.002), "1.002");
    assert_eq!(format_plain_number(-0.67), "-0.67");
    assert_eq!(format_plain_number(-0.0), "0");
    assert_eq!(format_plain_number(0.000001), "0.000001");
    assert_eq!(format_plain_number(123_456_789_012.5), "123456789012.5");
}

#[test]
fn plain_numbers_spell_out_non_finite_values() {
    assert_eq!(format_plain_number(f64::NAN), "NaN");
    assert_eq!(format_plain_number(f64::INFINITY), "Infinity");
    assert_eq!(format_plain_number(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn month_day_has_no_zero_padding() {
    let utc = DisplayTimezone::utc();
    assert_eq!(format_month_day(0, utc), "1-1");
    assert_eq!(format_month_day(2_000, utc), "1-1");
    // 2024-03-05T12:00:00Z
    assert_eq!(format_month_day(1_709_640_000_000, utc), "3-5");
    // 2024-12-25T00:00:00Z
    assert_eq!(format_month_day(1_735_084_800_000, utc), "12-25");
}

#[test]
fn month_day_follows_display_timezone() {
    let new_york = DisplayTimezone::from_offset_minutes(-300).expect("valid offset");
    assert_eq!(format_month_day(0, new_york), "12-31");
}

#[test]
fn unrepresentable_timestamps_format_empty() {
    let utc = DisplayTimezone::utc();
    assert_eq!(format_month_day(i64::MAX, utc), "");
    assert_eq!(format_iso_date(i64::MIN, utc), "");
    assert_eq!(format_month_day_at(f64::NAN, utc), "");
    assert_eq!(format_month_day_at(f64::INFINITY, utc), "");
}

#[test]
fn iso_date_is_zero_padded() {
    let utc = DisplayTimezone::utc();
    assert_eq!(format_iso_date(1_709_640_000_000, utc), "2024-03-05");
    assert_eq!(format_iso_date(0, utc), "1970-01-01");
}

#[test]
fn fractional_axis_positions_round_to_the_nearest_milli() {
    let utc = DisplayTimezone::utc();
    assert_eq!(format_month_day_at(86_399_999.6, utc), "1-2");
    assert_eq!(format_month_day_at(86_399_999.4, utc), "1-1");
}

#[test]
fn axis_label_formatters_dispatch_by_kind() {
    let decimals = AxisLabelFormatter::FixedDecimals { decimals: 3 };
    assert_eq!(decimals.format(1.23), "1.230");

    let month_day = AxisLabelFormatter::MonthDay {
        timezone: DisplayTimezone::utc(),
    };
    assert_eq!(month_day.format(2_000.0), "1-1");
}

#[test]
fn intraday_tooltip_looks_points_up_by_index() {
    let formatter = TooltipFormatter::IntradayEstimate {
        points: vec![IntradayPoint::new("14:59", 2.3456, "-1.25")],
    };
    assert_eq!(
        formatter.format(None, Some(0)),
        "时间: 14:59<br/>估值: 2.3456<br/>涨幅: -1.25%"
    );
    assert_eq!(formatter.format(None, Some(1)), "");
    assert_eq!(formatter.format(None, None), "");
}

#[test]
fn formatters_serialize_with_kind_tag() {
    let value = serde_json::to_value(AxisLabelFormatter::FixedDecimals { decimals: 3 })
        .expect("serialize");
    assert_eq!(value, serde_json::json!({"kind": "fixedDecimals", "decimals": 3}));
}

#[test]
fn plain_numbers_switch_to_exponent_form_like_javascript() {
    assert_eq!(format_plain_number(1e21), "1e+21");
    assert_eq!(format_plain_number(-2.5e22), "-2.5e+22");
    assert_eq!(format_plain_number(1e-7), "1e-7");
    assert_eq!(format_plain_number(1.5e-7), "1.5e-7");
    assert_eq!(format_plain_number(999_999_999_999_999_900_000.0), "999999999999999900000");
}
