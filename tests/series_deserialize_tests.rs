use fund_chart_rs::api::TrendChartBuilder;
use fund_chart_rs::core::{IntradayPoint, TrendPoint, coerce_number, lenient_number};
use serde_json::json;

#[test]
fn intraday_point_accepts_numeric_strings() {
    let point: IntradayPoint =
        serde_json::from_value(json!({"time": "10:00", "value": "1.2345", "growth": "0.12"}))
            .expect("valid point");
    assert_eq!(point, IntradayPoint::new("10:00", 1.2345, "0.12"));
}

#[test]
fn intraday_point_non_numeric_value_is_nan() {
    let point: IntradayPoint =
        serde_json::from_value(json!({"time": "10:00", "value": "--", "growth": "0"}))
            .expect("valid point");
    assert!(point.value.is_nan());

    let null_value: IntradayPoint =
        serde_json::from_value(json!({"time": "10:00", "value": null}))
            .expect("valid point");
    assert!(null_value.value.is_nan());
}

#[test]
fn intraday_growth_is_kept_as_display_text() {
    let numeric: IntradayPoint =
        serde_json::from_value(json!({"time": "10:00", "value": 1.0, "growth": 0.2}))
            .expect("valid point");
    assert_eq!(numeric.growth, "0.2");

    let missing: IntradayPoint =
        serde_json::from_value(json!({"time": "10:00", "value": 1.0})).expect("valid point");
    assert_eq!(missing.growth, "");
}

#[test]
fn trend_point_reads_equity_return_in_camel_case() {
    let point: TrendPoint =
        serde_json::from_value(json!({"x": 2000, "y": 1.49, "equityReturn": -0.67}))
            .expect("valid point");
    assert_eq!(point, TrendPoint::new(2_000, 1.49).with_equity_return(-0.67));
}

#[test]
fn trend_point_lenient_fields() {
    let point: TrendPoint =
        serde_json::from_value(json!({"x": "1000", "y": "1.5", "equityReturn": "0.5"}))
            .expect("valid point");
    assert_eq!(point, TrendPoint::new(1_000, 1.5).with_equity_return(0.5));

    let fractional: TrendPoint =
        serde_json::from_value(json!({"x": 1000.9, "y": 1.5})).expect("valid point");
    assert_eq!(fractional.x, 1_000);

    let unknown_return: TrendPoint =
        serde_json::from_value(json!({"x": 1000, "y": "n/a", "equityReturn": "n/a"}))
            .expect("valid point");
    assert!(unknown_return.y.is_nan());
    assert_eq!(unknown_return.equity_return, None);
}

#[test]
fn trend_y_follows_number_coercion() {
    let read = |y: serde_json::Value| -> f64 {
        serde_json::from_value::<TrendPoint>(json!({"x": 1000, "y": y}))
            .expect("valid point")
            .y
    };
    assert_eq!(read(json!(null)), 0.0);
    assert_eq!(read(json!("")), 0.0);
    assert_eq!(read(json!("  ")), 0.0);
    assert_eq!(read(json!(true)), 1.0);
    assert_eq!(read(json!(" 1.25 ")), 1.25);
    assert!(read(json!("abc")).is_nan());
    assert!(read(json!({"v": 1})).is_nan());
    assert!(read(json!([1])).is_nan());

    let missing: TrendPoint = serde_json::from_value(json!({"x": 1000})).expect("valid point");
    assert!(missing.y.is_nan());
}

#[test]
fn null_trend_value_counts_toward_the_threshold() {
    let points: Vec<TrendPoint> =
        serde_json::from_value(json!([{"x": 1000, "y": null}, {"x": 2000, "y": 1.5}]))
            .expect("valid series");
    assert_eq!(points[0].y, 0.0);

    let option = TrendChartBuilder::new()
        .build(&points)
        .expect("build")
        .expect("two finite values render");
    assert_eq!(option.y_axis.min, Some(0.0));
    assert_eq!(option.y_axis.max, Some(1.5));
}

#[test]
fn coerce_number_rules() {
    assert_eq!(coerce_number(&json!(null)), 0.0);
    assert_eq!(coerce_number(&json!(false)), 0.0);
    assert_eq!(coerce_number(&json!("2")), 2.0);
    assert!(coerce_number(&json!("1.2.3")).is_nan());
}

#[test]
fn trend_point_requires_a_timestamp() {
    assert!(serde_json::from_value::<TrendPoint>(json!({"y": 1.5})).is_err());
    assert!(serde_json::from_value::<TrendPoint>(json!({"x": "soon", "y": 1.5})).is_err());
}

#[test]
fn trend_point_skips_missing_return_when_serialized() {
    let value = serde_json::to_value(TrendPoint::new(1_000, 1.5)).expect("serialize");
    assert_eq!(value, json!({"x": 1000, "y": 1.5}));
}

#[test]
fn lenient_number_rules() {
    assert_eq!(lenient_number(&json!(1.5)), Some(1.5));
    assert_eq!(lenient_number(&json!(" 2.25 ")), Some(2.25));
    assert_eq!(lenient_number(&json!("")), None);
    assert_eq!(lenient_number(&json!("abc")), None);
    assert_eq!(lenient_number(&json!(true)), None);
    assert_eq!(lenient_number(&json!(null)), None);
}
