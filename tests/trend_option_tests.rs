use fund_chart_rs::api::{
    AxisKind, AxisPointerKind, ChartPipeline, DisplayTimezone, MIN_TREND_POINTS, SeriesData,
    TrendChartBuilder, is_renderable_trend,
};
use fund_chart_rs::core::{Color, TrendPoint};
use serde_json::json;

const NEW_YEAR_2024_UTC_MS: i64 = 1_704_067_200_000;
const EIGHT_HOURS_MS: i64 = 8 * 3_600_000;

fn falling_pair() -> Vec<TrendPoint> {
    vec![
        TrendPoint::new(1_000, 1.500),
        TrendPoint::new(2_000, 1.490).with_equity_return(-0.67),
    ]
}

#[test]
fn negative_last_return_builds_down_colored_line() {
    let option = TrendChartBuilder::new()
        .build(&falling_pair())
        .expect("build")
        .expect("renderable");

    let series = option.primary_series().expect("series");
    assert_eq!(series.color(), Some(Color::rgb(0x52, 0xc4, 0x1a)));
    assert_eq!(
        series.data,
        SeriesData::Points(vec![(1_000, Some(1.5)), (2_000, Some(1.49))])
    );
    option.validate().expect("option valid");
}

#[test]
fn time_axis_labels_render_month_day() {
    let option = TrendChartBuilder::new()
        .build(&falling_pair())
        .expect("build")
        .expect("renderable");

    assert_eq!(option.x_axis.kind, AxisKind::Time);
    assert!(option.x_axis.data.is_empty());
    assert_eq!(option.x_axis.format_label(2_000.0), "1-1");
    assert_eq!(option.x_axis.format_label(NEW_YEAR_2024_UTC_MS as f64 + 34.0 * 86_400_000.0), "2-4");
}

#[test]
fn tooltip_renders_iso_date_and_net_value() {
    let option = TrendChartBuilder::new()
        .build(&falling_pair())
        .expect("build")
        .expect("renderable");

    assert_eq!(option.tooltip_text(Some(1)), "1970-01-01<br/>净值：1.49");
    assert_eq!(option.tooltip_text(Some(5)), "");
    assert_eq!(option.tooltip_text(None), "");
    assert_eq!(
        option.tooltip.axis_pointer.map(|pointer| pointer.kind),
        Some(AxisPointerKind::Line)
    );
}

#[test]
fn zero_or_missing_return_is_neutral_grey() {
    let points = vec![
        TrendPoint::new(1_000, 1.5).with_equity_return(1.0),
        TrendPoint::new(2_000, 1.5).with_equity_return(0.0),
    ];
    let option = TrendChartBuilder::new()
        .build(&points)
        .expect("build")
        .expect("renderable");
    assert_eq!(
        option.primary_series().and_then(|series| series.color()),
        Some(Color::rgb(0x99, 0x99, 0x99))
    );
}

#[test]
fn positive_return_is_up_red() {
    let points = vec![
        TrendPoint::new(1_000, 1.5),
        TrendPoint::new(2_000, 1.52).with_equity_return(1.33),
    ];
    let option = TrendChartBuilder::new()
        .build(&points)
        .expect("build")
        .expect("renderable");
    assert_eq!(
        option.primary_series().and_then(|series| series.color()),
        Some(Color::rgb(0xff, 0x4d, 0x4f))
    );
}

#[test]
fn fewer_than_two_points_render_nothing() {
    let builder = TrendChartBuilder::new();
    assert_eq!(MIN_TREND_POINTS, 2);
    assert_eq!(builder.build(&[]).expect("build"), None);
    assert_eq!(
        builder
            .build(&[TrendPoint::new(1_000, 1.5)])
            .expect("build"),
        None
    );
}

#[test]
fn two_points_need_two_finite_values() {
    let points = vec![TrendPoint::new(1_000, 1.5), TrendPoint::new(2_000, f64::NAN)];
    assert!(!is_renderable_trend(&points));
    assert_eq!(TrendChartBuilder::new().build(&points).expect("build"), None);
}

#[test]
fn sparse_series_renders_with_gaps() {
    let points: Vec<TrendPoint> = serde_json::from_value(json!([
        {"x": 1000, "y": 1.5},
        {"x": 2000, "y": "--"},
        {"x": 3000, "y": "1.52", "equityReturn": "1.33"}
    ]))
    .expect("valid trend json");
    let builder = TrendChartBuilder::new();
    assert!(builder.is_renderable(&points));

    let option = builder.build(&points).expect("build").expect("renderable");
    assert_eq!(
        option.primary_series().expect("series").data,
        SeriesData::Points(vec![(1_000, Some(1.5)), (2_000, None), (3_000, Some(1.52))])
    );
    assert_eq!(option.tooltip_text(Some(1)), "");
    assert_eq!(option.y_axis.min, Some(1.5));
    assert_eq!(option.y_axis.max, Some(1.52));
}

#[test]
fn display_timezone_shifts_calendar_days() {
    let points = vec![
        TrendPoint::new(NEW_YEAR_2024_UTC_MS - EIGHT_HOURS_MS, 1.0),
        TrendPoint::new(NEW_YEAR_2024_UTC_MS, 1.1).with_equity_return(10.0),
    ];

    let utc = TrendChartBuilder::new()
        .build(&points)
        .expect("build")
        .expect("renderable");
    assert_eq!(utc.x_axis.format_label(points[0].x as f64), "12-31");
    assert_eq!(utc.tooltip_text(Some(0)), "2023-12-31<br/>净值：1");

    let shanghai = TrendChartBuilder::new()
        .with_timezone(DisplayTimezone::from_offset_minutes(480).expect("valid offset"))
        .build(&points)
        .expect("build")
        .expect("renderable");
    assert_eq!(shanghai.x_axis.format_label(points[0].x as f64), "1-1");
    assert_eq!(shanghai.tooltip_text(Some(0)), "2024-01-01<br/>净值：1");
}

#[test]
fn out_of_range_timezone_is_rejected() {
    assert!(DisplayTimezone::from_offset_minutes(24 * 60).is_err());
    assert!(DisplayTimezone::from_offset_minutes(-24 * 60).is_err());
    assert_eq!(
        DisplayTimezone::from_offset_minutes(-300)
            .expect("valid offset")
            .offset_minutes(),
        -300
    );
}

#[test]
fn trend_option_serializes_time_axis_and_pairs() {
    let option = TrendChartBuilder::new()
        .build(&falling_pair())
        .expect("build")
        .expect("renderable");
    let value = serde_json::to_value(&option).expect("serialize");

    assert_eq!(value["grid"]["left"], json!(8.0));
    assert_eq!(value["grid"]["right"], json!(8.0));
    assert_eq!(value["xAxis"]["type"], json!("time"));
    assert_eq!(value["tooltip"]["axisPointer"]["type"], json!("line"));
    assert_eq!(value["series"][0]["data"], json!([[1000, 1.5], [2000, 1.49]]));
    assert_eq!(value["series"][0]["lineStyle"]["color"], json!("#52c41a"));
    assert_eq!(value["yAxis"]["min"], json!(1.49));
    assert_eq!(value["yAxis"]["max"], json!(1.5));
}

#[test]
fn region_height_matches_style() {
    assert_eq!(TrendChartBuilder::new().region_height_px(), 180);
}
