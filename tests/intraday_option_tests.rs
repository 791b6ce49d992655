use fund_chart_rs::api::{
    AxisKind, ChartPipeline, ChartStyle, IntradayChartBuilder, LabelInterval, LineKind,
    SeriesData, SymbolKind, TooltipTrigger,
};
use fund_chart_rs::core::{Color, IntradayPoint, TrendPalette};
use serde_json::json;

fn opening_minutes() -> Vec<IntradayPoint> {
    vec![
        IntradayPoint::new("09:30", 1.000, "0"),
        IntradayPoint::new("09:31", 1.002, "0.2"),
    ]
}

#[test]
fn rising_session_builds_up_colored_line() {
    let option = IntradayChartBuilder::new()
        .build(&opening_minutes())
        .expect("build")
        .expect("renderable");

    let series = option.primary_series().expect("one series");
    assert_eq!(series.color(), Some(Color::rgb(0xff, 0x4d, 0x4f)));
    assert_eq!(series.symbol, SymbolKind::Hidden);
    assert!(series.smooth);
    assert_eq!(series.line_style.width, Some(1.5));
    assert_eq!(series.data, SeriesData::Values(vec![Some(1.000), Some(1.002)]));
    option.validate().expect("option valid");
}

#[test]
fn tooltip_renders_time_value_and_growth() {
    let option = IntradayChartBuilder::new()
        .build(&opening_minutes())
        .expect("build")
        .expect("renderable");

    assert_eq!(
        option.tooltip_text(Some(1)),
        "时间: 09:31<br/>估值: 1.002<br/>涨幅: 0.2%"
    );
    assert_eq!(
        option.tooltip_text(Some(0)),
        "时间: 09:30<br/>估值: 1<br/>涨幅: 0%"
    );
    assert_eq!(option.tooltip.trigger, TooltipTrigger::Axis);
    assert!(option.tooltip.axis_pointer.is_none());
}

#[test]
fn tooltip_outside_the_data_is_empty() {
    let option = IntradayChartBuilder::new()
        .build(&opening_minutes())
        .expect("build")
        .expect("renderable");

    assert_eq!(option.tooltip_text(None), "");
    assert_eq!(option.tooltip_text(Some(2)), "");
}

#[test]
fn category_axis_lists_sample_times_in_order() {
    let points = vec![
        IntradayPoint::new("09:30", 1.0, "0"),
        IntradayPoint::new("09:30", 1.1, "10"),
        IntradayPoint::new("09:29", 0.9, "-10"),
    ];
    let option = IntradayChartBuilder::new()
        .build(&points)
        .expect("build")
        .expect("renderable");

    assert_eq!(option.x_axis.kind, AxisKind::Category);
    assert_eq!(option.x_axis.data, vec!["09:30", "09:30", "09:29"]);
    assert_eq!(option.x_axis.boundary_gap, Some(false));
    assert_eq!(option.x_axis.axis_label.interval, Some(LabelInterval::Auto));
    assert!(!option.x_axis.axis_tick.show);
    assert!(!option.x_axis.split_line.show);
    assert_eq!(option.x_axis.format_label(1.0), "09:30");
    assert_eq!(option.x_axis.format_label(2.0), "09:29");
}

#[test]
fn value_axis_is_snapped_and_labelled_with_three_decimals() {
    let points = vec![
        IntradayPoint::new("09:30", 1.2345, "0"),
        IntradayPoint::new("09:31", 1.2401, "0.45"),
        IntradayPoint::new("09:32", 1.2299, "-0.37"),
    ];
    let option = IntradayChartBuilder::new()
        .build(&points)
        .expect("build")
        .expect("renderable");

    assert_eq!(option.y_axis.kind, AxisKind::Value);
    assert_eq!(option.y_axis.scale, Some(true));
    assert_eq!(option.y_axis.min, Some(1.229));
    assert_eq!(option.y_axis.max, Some(1.241));
    assert_eq!(option.y_axis.format_label(1.5), "1.500");
    assert_eq!(option.y_axis.format_label(1.2345), "1.234");

    let split = option.y_axis.split_line.line_style.expect("split line style");
    assert!(option.y_axis.split_line.show);
    assert_eq!(split.kind, Some(LineKind::Dashed));
    assert_eq!(split.color, Some(Color::rgba(0, 0, 0, 0.05)));
}

#[test]
fn falling_session_uses_down_color_for_line_and_fill() {
    let points = vec![
        IntradayPoint::new("09:30", 1.010, "0"),
        IntradayPoint::new("09:31", 1.000, "-0.99"),
    ];
    let option = IntradayChartBuilder::new()
        .build(&points)
        .expect("build")
        .expect("renderable");

    let series = option.primary_series().expect("one series");
    let down = Color::rgb(0x52, 0xc4, 0x1a);
    assert_eq!(series.color(), Some(down));
    let stops = &series.area_style.color.color_stops;
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].color, down);
    assert_eq!(stops[1].color, Color::rgba(255, 255, 255, 0.0));
    assert_eq!(series.area_style.opacity, 0.1);
}

#[test]
fn single_sample_still_renders() {
    let points = vec![IntradayPoint::new("09:30", 1.0, "0")];
    let builder = IntradayChartBuilder::new();
    assert!(builder.is_renderable(&points));

    let option = builder.build(&points).expect("build").expect("renderable");
    assert_eq!(option.y_axis.min, Some(1.0));
    assert_eq!(option.y_axis.max, Some(1.0));
}

#[test]
fn empty_session_renders_nothing() {
    let builder = IntradayChartBuilder::new();
    assert!(!builder.is_renderable(&[]));
    assert_eq!(builder.build(&[]).expect("build"), None);
}

#[test]
fn non_numeric_values_become_gaps() {
    let points: Vec<IntradayPoint> = serde_json::from_value(json!([
        {"time": "09:30", "value": 1.0, "growth": "0"},
        {"time": "09:31", "value": "--", "growth": "0"},
        {"time": "09:32", "value": "1.004", "growth": 0.4}
    ]))
    .expect("valid intraday json");
    let option = IntradayChartBuilder::new()
        .build(&points)
        .expect("build")
        .expect("renderable");

    assert_eq!(
        option.primary_series().expect("series").data,
        SeriesData::Values(vec![Some(1.0), None, Some(1.004)])
    );
    assert_eq!(option.y_axis.max, Some(1.004));
    option.validate().expect("gaps are valid");
}

#[test]
fn option_serializes_in_engine_schema() {
    let option = IntradayChartBuilder::new()
        .build(&opening_minutes())
        .expect("build")
        .expect("renderable");
    let value = serde_json::to_value(&option).expect("serialize");

    assert_eq!(value["animation"], json!(false));
    assert_eq!(value["grid"], json!({"left": 5.0, "right": 5.0, "top": 10.0, "bottom": 20.0, "containLabel": true}));
    assert_eq!(value["xAxis"]["type"], json!("category"));
    assert_eq!(value["xAxis"]["boundaryGap"], json!(false));
    assert_eq!(value["xAxis"]["data"], json!(["09:30", "09:31"]));
    assert_eq!(value["yAxis"]["type"], json!("value"));
    assert_eq!(value["yAxis"]["scale"], json!(true));
    assert_eq!(value["yAxis"]["splitLine"]["lineStyle"]["type"], json!("dashed"));
    assert_eq!(value["series"][0]["type"], json!("line"));
    assert_eq!(value["series"][0]["symbol"], json!("none"));
    assert_eq!(value["series"][0]["lineStyle"]["color"], json!("#ff4d4f"));
    assert_eq!(value["series"][0]["areaStyle"]["color"]["type"], json!("linear"));
    assert_eq!(value["series"][0]["data"], json!([1.0, 1.002]));
    assert_eq!(value["tooltip"]["trigger"], json!("axis"));
}

#[test]
fn custom_style_and_palette_are_applied() {
    let style = ChartStyle::intraday()
        .with_line_width(2.0)
        .with_area_opacity(0.25);
    let palette = TrendPalette {
        up: Color::rgb(0, 0, 255),
        ..TrendPalette::default()
    };
    let option = IntradayChartBuilder::new()
        .with_style(style)
        .expect("valid style")
        .with_palette(palette)
        .expect("valid palette")
        .build(&opening_minutes())
        .expect("build")
        .expect("renderable");

    let series = option.primary_series().expect("series");
    assert_eq!(series.color(), Some(Color::rgb(0, 0, 255)));
    assert_eq!(series.line_style.width, Some(2.0));
    assert_eq!(series.area_style.opacity, 0.25);
}

#[test]
fn invalid_style_is_rejected() {
    let builder = IntradayChartBuilder::new();
    assert!(builder.with_style(ChartStyle::intraday().with_line_width(0.0)).is_err());
    assert!(
        builder
            .with_style(ChartStyle::intraday().with_area_opacity(1.5))
            .is_err()
    );
}

#[test]
fn region_height_matches_style() {
    assert_eq!(IntradayChartBuilder::new().region_height_px(), 180);
}
