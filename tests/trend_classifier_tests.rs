use fund_chart_rs::core::{
    Color, IntradayPoint, TrendDirection, TrendPalette, TrendPoint, classify_intraday,
    classify_trend,
};

fn intraday(values: &[f64]) -> Vec<IntradayPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| IntradayPoint::new(format!("09:{:02}", 30 + i), *value, "0"))
        .collect()
}

#[test]
fn intraday_rising_close_is_up() {
    let points = intraday(&[1.000, 0.995, 1.002]);
    assert_eq!(classify_intraday(&points), Some(TrendDirection::Up));
}

#[test]
fn intraday_falling_close_is_down() {
    let points = intraday(&[1.000, 1.010, 0.999]);
    assert_eq!(classify_intraday(&points), Some(TrendDirection::Down));
}

#[test]
fn intraday_tie_maps_to_up() {
    let points = intraday(&[1.234, 1.300, 1.234]);
    assert_eq!(classify_intraday(&points), Some(TrendDirection::Up));
}

#[test]
fn intraday_single_point_is_up() {
    let points = intraday(&[1.5]);
    assert_eq!(classify_intraday(&points), Some(TrendDirection::Up));
}

#[test]
fn intraday_empty_series_has_no_direction() {
    assert_eq!(classify_intraday(&[]), None);
}

#[test]
fn trend_reads_sign_of_last_daily_return() {
    let base = [TrendPoint::new(1_000, 1.5).with_equity_return(3.0)];

    let mut up = base.to_vec();
    up.push(TrendPoint::new(2_000, 1.49).with_equity_return(0.01));
    assert_eq!(classify_trend(&up), Some(TrendDirection::Up));

    let mut down = base.to_vec();
    down.push(TrendPoint::new(2_000, 1.49).with_equity_return(-0.67));
    assert_eq!(classify_trend(&down), Some(TrendDirection::Down));

    let mut zero = base.to_vec();
    zero.push(TrendPoint::new(2_000, 1.49).with_equity_return(0.0));
    assert_eq!(classify_trend(&zero), Some(TrendDirection::Flat));

    let mut missing = base.to_vec();
    missing.push(TrendPoint::new(2_000, 1.49));
    assert_eq!(classify_trend(&missing), Some(TrendDirection::Flat));
}

#[test]
fn trend_ignores_returns_before_last_point() {
    let points = vec![
        TrendPoint::new(1_000, 1.5).with_equity_return(-5.0),
        TrendPoint::new(2_000, 1.6).with_equity_return(-5.0),
        TrendPoint::new(3_000, 1.7).with_equity_return(0.2),
    ];
    assert_eq!(classify_trend(&points), Some(TrendDirection::Up));
}

#[test]
fn trend_non_numeric_return_is_flat() {
    let points: Vec<TrendPoint> = serde_json::from_str(
        r#"[{"x":1000,"y":1.5},{"x":2000,"y":1.49,"equityReturn":"n/a"}]"#,
    )
    .expect("valid trend json");
    assert_eq!(classify_trend(&points), Some(TrendDirection::Flat));
}

#[test]
fn trend_empty_series_has_no_direction() {
    assert_eq!(classify_trend(&[]), None);
}

#[test]
fn default_palette_uses_red_up_green_down_grey_flat() {
    let palette = TrendPalette::default();
    assert_eq!(palette.color_for(TrendDirection::Up).to_string(), "#ff4d4f");
    assert_eq!(palette.color_for(TrendDirection::Down).to_string(), "#52c41a");
    assert_eq!(palette.color_for(TrendDirection::Flat).to_string(), "#999999");
}

#[test]
fn custom_palette_colors_are_returned_per_direction() {
    let palette = TrendPalette {
        up: Color::rgb(1, 2, 3),
        down: Color::rgb(4, 5, 6),
        flat: Color::rgb(7, 8, 9),
    };
    assert_eq!(palette.color_for(TrendDirection::Down), Color::rgb(4, 5, 6));
}
