//! Encoding pieces shared by the intraday and trend option builders.

use crate::core::{Color, ValueBounds};

use super::{
    AreaStyle, Axis, AxisKind, AxisLabel, AxisLabelFormatter, AxisLine, ChartStyle, Grid,
    LineKind, LineSeries, LineStyle, LinearGradient, SeriesData, SeriesKind, SplitLine,
    SymbolKind, Visibility,
};

pub(super) fn grid(style: &ChartStyle) -> Grid {
    Grid {
        left: style.grid.left,
        right: style.grid.right,
        top: style.grid.top,
        bottom: style.grid.bottom,
        contain_label: true,
    }
}

pub(super) fn axis_line(style: &ChartStyle) -> AxisLine {
    AxisLine {
        show: true,
        line_style: LineStyle {
            color: Some(style.axis_line_color),
            ..LineStyle::default()
        },
    }
}

pub(super) fn axis_label(style: &ChartStyle, formatter: Option<AxisLabelFormatter>) -> AxisLabel {
    AxisLabel {
        show: true,
        interval: None,
        color: style.axis_label_color,
        font_size: style.axis_label_font_size,
        formatter,
    }
}

/// X axis skeleton with ticks and split lines hidden and no boundary gap.
pub(super) fn x_axis(style: &ChartStyle, kind: AxisKind) -> Axis {
    Axis {
        kind,
        data: Vec::new(),
        boundary_gap: Some(false),
        scale: None,
        min: None,
        max: None,
        axis_line: axis_line(style),
        axis_tick: Visibility { show: false },
        axis_label: axis_label(style, None),
        split_line: SplitLine {
            show: false,
            line_style: None,
        },
    }
}

/// Auto-scaled value axis with thousandth-snapped bounds and dashed gridlines.
pub(super) fn value_axis(style: &ChartStyle, bounds: Option<ValueBounds>) -> Axis {
    let (min, max) = match bounds {
        Some(bounds) => (Some(bounds.min), Some(bounds.max)),
        None => (None, None),
    };

    Axis {
        kind: AxisKind::Value,
        data: Vec::new(),
        boundary_gap: None,
        scale: Some(true),
        min,
        max,
        axis_line: axis_line(style),
        axis_tick: Visibility { show: false },
        axis_label: axis_label(
            style,
            Some(AxisLabelFormatter::FixedDecimals {
                decimals: style.value_label_decimals,
            }),
        ),
        split_line: SplitLine {
            show: true,
            line_style: Some(LineStyle {
                color: Some(style.split_line_color),
                width: None,
                kind: Some(LineKind::Dashed),
            }),
        },
    }
}

/// Smoothed marker-less line with a fading area fill under it.
pub(super) fn trend_line(style: &ChartStyle, color: Color, data: SeriesData) -> LineSeries {
    LineSeries {
        kind: SeriesKind::Line,
        symbol: SymbolKind::Hidden,
        smooth: true,
        line_style: LineStyle {
            color: Some(color),
            width: Some(style.line_width),
            kind: None,
        },
        area_style: AreaStyle {
            opacity: style.area_opacity,
            color: LinearGradient::vertical(color, style.fade_color),
        },
        data,
    }
}

/// Non-finite samples become gaps.
pub(super) fn finite_or_gap(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
