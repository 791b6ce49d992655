use tracing::trace;

use crate::core::{TrendPalette, TrendPoint, ValueBounds, classify_trend};
use crate::error::ChartResult;

use super::encoding::{finite_or_gap, grid, trend_line, value_axis, x_axis};
use super::validation::is_renderable_trend;
use super::{
    AxisKind, AxisLabelFormatter, AxisPointer, AxisPointerKind, ChartOption, ChartPipeline,
    ChartStyle, DisplayTimezone, SeriesData, Tooltip, TooltipFormatter, TooltipTrigger,
};

/// Builds the historical net-value chart: continuous time axis labelled
/// `month-day`, value axis snapped to the thousandth, color from the last
/// point's daily return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendChartBuilder {
    style: ChartStyle,
    palette: TrendPalette,
    timezone: DisplayTimezone,
}

impl Default for TrendChartBuilder {
    fn default() -> Self {
        Self {
            style: ChartStyle::trend(),
            palette: TrendPalette::default(),
            timezone: DisplayTimezone::utc(),
        }
    }
}

impl TrendChartBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: ChartStyle) -> ChartResult<Self> {
        self.style = style.validate()?;
        Ok(self)
    }

    pub fn with_palette(mut self, palette: TrendPalette) -> ChartResult<Self> {
        for color in [palette.up, palette.down, palette.flat] {
            color.validate()?;
        }
        self.palette = palette;
        Ok(self)
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: DisplayTimezone) -> Self {
        self.timezone = timezone;
        self
    }

    #[must_use]
    pub fn timezone(&self) -> DisplayTimezone {
        self.timezone
    }

    pub fn build(&self, points: &[TrendPoint]) -> ChartResult<Option<ChartOption>> {
        if !is_renderable_trend(points) {
            return Ok(None);
        }
        let Some(direction) = classify_trend(points) else {
            return Ok(None);
        };
        let color = self.palette.color_for(direction);
        let bounds = ValueBounds::from_values(points.iter().map(|point| point.y));
        trace!(points = points.len(), ?direction, ?bounds, "build trend option");

        let mut x_axis = x_axis(&self.style, AxisKind::Time);
        x_axis.axis_label.formatter = Some(AxisLabelFormatter::MonthDay {
            timezone: self.timezone,
        });

        let data = SeriesData::Points(
            points
                .iter()
                .map(|point| (point.x, finite_or_gap(point.y)))
                .collect(),
        );

        Ok(Some(ChartOption {
            animation: false,
            tooltip: Tooltip {
                trigger: TooltipTrigger::Axis,
                axis_pointer: Some(AxisPointer {
                    kind: AxisPointerKind::Line,
                }),
                formatter: TooltipFormatter::NetValue {
                    timezone: self.timezone,
                },
            },
            grid: grid(&self.style),
            x_axis,
            y_axis: value_axis(&self.style, bounds),
            series: vec![trend_line(&self.style, color, data)],
        }))
    }
}

impl ChartPipeline for TrendChartBuilder {
    type Point = TrendPoint;

    fn is_renderable(&self, series: &[TrendPoint]) -> bool {
        is_renderable_trend(series)
    }

    fn build_option(&self, series: &[TrendPoint]) -> ChartResult<Option<ChartOption>> {
        self.build(series)
    }

    fn region_height_px(&self) -> u32 {
        self.style.region_height_px
    }
}
