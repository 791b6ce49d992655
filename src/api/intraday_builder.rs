use tracing::trace;

use crate::core::{IntradayPoint, TrendPalette, ValueBounds, classify_intraday};
use crate::error::ChartResult;

use super::encoding::{finite_or_gap, grid, trend_line, value_axis, x_axis};
use super::validation::is_renderable_intraday;
use super::{
    AxisKind, ChartOption, ChartPipeline, ChartStyle, LabelInterval, SeriesData, Tooltip,
    TooltipFormatter, TooltipTrigger,
};

/// Builds the intraday valuation chart: category x axis of sample times,
/// value axis snapped to the thousandth, first-vs-last trend color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntradayChartBuilder {
    style: ChartStyle,
    palette: TrendPalette,
}

impl Default for IntradayChartBuilder {
    fn default() -> Self {
        Self {
            style: ChartStyle::intraday(),
            palette: TrendPalette::default(),
        }
    }
}

impl IntradayChartBuilder {
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
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn build(&self, points: &[IntradayPoint]) -> ChartResult<Option<ChartOption>> {
        if !is_renderable_intraday(points) {
            return Ok(None);
        }
        let Some(direction) = classify_intraday(points) else {
            return Ok(None);
        };
        let color = self.palette.color_for(direction);
        let bounds = ValueBounds::from_values(points.iter().map(|point| point.value));
        trace!(points = points.len(), ?direction, ?bounds, "build intraday option");

        let mut x_axis = x_axis(&self.style, AxisKind::Category);
        x_axis.data = points.iter().map(|point| point.time.clone()).collect();
        x_axis.axis_label.interval = Some(LabelInterval::Auto);

        let data = SeriesData::Values(
            points
                .iter()
                .map(|point| finite_or_gap(point.value))
                .collect(),
        );

        Ok(Some(ChartOption {
            animation: false,
            tooltip: Tooltip {
                trigger: TooltipTrigger::Axis,
                axis_pointer: None,
                formatter: TooltipFormatter::IntradayEstimate {
                    points: points.to_vec(),
                },
            },
            grid: grid(&self.style),
            x_axis,
            y_axis: value_axis(&self.style, bounds),
            series: vec![trend_line(&self.style, color, data)],
        }))
    }
}

impl ChartPipeline for IntradayChartBuilder {
    type Point = IntradayPoint;

    fn is_renderable(&self, series: &[IntradayPoint]) -> bool {
        is_renderable_intraday(series)
    }

    fn build_option(&self, series: &[IntradayPoint]) -> ChartResult<Option<ChartOption>> {
        self.build(series)
    }

    fn region_height_px(&self) -> u32 {
        self.style.region_height_px
    }
}
