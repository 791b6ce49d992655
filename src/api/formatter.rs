use serde::{Deserialize, Serialize};

use crate::core::IntradayPoint;

use super::label_format::{
    format_fixed_decimals, format_iso_date, format_month_day_at, format_plain_number,
};
use super::{DisplayTimezone, SeriesData};

/// Tooltip text template evaluated by the engine when an axis position is hovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TooltipFormatter {
    /// `时间: {time}<br/>估值: {value}<br/>涨幅: {growth}%` looked up by data index.
    IntradayEstimate { points: Vec<IntradayPoint> },
    /// `{YYYY-MM-DD}<br/>净值：{y}` read from the hovered `[x, y]` pair.
    NetValue { timezone: DisplayTimezone },
}

impl TooltipFormatter {
    /// Formats the tooltip for the hovered index of the first series.
    ///
    /// Positions without a backing data point produce an empty string.
    #[must_use]
    pub fn format(&self, series_data: Option<&SeriesData>, data_index: Option<usize>) -> String {
        let Some(index) = data_index else {
            return String::new();
        };

        match self {
            Self::IntradayEstimate { points } => points
                .get(index)
                .map(|point| {
                    format!(
                        "时间: {}<br/>估值: {}<br/>涨幅: {}%",
                        point.time,
                        format_plain_number(point.value),
                        point.growth
                    )
                })
                .unwrap_or_default(),
            Self::NetValue { timezone } => match series_data {
                Some(SeriesData::Points(points)) => match points.get(index) {
                    Some(&(x, Some(y))) => format!(
                        "{}<br/>净值：{}",
                        format_iso_date(x, *timezone),
                        format_plain_number(y)
                    ),
                    _ => String::new(),
                },
                _ => String::new(),
            },
        }
    }
}

/// Axis tick label formatter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AxisLabelFormatter {
    FixedDecimals { decimals: u8 },
    MonthDay { timezone: DisplayTimezone },
}

impl AxisLabelFormatter {
    #[must_use]
    pub fn format(self, position: f64) -> String {
        match self {
            Self::FixedDecimals { decimals } => format_fixed_decimals(position, decimals),
            Self::MonthDay { timezone } => format_month_day_at(position, timezone),
        }
    }
}
