//! Series-to-option pipeline for the two fund charts.
//!
//! Each builder validates its series, classifies the trend color and emits a
//! declarative [`ChartOption`] for the rendering engine.

mod encoding;
mod formatter;
mod intraday_builder;
mod json_contract;
pub mod label_format;
mod option;
mod pipeline;
mod style;
mod trend_builder;
mod validation;

pub use formatter::{AxisLabelFormatter, TooltipFormatter};
pub use intraday_builder::IntradayChartBuilder;
pub use json_contract::{CHART_OPTION_JSON_SCHEMA_V1, ChartOptionJsonContractV1};
pub use option::{
    AreaStyle, Axis, AxisKind, AxisLabel, AxisLine, AxisPointer, AxisPointerKind, ChartOption,
    ColorStop, GradientKind, Grid, LabelInterval, LineKind, LineSeries, LineStyle,
    LinearGradient, SeriesData, SeriesKind, SplitLine, SymbolKind, Tooltip, TooltipTrigger,
    Visibility,
};
pub use pipeline::ChartPipeline;
pub use style::{ChartStyle, DisplayTimezone, GridInsets};
pub use trend_builder::TrendChartBuilder;
pub use validation::{MIN_TREND_POINTS, is_renderable_intraday, is_renderable_trend};
