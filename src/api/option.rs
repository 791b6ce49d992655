use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{ChartError, ChartResult};

use super::label_format::format_plain_number;
use super::{AxisLabelFormatter, TooltipFormatter};

/// Declarative chart configuration handed to the rendering engine.
///
/// Field names serialize in the engine's camelCase schema. Label and tooltip
/// formatters are carried as data and evaluated through
/// [`ChartOption::tooltip_text`] and [`Axis::format_label`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOption {
    pub animation: bool,
    pub tooltip: Tooltip,
    pub grid: Grid,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    Axis,
    Item,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPointerKind {
    Line,
    Shadow,
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisPointer {
    #[serde(rename = "type")]
    pub kind: AxisPointerKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub trigger: TooltipTrigger,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_pointer: Option<AxisPointer>,
    pub formatter: TooltipFormatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub contain_label: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Category,
    Time,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<LineKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLine {
    pub show: bool,
    pub line_style: LineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub show: bool,
}

/// Label thinning policy for category axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelInterval {
    /// Engine drops overlapping labels.
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabel {
    pub show: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<LabelInterval>,
    pub color: Color,
    pub font_size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<AxisLabelFormatter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitLine {
    pub show: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(rename = "type")]
    pub kind: AxisKind,
    /// Category labels, one per data point; empty for continuous axes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_gap: Option<bool>,
    /// `true` lets the value axis start away from zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub axis_line: AxisLine,
    pub axis_tick: Visibility,
    pub axis_label: AxisLabel,
    pub split_line: SplitLine,
}

impl Axis {
    /// Label text for an axis position: a category index on category axes,
    /// epoch millis on time axes, the raw value on value axes.
    #[must_use]
    pub fn format_label(&self, position: f64) -> String {
        if let Some(formatter) = self.axis_label.formatter {
            return formatter.format(position);
        }
        match self.kind {
            AxisKind::Category => {
                if position.is_finite() && position >= 0.0 {
                    self.data
                        .get(position.round() as usize)
                        .cloned()
                        .unwrap_or_default()
                } else {
                    String::new()
                }
            }
            AxisKind::Time | AxisKind::Value => format_plain_number(position),
        }
    }

    fn validate(&self, axis_name: &str) -> ChartResult<()> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(ChartError::InvalidData(format!(
                    "{axis_name} bounds must be finite with min <= max"
                )));
            }
        }
        if !self.axis_label.font_size.is_finite() || self.axis_label.font_size <= 0.0 {
            return Err(ChartError::InvalidStyle(format!(
                "{axis_name} label font size must be finite and > 0"
            )));
        }
        self.axis_label.color.validate()?;
        validate_line_style(&self.axis_line.line_style)?;
        if let Some(style) = &self.split_line.line_style {
            validate_line_style(style)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    #[serde(rename = "none")]
    Hidden,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

/// Gradient in the unit box of the filled shape: `(x, y)` to `(x2, y2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearGradient {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
    pub color_stops: Vec<ColorStop>,
}

impl LinearGradient {
    /// Top-to-bottom gradient between two colors.
    #[must_use]
    pub fn vertical(top: Color, bottom: Color) -> Self {
        Self {
            kind: GradientKind::Linear,
            x: 0.0,
            y: 0.0,
            x2: 0.0,
            y2: 1.0,
            color_stops: vec![
                ColorStop {
                    offset: 0.0,
                    color: top,
                },
                ColorStop {
                    offset: 1.0,
                    color: bottom,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaStyle {
    pub opacity: f64,
    pub color: LinearGradient,
}

/// Series payload: bare values for category axes, `[x, y]` pairs for time
/// axes. `None` renders as a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesData {
    Values(Vec<Option<f64>>),
    Points(Vec<(i64, Option<f64>)>),
}

impl SeriesData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Values(values) => values.len(),
            Self::Points(points) => points.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plotted values in rendering order, gaps skipped.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        let values: Box<dyn Iterator<Item = Option<f64>> + '_> = match self {
            Self::Values(values) => Box::new(values.iter().copied()),
            Self::Points(points) => Box::new(points.iter().map(|&(_, y)| y)),
        };
        values.flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSeries {
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub symbol: SymbolKind,
    pub smooth: bool,
    pub line_style: LineStyle,
    pub area_style: AreaStyle,
    pub data: SeriesData,
}

impl LineSeries {
    /// Stroke color, which is also the top stop of the area gradient.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.line_style.color
    }

    fn validate(&self) -> ChartResult<()> {
        validate_line_style(&self.line_style)?;
        if !self.area_style.opacity.is_finite() || !(0.0..=1.0).contains(&self.area_style.opacity)
        {
            return Err(ChartError::InvalidStyle(
                "area opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        if self.area_style.color.color_stops.is_empty() {
            return Err(ChartError::InvalidStyle(
                "area gradient needs at least one color stop".to_owned(),
            ));
        }
        for stop in &self.area_style.color.color_stops {
            if !stop.offset.is_finite() || !(0.0..=1.0).contains(&stop.offset) {
                return Err(ChartError::InvalidStyle(
                    "gradient stop offset must be finite and in [0, 1]".to_owned(),
                ));
            }
            stop.color.validate()?;
        }
        Ok(())
    }
}

impl ChartOption {
    #[must_use]
    pub fn primary_series(&self) -> Option<&LineSeries> {
        self.series.first()
    }

    /// Tooltip for a hovered axis position; `None` or an index past the data
    /// yields an empty string.
    #[must_use]
    pub fn tooltip_text(&self, data_index: Option<usize>) -> String {
        self.tooltip.formatter.format(
            self.primary_series().map(|series| &series.data),
            data_index,
        )
    }

    /// Checks the invariants the engine relies on before drawing.
    pub fn validate(&self) -> ChartResult<()> {
        if self.series.is_empty() {
            return Err(ChartError::InvalidData(
                "chart option must contain at least one series".to_owned(),
            ));
        }
        for (side, value) in [
            ("left", self.grid.left),
            ("right", self.grid.right),
            ("top", self.grid.top),
            ("bottom", self.grid.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidStyle(format!(
                    "grid `{side}` must be finite and >= 0"
                )));
            }
        }

        self.x_axis.validate("x axis")?;
        self.y_axis.validate("y axis")?;

        for series in &self.series {
            series.validate()?;
            if self.x_axis.kind == AxisKind::Category && series.data.len() != self.x_axis.data.len()
            {
                return Err(ChartError::InvalidData(format!(
                    "category axis has {} labels but series has {} values",
                    self.x_axis.data.len(),
                    series.data.len()
                )));
            }
        }
        Ok(())
    }
}

fn validate_line_style(style: &LineStyle) -> ChartResult<()> {
    if let Some(color) = style.color {
        color.validate()?;
    }
    if let Some(width) = style.width {
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::InvalidStyle(
                "line width must be finite and > 0".to_owned(),
            ));
        }
    }
    Ok(())
}
