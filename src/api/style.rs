use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{ChartError, ChartResult};

/// Plot-area insets in pixels; axis labels are laid out inside them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridInsets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl GridInsets {
    #[must_use]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("left", self.left),
            ("right", self.right),
            ("top", self.top),
            ("bottom", self.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidStyle(format!(
                    "grid inset `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Presentation knobs shared by both fund charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub grid: GridInsets,
    pub axis_line_color: Color,
    pub axis_label_color: Color,
    pub axis_label_font_size: f64,
    pub split_line_color: Color,
    pub line_width: f64,
    pub area_opacity: f64,
    /// Bottom stop of the area gradient.
    pub fade_color: Color,
    pub value_label_decimals: u8,
    pub region_height_px: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::intraday()
    }
}

impl ChartStyle {
    /// Style of the intraday valuation chart.
    #[must_use]
    pub fn intraday() -> Self {
        Self {
            grid: GridInsets::new(5.0, 5.0, 10.0, 20.0),
            axis_line_color: Color::rgb(0xe5, 0xe5, 0xe5),
            axis_label_color: Color::rgb(0x99, 0x99, 0x99),
            axis_label_font_size: 10.0,
            split_line_color: Color::rgba(0, 0, 0, 0.05),
            line_width: 1.5,
            area_opacity: 0.1,
            fade_color: Color::rgba(255, 255, 255, 0.0),
            value_label_decimals: 3,
            region_height_px: 180,
        }
    }

    /// Style of the net-value trend chart; only the side insets differ.
    #[must_use]
    pub fn trend() -> Self {
        Self {
            grid: GridInsets::new(8.0, 8.0, 10.0, 20.0),
            ..Self::intraday()
        }
    }

    #[must_use]
    pub fn with_grid(mut self, grid: GridInsets) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_area_opacity(mut self, area_opacity: f64) -> Self {
        self.area_opacity = area_opacity;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.grid.validate()?;
        for color in [
            self.axis_line_color,
            self.axis_label_color,
            self.split_line_color,
            self.fade_color,
        ] {
            color.validate()?;
        }
        if !self.axis_label_font_size.is_finite() || self.axis_label_font_size <= 0.0 {
            return Err(ChartError::InvalidStyle(
                "axis label font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ChartError::InvalidStyle(
                "line width must be finite and > 0".to_owned(),
            ));
        }
        if !self.area_opacity.is_finite() || !(0.0..=1.0).contains(&self.area_opacity) {
            return Err(ChartError::InvalidStyle(
                "area opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        if self.region_height_px == 0 {
            return Err(ChartError::InvalidStyle(
                "region height must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Fixed UTC offset used to render trend dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayTimezone {
    offset_minutes: i32,
}

impl DisplayTimezone {
    #[must_use]
    pub const fn utc() -> Self {
        Self { offset_minutes: 0 }
    }

    /// Offset east of UTC, e.g. `480` for China Standard Time.
    pub fn from_offset_minutes(offset_minutes: i32) -> ChartResult<Self> {
        if FixedOffset::east_opt(offset_minutes.saturating_mul(60)).is_none() {
            return Err(ChartError::InvalidData(format!(
                "utc offset of {offset_minutes} minutes is out of range"
            )));
        }
        Ok(Self { offset_minutes })
    }

    #[must_use]
    pub fn offset_minutes(self) -> i32 {
        self.offset_minutes
    }

    #[must_use]
    pub fn fixed_offset(self) -> FixedOffset {
        FixedOffset::east_opt(self.offset_minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
    }
}
