use serde::{Deserialize, Serialize};

use crate::core::{Color, IntradayPoint, TrendPoint};

/// Three-way classification that drives line and fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Colors assigned to each trend direction.
///
/// Defaults follow the mainland market convention: red for gains, green for
/// losses, grey when unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPalette {
    pub up: Color,
    pub down: Color,
    pub flat: Color,
}

impl Default for TrendPalette {
    fn default() -> Self {
        Self {
            up: Color::rgb(0xff, 0x4d, 0x4f),
            down: Color::rgb(0x52, 0xc4, 0x1a),
            flat: Color::rgb(0x99, 0x99, 0x99),
        }
    }
}

impl TrendPalette {
    #[must_use]
    pub fn color_for(self, direction: TrendDirection) -> Color {
        match direction {
            TrendDirection::Up => self.up,
            TrendDirection::Down => self.down,
            TrendDirection::Flat => self.flat,
        }
    }
}

/// Compares the first and last valuation of the day.
///
/// A tie counts as `Up`, so this rule never yields `Flat`. Returns `None` for
/// an empty series.
#[must_use]
pub fn classify_intraday(points: &[IntradayPoint]) -> Option<TrendDirection> {
    let first = points.first()?;
    let last = points.last()?;
    Some(if last.value >= first.value {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    })
}

/// Reads the sign of the last point's daily return.
///
/// Zero, missing and non-numeric returns are `Flat`. Returns `None` for an
/// empty series.
#[must_use]
pub fn classify_trend(points: &[TrendPoint]) -> Option<TrendDirection> {
    let last = points.last()?;
    Some(match last.equity_return {
        Some(change) if change > 0.0 => TrendDirection::Up,
        Some(change) if change < 0.0 => TrendDirection::Down,
        _ => TrendDirection::Flat,
    })
}
