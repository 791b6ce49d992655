use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ChartError, ChartResult};

/// CSS color with 8-bit RGB channels and a 0..=1 alpha.
///
/// Opaque colors print as `#rrggbb`, translucent ones as `rgba(r, g, b, a)`,
/// which is the form the chart engine accepts for every color slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Parses `#rgb` or `#rrggbb`.
    pub fn from_hex(input: &str) -> ChartResult<Self> {
        let digits = input
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| invalid_color(input))?;
        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| invalid_color(input))
        };

        match digits.len() {
            3 => {
                let expand = |value: u8| value * 16 + value;
                Ok(Self::rgb(
                    expand(channel(0..1)?),
                    expand(channel(1..2)?),
                    expand(channel(2..3)?),
                ))
            }
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            _ => Err(invalid_color(input)),
        }
    }

    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(ChartError::InvalidStyle(format!(
                "color alpha must be finite and in [0, 1], got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {})",
                self.red, self.green, self.blue, self.alpha
            )
        }
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        let trimmed = input.trim();
        if trimmed.starts_with('#') {
            return Self::from_hex(trimmed);
        }

        let (body, expects_alpha) = if let Some(body) = trimmed
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            (body, true)
        } else if let Some(body) = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            (body, false)
        } else {
            return Err(invalid_color(input));
        };

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected_len = if expects_alpha { 4 } else { 3 };
        if parts.len() != expected_len {
            return Err(invalid_color(input));
        }

        let channel = |part: &str| part.parse::<u8>().map_err(|_| invalid_color(input));
        let alpha = if expects_alpha {
            parts[3].parse::<f64>().map_err(|_| invalid_color(input))?
        } else {
            1.0
        };

        let color = Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        );
        color.validate()?;
        Ok(color)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn invalid_color(input: &str) -> ChartError {
    ChartError::InvalidStyle(format!("unsupported color literal `{input}`"))
}
