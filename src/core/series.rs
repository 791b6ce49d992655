use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One intraday valuation sample.
///
/// Points are kept in the order they arrive; that order is the rendering order
/// and duplicate `time` labels are rendered as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayPoint {
    pub time: String,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub value: f64,
    /// Percentage change as displayed, without the `%` sign.
    #[serde(default, deserialize_with = "deserialize_display_string")]
    pub growth: String,
}

impl IntradayPoint {
    #[must_use]
    pub fn new(time: impl Into<String>, value: f64, growth: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            value,
            growth: growth.into(),
        }
    }
}

/// One published net-value observation of the multi-day trend series.
///
/// `y` follows JavaScript `Number()` coercion: `null` and blank strings read
/// as `0`, while missing fields, objects and non-numeric strings are
/// non-finite. `equity_return`
/// is the daily change in percent and is only consulted on the last point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Epoch milliseconds.
    #[serde(deserialize_with = "deserialize_epoch_millis")]
    pub x: i64,
    #[serde(default = "missing_number", deserialize_with = "deserialize_coerced_f64")]
    pub y: f64,
    #[serde(
        rename = "equityReturn",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_lenient_f64"
    )]
    pub equity_return: Option<f64>,
}

impl TrendPoint {
    #[must_use]
    pub fn new(x: i64, y: f64) -> Self {
        Self {
            x,
            y,
            equity_return: None,
        }
    }

    #[must_use]
    pub fn with_equity_return(mut self, equity_return: f64) -> Self {
        self.equity_return = Some(equity_return);
        self
    }
}

/// Numeric reading of a loosely typed JSON value: numbers pass through,
/// numeric strings are parsed, everything else is `None`.
#[must_use]
pub fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

/// JavaScript `Number()` reading of a JSON value.
#[must_use]
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::String(text) if text.trim().is_empty() => 0.0,
        other => lenient_number(other).unwrap_or(f64::NAN),
    }
}

fn missing_number() -> f64 {
    f64::NAN
}

fn deserialize_coerced_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    Ok(coerce_number(&raw))
}

fn deserialize_lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(lenient_number).unwrap_or(f64::NAN))
}

fn deserialize_optional_lenient_f64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(lenient_number))
}

fn deserialize_display_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

fn deserialize_epoch_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    if let Some(millis) = raw.as_i64() {
        return Ok(millis);
    }
    match lenient_number(&raw) {
        Some(millis) if millis.is_finite() => Ok(millis.trunc() as i64),
        _ => Err(serde::de::Error::custom(format!(
            "trend point `x` must be epoch milliseconds, got {raw}"
        ))),
    }
}
