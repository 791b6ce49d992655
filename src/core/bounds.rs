use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::primitives::finite_extent;

/// Decimal places the value axis is snapped to.
pub const VALUE_AXIS_DECIMALS: u32 = 3;

/// Value-axis extent snapped outward to the thousandth.
///
/// `min` is the observed minimum floored at three decimals and `max` the
/// observed maximum ceiled at three decimals, so every finite value lies in
/// `[min, max]` and both bounds sit on the 0.001 grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueBounds {
    pub min: f64,
    pub max: f64,
}

impl ValueBounds {
    /// Returns `None` when no value is finite.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let (observed_min, observed_max) = finite_extent(values)?;
        Some(Self {
            min: snap_outward(observed_min, RoundingStrategy::ToNegativeInfinity),
            max: snap_outward(observed_max, RoundingStrategy::ToPositiveInfinity),
        })
    }

    /// Exact decimal form of `min`, when it fits a `Decimal`.
    #[must_use]
    pub fn min_decimal(self) -> Option<Decimal> {
        Decimal::from_f64(self.min)
    }

    /// Exact decimal form of `max`, when it fits a `Decimal`.
    #[must_use]
    pub fn max_decimal(self) -> Option<Decimal> {
        Decimal::from_f64(self.max)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

fn snap_outward(value: f64, strategy: RoundingStrategy) -> f64 {
    // Past the decimal range every f64 is a whole number, already on the grid.
    let Some(decimal) = Decimal::from_f64(value) else {
        return value;
    };
    let floor = matches!(strategy, RoundingStrategy::ToNegativeInfinity);
    let step = Decimal::new(1, VALUE_AXIS_DECIMALS);

    let overshoots = |candidate: f64| {
        if floor {
            candidate > value
        } else {
            candidate < value
        }
    };

    let snapped = decimal.round_dp_with_strategy(VALUE_AXIS_DECIMALS, strategy);
    let Some(result) = snapped.to_f64() else {
        return value;
    };
    // Decimal conversion of the f64 can land a hair past the binary value.
    if !overshoots(result) {
        return result;
    }
    let widened = if floor {
        snapped.checked_sub(step)
    } else {
        snapped.checked_add(step)
    };
    match widened.and_then(|widened| widened.to_f64()) {
        Some(widened) if !overshoots(widened) => widened,
        _ => value,
    }
}
