pub mod bounds;
pub mod color;
pub mod primitives;
pub mod series;
pub mod trend;

pub use bounds::{VALUE_AXIS_DECIMALS, ValueBounds};
pub use color::Color;
pub use series::{IntradayPoint, TrendPoint, coerce_number, lenient_number};
pub use trend::{TrendDirection, TrendPalette, classify_intraday, classify_trend};
