mod headless;
mod region;

pub use headless::{EngineCall, HeadlessEngine, HeadlessInstance};
pub use region::ChartRegion;

use crate::api::ChartOption;
use crate::error::ChartResult;

/// Charting engine that turns a region into a live chart instance.
///
/// Hosts supply the implementation (a browser bridge, a native renderer);
/// the crate only drives the `init` / `set_option` / `resize` / `dispose`
/// sequence.
pub trait ChartEngine {
    type Instance: ChartInstance;

    fn init(&mut self, region: &ChartRegion) -> ChartResult<Self::Instance>;
}

/// Live chart bound to one region.
///
/// `dispose` consumes the handle, so a disposed instance cannot be reused.
pub trait ChartInstance {
    fn set_option(&mut self, option: &ChartOption) -> ChartResult<()>;

    /// Re-lays out the existing chart after the viewport changed size.
    fn resize(&mut self) -> ChartResult<()>;

    fn dispose(self);
}
