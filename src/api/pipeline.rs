use crate::error::ChartResult;

use super::ChartOption;

/// Series-to-option stage run by a chart controller on every data change.
pub trait ChartPipeline {
    type Point;

    /// Whether the series clears the rendering threshold. Below it the
    /// component shows nothing and no engine instance is created.
    fn is_renderable(&self, series: &[Self::Point]) -> bool;

    /// Builds the option, or `None` when the series is below threshold.
    fn build_option(&self, series: &[Self::Point]) -> ChartResult<Option<ChartOption>>;

    /// Height of the region the component reserves while it has output.
    fn region_height_px(&self) -> u32;
}
