use serde::{Deserialize, Serialize};

/// Screen region a chart instance is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartRegion {
    pub id: String,
    /// Requested height; width follows the parent container.
    pub height_px: u32,
}

impl ChartRegion {
    #[must_use]
    pub fn new(id: impl Into<String>, height_px: u32) -> Self {
        Self {
            id: id.into(),
            height_px,
        }
    }
}
