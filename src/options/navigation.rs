use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Scrolling and active-section settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavigationOptions {
    /// Space left between the sticky header and a scrolled-to section.
    pub gutter_px: f64,
    /// How far below the viewport top the active-section probe sits.
    pub probe_offset_px: f64,
    /// Minimum time between two active-section updates.
    pub scroll_throttle_ms: u64,
}

impl NavigationOptions {
    /// [`scroll_throttle_ms`](Self::scroll_throttle_ms) as a duration.
    #[must_use]
    pub const fn scroll_throttle(&self) -> Duration {
        Duration::from_millis(self.scroll_throttle_ms)
    }
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            gutter_px: 20.0,
            probe_offset_px: 100.0,
            scroll_throttle_ms: 100,
        }
    }
}
