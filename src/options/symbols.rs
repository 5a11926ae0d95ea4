use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Decorative symbol field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SymbolOptions {
    /// Glyphs created at load.
    pub count: usize,
    /// Period of the reposition pass.
    pub reposition_interval_ms: u64,
    /// Chance that a glyph moves on each pass.
    pub reposition_probability: f64,
    /// Smallest font size, in rem.
    pub min_font_rem: f64,
    /// Font size spread above the minimum, in rem.
    pub font_spread_rem: f64,
}

impl SymbolOptions {
    /// [`reposition_interval_ms`](Self::reposition_interval_ms) as a
    /// duration.
    #[must_use]
    pub const fn reposition_interval(&self) -> Duration {
        Duration::from_millis(self.reposition_interval_ms)
    }
}

impl Default for SymbolOptions {
    fn default() -> Self {
        Self {
            count: 25,
            reposition_interval_ms: 10_000,
            reposition_probability: 0.3,
            min_font_rem: 1.5,
            font_spread_rem: 1.5,
        }
    }
}
