use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::host::ObserverOptions;

/// Skill progress bar fill widths and trigger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProgressOptions {
    /// Width for `progress-bar__fill--advanced`.
    pub advanced_width: String,
    /// Width for `progress-bar__fill--intermediate`.
    pub intermediate_width: String,
    /// Width for every other bar.
    pub beginner_width: String,
    /// Delay between a bar becoming visible and its fill.
    pub fill_delay_ms: u64,
    /// Viewport trigger for the fill.
    pub observer: ObserverOptions,
}

impl ProgressOptions {
    /// [`fill_delay_ms`](Self::fill_delay_ms) as a duration.
    #[must_use]
    pub const fn fill_delay(&self) -> Duration {
        Duration::from_millis(self.fill_delay_ms)
    }
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            advanced_width: "90%".into(),
            intermediate_width: "70%".into(),
            beginner_width: "50%".into(),
            fill_delay_ms: 200,
            observer: ObserverOptions {
                threshold: 0.5,
                root_margin: "0px".into(),
            },
        }
    }
}
