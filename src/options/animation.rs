use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::host::ObserverOptions;

/// Entrance-animation timing and visibility trigger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationOptions {
    /// Delay added per element index before it is armed.
    pub stagger_ms: u64,
    /// Delay between an element entering the viewport and its reveal.
    pub reveal_delay_ms: u64,
    /// Viewport trigger for the reveal.
    pub observer: ObserverOptions,
}

impl AnimationOptions {
    /// Arming delay for the element at `index`.
    #[must_use]
    pub fn stagger_for(&self, index: usize) -> Duration {
        Duration::from_millis(self.stagger_ms.saturating_mul(index as u64))
    }

    /// [`reveal_delay_ms`](Self::reveal_delay_ms) as a duration.
    #[must_use]
    pub const fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            stagger_ms: 50,
            reveal_delay_ms: 100,
            observer: ObserverOptions {
                threshold: 0.1,
                root_margin: "0px 0px -50px 0px".into(),
            },
        }
    }
}
