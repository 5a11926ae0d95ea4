use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Contact form destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactOptions {
    /// Address used for `mailto:` links and the copy-email control.
    pub email: String,
}

impl Default for ContactOptions {
    fn default() -> Self {
        Self {
            email: "kianoosh.vadaei@gmail.com".into(),
        }
    }
}

/// Toast appearance and lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationOptions {
    /// Delay before the toast slides in.
    pub enter_delay_ms: u64,
    /// Time from creation until the toast starts sliding out.
    pub dismiss_after_ms: u64,
    /// Slide-out duration; the node is removed afterwards.
    pub exit_ms: u64,
    /// Background for success toasts.
    pub success_color: String,
    /// Background for error toasts.
    pub error_color: String,
    /// Background for informational toasts.
    pub info_color: String,
}

impl NotificationOptions {
    /// [`enter_delay_ms`](Self::enter_delay_ms) as a duration.
    #[must_use]
    pub const fn enter_delay(&self) -> Duration {
        Duration::from_millis(self.enter_delay_ms)
    }

    /// [`dismiss_after_ms`](Self::dismiss_after_ms) as a duration.
    #[must_use]
    pub const fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }

    /// [`exit_ms`](Self::exit_ms) as a duration.
    #[must_use]
    pub const fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }
}

impl Default for NotificationOptions {
    fn default() -> Self {
        Self {
            enter_delay_ms: 100,
            dismiss_after_ms: 3000,
            exit_ms: 300,
            success_color: "#00BFA6".into(),
            error_color: "#ff4757".into(),
            info_color: "#00FFCC".into(),
        }
    }
}
