use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// What to display when no preference has been stored yet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeFallback {
    /// Light mode regardless of the system setting.
    #[default]
    Light,
    /// Dark mode regardless of the system setting.
    Dark,
    /// Whatever `prefers-color-scheme` reports at load.
    System,
}

impl ThemeFallback {
    /// Resolve against the system's current `prefers-color-scheme: dark`.
    #[must_use]
    pub const fn resolve(self, system_prefers_dark: bool) -> Theme {
        match self {
            Self::Light => Theme::Light,
            Self::Dark => Theme::Dark,
            Self::System => Theme::from_system(system_prefers_dark),
        }
    }
}

/// Theme persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeOptions {
    /// Storage key holding `"light"` or `"dark"`.
    pub storage_key: String,
    /// Theme used while nothing is stored.
    pub fallback: ThemeFallback,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            storage_key: "theme".into(),
            fallback: ThemeFallback::Light,
        }
    }
}
