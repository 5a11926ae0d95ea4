//! Centralized page options with TOML and JSON loading.
//!
//! All tunables (storage key, scroll offsets, animation delays, observer
//! thresholds, contact address, toast styling, symbol field, progress bar
//! widths) are consolidated here. Every section uses `#[serde(default)]`
//! so a partial document (e.g. only `[contact]`) works.
//!
//! Pages embed options inline:
//!
//! ```html
//! <script id="folio-options" type="application/toml">
//! [theme]
//! fallback = "system"
//! </script>
//! ```

mod animation;
mod contact;
mod navigation;
mod progress;
mod site;
mod symbols;
mod theme;

pub use animation::AnimationOptions;
pub use contact::{ContactOptions, NotificationOptions};
pub use navigation::NavigationOptions;
pub use progress::ProgressOptions;
use serde::{Deserialize, Serialize};
pub use site::SiteOptions;
pub use symbols::SymbolOptions;
pub use theme::{ThemeFallback, ThemeOptions};

use crate::error::FolioError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Site identity.
    pub site: SiteOptions,
    /// Theme persistence.
    pub theme: ThemeOptions,
    /// Smooth scrolling and active-section highlighting.
    pub navigation: NavigationOptions,
    /// Entrance animations.
    pub animation: AnimationOptions,
    /// Contact form destination.
    pub contact: ContactOptions,
    /// Toast notifications.
    pub notifications: NotificationOptions,
    /// Decorative symbols.
    pub symbols: SymbolOptions,
    /// Skill progress bars.
    pub progress: ProgressOptions,
}

impl Options {
    /// Parse options from TOML. Missing fields use defaults.
    pub fn from_toml(source: &str) -> Result<Self, FolioError> {
        toml::from_str(source)
            .map_err(|e| FolioError::OptionsParse(e.to_string()))
    }

    /// Parse options from JSON. Missing fields use defaults.
    pub fn from_json(source: &str) -> Result<Self, FolioError> {
        serde_json::from_str(source)
            .map_err(|e| FolioError::OptionsParse(e.to_string()))
    }

    /// Parse options according to a `<script type>` value:
    /// `application/toml` or `application/json` (the default).
    pub fn from_script(
        media_type: Option<&str>,
        source: &str,
    ) -> Result<Self, FolioError> {
        match media_type.map(str::trim) {
            Some("application/toml" | "text/toml") => Self::from_toml(source),
            _ => Self::from_json(source),
        }
    }

    /// Serialize to pretty-printed TOML.
    pub fn to_toml(&self) -> Result<String, FolioError> {
        toml::to_string_pretty(self)
            .map_err(|e| FolioError::OptionsParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = opts.to_toml().unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[contact]
email = "someone@example.org"

[animation.observer]
threshold = 0.25
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.contact.email, "someone@example.org");
        assert_eq!(opts.animation.observer.threshold, 0.25);
        // Everything else should be default
        assert_eq!(opts.animation.observer.root_margin, "0px 0px -50px 0px");
        assert_eq!(opts.animation.stagger_ms, 50);
        assert_eq!(opts.theme.storage_key, "theme");
        assert_eq!(opts.symbols.count, 25);
    }

    #[test]
    fn json_script_selects_fallback() {
        let opts = Options::from_script(
            Some("application/json"),
            r#"{ "theme": { "fallback": "system" } }"#,
        )
        .unwrap();
        assert_eq!(opts.theme.fallback, ThemeFallback::System);
        assert_eq!(opts.navigation.gutter_px, 20.0);
    }

    #[test]
    fn toml_script_type_is_honoured() {
        let source = "[site]\nowner = \"A. Scholar\"\n";
        let opts =
            Options::from_script(Some("application/toml"), source).unwrap();
        assert_eq!(opts.site.owner, "A. Scholar");
    }

    #[test]
    fn malformed_input_is_an_options_error() {
        let err = Options::from_toml("[theme\nfallback = 3").unwrap_err();
        assert!(matches!(err, FolioError::OptionsParse(_)));
        let err = Options::from_json("{ \"symbols\": { \"count\": \"many\" } }")
            .unwrap_err();
        assert!(matches!(err, FolioError::OptionsParse(_)));
    }
}
