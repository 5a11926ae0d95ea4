//! Light/dark theme: persisted preference, toggle control and live
//! system-preference tracking.
//!
//! The displayed theme is the `data-theme` attribute on the document root.
//! A stored preference always wins; while nothing is stored, system
//! `prefers-color-scheme` changes are followed live. The first explicit
//! toggle writes the preference and from then on system changes are
//! ignored until storage is cleared.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::host::{
    Event, EventKind, Host, MediaQuery, NodeId, Selector, Target,
};
use crate::options::ThemeOptions;

/// Root attribute carrying the displayed theme.
pub const THEME_ATTRIBUTE: &str = "data-theme";
/// Class of the toggle control.
pub const TOGGLE_CLASS: &str = "theme-toggle";

const SUN_ICON: &str = concat!(
    r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" "#,
    r#"stroke="currentColor" stroke-width="2">"#,
    r#"<circle cx="12" cy="12" r="5"/>"#,
    r#"<path d="M12 1v2M12 21v2M4.22 4.22l1.42 1.42M18.36 18.36l1.42 1.42"#,
    r#"M1 12h2M21 12h2M4.22 19.78l1.42-1.42M18.36 5.64l1.42-1.42"/>"#,
    "</svg>",
);
const MOON_ICON: &str = concat!(
    r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" "#,
    r#"stroke="currentColor" stroke-width="2">"#,
    r#"<path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z"/>"#,
    "</svg>",
);

/// Display mode of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// Theme matching a `prefers-color-scheme: dark` reading.
    #[must_use]
    pub const fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Parse a stored value. Anything but `light`/`dark` is rejected.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Attribute and storage value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Toggle icon markup: the sun offers a way out of dark mode, the moon
    /// a way into it.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Dark => SUN_ICON,
            Self::Light => MOON_ICON,
        }
    }
}

/// Owns the displayed theme and its persistence.
pub struct ThemeManager<H: Host> {
    host: Rc<H>,
    toggle: Option<NodeId>,
    current: Cell<Theme>,
    storage_key: String,
}

impl<H: Host> std::fmt::Debug for ThemeManager<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeManager")
            .field("toggle", &self.toggle)
            .field("current", &self.current.get())
            .finish_non_exhaustive()
    }
}

impl<H: Host + 'static> ThemeManager<H> {
    /// Apply the initial theme, wire the toggle control and subscribe to
    /// system color-scheme changes.
    pub fn attach(host: &Rc<H>, options: &ThemeOptions) -> Rc<Self> {
        let toggle = host.query(&Selector::class(TOGGLE_CLASS));
        let stored = host
            .storage_get(&options.storage_key)
            .as_deref()
            .and_then(Theme::parse);
        let initial = stored.unwrap_or_else(|| {
            options
                .fallback
                .resolve(host.media_matches(MediaQuery::PrefersDark))
        });

        let manager = Rc::new(Self {
            host: Rc::clone(host),
            toggle,
            current: Cell::new(initial),
            storage_key: options.storage_key.clone(),
        });
        manager.apply(initial);

        if let Some(control) = toggle {
            let this = Rc::clone(&manager);
            host.listen(
                Target::Node(control),
                EventKind::Click,
                Rc::new(move |_: &Event| {
                    let _ = this.toggle();
                }),
            );
        } else {
            debug!("no .{TOGGLE_CLASS} control; theme toggle inert");
        }

        let this = Rc::clone(&manager);
        host.on_media_change(
            MediaQuery::PrefersDark,
            Rc::new(move |prefers_dark: bool| {
                let _ = this.follow_system(prefers_dark);
            }),
        );

        manager
    }

    /// Theme currently displayed.
    pub fn current(&self) -> Theme {
        self.current.get()
    }

    /// Whether an explicit preference is stored.
    pub fn has_stored_preference(&self) -> bool {
        self.host.storage_get(&self.storage_key).is_some()
    }

    /// Flip the displayed theme, apply it and persist it. Returns the new
    /// theme.
    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.apply(next);
        self.host.storage_set(&self.storage_key, next.as_str());
        debug!("theme toggled to {}", next.as_str());
        next
    }

    /// Display `theme` without persisting it.
    pub fn apply(&self, theme: Theme) {
        self.current.set(theme);
        let root = self.host.document_element();
        self.host.set_attribute(root, THEME_ATTRIBUTE, theme.as_str());
        if let Some(control) = self.toggle {
            self.host.set_inner_html(control, theme.icon());
        }
    }

    /// React to a system color-scheme change. Returns whether the
    /// displayed theme followed it (only while nothing is stored).
    pub fn follow_system(&self, prefers_dark: bool) -> bool {
        if self.has_stored_preference() {
            return false;
        }
        self.apply(Theme::from_system(prefers_dark));
        true
    }
}
