//! Host capabilities: the document, window, clock and event plumbing that
//! page behaviors run against.
//!
//! [`Host`] is implemented by the browser (`web::WebHost`, feature
//! `web`) and by an in-memory document ([`memory::MemoryHost`]) that the
//! tests drive with a virtual clock.
//!
//! Every method takes `&self`: hosts are single-threaded and shared through
//! `Rc`, so implementations use interior mutability. Calls against nodes
//! that no longer exist, or APIs the environment lacks, are silent no-ops.

mod event;
pub mod memory;
#[cfg(any(feature = "web", test))]
mod registry;
mod selector;
#[cfg(feature = "web")]
pub mod web;

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use web_time::Duration;

pub use event::{Event, EventKind, Target};
pub use selector::Selector;

/// Opaque handle to an element owned by a [`Host`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to an intersection observer created by
/// [`Host::intersection_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u32);

/// Event listener callback.
pub type Handler = Rc<dyn Fn(&Event)>;
/// One-shot timer callback.
pub type Task = Box<dyn FnOnce()>;
/// Recurring timer callback.
pub type Tick = Rc<dyn Fn()>;
/// Media-query change callback; receives the new `matches` state.
pub type MediaHandler = Rc<dyn Fn(bool)>;
/// Intersection callback; receives each node reported as intersecting.
pub type EnterHandler = Rc<dyn Fn(NodeId)>;

/// User-agent media features the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaQuery {
    /// `(prefers-color-scheme: dark)`
    PrefersDark,
    /// `(prefers-reduced-motion: reduce)`
    PrefersReducedMotion,
}

impl MediaQuery {
    /// CSS media query text.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::PrefersDark => "(prefers-color-scheme: dark)",
            Self::PrefersReducedMotion => "(prefers-reduced-motion: reduce)",
        }
    }
}

/// How [`Host::scroll_to`] moves the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Animated scroll.
    #[default]
    Smooth,
    /// Jump straight to the target.
    Instant,
}

/// Intersection observer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    /// Fraction of the element that must be visible (0.0-1.0).
    pub threshold: f64,
    /// CSS margin applied to the viewport, e.g. `"0px 0px -50px 0px"`.
    pub root_margin: String,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".into(),
        }
    }
}

/// Document and window capabilities used by the page behaviors.
pub trait Host {
    // ── Queries ─────────────────────────────────────────────────────────

    /// The root `<html>` element.
    fn document_element(&self) -> NodeId;
    /// The `<body>` element, if the document has one.
    fn body(&self) -> Option<NodeId>;
    /// First element in document order matching `selector`.
    fn query(&self, selector: &Selector) -> Option<NodeId>;
    /// All elements in document order matching `selector`.
    fn query_all(&self, selector: &Selector) -> Vec<NodeId>;
    /// First descendant of `scope` matching `selector`.
    fn query_in(&self, scope: NodeId, selector: &Selector) -> Option<NodeId>;
    /// All descendants of `scope` matching `selector`.
    fn query_all_in(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId>;
    /// Element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    // ── Element state ───────────────────────────────────────────────────

    /// Attribute value, `None` when absent.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    /// Whether the attribute is present (with any value).
    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }
    /// Set an attribute, replacing any previous value.
    fn set_attribute(&self, node: NodeId, name: &str, value: &str);
    /// Whether the element carries `class`.
    fn has_class(&self, node: NodeId, class: &str) -> bool;
    /// Add `class` (no-op if present).
    fn add_class(&self, node: NodeId, class: &str);
    /// Remove `class` (no-op if absent).
    fn remove_class(&self, node: NodeId, class: &str);
    /// Set an inline style property (CSS property name, e.g. `font-size`).
    fn set_style(&self, node: NodeId, property: &str, value: &str);
    /// Concatenated text of the element and its descendants.
    fn text_content(&self, node: NodeId) -> String;
    /// Replace the element's children with a single text node.
    fn set_text_content(&self, node: NodeId, text: &str);
    /// Replace the element's children with parsed markup.
    fn set_inner_html(&self, node: NodeId, html: &str);
    /// Current value of a form control (empty for other elements).
    fn value(&self, node: NodeId) -> String;
    /// Set the value of a form control.
    fn set_value(&self, node: NodeId, value: &str);
    /// Distance from the top of the document, in CSS pixels.
    fn offset_top(&self, node: NodeId) -> f64;
    /// Rendered height, in CSS pixels.
    fn offset_height(&self, node: NodeId) -> f64;

    // ── Tree mutation ───────────────────────────────────────────────────

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Option<NodeId>;
    /// Append `child` as the last child of `parent`.
    fn append_child(&self, parent: NodeId, child: NodeId);
    /// Detach the element from the document.
    fn remove(&self, node: NodeId);

    // ── Focus, selection, forms ─────────────────────────────────────────

    /// Move keyboard focus to the element.
    fn focus(&self, node: NodeId);
    /// Scroll the element into view (instant, aligned to top).
    fn scroll_into_view(&self, node: NodeId);
    /// Select the text of a text control.
    fn select(&self, node: NodeId);
    /// Run the legacy `copy` editing command against the current
    /// selection. Returns what the browser reports, which is not a
    /// guarantee that anything reached the clipboard.
    fn exec_copy(&self) -> bool;
    /// `FormData` entry for `field`: `None` when the form has no control
    /// with that name.
    fn form_value(&self, form: NodeId, field: &str) -> Option<String>;
    /// Restore a form's controls to their default values.
    fn reset_form(&self, form: NodeId);

    // ── Window ──────────────────────────────────────────────────────────

    /// Vertical scroll position, in CSS pixels.
    fn scroll_y(&self) -> f64;
    /// Scroll the viewport so that `top` is at the top edge.
    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);
    /// Whether the media query currently matches. `false` when the
    /// environment cannot evaluate media queries.
    fn media_matches(&self, query: MediaQuery) -> bool;
    /// Call `handler` whenever the query's match state changes.
    fn on_media_change(&self, query: MediaQuery, handler: MediaHandler);
    /// Read from persistent key-value storage.
    fn storage_get(&self, key: &str) -> Option<String>;
    /// Write to persistent key-value storage.
    fn storage_set(&self, key: &str, value: &str);
    /// Open `url` in the browsing context named `target`.
    fn open(&self, url: &str, target: &str);
    /// Write `text` through the asynchronous clipboard API and run `done`
    /// once the write resolves. Returns `false`, without running `done`,
    /// when the API is unavailable.
    fn write_clipboard(&self, text: &str, done: Task) -> bool;

    // ── Time ────────────────────────────────────────────────────────────

    /// Monotonic time since the host was created.
    fn now(&self) -> Duration;
    /// Time since navigation start, when the environment exposes it.
    fn since_navigation(&self) -> Option<Duration>;
    /// Run `task` once after `delay`.
    fn set_timeout(&self, delay: Duration, task: Task);
    /// Run `tick` every `period`, forever.
    fn set_interval(&self, period: Duration, tick: Tick);

    // ── Events ──────────────────────────────────────────────────────────

    /// Register `handler` for `kind` events on `target`.
    fn listen(&self, target: Target, kind: EventKind, handler: Handler);
    /// Create an intersection observer calling `on_enter` for every
    /// observed node that starts intersecting. `None` when the environment
    /// has no intersection observer support.
    fn intersection_observer(
        &self,
        options: &ObserverOptions,
        on_enter: EnterHandler,
    ) -> Option<ObserverId>;
    /// Start watching `node` with `observer`.
    fn observe(&self, observer: ObserverId, node: NodeId);
}
