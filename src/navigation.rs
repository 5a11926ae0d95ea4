//! In-page navigation: smooth scrolling to sections and highlighting the
//! nav link of the section under the viewport probe.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::host::{
    Event, EventKind, Host, NodeId, ScrollBehavior, Selector, Target,
};
use crate::options::NavigationOptions;
use crate::util::throttle::Throttle;

/// Class of navigation links.
pub const LINK_CLASS: &str = "nav__link";
/// Class of the sticky page header.
pub const HEADER_CLASS: &str = "header";
/// Class marking the current nav link.
pub const ACTIVE_CLASS: &str = "active";

/// Scroll offset that puts a section's top just below the header.
#[must_use]
pub fn scroll_target(section_top: f64, header_height: f64, gutter: f64) -> f64 {
    section_top - header_height - gutter
}

/// Whether `probe` falls inside the half-open span `[top, top + height)`.
#[must_use]
pub fn section_contains(top: f64, height: f64, probe: f64) -> bool {
    probe >= top && probe < top + height
}

/// Smooth scrolling and active-link tracking over the nav links and
/// `section[id]` elements present at construction.
pub struct NavigationManager<H: Host> {
    host: Rc<H>,
    links: Vec<NodeId>,
    sections: Vec<NodeId>,
    throttle: RefCell<Throttle>,
    options: NavigationOptions,
}

impl<H: Host> std::fmt::Debug for NavigationManager<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationManager")
            .field("links", &self.links)
            .field("sections", &self.sections)
            .finish_non_exhaustive()
    }
}

impl<H: Host + 'static> NavigationManager<H> {
    /// Capture links and sections, intercept fragment-link clicks, and
    /// track the active section on (throttled) scroll.
    pub fn attach(host: &Rc<H>, options: &NavigationOptions) -> Rc<Self> {
        let manager = Rc::new(Self {
            host: Rc::clone(host),
            links: host.query_all(&Selector::class(LINK_CLASS)),
            sections: host
                .query_all(&Selector::with_attribute("section", "id")),
            throttle: RefCell::new(Throttle::new(options.scroll_throttle())),
            options: options.clone(),
        });
        debug!(
            "navigation: {} links, {} sections",
            manager.links.len(),
            manager.sections.len()
        );

        for &link in &manager.links {
            let this = Rc::clone(&manager);
            host.listen(
                Target::Node(link),
                EventKind::Click,
                Rc::new(move |event: &Event| this.on_link_click(link, event)),
            );
        }

        let this = Rc::clone(&manager);
        host.listen(
            Target::Window,
            EventKind::Scroll,
            Rc::new(move |_: &Event| this.on_scroll()),
        );

        let _ = manager.highlight_active_section();
        manager
    }

    fn on_link_click(&self, link: NodeId, event: &Event) {
        let Some(href) = self.host.attribute(link, "href") else {
            return;
        };
        if let Some(id) = href.strip_prefix('#') {
            event.prevent_default();
            let _ = self.scroll_to_section(id);
        }
    }

    fn on_scroll(&self) {
        let now = self.host.now();
        if self.throttle.borrow_mut().try_acquire(now) {
            let _ = self.highlight_active_section();
        }
    }

    /// Smooth-scroll to the element with `id`, leaving room for the header.
    /// Returns the scroll target, or `None` if no such element exists.
    pub fn scroll_to_section(&self, id: &str) -> Option<f64> {
        let section = self.host.element_by_id(id)?;
        let header_height = self
            .host
            .query(&Selector::class(HEADER_CLASS))
            .map_or(0.0, |header| self.host.offset_height(header));
        let top = scroll_target(
            self.host.offset_top(section),
            header_height,
            self.options.gutter_px,
        );
        self.host.scroll_to(top, ScrollBehavior::Smooth);
        Some(top)
    }

    /// Mark the nav link of the section containing `scrollY + probe`.
    ///
    /// Sections are checked in document order and each match re-marks the
    /// links, so with overlapping spans the last match wins. When no
    /// section matches, the previous mark is left alone. Returns the id
    /// that ended up marked, if any.
    pub fn highlight_active_section(&self) -> Option<String> {
        let probe = self.host.scroll_y() + self.options.probe_offset_px;
        let mut active = None;
        for &section in &self.sections {
            let top = self.host.offset_top(section);
            let height = self.host.offset_height(section);
            if !section_contains(top, height, probe) {
                continue;
            }
            let id = self.host.attribute(section, "id").unwrap_or_default();
            self.mark_link(&id);
            active = Some(id);
        }
        active
    }

    fn mark_link(&self, section_id: &str) {
        let wanted = format!("#{section_id}");
        for &link in &self.links {
            self.host.remove_class(link, ACTIVE_CLASS);
            let href = self.host.attribute(link, "href");
            if href.as_deref() == Some(wanted.as_str()) {
                self.host.add_class(link, ACTIVE_CLASS);
            }
        }
    }
}
