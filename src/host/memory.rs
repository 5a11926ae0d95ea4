//! In-memory [`Host`] with a virtual clock.
//!
//! `MemoryHost` keeps a small element tree (tags, attributes, classes,
//! inline styles, text, form values and fixed layout boxes), a key-value
//! store, a clipboard and a timer queue driven by [`MemoryHost::advance`].
//! Side effects that leave the page (scrolls, opened URLs, copies) are
//! recorded for inspection.
//!
//! It does no layout or CSS: offsets are whatever the caller assigned with
//! [`MemoryHost::set_layout`], and events are delivered only to listeners
//! registered on the exact target (no bubbling).

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use web_time::Duration;

use super::{
    EnterHandler, Event, EventKind, Handler, Host, MediaHandler, MediaQuery,
    NodeId, ObserverId, ObserverOptions, ScrollBehavior, Selector, Target,
    Task, Tick,
};

#[derive(Debug, Default)]
struct Element {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    text: String,
    inner_html: String,
    value: String,
    top: f64,
    height: f64,
}

enum Job {
    Once(Task),
    Every { tick: Tick, period: Duration },
}

struct Timer {
    due: Duration,
    seq: u64,
    job: Job,
}

struct Observer {
    options: ObserverOptions,
    on_enter: EnterHandler,
    targets: Vec<NodeId>,
}

struct State {
    nodes: Vec<Element>,
    root: NodeId,
    body: NodeId,
    scroll_y: f64,
    scrolls: Vec<(f64, ScrollBehavior)>,
    media: HashMap<MediaQuery, bool>,
    media_listeners: Vec<(MediaQuery, MediaHandler)>,
    storage: Option<BTreeMap<String, String>>,
    opened: Vec<(String, String)>,
    clipboard_api: bool,
    clipboard: Option<String>,
    copy_commands: usize,
    selection: Option<NodeId>,
    focused: Option<NodeId>,
    scrolled_into_view: Vec<NodeId>,
    clock: Duration,
    seq: u64,
    timers: Vec<Timer>,
    listeners: Vec<(Target, EventKind, Handler)>,
    observers: Vec<Observer>,
}

impl State {
    fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.index())
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.index())
    }

    fn push(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        });
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Some(el) = self.element_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(el) = self.element_mut(parent) {
            el.children.push(child);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) =
            self.element_mut(node).and_then(|el| el.parent.take())
        else {
            return;
        };
        if let Some(el) = self.element_mut(parent) {
            el.children.retain(|&c| c != node);
        }
    }

    /// Descendants of `scope` in document (pre-)order, excluding `scope`.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .element(scope)
            .map(|el| el.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Some(el) = self.element(node) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    fn matching(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| {
                self.element(n).is_some_and(|el| matches(selector, el))
            })
            .collect()
    }

    fn text_of(&self, node: NodeId) -> String {
        let Some(el) = self.element(node) else {
            return String::new();
        };
        let mut text = el.text.clone();
        for &child in &el.children {
            text.push_str(&self.text_of(child));
        }
        text
    }

    fn schedule(&mut self, due: Duration, job: Job) {
        self.seq += 1;
        let seq = self.seq;
        self.timers.push(Timer { due, seq, job });
    }
}

fn matches(selector: &Selector, el: &Element) -> bool {
    match selector {
        Selector::Tag(tag) => el.tag == *tag,
        Selector::Class(class) => el.classes.iter().any(|c| c == class),
        Selector::Id(id) => el.attributes.get("id") == Some(id),
        Selector::WithAttribute { tag, attribute } => {
            el.tag == *tag && el.attributes.contains_key(attribute)
        }
        Selector::AttributePrefix {
            tag,
            attribute,
            prefix,
        } => {
            el.tag == *tag
                && el
                    .attributes
                    .get(attribute)
                    .is_some_and(|v| v.starts_with(prefix.as_str()))
        }
        Selector::AnyOf(list) => list.iter().any(|s| matches(s, el)),
    }
}

/// In-memory document and window. See the [module docs](self).
pub struct MemoryHost {
    state: RefCell<State>,
}

impl std::fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MemoryHost")
            .field("nodes", &state.nodes.len())
            .field("clock", &state.clock)
            .field("timers", &state.timers.len())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Empty `<html><body></body></html>` document with working storage
    /// and clipboard APIs, light color scheme and normal motion.
    #[must_use]
    pub fn new() -> Self {
        let mut state = State {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(1),
            scroll_y: 0.0,
            scrolls: Vec::new(),
            media: HashMap::new(),
            media_listeners: Vec::new(),
            storage: Some(BTreeMap::new()),
            opened: Vec::new(),
            clipboard_api: true,
            clipboard: None,
            copy_commands: 0,
            selection: None,
            focused: None,
            scrolled_into_view: Vec::new(),
            clock: Duration::ZERO,
            seq: 0,
            timers: Vec::new(),
            listeners: Vec::new(),
            observers: Vec::new(),
        };
        let root = state.push("html");
        let body = state.push("body");
        state.attach(root, body);
        Self {
            state: RefCell::new(state),
        }
    }

    /// New document behind an `Rc`, the way behaviors hold their host.
    #[must_use]
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    // ── Building ────────────────────────────────────────────────────────

    /// Create an element and append it to `parent`.
    pub fn insert(&self, parent: NodeId, tag: &str) -> NodeId {
        let mut state = self.state.borrow_mut();
        let node = state.push(tag);
        state.attach(parent, node);
        node
    }

    /// Create an element with the given classes and append it to `parent`.
    pub fn insert_with_classes(
        &self,
        parent: NodeId,
        tag: &str,
        classes: &[&str],
    ) -> NodeId {
        let node = self.insert(parent, tag);
        for class in classes {
            self.add_class(node, class);
        }
        node
    }

    /// Assign a layout box: document offset and rendered height.
    pub fn set_layout(&self, node: NodeId, top: f64, height: f64) {
        if let Some(el) = self.state.borrow_mut().element_mut(node) {
            el.top = top;
            el.height = height;
        }
    }

    /// Make persistent storage unavailable (private browsing, disabled).
    pub fn disable_storage(&self) {
        self.state.borrow_mut().storage = None;
    }

    /// Pre-populate persistent storage, e.g. to simulate a reload.
    pub fn seed_storage(&self, entries: &BTreeMap<String, String>) {
        let mut state = self.state.borrow_mut();
        let storage = state.storage.get_or_insert_with(BTreeMap::new);
        storage.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Remove the asynchronous clipboard API.
    pub fn disable_clipboard_api(&self) {
        self.state.borrow_mut().clipboard_api = false;
    }

    /// Set a media feature without notifying listeners (initial state).
    pub fn preset_media(&self, query: MediaQuery, matches: bool) {
        let _ = self.state.borrow_mut().media.insert(query, matches);
    }

    // ── Driving ─────────────────────────────────────────────────────────

    /// Dispatch an event to every listener registered for `(target, kind)`
    /// and return it so callers can inspect `default_prevented`.
    pub fn dispatch_event(
        &self,
        target: Target,
        kind: EventKind,
        event: Event,
    ) -> Event {
        let handlers: Vec<Handler> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|(t, k, _)| *t == target && *k == kind)
            .map(|(_, _, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            handler(&event);
        }
        event
    }

    /// Number of listeners registered for `(target, kind)`.
    #[must_use]
    pub fn listener_count(&self, target: Target, kind: EventKind) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|(t, k, _)| *t == target && *k == kind)
            .count()
    }

    /// Dispatch a payload-less event.
    pub fn dispatch(&self, target: Target, kind: EventKind) -> Event {
        self.dispatch_event(target, kind, Event::new())
    }

    /// Click an element.
    pub fn click(&self, node: NodeId) {
        let _ = self.dispatch(Target::Node(node), EventKind::Click);
    }

    /// Replace a control's value and fire `input` on it.
    pub fn type_text(&self, node: NodeId, text: &str) {
        self.set_value(node, text);
        let _ = self.dispatch(Target::Node(node), EventKind::Input);
    }

    /// Fire `submit` on a form.
    pub fn submit(&self, form: NodeId) -> Event {
        self.dispatch(Target::Node(form), EventKind::Submit)
    }

    /// Move the viewport and fire `scroll` on the window.
    pub fn scroll_window(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y;
        let _ = self.dispatch(Target::Window, EventKind::Scroll);
    }

    /// Report `node` as intersecting to every observer watching it.
    pub fn intersect(&self, node: NodeId) {
        let handlers: Vec<EnterHandler> = self
            .state
            .borrow()
            .observers
            .iter()
            .filter(|o| o.targets.contains(&node))
            .map(|o| Rc::clone(&o.on_enter))
            .collect();
        for handler in handlers {
            handler(node);
        }
    }

    /// Change a media feature, notifying listeners if the state flipped.
    pub fn set_media(&self, query: MediaQuery, matches: bool) {
        let handlers: Vec<MediaHandler> = {
            let mut state = self.state.borrow_mut();
            let previous = state.media.insert(query, matches).unwrap_or(false);
            if previous == matches {
                return;
            }
            state
                .media_listeners
                .iter()
                .filter(|(q, _)| *q == query)
                .map(|(_, h)| Rc::clone(h))
                .collect()
        };
        for handler in handlers {
            handler(matches);
        }
    }

    /// Run every timer due within `by`, in due order, then move the clock
    /// forward by `by`. Timers scheduled while running are honoured if they
    /// fall inside the window.
    pub fn advance(&self, by: Duration) {
        let deadline = self.state.borrow().clock + by;
        loop {
            let timer = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= deadline)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                let Some(index) = next else { break };
                let timer = state.timers.swap_remove(index);
                state.clock = timer.due;
                timer
            };
            match timer.job {
                Job::Once(task) => task(),
                Job::Every { tick, period } => {
                    tick();
                    let due = timer.due + period;
                    self.state
                        .borrow_mut()
                        .schedule(due, Job::Every { tick, period });
                }
            }
        }
        self.state.borrow_mut().clock = deadline;
    }

    /// Run timers that are due right now (resolved promises, zero delays).
    pub fn flush(&self) {
        self.advance(Duration::ZERO);
    }

    // ── Inspecting ──────────────────────────────────────────────────────

    /// Classes on the element, in insertion order.
    #[must_use]
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.state
            .borrow()
            .element(node)
            .map(|el| el.classes.clone())
            .unwrap_or_default()
    }

    /// Inline style property value.
    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.state
            .borrow()
            .element(node)
            .and_then(|el| el.style.get(property).cloned())
    }

    /// Markup last assigned with `set_inner_html`.
    #[must_use]
    pub fn inner_html(&self, node: NodeId) -> String {
        self.state
            .borrow()
            .element(node)
            .map(|el| el.inner_html.clone())
            .unwrap_or_default()
    }

    /// Children of the element, in order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.state
            .borrow()
            .element(node)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    /// Whether the element is reachable from the document root.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        let state = self.state.borrow();
        let mut current = Some(node);
        while let Some(n) = current {
            if n == state.root {
                return true;
            }
            current = state.element(n).and_then(|el| el.parent);
        }
        false
    }

    /// Every `scroll_to` call so far.
    #[must_use]
    pub fn scroll_log(&self) -> Vec<(f64, ScrollBehavior)> {
        self.state.borrow().scrolls.clone()
    }

    /// Every `(url, target)` passed to `open`.
    #[must_use]
    pub fn opened(&self) -> Vec<(String, String)> {
        self.state.borrow().opened.clone()
    }

    /// Current clipboard contents.
    #[must_use]
    pub fn clipboard(&self) -> Option<String> {
        self.state.borrow().clipboard.clone()
    }

    /// How many times the legacy `copy` command ran.
    #[must_use]
    pub fn copy_commands(&self) -> usize {
        self.state.borrow().copy_commands
    }

    /// Snapshot of persistent storage (empty when disabled).
    #[must_use]
    pub fn storage(&self) -> BTreeMap<String, String> {
        self.state.borrow().storage.clone().unwrap_or_default()
    }

    /// Element that last received focus.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.state.borrow().focused
    }

    /// Elements scrolled into view, in order.
    #[must_use]
    pub fn scrolled_into_view(&self) -> Vec<NodeId> {
        self.state.borrow().scrolled_into_view.clone()
    }

    /// Number of timers waiting to fire (intervals count once).
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Whether any observer is watching `node`.
    #[must_use]
    pub fn is_observed(&self, node: NodeId) -> bool {
        self.state
            .borrow()
            .observers
            .iter()
            .any(|o| o.targets.contains(&node))
    }

    /// Options of every observer watching `node`.
    #[must_use]
    pub fn observer_options(&self, node: NodeId) -> Vec<ObserverOptions> {
        self.state
            .borrow()
            .observers
            .iter()
            .filter(|o| o.targets.contains(&node))
            .map(|o| o.options.clone())
            .collect()
    }
}

impl Host for MemoryHost {
    fn document_element(&self) -> NodeId {
        self.state.borrow().root
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.state.borrow().body)
    }

    fn query(&self, selector: &Selector) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        let state = self.state.borrow();
        let root = state.root;
        state.matching(root, selector)
    }

    fn query_in(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.query_all_in(scope, selector).into_iter().next()
    }

    fn query_all_in(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.state.borrow().matching(scope, selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query(&Selector::id(id))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.state
            .borrow()
            .element(node)
            .and_then(|el| el.attributes.get(name).cloned())
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.state.borrow_mut().element_mut(node) {
            let _ = el.attributes.insert(name.into(), value.into());
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.state
            .borrow()
            .element(node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.state.borrow_mut().element_mut(node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.into());
            }
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.state.borrow_mut().element_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(el) = self.state.borrow_mut().element_mut(node) {
            let _ = el.style.insert(property.into(), value.into());
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        self.state.borrow().text_of(node)
    }

    fn set_text_content(&self, node: NodeId, text: &str) {
        let children = self.children(node);
        let mut state = self.state.borrow_mut();
        for child in children {
            state.detach(child);
        }
        if let Some(el) = state.element_mut(node) {
            el.text = text.into();
        }
    }

    fn set_inner_html(&self, node: NodeId, html: &str) {
        if let Some(el) = self.state.borrow_mut().element_mut(node) {
            el.inner_html = html.into();
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.state
            .borrow()
            .element(node)
            .map(|el| el.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&self, node: NodeId, value: &str) {
        if let Some(el) = self.state.borrow_mut().element_mut(node) {
            el.value = value.into();
        }
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.state.borrow().element(node).map_or(0.0, |el| el.top)
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.state.borrow().element(node).map_or(0.0, |el| el.height)
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.state.borrow_mut().push(tag))
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        self.state.borrow_mut().attach(parent, child);
    }

    fn remove(&self, node: NodeId) {
        self.state.borrow_mut().detach(node);
    }

    fn focus(&self, node: NodeId) {
        self.state.borrow_mut().focused = Some(node);
    }

    fn scroll_into_view(&self, node: NodeId) {
        let mut state = self.state.borrow_mut();
        let top = state.element(node).map_or(0.0, |el| el.top);
        state.scroll_y = top;
        state.scrolled_into_view.push(node);
    }

    fn select(&self, node: NodeId) {
        self.state.borrow_mut().selection = Some(node);
    }

    fn exec_copy(&self) -> bool {
        let mut state = self.state.borrow_mut();
        state.copy_commands += 1;
        let selected = state
            .selection
            .and_then(|n| state.element(n))
            .map(|el| el.value.clone());
        match selected {
            Some(text) => {
                state.clipboard = Some(text);
                true
            }
            None => false,
        }
    }

    fn form_value(&self, form: NodeId, field: &str) -> Option<String> {
        let state = self.state.borrow();
        state
            .descendants(form)
            .into_iter()
            .filter_map(|n| state.element(n))
            .find(|el| el.attributes.get("name").is_some_and(|n| n == field))
            .map(|el| el.value.clone())
    }

    fn reset_form(&self, form: NodeId) {
        let mut state = self.state.borrow_mut();
        for node in state.descendants(form) {
            if let Some(el) = state.element_mut(node) {
                if el.attributes.contains_key("name") {
                    el.value.clear();
                }
            }
        }
    }

    fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let mut state = self.state.borrow_mut();
        state.scroll_y = top.max(0.0);
        state.scrolls.push((top, behavior));
    }

    fn media_matches(&self, query: MediaQuery) -> bool {
        self.state
            .borrow()
            .media
            .get(&query)
            .copied()
            .unwrap_or(false)
    }

    fn on_media_change(&self, query: MediaQuery, handler: MediaHandler) {
        self.state.borrow_mut().media_listeners.push((query, handler));
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        self.state
            .borrow()
            .storage
            .as_ref()
            .and_then(|s| s.get(key).cloned())
    }

    fn storage_set(&self, key: &str, value: &str) {
        if let Some(storage) = self.state.borrow_mut().storage.as_mut() {
            let _ = storage.insert(key.into(), value.into());
        }
    }

    fn open(&self, url: &str, target: &str) {
        self.state
            .borrow_mut()
            .opened
            .push((url.into(), target.into()));
    }

    fn write_clipboard(&self, text: &str, done: Task) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.clipboard_api {
            return false;
        }
        state.clipboard = Some(text.into());
        // Promise resolution: runs on the next flush.
        let now = state.clock;
        state.schedule(now, Job::Once(done));
        true
    }

    fn now(&self) -> Duration {
        self.state.borrow().clock
    }

    fn since_navigation(&self) -> Option<Duration> {
        Some(self.now())
    }

    fn set_timeout(&self, delay: Duration, task: Task) {
        let mut state = self.state.borrow_mut();
        let due = state.clock + delay;
        state.schedule(due, Job::Once(task));
    }

    fn set_interval(&self, period: Duration, tick: Tick) {
        let period = period.max(Duration::from_millis(1));
        let mut state = self.state.borrow_mut();
        let due = state.clock + period;
        state.schedule(due, Job::Every { tick, period });
    }

    fn listen(&self, target: Target, kind: EventKind, handler: Handler) {
        self.state.borrow_mut().listeners.push((target, kind, handler));
    }

    fn intersection_observer(
        &self,
        options: &ObserverOptions,
        on_enter: EnterHandler,
    ) -> Option<ObserverId> {
        let mut state = self.state.borrow_mut();
        let id = ObserverId(state.observers.len() as u32);
        state.observers.push(Observer {
            options: options.clone(),
            on_enter,
            targets: Vec::new(),
        });
        Some(id)
    }

    fn observe(&self, observer: ObserverId, node: NodeId) {
        let mut state = self.state.borrow_mut();
        if let Some(o) = state.observers.get_mut(observer.0 as usize) {
            if !o.targets.contains(&node) {
                o.targets.push(node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn queries_follow_document_order() {
        let host = MemoryHost::new();
        let body = host.body().unwrap();
        let first = host.insert_with_classes(body, "div", &["card"]);
        let nested = host.insert_with_classes(first, "div", &["card"]);
        let second = host.insert_with_classes(body, "div", &["card"]);
        assert_eq!(
            host.query_all(&Selector::class("card")),
            vec![first, nested, second]
        );
        assert_eq!(
            host.query_in(first, &Selector::class("card")),
            Some(nested)
        );
    }

    #[test]
    fn detached_elements_are_not_queried() {
        let host = MemoryHost::new();
        let body = host.body().unwrap();
        let node = host.insert_with_classes(body, "div", &["toast"]);
        host.remove(node);
        assert!(host.query(&Selector::class("toast")).is_none());
        assert!(!host.is_attached(node));
    }

    #[test]
    fn timers_run_in_due_order() {
        let host = Rc::new(MemoryHost::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(30, "c"), (10, "a"), (20, "b")] {
            let log = Rc::clone(&log);
            host.set_timeout(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(label)),
            );
        }
        host.advance(Duration::from_millis(15));
        assert_eq!(*log.borrow(), vec!["a"]);
        host.advance(Duration::from_millis(15));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(host.now(), Duration::from_millis(30));
    }

    #[test]
    fn intervals_repeat() {
        let host = MemoryHost::new();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        host.set_interval(
            Duration::from_millis(100),
            Rc::new(move || counter.set(counter.get() + 1)),
        );
        host.advance(Duration::from_millis(350));
        assert_eq!(count.get(), 3);
        assert_eq!(host.pending_timers(), 1);
    }

    #[test]
    fn media_listeners_fire_on_change_only() {
        let host = MemoryHost::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        host.on_media_change(
            MediaQuery::PrefersDark,
            Rc::new(move |dark: bool| sink.borrow_mut().push(dark)),
        );
        host.set_media(MediaQuery::PrefersDark, false);
        host.set_media(MediaQuery::PrefersDark, true);
        host.set_media(MediaQuery::PrefersDark, true);
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn form_values_and_reset() {
        let host = MemoryHost::new();
        let body = host.body().unwrap();
        let form = host.insert(body, "form");
        let input = host.insert(form, "input");
        host.set_attribute(input, "name", "email");
        host.set_value(input, "a@b.c");
        assert_eq!(host.form_value(form, "email").as_deref(), Some("a@b.c"));
        assert_eq!(host.form_value(form, "phone"), None);
        host.reset_form(form);
        assert_eq!(host.form_value(form, "email").as_deref(), Some(""));
    }
}
