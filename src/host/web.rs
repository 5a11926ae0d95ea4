//! Browser [`Host`] backed by `web-sys`.
//!
//! Elements are handed out as [`NodeId`]s through a registry that stamps
//! each `Element` the first time a query returns it and forgets it when
//! [`Host::remove`] detaches it. Listener, interval and observer closures
//! live for the rest of the page (`forget`). Failing browser calls are
//! logged at `warn` and otherwise ignored.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, ErrorEvent, EventTarget, FormData,
    HtmlDocument, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MediaQueryList, MediaQueryListEvent, NodeList,
    ScrollToOptions, Storage, Window,
};
use web_time::{Duration, Instant};

use super::registry::{Registry, Tagged, NODE_ATTRIBUTE};
use super::{
    EnterHandler, Event, EventKind, Handler, Host, MediaHandler, MediaQuery,
    NodeId, ObserverId, ObserverOptions, ScrollBehavior, Selector, Target,
    Task, Tick,
};
use crate::error::FolioError;

impl Tagged for Element {
    fn tag(&self) -> Option<String> {
        self.get_attribute(NODE_ATTRIBUTE)
    }

    fn set_tag(&self, tag: &str) {
        let _ = report(self.set_attribute(NODE_ATTRIBUTE, tag), "setAttribute");
    }

    fn same(&self, other: &Self) -> bool {
        js_sys::Object::is(self.as_ref(), other.as_ref())
    }
}

fn report<T>(result: Result<T, JsValue>, call: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{call} failed: {}", FolioError::from(err));
            None
        }
    }
}

fn millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

/// The live browser window and document.
pub struct WebHost {
    window: Window,
    document: Document,
    root: NodeId,
    registry: Rc<RefCell<Registry<Element>>>,
    observers: RefCell<Vec<IntersectionObserver>>,
    origin: Instant,
}

impl std::fmt::Debug for WebHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebHost")
            .field("nodes", &self.registry.borrow().live_count())
            .field("observers", &self.observers.borrow().len())
            .finish_non_exhaustive()
    }
}

impl WebHost {
    /// Bind to the global `window` and its document.
    pub fn new() -> Result<Rc<Self>, FolioError> {
        let window = web_sys::window().ok_or(FolioError::MissingWindow)?;
        let document = window.document().ok_or(FolioError::MissingDocument)?;
        let root_element = document
            .document_element()
            .ok_or(FolioError::MissingDocument)?;
        let mut registry = Registry::default();
        let root = registry.intern(root_element);
        Ok(Rc::new(Self {
            window,
            document,
            root,
            registry: Rc::new(RefCell::new(registry)),
            observers: RefCell::new(Vec::new()),
            origin: Instant::now(),
        }))
    }

    /// Whether the document has finished parsing (`readyState` is past
    /// `loading`), i.e. `DOMContentLoaded` has already fired.
    #[must_use]
    pub fn document_parsed(&self) -> bool {
        self.document.ready_state() != "loading"
    }

    fn intern(&self, element: Element) -> NodeId {
        self.registry.borrow_mut().intern(element)
    }

    fn element(&self, node: NodeId) -> Option<Element> {
        self.registry.borrow().get(node)
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }

    fn collect(&self, list: Result<NodeList, JsValue>) -> Vec<NodeId> {
        let Some(list) = report(list, "querySelectorAll") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(element))
            .collect()
    }

    fn media_list(&self, query: MediaQuery) -> Option<MediaQueryList> {
        report(self.window.match_media(query.as_css()), "matchMedia").flatten()
    }

    fn storage(&self) -> Option<Storage> {
        // Throws when storage is disabled (privacy modes, sandboxed frames).
        self.window.local_storage().ok().flatten()
    }
}

impl Host for WebHost {
    // ── Queries ─────────────────────────────────────────────────────────

    fn document_element(&self) -> NodeId {
        self.root
    }

    fn body(&self) -> Option<NodeId> {
        self.document.body().map(|body| self.intern(body.into()))
    }

    fn query(&self, selector: &Selector) -> Option<NodeId> {
        let found = self.document.query_selector(&selector.to_css());
        report(found, "querySelector")
            .flatten()
            .map(|element| self.intern(element))
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.collect(self.document.query_selector_all(&selector.to_css()))
    }

    fn query_in(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        let scope = self.element(scope)?;
        report(scope.query_selector(&selector.to_css()), "querySelector")
            .flatten()
            .map(|element| self.intern(element))
    }

    fn query_all_in(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.element(scope).map_or_else(Vec::new, |scope| {
            self.collect(scope.query_selector_all(&selector.to_css()))
        })
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document
            .get_element_by_id(id)
            .map(|element| self.intern(element))
    }

    // ── Element state ───────────────────────────────────────────────────

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            let _ = report(element.set_attribute(name, value), "setAttribute");
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = report(element.class_list().add_1(class), "classList.add");
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let removed = element.class_list().remove_1(class);
            let _ = report(removed, "classList.remove");
        }
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.html(node) {
            let _ = report(
                element.style().set_property(property, value),
                "style.setProperty",
            );
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        self.element(node)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    fn set_text_content(&self, node: NodeId, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn set_inner_html(&self, node: NodeId, html: &str) {
        if let Some(element) = self.element(node) {
            element.set_inner_html(html);
        }
    }

    fn value(&self, node: NodeId) -> String {
        let Some(element) = self.element(node) else {
            return String::new();
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            element.get_attribute("value").unwrap_or_default()
        }
    }

    fn set_value(&self, node: NodeId, value: &str) {
        let Some(element) = self.element(node) else {
            return;
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.html(node)
            .map_or(0.0, |element| f64::from(element.offset_top()))
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.html(node)
            .map_or(0.0, |element| f64::from(element.offset_height()))
    }

    // ── Tree ────────────────────────────────────────────────────────────

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        report(self.document.create_element(tag), "createElement")
            .map(|element| self.intern(element))
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        if let (Some(parent), Some(child)) =
            (self.element(parent), self.element(child))
        {
            let _ = report(parent.append_child(&child), "appendChild");
        }
    }

    fn remove(&self, node: NodeId) {
        let released = self.registry.borrow_mut().release(node);
        if let Some(element) = released {
            element.remove();
        }
    }

    // ── Focus and forms ─────────────────────────────────────────────────

    fn focus(&self, node: NodeId) {
        if let Some(element) = self.html(node) {
            let _ = report(element.focus(), "focus");
        }
    }

    fn scroll_into_view(&self, node: NodeId) {
        if let Some(element) = self.element(node) {
            element.scroll_into_view();
        }
    }

    fn select(&self, node: NodeId) {
        let Some(element) = self.element(node) else {
            return;
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.select();
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.select();
        }
    }

    fn exec_copy(&self) -> bool {
        self.document
            .dyn_ref::<HtmlDocument>()
            .and_then(|document| {
                report(document.exec_command("copy"), "execCommand")
            })
            .unwrap_or(false)
    }

    fn form_value(&self, form: NodeId, field: &str) -> Option<String> {
        let form = self.element(form)?.dyn_into::<HtmlFormElement>().ok()?;
        let data = report(FormData::new_with_form(&form), "FormData")?;
        data.get(field).as_string()
    }

    fn reset_form(&self, form: NodeId) {
        if let Some(form) = self
            .element(form)
            .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    // ── Window ──────────────────────────────────────────────────────────

    fn scroll_y(&self) -> f64 {
        report(self.window.scroll_y(), "scrollY").unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn media_matches(&self, query: MediaQuery) -> bool {
        self.media_list(query).is_some_and(|list| list.matches())
    }

    fn on_media_change(&self, query: MediaQuery, handler: MediaHandler) {
        let Some(list) = self.media_list(query) else {
            return;
        };
        let callback = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
            move |event: MediaQueryListEvent| handler(event.matches()),
        );
        let _ = report(
            list.add_event_listener_with_callback(
                "change",
                callback.as_ref().unchecked_ref(),
            ),
            "matchMedia change listener",
        );
        callback.forget();
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn storage_set(&self, key: &str, value: &str) {
        if let Some(storage) = self.storage() {
            let _ =
                report(storage.set_item(key, value), "localStorage.setItem");
        }
    }

    fn open(&self, url: &str, target: &str) {
        let _ = report(
            self.window.open_with_url_and_target(url, target),
            "window.open",
        );
    }

    fn write_clipboard(&self, text: &str, done: Task) -> bool {
        let navigator = self.window.navigator();
        let key = JsValue::from_str("clipboard");
        let clipboard = match js_sys::Reflect::get(&navigator, &key) {
            Ok(value) if !value.is_undefined() && !value.is_null() => value,
            _ => return false,
        };
        let Some(write_text) =
            js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
                .ok()
                .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
        else {
            return false;
        };
        let Some(promise) = report(
            write_text.call1(&clipboard, &JsValue::from_str(text)),
            "clipboard.writeText",
        )
        .and_then(|value| value.dyn_into::<js_sys::Promise>().ok()) else {
            return false;
        };
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => done(),
                Err(err) => {
                    let err = FolioError::from(err);
                    warn!("clipboard write rejected: {err}");
                }
            }
        });
        true
    }

    // ── Time ────────────────────────────────────────────────────────────

    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn since_navigation(&self) -> Option<Duration> {
        self.window
            .performance()
            .map(|performance| {
                Duration::from_secs_f64(performance.now() / 1000.0)
            })
    }

    fn set_timeout(&self, delay: Duration, task: Task) {
        let callback = Closure::once_into_js(move || task());
        let _ = report(
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    millis(delay),
                ),
            "setTimeout",
        );
    }

    fn set_interval(&self, period: Duration, tick: Tick) {
        let callback = Closure::<dyn FnMut()>::new(move || tick());
        let _ = report(
            self.window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    callback.as_ref().unchecked_ref(),
                    millis(period),
                ),
            "setInterval",
        );
        callback.forget();
    }

    // ── Events ──────────────────────────────────────────────────────────

    fn listen(&self, target: Target, kind: EventKind, handler: Handler) {
        let target: EventTarget = match target {
            Target::Window => self.window.clone().into(),
            Target::Document => self.document.clone().into(),
            Target::Node(node) => match self.element(node) {
                Some(element) => element.into(),
                None => return,
            },
        };
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(
            move |raw: web_sys::Event| {
                let event = raw
                    .dyn_ref::<ErrorEvent>()
                    .map_or_else(Event::new, |error| {
                        Event::with_message(error.message())
                    });
                handler(&event);
                if event.default_prevented() {
                    raw.prevent_default();
                }
            },
        );
        let _ = report(
            target.add_event_listener_with_callback(
                kind.as_str(),
                callback.as_ref().unchecked_ref(),
            ),
            "addEventListener",
        );
        callback.forget();
    }

    fn intersection_observer(
        &self,
        options: &ObserverOptions,
        on_enter: EnterHandler,
    ) -> Option<ObserverId> {
        let registry = Rc::clone(&self.registry);
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(
            move |entries: js_sys::Array| {
                for entry in entries.iter() {
                    let Ok(entry) =
                        entry.dyn_into::<IntersectionObserverEntry>()
                    else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let node = registry.borrow_mut().intern(entry.target());
                        on_enter(node);
                    }
                }
            },
        );
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer = report(
            IntersectionObserver::new_with_options(
                callback.as_ref().unchecked_ref(),
                &init,
            ),
            "IntersectionObserver",
        )?;
        callback.forget();

        let mut observers = self.observers.borrow_mut();
        observers.push(observer);
        Some(ObserverId((observers.len() - 1) as u32))
    }

    fn observe(&self, observer: ObserverId, node: NodeId) {
        let observer =
            self.observers.borrow().get(observer.0 as usize).cloned();
        if let (Some(observer), Some(element)) =
            (observer, self.element(node))
        {
            observer.observe(&element);
        }
    }
}
