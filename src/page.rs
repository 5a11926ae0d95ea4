//! Page-load wiring.
//!
//! [`Page::attach`] is the one place that knows the load order: it builds
//! every behavior against a host, then applies the small markup
//! annotations (entrance classes, hover classes, external-link targets,
//! skip link, progress bars) and logs that the page is ready.

use std::rc::Rc;

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::{AnimationManager, FADE_IN_CLASS};
use crate::contact::ContactFormManager;
use crate::error::FolioError;
use crate::host::{Event, EventKind, Host, NodeId, Selector, Target};
use crate::navigation::NavigationManager;
use crate::options::Options;
use crate::progress;
use crate::publications::PublicationsFilterManager;
use crate::symbols::AcademicSymbolsManager;
use crate::theme::ThemeManager;

/// Id of the `<script>` element carrying inline options.
pub const OPTIONS_SCRIPT_ID: &str = "folio-options";

const HOVER_CLASS: &str = "scale-on-hover";
const CARD_CLASSES: &[&str] = &["card", "publication-card", "project-card"];
const SKIP_LINK_CLASS: &str = "skip-link";

/// Every behavior attached to one document.
///
/// Optional behaviors are `None` when the page lacks their markup (or, for
/// the symbol field, when reduced motion is preferred).
pub struct Page<H: Host> {
    /// Light/dark theme.
    pub theme: Rc<ThemeManager<H>>,
    /// Smooth scrolling and active-link tracking.
    pub navigation: Rc<NavigationManager<H>>,
    /// Entrance animations.
    pub animation: Rc<AnimationManager<H>>,
    /// Contact form.
    pub contact: Option<Rc<ContactFormManager<H>>>,
    /// Publication search and category filter.
    pub publications: Option<Rc<PublicationsFilterManager<H>>>,
    /// Decorative symbol field.
    pub symbols: Option<Rc<AcademicSymbolsManager<H>>>,
    /// Progress bar fills being observed.
    pub progress_bars: Vec<NodeId>,
}

impl<H: Host> std::fmt::Debug for Page<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("theme", &self.theme)
            .field("navigation", &self.navigation)
            .field("animation", &self.animation)
            .field("contact", &self.contact)
            .field("publications", &self.publications)
            .field("symbols", &self.symbols)
            .field("progress_bars", &self.progress_bars)
            .finish()
    }
}

impl<H: Host + 'static> Page<H> {
    /// Attach every behavior, seeding the symbol field from OS entropy.
    pub fn attach(host: &Rc<H>, options: &Options) -> Self {
        let rng = StdRng::try_from_os_rng().unwrap_or_else(|err| {
            warn!("no OS entropy ({err}); seeding symbols from the clock");
            StdRng::seed_from_u64(host.now().as_nanos() as u64)
        });
        Self::attach_with_rng(host, options, rng)
    }

    /// Attach every behavior with a reproducible symbol field.
    pub fn attach_seeded(host: &Rc<H>, options: &Options, seed: u64) -> Self {
        Self::attach_with_rng(host, options, StdRng::seed_from_u64(seed))
    }

    fn attach_with_rng(host: &Rc<H>, options: &Options, rng: StdRng) -> Self {
        let theme = ThemeManager::attach(host, &options.theme);
        let navigation = NavigationManager::attach(host, &options.navigation);
        let animation = AnimationManager::attach(host, &options.animation);
        let contact = ContactFormManager::attach(
            host,
            &options.contact,
            &options.notifications,
        );
        let publications = PublicationsFilterManager::attach(host);
        let symbols =
            AcademicSymbolsManager::attach(host, &options.symbols, rng);

        annotate(host);
        let progress_bars = progress::attach(host, &options.progress);

        info!(
            "{}'s Academic Homepage loaded successfully!",
            options.site.owner
        );
        Self {
            theme,
            navigation,
            animation,
            contact,
            publications,
            symbols,
            progress_bars,
        }
    }
}

/// Markup touch-ups applied after the behaviors are wired.
///
/// Sections are tagged `fade-in` here, after the animation manager has
/// already collected its elements, so they only animate if the markup
/// tagged them too.
fn annotate<H: Host + 'static>(host: &Rc<H>) {
    for section in host.query_all(&Selector::tag("section")) {
        host.add_class(section, FADE_IN_CLASS);
    }

    for card in host.query_all(&Selector::any_class(CARD_CLASSES)) {
        host.add_class(card, HOVER_CLASS);
    }

    let external = Selector::attribute_prefix("a", "href", "http");
    for link in host.query_all(&external) {
        if !host.has_attribute(link, "target") {
            host.set_attribute(link, "target", "_blank");
            host.set_attribute(link, "rel", "noopener noreferrer");
        }
    }

    if let Some(skip) = host.query(&Selector::class(SKIP_LINK_CLASS)) {
        let target_host = Rc::clone(host);
        host.listen(
            Target::Node(skip),
            EventKind::Click,
            Rc::new(move |event: &Event| {
                event.prevent_default();
                let target = target_host
                    .attribute(skip, "href")
                    .as_deref()
                    .and_then(Selector::from_fragment)
                    .and_then(|selector| target_host.query(&selector));
                if let Some(target) = target {
                    target_host.focus(target);
                    target_host.scroll_into_view(target);
                }
            }),
        );
    }
}

/// Log uncaught script errors and, once the window has loaded, the time
/// since navigation started.
pub fn install_diagnostics<H: Host + 'static>(host: &Rc<H>) {
    host.listen(
        Target::Window,
        EventKind::Error,
        Rc::new(|event: &Event| error!("{}", error_line(event))),
    );

    let clock = Rc::clone(host);
    host.listen(
        Target::Window,
        EventKind::Load,
        Rc::new(move |_: &Event| match clock.since_navigation() {
            Some(elapsed) => info!("Page loaded in {}ms", elapsed.as_millis()),
            None => debug!("no navigation timing; load time not reported"),
        }),
    );
}

fn error_line(event: &Event) -> String {
    format!("JavaScript error: {}", event.message().unwrap_or("unknown error"))
}

/// Options embedded in `<script id="folio-options">`, parsed by the
/// script's `type` (TOML or JSON). `Ok(None)` when there is no such
/// script.
pub fn read_inline_options<H: Host>(
    host: &H,
) -> Result<Option<Options>, FolioError> {
    let Some(script) = host.element_by_id(OPTIONS_SCRIPT_ID) else {
        return Ok(None);
    };
    let media_type = host.attribute(script, "type");
    let source = host.text_content(script);
    Options::from_script(media_type.as_deref(), &source).map(Some)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use log::{Level, LevelFilter, Log, Metadata, Record};

    use web_time::Duration;

    use super::*;
    use crate::host::memory::MemoryHost;
    use crate::host::MediaQuery;
    use crate::options::ThemeFallback;
    use crate::symbols::CONTAINER_ID;
    use crate::theme::{Theme, THEME_ATTRIBUTE, TOGGLE_CLASS};

    /// Records log lines emitted on the current test thread.
    struct Capture;

    thread_local! {
        static LINES: RefCell<Vec<(Level, String)>> =
            const { RefCell::new(Vec::new()) };
    }

    impl Log for Capture {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &Record<'_>) {
            LINES.with(|lines| {
                lines
                    .borrow_mut()
                    .push((record.level(), record.args().to_string()));
            });
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture;

    fn capture_logs() {
        // Only the first call installs; later tests share the logger.
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(LevelFilter::Trace);
        LINES.with(|lines| lines.borrow_mut().clear());
    }

    /// Error and info lines captured so far; debug chatter is dropped.
    fn captured() -> Vec<(Level, String)> {
        LINES.with(|lines| {
            lines
                .borrow()
                .iter()
                .filter(|(level, _)| *level <= Level::Info)
                .cloned()
                .collect()
        })
    }

    /// A small homepage: header with toggle, two sections, cards, links,
    /// skip link, symbol container and a progress bar.
    fn homepage() -> Rc<MemoryHost> {
        let host = MemoryHost::shared();
        let body = host.body().unwrap();
        let skip = host.insert_with_classes(body, "a", &[SKIP_LINK_CLASS]);
        host.set_attribute(skip, "href", "#main");
        let header = host.insert_with_classes(body, "header", &["header"]);
        let _toggle =
            host.insert_with_classes(header, "button", &[TOGGLE_CLASS]);
        let main = host.insert(body, "main");
        host.set_attribute(main, "id", "main");
        host.set_layout(main, 80.0, 2_000.0);
        for (id, top) in [("about", 80.0), ("publications", 900.0)] {
            let section = host.insert(main, "section");
            host.set_attribute(section, "id", id);
            host.set_layout(section, top, 800.0);
        }
        let _card = host.insert_with_classes(main, "div", &["card"]);
        let _project = host.insert_with_classes(main, "div", &["project-card"]);
        let scholar = host.insert(main, "a");
        host.set_attribute(scholar, "href", "https://scholar.example.org");
        let pinned = host.insert(main, "a");
        host.set_attribute(pinned, "href", "http://pinned.example.org");
        host.set_attribute(pinned, "target", "_self");
        let symbols = host.insert(body, "div");
        host.set_attribute(symbols, "id", CONTAINER_ID);
        let _bar = host.insert_with_classes(
            main,
            "div",
            &[progress::FILL_CLASS, progress::ADVANCED_CLASS],
        );
        host
    }

    fn system_fallback() -> Options {
        let mut options = Options::default();
        options.theme.fallback = ThemeFallback::System;
        options
    }

    #[test]
    fn theme_survives_reload_over_system_preference() {
        let options = system_fallback();

        let host = homepage();
        host.preset_media(MediaQuery::PrefersDark, true);
        let page = Page::attach_seeded(&host, &options, 1);
        assert_eq!(page.theme.current(), Theme::Dark);
        assert!(!page.theme.has_stored_preference());

        let _ = page.theme.toggle();
        assert_eq!(
            host.storage().get("theme").map(String::as_str),
            Some("light")
        );

        let reloaded = homepage();
        reloaded.preset_media(MediaQuery::PrefersDark, true);
        reloaded.seed_storage(&host.storage());
        let page = Page::attach_seeded(&reloaded, &options, 2);
        assert_eq!(page.theme.current(), Theme::Light);
        assert_eq!(
            reloaded
                .attribute(reloaded.document_element(), THEME_ATTRIBUTE)
                .as_deref(),
            Some("light")
        );
    }

    #[test]
    fn annotations_are_applied() {
        let host = homepage();
        let _page = Page::attach_seeded(&host, &Options::default(), 0);

        for section in host.query_all(&Selector::tag("section")) {
            assert!(host.has_class(section, FADE_IN_CLASS));
        }
        assert_eq!(host.query_all(&Selector::class(HOVER_CLASS)).len(), 2);

        let links =
            host.query_all(&Selector::attribute_prefix("a", "href", "http"));
        assert_eq!(
            host.attribute(links[0], "target").as_deref(),
            Some("_blank")
        );
        assert_eq!(
            host.attribute(links[0], "rel").as_deref(),
            Some("noopener noreferrer")
        );
        assert_eq!(
            host.attribute(links[1], "target").as_deref(),
            Some("_self")
        );
        assert_eq!(host.attribute(links[1], "rel"), None);
    }

    #[test]
    fn skip_link_focuses_its_target() {
        let host = homepage();
        let _page = Page::attach_seeded(&host, &Options::default(), 0);
        let skip = host.query(&Selector::class(SKIP_LINK_CLASS)).unwrap();
        let main = host.element_by_id("main").unwrap();

        let event = host.dispatch(Target::Node(skip), EventKind::Click);
        assert!(event.default_prevented());
        assert_eq!(host.focused(), Some(main));
        assert_eq!(host.scrolled_into_view(), vec![main]);
    }

    #[test]
    fn optional_behaviors_follow_markup() {
        let host = homepage();
        let page = Page::attach_seeded(&host, &Options::default(), 0);
        assert!(page.contact.is_none());
        assert!(page.publications.is_none());
        assert!(page.symbols.is_some());
        assert_eq!(page.progress_bars.len(), 1);
        // Sections were tagged after the animation manager looked.
        assert!(page.animation.elements().is_empty());
    }

    #[test]
    fn reduced_motion_page_schedules_nothing() {
        let host = homepage();
        host.preset_media(MediaQuery::PrefersReducedMotion, true);
        let page = Page::attach_seeded(&host, &Options::default(), 0);
        assert!(page.symbols.is_none());
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn symbol_field_runs_after_load() {
        let host = homepage();
        let _page = Page::attach_seeded(&host, &Options::default(), 5);
        assert_eq!(host.pending_timers(), 1);
        host.advance(Duration::from_secs(30));
        assert_eq!(host.pending_timers(), 1);
    }

    #[test]
    fn inline_options_are_read_by_type() {
        let host = homepage();
        assert_eq!(read_inline_options(&*host).unwrap(), None);

        let script = host.insert(host.body().unwrap(), "script");
        host.set_attribute(script, "id", OPTIONS_SCRIPT_ID);
        host.set_attribute(script, "type", "application/toml");
        host.set_text_content(
            script,
            "[contact]\nemail = \"lab@example.org\"\n",
        );
        let options = read_inline_options(&*host).unwrap().unwrap();
        assert_eq!(options.contact.email, "lab@example.org");

        host.set_attribute(script, "type", "application/json");
        assert!(matches!(
            read_inline_options(&*host),
            Err(FolioError::OptionsParse(_))
        ));
    }

    #[test]
    fn diagnostics_log_errors_and_load_time() {
        capture_logs();
        let host = homepage();
        install_diagnostics(&host);
        assert_eq!(host.listener_count(Target::Window, EventKind::Error), 1);
        assert_eq!(host.listener_count(Target::Window, EventKind::Load), 1);

        let event = host.dispatch_event(
            Target::Window,
            EventKind::Error,
            Event::with_message("boom"),
        );
        assert!(!event.default_prevented());
        let _ = host.dispatch(Target::Window, EventKind::Error);
        host.advance(Duration::from_millis(250));
        let _ = host.dispatch(Target::Window, EventKind::Load);

        assert_eq!(
            captured(),
            vec![
                (Level::Error, "JavaScript error: boom".to_owned()),
                (Level::Error, "JavaScript error: unknown error".to_owned()),
                (Level::Info, "Page loaded in 250ms".to_owned()),
            ]
        );
    }

    #[test]
    fn no_diagnostics_without_install() {
        let host = homepage();
        assert_eq!(host.listener_count(Target::Window, EventKind::Error), 0);
        assert_eq!(host.listener_count(Target::Window, EventKind::Load), 0);
    }

    #[test]
    fn storage_snapshot_is_plain_data() {
        let host = homepage();
        let mut seeded = BTreeMap::new();
        let _ = seeded.insert("theme".to_owned(), "dark".to_owned());
        host.seed_storage(&seeded);
        let page = Page::attach_seeded(&host, &Options::default(), 0);
        assert_eq!(page.theme.current(), Theme::Dark);
    }
}
