//! Publication list filtering: free-text search and category buttons.
//!
//! Both controls write card visibility directly and neither re-applies the
//! other, so the most recent action decides what is shown.

use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::host::{Event, EventKind, Host, NodeId, Selector, Target};

/// Class of the search input.
pub const SEARCH_CLASS: &str = "publications-search";
/// Class of category filter buttons.
pub const FILTER_BUTTON_CLASS: &str = "filter-btn";
/// Class of publication cards.
pub const CARD_CLASS: &str = "publication-card";
/// Class marking the current filter button.
pub const ACTIVE_CLASS: &str = "active";
/// Filter value that shows every card.
pub const ALL: &str = "all";

const TITLE_CLASS: &str = "publication__title";
const ABSTRACT_CLASS: &str = "publication__abstract";
const AUTHORS_CLASS: &str = "publication__authors";

/// Whether any of the card texts contains the (already lower-cased) term.
/// The empty term matches everything.
#[must_use]
pub fn matches_search(term: &str, fields: &[&str]) -> bool {
    fields.iter().any(|field| field.to_lowercase().contains(term))
}

/// Whether a card with `category` passes the button filter `filter`.
///
/// Missing attributes compare as absent on both sides, so a button without
/// `data-filter` shows exactly the cards without `data-category`.
#[must_use]
pub fn matches_category(filter: Option<&str>, category: Option<&str>) -> bool {
    filter == Some(ALL) || filter == category
}

/// Search and category filtering over the cards present at construction.
pub struct PublicationsFilterManager<H: Host> {
    host: Rc<H>,
    search: Option<NodeId>,
    buttons: Vec<NodeId>,
    cards: Vec<NodeId>,
}

impl<H: Host> fmt::Debug for PublicationsFilterManager<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicationsFilterManager")
            .field("search", &self.search)
            .field("buttons", &self.buttons)
            .field("cards", &self.cards.len())
            .finish_non_exhaustive()
    }
}

impl<H: Host + 'static> PublicationsFilterManager<H> {
    /// Wire the search input and filter buttons. Returns `None` when the
    /// page has neither.
    pub fn attach(host: &Rc<H>) -> Option<Rc<Self>> {
        let search = host.query(&Selector::class(SEARCH_CLASS));
        let buttons = host.query_all(&Selector::class(FILTER_BUTTON_CLASS));
        if search.is_none() && buttons.is_empty() {
            debug!("no search input or filter buttons; filter inert");
            return None;
        }
        let manager = Rc::new(Self {
            host: Rc::clone(host),
            search,
            buttons,
            cards: host.query_all(&Selector::class(CARD_CLASS)),
        });

        if let Some(input) = search {
            let this = Rc::clone(&manager);
            host.listen(
                Target::Node(input),
                EventKind::Input,
                Rc::new(move |_: &Event| {
                    let query = this.host.value(input);
                    let _ = this.search(&query);
                }),
            );
        }

        for &button in &manager.buttons {
            let this = Rc::clone(&manager);
            host.listen(
                Target::Node(button),
                EventKind::Click,
                Rc::new(move |_: &Event| {
                    let filter = this.host.attribute(button, "data-filter");
                    let _ = this.filter_by_category(filter.as_deref());
                    this.set_active_button(button);
                }),
            );
        }

        Some(manager)
    }

    /// Show the cards whose title, abstract or authors contain `query`
    /// (case-insensitive). Returns how many cards are shown.
    pub fn search(&self, query: &str) -> usize {
        let term = query.to_lowercase();
        self.apply(|card| {
            let parts = [TITLE_CLASS, ABSTRACT_CLASS, AUTHORS_CLASS];
            let texts = parts.map(|class| {
                self.host
                    .query_in(card, &Selector::class(class))
                    .map(|node| self.host.text_content(node))
                    .unwrap_or_default()
            });
            matches_search(&term, &texts.each_ref().map(String::as_str))
        })
    }

    /// Show the cards in `filter`'s category, or all cards for
    /// [`ALL`]. Returns how many cards are shown.
    pub fn filter_by_category(&self, filter: Option<&str>) -> usize {
        self.apply(|card| {
            let category = self.host.attribute(card, "data-category");
            matches_category(filter, category.as_deref())
        })
    }

    /// Move the `active` mark to `button`.
    pub fn set_active_button(&self, button: NodeId) {
        for &other in &self.buttons {
            self.host.remove_class(other, ACTIVE_CLASS);
        }
        self.host.add_class(button, ACTIVE_CLASS);
    }

    fn apply(&self, mut visible: impl FnMut(NodeId) -> bool) -> usize {
        let mut shown = 0;
        for &card in &self.cards {
            let show = visible(card);
            let display = if show { "block" } else { "none" };
            self.host.set_style(card, "display", display);
            shown += usize::from(show);
        }
        shown
    }
}
