//! Entrance animations for `.fade-in` elements.
//!
//! Each element is armed (`animate`) on a short stagger and handed to an
//! intersection observer; once it scrolls far enough into view it gets
//! `visible` after a small delay and the stylesheet runs the transition.
//! The reveal is one-way: elements are never hidden again. Under a
//! reduced-motion preference everything is made visible immediately.

use std::rc::Rc;

use log::debug;

use crate::host::{Host, MediaQuery, NodeId, ObserverId, Selector};
use crate::options::AnimationOptions;

/// Class of elements with an entrance animation.
pub const FADE_IN_CLASS: &str = "fade-in";
/// Class arming an element for its entrance (hidden until revealed).
pub const ANIMATE_CLASS: &str = "animate";
/// Class revealing an element.
pub const VISIBLE_CLASS: &str = "visible";

/// Entrance-animation driver for the `.fade-in` elements present at
/// construction.
pub struct AnimationManager<H: Host> {
    host: Rc<H>,
    elements: Vec<NodeId>,
    observer: Option<ObserverId>,
    options: AnimationOptions,
}

impl<H: Host> std::fmt::Debug for AnimationManager<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationManager")
            .field("elements", &self.elements)
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}

impl<H: Host + 'static> AnimationManager<H> {
    /// Create the reveal observer and arm every `.fade-in` element.
    pub fn attach(host: &Rc<H>, options: &AnimationOptions) -> Rc<Self> {
        let reveal_host = Rc::clone(host);
        let reveal_delay = options.reveal_delay();
        let observer = host.intersection_observer(
            &options.observer,
            Rc::new(move |node: NodeId| {
                let host = Rc::clone(&reveal_host);
                reveal_host.set_timeout(
                    reveal_delay,
                    Box::new(move || host.add_class(node, VISIBLE_CLASS)),
                );
            }),
        );
        if observer.is_none() {
            debug!("no intersection observer; entrance animations inert");
        }

        let manager = Rc::new(Self {
            host: Rc::clone(host),
            elements: host.query_all(&Selector::class(FADE_IN_CLASS)),
            observer,
            options: options.clone(),
        });
        manager.animate_elements();
        manager
    }

    /// Elements captured at construction.
    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    fn animate_elements(&self) {
        if self.host.media_matches(MediaQuery::PrefersReducedMotion) {
            for &element in &self.elements {
                self.host.add_class(element, VISIBLE_CLASS);
            }
            return;
        }

        for (index, &element) in self.elements.iter().enumerate() {
            let host = Rc::clone(&self.host);
            let observer = self.observer;
            self.host.set_timeout(
                self.options.stagger_for(index),
                Box::new(move || {
                    host.add_class(element, ANIMATE_CLASS);
                    if let Some(observer) = observer {
                        host.observe(observer, element);
                    }
                }),
            );
        }
    }
}
