//! Skill progress bars that fill when scrolled into view.

use std::rc::Rc;

use log::debug;

use crate::host::{Host, NodeId, Selector};
use crate::options::ProgressOptions;

/// Class of a bar's fill element.
pub const FILL_CLASS: &str = "progress-bar__fill";
/// Modifier for the widest fill.
pub const ADVANCED_CLASS: &str = "progress-bar__fill--advanced";
/// Modifier for the middle fill.
pub const INTERMEDIATE_CLASS: &str = "progress-bar__fill--intermediate";

/// Proficiency level read from a fill's modifier classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// `--advanced`.
    Advanced,
    /// `--intermediate`.
    Intermediate,
    /// No modifier.
    Beginner,
}

impl Level {
    /// Level of `bar`; `--advanced` takes precedence over `--intermediate`.
    #[must_use]
    pub fn of<H: Host>(host: &H, bar: NodeId) -> Self {
        if host.has_class(bar, ADVANCED_CLASS) {
            Self::Advanced
        } else if host.has_class(bar, INTERMEDIATE_CLASS) {
            Self::Intermediate
        } else {
            Self::Beginner
        }
    }

    /// Target width for this level.
    #[must_use]
    pub fn width(self, options: &ProgressOptions) -> &str {
        match self {
            Self::Advanced => &options.advanced_width,
            Self::Intermediate => &options.intermediate_width,
            Self::Beginner => &options.beginner_width,
        }
    }
}

/// Observe every fill on the page and widen it shortly after it becomes
/// visible. Returns the bars being observed.
pub fn attach<H: Host + 'static>(
    host: &Rc<H>,
    options: &ProgressOptions,
) -> Vec<NodeId> {
    let bars = host.query_all(&Selector::class(FILL_CLASS));
    if bars.is_empty() {
        return bars;
    }
    let fill_host = Rc::clone(host);
    let options_for_fill = options.clone();
    let Some(observer) = host.intersection_observer(
        &options.observer,
        Rc::new(move |bar: NodeId| {
            let width = Level::of(&*fill_host, bar)
                .width(&options_for_fill)
                .to_owned();
            let host = Rc::clone(&fill_host);
            fill_host.set_timeout(
                options_for_fill.fill_delay(),
                Box::new(move || host.set_style(bar, "width", &width)),
            );
        }),
    ) else {
        debug!("no intersection observer; progress bars left empty");
        return Vec::new();
    };
    for &bar in &bars {
        host.observe(observer, bar);
    }
    bars
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;
    use crate::host::memory::MemoryHost;

    #[test]
    fn bars_fill_to_their_level_after_delay() {
        let host = MemoryHost::shared();
        let body = host.body().unwrap();
        let advanced = host.insert_with_classes(
            body,
            "div",
            &[FILL_CLASS, ADVANCED_CLASS],
        );
        let middle = host.insert_with_classes(
            body,
            "div",
            &[FILL_CLASS, INTERMEDIATE_CLASS],
        );
        let plain = host.insert_with_classes(body, "div", &[FILL_CLASS]);
        let bars = attach(&host, &ProgressOptions::default());
        assert_eq!(bars, vec![advanced, middle, plain]);
        assert_eq!(host.observer_options(plain)[0].threshold, 0.5);

        for &bar in &bars {
            host.intersect(bar);
        }
        host.advance(Duration::from_millis(199));
        assert_eq!(host.style(advanced, "width"), None);
        host.advance(Duration::from_millis(1));
        assert_eq!(host.style(advanced, "width").as_deref(), Some("90%"));
        assert_eq!(host.style(middle, "width").as_deref(), Some("70%"));
        assert_eq!(host.style(plain, "width").as_deref(), Some("50%"));
    }

    #[test]
    fn advanced_wins_over_intermediate() {
        let host = MemoryHost::shared();
        let bar = host.insert_with_classes(
            host.body().unwrap(),
            "div",
            &[FILL_CLASS, INTERMEDIATE_CLASS, ADVANCED_CLASS],
        );
        assert_eq!(Level::of(&*host, bar), Level::Advanced);
    }

    #[test]
    fn no_bars_no_observer() {
        let host = MemoryHost::shared();
        assert!(attach(&host, &ProgressOptions::default()).is_empty());
    }
}
