//! Self-dismissing toast notifications.
//!
//! Toasts are independent: each one is its own element with its own
//! timers, so overlapping toasts simply stack.

use std::rc::Rc;

use crate::host::{Host, NodeId};
use crate::options::NotificationOptions;

/// Toast flavor; picks the modifier class and background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeKind {
    /// Neutral information.
    #[default]
    Info,
    /// Operation succeeded.
    Success,
    /// Operation rejected.
    Error,
}

impl NoticeKind {
    /// Modifier used in `notification--{kind}`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    fn background(self, options: &NotificationOptions) -> &str {
        match self {
            Self::Info => &options.info_color,
            Self::Success => &options.success_color,
            Self::Error => &options.error_color,
        }
    }
}

const OFFSCREEN: &str = "translateX(100%)";
const ONSCREEN: &str = "translateX(0)";

/// Append a toast to the body, slide it in, and remove it once it has
/// been shown for `dismiss_after`. Returns the toast element, or `None`
/// when the document has no body.
pub fn show<H: Host + 'static>(
    host: &Rc<H>,
    message: &str,
    kind: NoticeKind,
    options: &NotificationOptions,
) -> Option<NodeId> {
    let body = host.body()?;
    let toast = host.create_element("div")?;
    host.add_class(toast, "notification");
    host.add_class(toast, &format!("notification--{}", kind.as_str()));
    host.set_text_content(toast, message);

    for (property, value) in [
        ("position", "fixed"),
        ("top", "20px"),
        ("right", "20px"),
        ("padding", "12px 20px"),
        ("border-radius", "8px"),
        ("color", "white"),
        ("font-weight", "500"),
        ("z-index", "10000"),
        ("transform", OFFSCREEN),
        ("transition", "transform 0.3s ease-out"),
        ("background-color", kind.background(options)),
    ] {
        host.set_style(toast, property, value);
    }
    host.append_child(body, toast);

    let enter = Rc::clone(host);
    host.set_timeout(
        options.enter_delay(),
        Box::new(move || enter.set_style(toast, "transform", ONSCREEN)),
    );

    let leave = Rc::clone(host);
    let exit = options.exit();
    host.set_timeout(
        options.dismiss_after(),
        Box::new(move || {
            leave.set_style(toast, "transform", OFFSCREEN);
            let remove = Rc::clone(&leave);
            leave.set_timeout(exit, Box::new(move || remove.remove(toast)));
        }),
    );

    Some(toast)
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;
    use crate::host::memory::MemoryHost;
    use crate::host::Selector;

    #[test]
    fn toast_lifecycle() {
        let host = MemoryHost::shared();
        let options = NotificationOptions::default();
        let toast =
            show(&host, "Saved", NoticeKind::Success, &options).unwrap();

        assert!(host.is_attached(toast));
        assert_eq!(host.text_content(toast), "Saved");
        assert!(host.has_class(toast, "notification--success"));
        assert_eq!(
            host.style(toast, "background-color").as_deref(),
            Some("#00BFA6")
        );
        assert_eq!(host.style(toast, "transform").as_deref(), Some(OFFSCREEN));

        host.advance(Duration::from_millis(100));
        assert_eq!(host.style(toast, "transform").as_deref(), Some(ONSCREEN));

        host.advance(Duration::from_millis(2_900));
        assert_eq!(host.style(toast, "transform").as_deref(), Some(OFFSCREEN));
        assert!(host.is_attached(toast));

        host.advance(Duration::from_millis(300));
        assert!(!host.is_attached(toast));
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn overlapping_toasts_stack() {
        let host = MemoryHost::shared();
        let options = NotificationOptions::default();
        let first = show(&host, "one", NoticeKind::Error, &options).unwrap();
        host.advance(Duration::from_millis(1_000));
        let second = show(&host, "two", NoticeKind::Info, &options).unwrap();
        assert_eq!(
            host.query_all(&Selector::class("notification")),
            vec![first, second]
        );
        assert_eq!(
            host.style(second, "background-color").as_deref(),
            Some("#00FFCC")
        );

        host.advance(Duration::from_millis(2_300));
        assert!(!host.is_attached(first));
        assert!(host.is_attached(second));
    }
}
