use std::cell::Cell;

use super::NodeId;

/// Where a listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The global window.
    Window,
    /// The document.
    Document,
    /// A specific element.
    Node(NodeId),
}

/// DOM event types the page listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `click`
    Click,
    /// `submit`
    Submit,
    /// `input`
    Input,
    /// `scroll`
    Scroll,
    /// `error` (uncaught script errors on the window)
    Error,
    /// `load`
    Load,
    /// `DOMContentLoaded`
    DomContentLoaded,
}

impl EventKind {
    /// DOM event type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::Input => "input",
            Self::Scroll => "scroll",
            Self::Error => "error",
            Self::Load => "load",
            Self::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

/// Event payload handed to listeners.
///
/// Handlers run synchronously; a handler that calls
/// [`prevent_default`](Self::prevent_default) has the host cancel the
/// browser's default action once dispatch returns.
#[derive(Debug, Default)]
pub struct Event {
    message: Option<String>,
    default_prevented: Cell<bool>,
}

impl Event {
    /// Plain event with no payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Error event carrying the exception message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            default_prevented: Cell::new(false),
        }
    }

    /// Error message, for `error` events.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Suppress the browser's default action.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether a handler suppressed the default action.
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
