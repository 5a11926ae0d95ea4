//! Crate-level error types.

use std::fmt;

/// Errors produced by the folio crate.
///
/// Page behaviors never fail outright: a missing element or browser API
/// makes the corresponding feature inert. These errors cover the setup
/// path (locating the window, parsing options) and host calls that throw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolioError {
    /// No global `window` object (not running in a browser context).
    MissingWindow,
    /// The window has no `document`.
    MissingDocument,
    /// A host API call threw; carries the stringified exception.
    Host(String),
    /// TOML/JSON options parsing or serialization failure.
    OptionsParse(String),
}

impl fmt::Display for FolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWindow => write!(f, "no global window"),
            Self::MissingDocument => write!(f, "window has no document"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for FolioError {}

#[cfg(feature = "web")]
impl From<wasm_bindgen::JsValue> for FolioError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Host(format!("{value:?}"))
    }
}
