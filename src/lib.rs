// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Page-interaction layer for a static academic homepage.
//!
//! Folio wires six independent behaviors onto an already-rendered page:
//! theme switching, smooth-scroll navigation with active-section
//! highlighting, entrance animations, a `mailto:` contact form,
//! publication search/filtering and decorative floating symbols.
//!
//! # Key entry points
//!
//! - [`page::Page`] - constructs and wires every behavior in load order
//! - [`host::Host`] - the document/window capabilities the behaviors use
//! - [`host::memory::MemoryHost`] - in-memory document with a virtual
//!   clock, used by the tests and for headless runs
//! - [`options::Options`] - tunables (delays, thresholds, addresses) with
//!   TOML and JSON loading
//!
//! # Architecture
//!
//! Everything runs on one thread. Behaviors hold an `Rc` to the host and
//! register closures for clicks, input, scrolling, media-query changes,
//! intersection reports and timers. The browser implementation lives in
//! `host::web` behind the `web` feature; `crates/folio-web` is the wasm
//! entry point that attaches a [`page::Page`] once the document is parsed.

pub mod animation;
pub mod contact;
pub mod error;
pub mod host;
pub mod navigation;
pub mod notify;
pub mod options;
pub mod page;
pub mod progress;
pub mod publications;
pub mod symbols;
pub mod theme;
pub mod util;

pub use error::FolioError;
