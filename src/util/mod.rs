//! Shared utilities for the page behaviors.
//!
//! Helpers for rate limiting and `encodeURIComponent`-style escaping.

pub mod throttle;
pub mod uri;
