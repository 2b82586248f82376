//! Baseline security response headers.
//!
//! # Responsibilities
//! - Add security response headers before any hook or renderer runs
//!
//! # Design Decisions
//! - Only headers that are safe for every page are set here
//! - Later writers (hooks, renderer) may override them

use axum::http::{header, HeaderMap, HeaderValue};

/// Set the default security headers on `headers`.
pub fn apply_default_headers(headers: &mut HeaderMap) {
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
}
