//! URL classification.
//!
//! Decides from the raw request target alone whether a request should query the
//! content API and whether it bypasses rendering. These are the default values
//! that the hook registry hands to user overrides.

use std::sync::LazyLock;

use axum::http::request::Parts;

use crate::routing::matcher::{AnyMatcher, ContainsMatcher, Matcher, PathPrefixMatcher};

/// Marker segment of the renderer's internal assets.
pub const INTERNAL_ASSET_MARKER: &str = "_next";

/// Browser favicon path.
pub const FAVICON: &str = "favicon.ico";

/// Reserved prefix of API routes that bypass rendering.
pub const API_PREFIX: &str = "/api/";

static NOT_ELIGIBLE: LazyLock<AnyMatcher> = LazyLock::new(|| {
    AnyMatcher::new(vec![
        Box::new(ContainsMatcher::new(INTERNAL_ASSET_MARKER)),
        Box::new(ContainsMatcher::new(FAVICON)),
    ])
});

static BYPASS: LazyLock<PathPrefixMatcher> = LazyLock::new(|| PathPrefixMatcher::new(API_PREFIX));

/// The raw request target (path and query), or `None` when the request has none.
pub fn request_target(req: &Parts) -> Option<&str> {
    req.uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .filter(|target| !target.is_empty())
}

/// True iff the target exists, is not an internal asset and is not the favicon.
pub fn is_target_eligible(target: Option<&str>) -> bool {
    target.is_some_and(|t| !NOT_ELIGIBLE.matches(t))
}

/// True iff the target exists and starts with `/api/`.
pub fn is_target_bypassed(target: Option<&str>) -> bool {
    target.is_some_and(|t| BYPASS.matches(t))
}

/// Whether the request should query the content API.
pub fn is_content_api_eligible(req: &Parts) -> bool {
    is_target_eligible(request_target(req))
}

/// Whether the request skips content API logic and rendering enrichment.
pub fn is_render_bypassed(req: &Parts) -> bool {
    is_target_bypassed(request_target(req))
}
