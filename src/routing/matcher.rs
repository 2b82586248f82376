//! Request-target matching logic.
//!
//! # Responsibilities
//! - Match path prefix (case-sensitive, leading segment only)
//! - Match raw substring anywhere in the request target
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - Matchers see the raw request target (path + query), not the parsed URL
//! - No regex to guarantee O(n) matching

/// Trait for matching request targets against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request target matches this condition.
    fn matches(&self, target: &str) -> bool;
}

/// Matches the start of the request target.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, target: &str) -> bool {
        target.starts_with(&self.prefix)
    }
}

/// Matches a literal fragment anywhere in the request target.
#[derive(Debug, Clone)]
pub struct ContainsMatcher {
    needle: String,
}

impl ContainsMatcher {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }
}

impl Matcher for ContainsMatcher {
    fn matches(&self, target: &str) -> bool {
        target.contains(&self.needle)
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, target: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(target))
    }
}
