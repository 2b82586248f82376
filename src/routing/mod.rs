//! Request classification subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (raw target)
//!     → classifier.rs (content-API eligibility, render bypass)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: default booleans for the hook registry
//! ```
//!
//! # Design Decisions
//! - Matchers compiled once, immutable at runtime
//! - Pure and deterministic: same target always yields the same answer
//! - Requests without a target are never eligible and never bypassed

pub mod classifier;
pub mod matcher;

pub use classifier::{is_content_api_eligible, is_render_bypassed, request_target};
