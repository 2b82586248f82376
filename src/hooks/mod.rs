//! User-extensible decision points.
//!
//! # Data Flow
//! ```text
//! request
//!     → classifier / query builder (default value, always computed)
//!     → RequestHooks method (sees the default, may return Override::Value)
//!     → Override::resolve (custom value wins, else the default)
//! ```
//!
//! # Design Decisions
//! - "No override" is an explicit variant, so `Override::Value(false)` is a
//!   real answer rather than a fall-through
//! - Hook errors are not suppressed; they abort the request

pub mod registry;

pub use registry::{HookError, HookRegistry, HookResult, NoHooks, Override, RequestHooks};
