//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response (when `use_default_headers` is on):
//!     → headers.rs (baseline security headers)
//! ```

pub mod headers;

pub use headers::apply_default_headers;
