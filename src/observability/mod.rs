//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! gateway + server produce:
//!     → logging.rs (structured log events, request ID spans from tower-http)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
