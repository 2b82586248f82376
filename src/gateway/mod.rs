//! Request gateway subsystem.
//!
//! # Data Flow
//! ```text
//! axum request
//!     → parsed_url.rs (URL parts + Host overlay)
//!     → orchestrator.rs (classification, hooks, content API, redirect)
//!     → params.rs (controller parameters, render parameters)
//!     → device.rs (mobile client detection)
//!     → Renderer
//! ```

pub mod device;
pub mod error;
pub mod orchestrator;
pub mod params;
pub mod parsed_url;

pub use error::GatewayError;
pub use orchestrator::{Gateway, GatewayBuilder, Outcome, VARIANT_HEADER};
pub use params::{ControllerParameters, RenderParams};
pub use parsed_url::ParsedUrl;
