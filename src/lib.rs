//! Request-interception gateway in front of a page renderer.
//!
//! Every request is classified, optionally enriched with content API data
//! (or answered with the content API's redirect), then handed to the
//! renderer.

pub mod config;
pub mod content_api;
pub mod gateway;
pub mod hooks;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod routing;
pub mod security;

pub use config::schema::GatewayConfig;
pub use gateway::{Gateway, GatewayBuilder, GatewayError, Outcome};
pub use hooks::{HookError, Override, RequestHooks};
pub use http::{HttpServer, ResponseWriter};
pub use lifecycle::Shutdown;
pub use render::{RenderError, Renderer};
