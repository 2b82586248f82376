//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → gateway (pipeline writes into response.rs)
//!     → redirect.rs (content API redirects)
//!     → Send to client
//! ```

pub mod redirect;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::ResponseWriter;
pub use server::{AppState, HttpServer};
