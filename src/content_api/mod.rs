//! Content API integration subsystem.
//!
//! # Data Flow
//! ```text
//! origin domain + request target, variant
//!     → query.rs (GraphQL `site` document)
//!     → handle.rs (shared client, built on first use)
//!     → client.rs (POST to the GraphQL endpoint)
//!     → types.rs (raw payload, redirect accessors, typed content view)
//! ```
//!
//! # Security Constraints
//! - Credentials come from configuration / environment only
//! - The secret key is never logged

pub mod client;
pub mod handle;
pub mod query;
pub mod types;

pub use client::{ContentApiClient, ContentApiCredentials, HttpContentApiClient};
pub use handle::{http_client_factory, ClientFactory, ContentApiHandle};
pub use query::{build_default_query, default_data_content_fragment, GraphqlDocument};
pub use types::{ContentApiError, ContentApiResult, SiteContent};
