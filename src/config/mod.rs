//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (overlay WEBSITE_API_* / NEXT_PUBLIC_* / PORT env vars)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc with the gateway
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Missing credentials are fatal before the listener is bound

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env, ensure_valid, load_config, resolve_port, ConfigError};
pub use schema::{
    ContentApiConfig, FeatureConfig, GatewayConfig, ListenerConfig, ObservabilityConfig,
    RendererConfig, SiteConfig, DEFAULT_PORT, DEFAULT_VARIANT,
};
pub use validation::ValidationError;
