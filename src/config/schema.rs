//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Port used when neither `PORT` nor a positional argument is given.
pub const DEFAULT_PORT: u16 = 3000;

/// Variant requested from the content API when none is configured.
pub const DEFAULT_VARIANT: &str = "default";

/// Root configuration for the render gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind host, port).
    pub listener: ListenerConfig,

    /// Per-request pipeline toggles.
    pub features: FeatureConfig,

    /// Content API credentials and endpoint.
    pub content_api: ContentApiConfig,

    /// Public site settings.
    pub site: SiteConfig,

    /// Page renderer location.
    pub renderer: RendererConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind host (e.g., "0.0.0.0").
    pub bind_host: String,

    /// Listening port. Also used to rewrite redirects on local hosts.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ListenerConfig {
    /// Socket address string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

/// Toggles for the request pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Add baseline security headers to every response.
    pub use_default_headers: bool,

    /// Query the content API before rendering.
    pub use_website_api: bool,

    /// Honor redirects reported by the content API. Only applies with `use_website_api`.
    pub use_website_api_redirects: bool,

    /// Pass controller parameters (content API result, custom data) to the renderer.
    pub use_controller_params: bool,

    /// Log per-request and content API timings.
    pub enable_debug: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            use_default_headers: true,
            use_website_api: true,
            use_website_api_redirects: true,
            use_controller_params: true,
            enable_debug: false,
        }
    }
}

/// Content API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentApiConfig {
    /// GraphQL endpoint.
    pub endpoint: String,

    /// Public access key (`WEBSITE_API_PUBLIC`).
    pub access_key: Option<String>,

    /// Secret key (`WEBSITE_API_SECRET`).
    pub secret_key: Option<String>,

    /// Namespace (space) id (`WEBSITE_API_NAMESPACE_ID`).
    pub namespace_id: Option<String>,

    /// Default variant, overridable per request with `X-Websites-Config-Variant`.
    pub variant: String,
}

impl Default for ContentApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4000/graphql".to_string(),
            access_key: None,
            secret_key: None,
            namespace_id: None,
            variant: DEFAULT_VARIANT.to_string(),
        }
    }
}

/// Public site configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin domain prefixed to every request path sent to the content API
    /// (`NEXT_PUBLIC_WEBSITE_DOMAIN`, e.g. "https://example.com").
    pub domain: Option<String>,
}

/// Renderer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Address of the upstream page renderer (e.g., "127.0.0.1:3001").
    pub upstream: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            upstream: "127.0.0.1:3001".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
