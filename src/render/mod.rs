//! Page renderer collaborator.
//!
//! # Data Flow
//! ```text
//! gateway (bypass)  → Renderer::handle (raw request handler)
//! gateway (render)  → Renderer::render (path + merged render parameters)
//!                   → ResponseWriter
//! ```

pub mod upstream;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use thiserror::Error;

use crate::gateway::params::RenderParams;
use crate::gateway::parsed_url::ParsedUrl;
use crate::http::response::ResponseWriter;

pub use upstream::UpstreamRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid renderer upstream '{0}'")]
    InvalidUpstream(String),

    #[error("Upstream renderer request failed: {0}")]
    Upstream(String),

    #[error("Could not encode render parameters: {0}")]
    Params(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Request(#[from] axum::http::Error),
}

/// The page-rendering engine the gateway sits in front of.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Called once before the listener is bound.
    async fn prepare(&self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Serve a request without enrichment (API routes, bypassed requests).
    async fn handle(&self, req: Request<Body>, res: &mut ResponseWriter, url: &ParsedUrl) -> Result<(), RenderError>;

    /// Render the page at `path` with the merged render parameters.
    async fn render(
        &self,
        req: Request<Body>,
        res: &mut ResponseWriter,
        path: &str,
        params: RenderParams,
    ) -> Result<(), RenderError>;
}
