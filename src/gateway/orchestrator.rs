//! Per-request decision pipeline.
//!
//! # Stages
//! ```text
//! Parse → Headers → OnRequest → BypassCheck ─────────────▶ Renderer::handle
//!                                   │
//!                                   ▼
//!                          ContentApiLogic ── redirect ──▶ 3xx + Location
//!                                   │
//!                                   ▼
//!                          EnrichParameters → Render ────▶ Renderer::render
//! ```
//!
//! The orchestrator never catches errors. Hook, content API, and renderer
//! failures abort the pipeline and surface as a `GatewayError`.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::request::Parts;
use axum::http::{header, Request, Response};

use crate::config::{ensure_valid, ConfigError, FeatureConfig, GatewayConfig, ValidationError, DEFAULT_VARIANT};
use crate::content_api::{http_client_factory, ClientFactory, ContentApiCredentials, ContentApiHandle, ContentApiResult};
use crate::gateway::device;
use crate::gateway::error::GatewayError;
use crate::gateway::params::{ControllerParameters, RenderParams};
use crate::gateway::parsed_url::ParsedUrl;
use crate::hooks::{HookRegistry, NoHooks, RequestHooks};
use crate::http::redirect::write_redirect;
use crate::http::response::ResponseWriter;
use crate::observability::metrics;
use crate::render::{Renderer, UpstreamRenderer};
use crate::routing::classifier;
use crate::security::headers::apply_default_headers;

/// Per-request override of the configured content variant.
pub const VARIANT_HEADER: &str = "x-websites-config-variant";

/// How a request left the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Handed to the renderer's raw request handler.
    Bypassed,
    /// Answered with the content API's redirect.
    Redirected { status: u16, location: String },
    /// Rendered with controller parameters.
    Rendered,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Bypassed => "bypassed",
            Outcome::Redirected { .. } => "redirected",
            Outcome::Rendered => "rendered",
        }
    }
}

/// Builder for [`Gateway`]. Configuration is validated in [`GatewayBuilder::build`].
pub struct GatewayBuilder {
    config: GatewayConfig,
    renderer: Option<Arc<dyn Renderer>>,
    hooks: Arc<dyn RequestHooks>,
    factory: Option<ClientFactory>,
}

impl GatewayBuilder {
    /// Renderer to use. Defaults to an [`UpstreamRenderer`] for `renderer.upstream`.
    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn RequestHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Factory for the content API client. Defaults to the HTTP client for
    /// `content_api.endpoint`.
    pub fn content_api_factory(mut self, factory: ClientFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn build(self) -> Result<Gateway, GatewayError> {
        let config = self.config;
        ensure_valid(&config)?;

        let renderer: Arc<dyn Renderer> = match self.renderer {
            Some(renderer) => renderer,
            None => Arc::new(UpstreamRenderer::new(&config.renderer.upstream)?),
        };

        let content_api = if config.features.use_website_api {
            let credentials = ContentApiCredentials::from_config(&config.content_api).ok_or_else(|| {
                ConfigError::Validation(vec![ValidationError::MissingCredentials(vec![
                    "WEBSITE_API_PUBLIC",
                    "WEBSITE_API_SECRET",
                    "WEBSITE_API_NAMESPACE_ID",
                ])])
            })?;
            let factory = self
                .factory
                .unwrap_or_else(|| http_client_factory(config.content_api.endpoint.clone()));
            Some(ContentApiHandle::new(credentials, factory))
        } else {
            None
        };

        let variant = match config.content_api.variant.as_str() {
            "" => DEFAULT_VARIANT.to_string(),
            v => v.to_string(),
        };

        Ok(Gateway {
            features: config.features,
            domain: config.site.domain.unwrap_or_default(),
            variant,
            port: config.listener.port,
            hooks: HookRegistry::new(self.hooks),
            renderer,
            content_api,
        })
    }
}

/// The request interception layer in front of the renderer.
pub struct Gateway {
    features: FeatureConfig,
    domain: String,
    variant: String,
    port: u16,
    hooks: HookRegistry,
    renderer: Arc<dyn Renderer>,
    content_api: Option<ContentApiHandle>,
}

impl Gateway {
    pub fn builder(config: GatewayConfig) -> GatewayBuilder {
        GatewayBuilder {
            config,
            renderer: None,
            hooks: Arc::new(NoHooks),
            factory: None,
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn features(&self) -> &FeatureConfig {
        &self.features
    }

    /// The shared content API handle, when the content API is enabled.
    pub fn content_api(&self) -> Option<&ContentApiHandle> {
        self.content_api.as_ref()
    }

    /// Let the renderer get ready. Call before serving traffic.
    pub async fn prepare(&self) -> Result<(), GatewayError> {
        self.renderer.prepare().await?;
        Ok(())
    }

    /// Run the pipeline and return the finished response.
    pub async fn handle(&self, req: Request<Body>) -> Result<Response<Body>, GatewayError> {
        let start = Instant::now();
        let mut res = ResponseWriter::new();

        let outcome = self.process(req, &mut res).await;
        let label = outcome.as_ref().map_or("error", Outcome::label);
        metrics::record_request(label, start);

        if self.features.enable_debug {
            tracing::info!(
                outcome = label,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Request handled"
            );
        }

        outcome?;
        Ok(res.into_response())
    }

    /// Run the pipeline, writing to `res`.
    pub async fn process(&self, req: Request<Body>, res: &mut ResponseWriter) -> Result<Outcome, GatewayError> {
        let (parts, body) = req.into_parts();

        // Parse
        let target = classifier::request_target(&parts).map(str::to_string);
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let parsed_url = ParsedUrl::parse(target.as_deref(), host.as_deref(), self.port);

        tracing::debug!(method = %parts.method, target = ?target, "Processing request");

        // Headers
        if self.features.use_default_headers {
            apply_default_headers(res.headers_mut());
        }

        // OnRequest
        self.hooks
            .on_request(&parts, res)
            .await
            .map_err(GatewayError::hook("on_request"))?;

        // BypassCheck
        let bypass = self
            .hooks
            .should_skip_rendering(&parts)
            .map_err(GatewayError::hook("should_skip_rendering"))?;
        if bypass {
            self.renderer
                .handle(Request::from_parts(parts, body), res, &parsed_url)
                .await?;
            res.end();
            return Ok(Outcome::Bypassed);
        }

        // ContentApiLogic
        let mut params = ControllerParameters::default();
        if let Some(content_api) = self.content_api.as_ref().filter(|_| self.features.use_website_api) {
            let eligible = self
                .hooks
                .should_call_content_api(&parts)
                .map_err(GatewayError::hook("should_call_content_api"))?;

            if eligible {
                let result = self.fetch_content(content_api, &parts, target.as_deref()).await?;

                if self.features.use_website_api_redirects {
                    if let Some((status, location)) = result.redirect() {
                        let location = write_redirect(res, status, location, host.as_deref(), self.port)?;
                        metrics::record_redirect(status);
                        tracing::debug!(status, location = %location, "Redirecting");
                        return Ok(Outcome::Redirected { status, location });
                    }
                }

                if self.features.use_controller_params {
                    params = params.with_content_api_result(result);
                }
            }
        }

        // EnrichParameters
        if self.features.use_controller_params {
            let custom_data = self
                .hooks
                .additional_data(params.content_api_result.as_ref())
                .map_err(GatewayError::hook("additional_data"))?;
            let is_mobile_client = device::is_mobile_client(&parts.headers);
            params = params.enrich(custom_data, parsed_url.clone(), is_mobile_client);
        }

        // Render
        let path = parsed_url
            .pathname
            .clone()
            .or_else(|| target.clone())
            .unwrap_or_else(|| "/".to_string());
        let render_params = RenderParams::new(parsed_url.query, target.unwrap_or_default(), params);
        self.renderer
            .render(Request::from_parts(parts, body), res, &path, render_params)
            .await?;

        Ok(Outcome::Rendered)
    }

    async fn fetch_content(
        &self,
        content_api: &ContentApiHandle,
        parts: &Parts,
        target: Option<&str>,
    ) -> Result<ContentApiResult, GatewayError> {
        let variant = parts
            .headers
            .get(VARIANT_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(self.variant.as_str());
        let label = variant_label(variant, &self.variant);
        let url = format!("{}{}", self.domain, target.unwrap_or_default());

        let document = self
            .hooks
            .prepare_query(&url, variant)
            .map_err(GatewayError::hook("custom_query"))?;
        let client = content_api.client().await?;

        let start = Instant::now();
        let result = client.query(&document).await;
        metrics::record_content_api_call(label, start);
        let result = result?;

        if self.features.enable_debug {
            tracing::info!(
                url = %url,
                variant = %variant,
                content_type = result.content().map(|c| c.type_name()).unwrap_or("none"),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Content API call finished"
            );
        }

        Ok(result)
    }
}

/// Metrics label for a lookup: `default` for the configured variant, `override`
/// for anything a request header asked for.
fn variant_label(variant: &str, configured: &str) -> &'static str {
    if variant == configured {
        "default"
    } else {
        "override"
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("features", &self.features)
            .field("domain", &self.domain)
            .field("variant", &self.variant)
            .field("port", &self.port)
            .field("content_api", &self.content_api)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;

    fn config() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.content_api.access_key = Some("public".into());
        config.content_api.secret_key = Some("secret".into());
        config.content_api.namespace_id = Some("namespace".into());
        config.site.domain = Some("https://demo-ring.com".into());
        config
    }

    #[test]
    fn test_missing_credentials_fail_construction() {
        let mut config = config();
        config.content_api.secret_key = None;

        let err = Gateway::builder(config).build().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Missing: WEBSITE_API_SECRET");
    }

    #[test]
    fn test_missing_domain_always_fatal() {
        let mut config = GatewayConfig::default();
        config.features.use_website_api = false;

        let err = Gateway::builder(config).build().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Missing: NEXT_PUBLIC_WEBSITE_DOMAIN");
    }

    #[tokio::test]
    async fn test_content_api_disabled_needs_no_credentials() {
        let mut config = GatewayConfig::default();
        config.features.use_website_api = false;
        config.site.domain = Some("https://demo-ring.com".into());

        let gateway = Gateway::builder(config).build().unwrap();
        assert!(gateway.content_api().is_none());
    }

    #[tokio::test]
    async fn test_empty_variant_falls_back_to_default() {
        let mut config = config();
        config.content_api.variant = String::new();

        let gateway = Gateway::builder(config).build().unwrap();
        assert_eq!(gateway.variant, DEFAULT_VARIANT);
        assert!(!gateway.content_api().unwrap().is_initialized());
    }

    #[test]
    fn test_variant_label_is_bounded() {
        assert_eq!(variant_label("ALL_FEATURES", "ALL_FEATURES"), "default");
        assert_eq!(variant_label("NO_FEATURES", "ALL_FEATURES"), "override");
        assert_eq!(variant_label("x-3f9a1c", "ALL_FEATURES"), "override");
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Bypassed.label(), "bypassed");
        assert_eq!(Outcome::Rendered.label(), "rendered");
        assert_eq!(
            Outcome::Redirected { status: 301, location: "/".into() }.label(),
            "redirected"
        );
    }
}
