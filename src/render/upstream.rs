//! Renderer reached over HTTP.
//!
//! # Responsibilities
//! - Forward bypassed requests untouched to the renderer process
//! - Forward page requests to the chosen path with render parameters attached
//! - Stream the renderer's response back through the `ResponseWriter`

use std::str::FromStr;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::uri::{Authority, Scheme};
use axum::http::{HeaderName, HeaderValue, Request, Response, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::gateway::params::RenderParams;
use crate::gateway::parsed_url::ParsedUrl;
use crate::http::response::ResponseWriter;
use crate::render::{RenderError, Renderer};

/// Header carrying URL-encoded JSON render parameters.
pub const RENDER_PARAMS_HEADER: HeaderName = HeaderName::from_static("x-render-params");

/// Forwards requests to a renderer listening on `authority`.
#[derive(Clone)]
pub struct UpstreamRenderer {
    client: Client<HttpConnector, Body>,
    authority: Authority,
}

impl UpstreamRenderer {
    pub fn new(upstream: &str) -> Result<Self, RenderError> {
        let authority =
            Authority::from_str(upstream).map_err(|_| RenderError::InvalidUpstream(upstream.to_string()))?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self { client, authority })
    }

    fn upstream_uri(&self, path_and_query: &str) -> Result<Uri, RenderError> {
        Ok(Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()?)
    }

    async fn forward(
        &self,
        req: Request<Body>,
        path_and_query: &str,
        params: Option<HeaderValue>,
        res: &mut ResponseWriter,
    ) -> Result<(), RenderError> {
        let (mut parts, body) = req.into_parts();
        parts.uri = self.upstream_uri(path_and_query)?;
        if let Some(value) = params {
            parts.headers.insert(RENDER_PARAMS_HEADER, value);
        }

        tracing::debug!(uri = %parts.uri, "Forwarding to renderer");

        let response = self
            .client
            .request(Request::from_parts(parts, body))
            .await
            .map_err(|e| RenderError::Upstream(e.to_string()))?;

        let (parts, body) = response.into_parts();
        res.send_response(Response::from_parts(parts, Body::new(body)));
        Ok(())
    }
}

/// URL-encode the JSON form of `params` into a header value.
pub fn encode_params(params: &RenderParams) -> Result<HeaderValue, RenderError> {
    let json = serde_json::to_string(params)?;
    let encoded: String = url::form_urlencoded::byte_serialize(json.as_bytes()).collect();
    HeaderValue::from_str(&encoded).map_err(|e| RenderError::Upstream(e.to_string()))
}

#[async_trait]
impl Renderer for UpstreamRenderer {
    async fn prepare(&self) -> Result<(), RenderError> {
        tracing::info!(upstream = %self.authority, "Renderer ready");
        Ok(())
    }

    async fn handle(&self, req: Request<Body>, res: &mut ResponseWriter, _url: &ParsedUrl) -> Result<(), RenderError> {
        let target = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        self.forward(req, &target, None, res).await
    }

    async fn render(
        &self,
        req: Request<Body>,
        res: &mut ResponseWriter,
        path: &str,
        params: RenderParams,
    ) -> Result<(), RenderError> {
        let target = match req.uri().query() {
            Some(query) => format!("{path}?{query}"),
            None => path.to_string(),
        };
        let header = encode_params(&params)?;
        self.forward(req, &target, Some(header), res).await
    }
}

impl std::fmt::Debug for UpstreamRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamRenderer")
            .field("authority", &self.authority)
            .finish()
    }
}
