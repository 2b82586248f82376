//! Shared fakes for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue, Request};
use serde_json::{json, Value};

use render_gateway::config::GatewayConfig;
use render_gateway::content_api::types::ContentApiResultOf;
use render_gateway::content_api::{
    ClientFactory, ContentApiClient, ContentApiCredentials, ContentApiError, ContentApiResult, GraphqlDocument,
};
use render_gateway::gateway::{Gateway, ParsedUrl, RenderParams};
use render_gateway::hooks::{HookError, HookResult, NoHooks, Override, RequestHooks};
use render_gateway::http::ResponseWriter;
use render_gateway::render::{RenderError, Renderer};

pub const DOMAIN: &str = "https://demo-ring.com";
pub const VARIANT: &str = "ALL_FEATURES_BACKUP";
pub const REDIRECT_PATH: &str = "/galeries/id-esse-ex-2XX/3j25nh5";
pub const REDIRECT_TARGET: &str = "https://demo-ring.com/galeries/id-esse-ex-2/3j25nh5";
pub const NODE_ID: &str = "0b5f2a3e-6c1d-4f7e-9a8b-2c3d4e5f6a7b";
pub const EXTRA_FIELD: &str = "extraField";

/// A configuration that passes validation.
pub fn config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.content_api.access_key = Some("public".into());
    config.content_api.secret_key = Some("secret".into());
    config.content_api.namespace_id = Some("namespace".into());
    config.content_api.variant = VARIANT.into();
    config.site.domain = Some(DOMAIN.into());
    config
}

pub fn request(uri: &str, host: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("host", host)
        .body(Body::empty())
        .unwrap()
}

/// What the renderer was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Handle { target: String, parsed_url: ParsedUrl },
    Render { path: String, params: Value },
}

#[derive(Default)]
pub struct MockRenderer {
    calls: Mutex<Vec<RenderCall>>,
    pub prepared: AtomicBool,
}

impl MockRenderer {
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Parameters of the single `render` call.
    pub fn rendered_params(&self) -> Value {
        match self.calls().as_slice() {
            [RenderCall::Render { params, .. }] => params.clone(),
            other => panic!("expected one render call, got {other:?}"),
        }
    }
}

#[async_trait]
impl Renderer for MockRenderer {
    async fn prepare(&self) -> Result<(), RenderError> {
        self.prepared.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn handle(&self, req: Request<Body>, res: &mut ResponseWriter, url: &ParsedUrl) -> Result<(), RenderError> {
        self.calls.lock().unwrap().push(RenderCall::Handle {
            target: req.uri().to_string(),
            parsed_url: url.clone(),
        });
        res.send("handled");
        Ok(())
    }

    async fn render(
        &self,
        _req: Request<Body>,
        res: &mut ResponseWriter,
        path: &str,
        params: RenderParams,
    ) -> Result<(), RenderError> {
        self.calls.lock().unwrap().push(RenderCall::Render {
            path: path.to_string(),
            params: params.to_value()?,
        });
        res.send("rendered");
        Ok(())
    }
}

/// Answers every lookup; paths containing `2XX` redirect. Documents selecting
/// [`EXTRA_FIELD`] get a payload outside the default schema.
#[derive(Default)]
pub struct MockContentApi {
    documents: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl MockContentApi {
    pub fn documents(&self) -> Vec<String> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentApiClient for MockContentApi {
    async fn query(&self, document: &GraphqlDocument) -> ContentApiResultOf<ContentApiResult> {
        self.documents.lock().unwrap().push(document.as_str().to_string());

        if self.fail.load(Ordering::SeqCst) {
            return Err(ContentApiError::Status(503));
        }

        let payload = if document.as_str().contains(EXTRA_FIELD) {
            json!({
                "site": {
                    "statusCode": 200,
                    EXTRA_FIELD: { "teaser": "kept" },
                    "data": { "node": { "id": "42" }, "content": { "id": "42" } }
                }
            })
        } else if document.as_str().contains("2XX") {
            json!({ "site": { "statusCode": 301, "headers": { "location": REDIRECT_TARGET }, "data": null } })
        } else {
            json!({
                "site": {
                    "statusCode": 200,
                    "headers": { "location": null },
                    "data": {
                        "node": { "id": NODE_ID },
                        "content": { "__typename": "Story", "id": NODE_ID, "title": "Hello" }
                    }
                }
            })
        };
        Ok(ContentApiResult::new(payload))
    }
}

/// Records every hook invocation and optionally overrides.
#[derive(Default)]
pub struct RecordingHooks {
    pub calls: Mutex<Vec<&'static str>>,
    pub saw_default_headers: AtomicBool,
    pub fail_additional_data: bool,
    pub custom_document: Option<String>,
    pub additional_data_input: Mutex<Option<Value>>,
}

impl RecordingHooks {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// The content API result `additional_data` was called with.
    pub fn additional_data_input(&self) -> Option<Value> {
        self.additional_data_input.lock().unwrap().clone()
    }

    fn record(&self, hook: &'static str) {
        self.calls.lock().unwrap().push(hook);
    }
}

#[async_trait]
impl RequestHooks for RecordingHooks {
    async fn on_request(&self, _req: &Parts, res: &mut ResponseWriter) -> HookResult<()> {
        self.record("on_request");
        self.saw_default_headers
            .store(res.headers().contains_key("x-content-type-options"), Ordering::SeqCst);
        res.set_header(HeaderName::from_static("x-hooked"), HeaderValue::from_static("1"));
        Ok(())
    }

    fn should_call_content_api(&self, _req: &Parts, _default: bool) -> HookResult<Override<bool>> {
        self.record("should_call_content_api");
        Ok(Override::Default)
    }

    fn should_skip_rendering(&self, _req: &Parts, _default: bool) -> HookResult<Override<bool>> {
        self.record("should_skip_rendering");
        Ok(Override::Default)
    }

    fn additional_data(&self, result: Option<&ContentApiResult>) -> HookResult<Override<Value>> {
        self.record("additional_data");
        *self.additional_data_input.lock().unwrap() = result.map(|r| r.as_value().clone());
        if self.fail_additional_data {
            return Err(HookError::msg("additional data unavailable"));
        }
        Ok(Override::Value(json!({ "test": "testData" })))
    }

    fn custom_query(
        &self,
        _url: &str,
        _variant_id: &str,
        _default: &GraphqlDocument,
    ) -> HookResult<Override<GraphqlDocument>> {
        self.record("custom_query");
        Ok(self.custom_document.clone().map(GraphqlDocument::new).into())
    }
}

/// A gateway wired to the fakes.
pub struct Harness {
    pub gateway: Gateway,
    pub renderer: Arc<MockRenderer>,
    pub content_api: Arc<MockContentApi>,
    pub clients_built: Arc<AtomicUsize>,
}

pub fn harness(config: GatewayConfig) -> Harness {
    harness_with_hooks(config, Arc::new(NoHooks))
}

pub fn harness_with_hooks(config: GatewayConfig, hooks: Arc<dyn RequestHooks>) -> Harness {
    let renderer = Arc::new(MockRenderer::default());
    let content_api = Arc::new(MockContentApi::default());
    let clients_built = Arc::new(AtomicUsize::new(0));

    let api = content_api.clone();
    let counter = clients_built.clone();
    let factory: ClientFactory = Arc::new(
        move |_: &ContentApiCredentials| -> ContentApiResultOf<Arc<dyn ContentApiClient>> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(api.clone() as Arc<dyn ContentApiClient>)
        },
    );

    let gateway = Gateway::builder(config)
        .renderer(renderer.clone())
        .hooks(hooks)
        .content_api_factory(factory)
        .build()
        .unwrap();

    Harness {
        gateway,
        renderer,
        content_api,
        clients_built,
    }
}
