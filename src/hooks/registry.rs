//! Hook registry: default decisions combined with user overrides.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::content_api::query::{build_default_query, default_data_content_fragment, GraphqlDocument};
use crate::content_api::types::ContentApiResult;
use crate::http::response::ResponseWriter;
use crate::routing::classifier;

/// Result of a decision hook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Override<T> {
    /// Keep the built-in decision.
    #[default]
    Default,
    /// Replace the built-in decision.
    Value(T),
}

impl<T> Override<T> {
    /// The overriding value, or `default` when there is none.
    pub fn resolve(self, default: T) -> T {
        match self {
            Override::Default => default,
            Override::Value(value) => value,
        }
    }
}

impl<T> From<Option<T>> for Override<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Override::Default, Override::Value)
    }
}

/// Error raised by a user hook.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HookError(Box<dyn std::error::Error + Send + Sync>);

impl HookError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }

    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(error))
    }
}

pub type HookResult<T> = Result<T, HookError>;

/// Per-request extension points. Every method defaults to "no override".
#[async_trait]
pub trait RequestHooks: Send + Sync {
    /// Runs on every request after the default headers are set. May write to
    /// or end the response; the pipeline continues regardless.
    async fn on_request(&self, _req: &Parts, _res: &mut ResponseWriter) -> HookResult<()> {
        Ok(())
    }

    /// Whether to query the content API. `default` is the classifier's answer.
    fn should_call_content_api(&self, _req: &Parts, _default: bool) -> HookResult<Override<bool>> {
        Ok(Override::Default)
    }

    /// Whether to hand the request straight to the renderer's raw handler.
    fn should_skip_rendering(&self, _req: &Parts, _default: bool) -> HookResult<Override<bool>> {
        Ok(Override::Default)
    }

    /// Custom data placed in the controller parameters. Defaults to `{}`.
    fn additional_data(&self, _result: Option<&ContentApiResult>) -> HookResult<Override<Value>> {
        Ok(Override::Default)
    }

    /// Replacement for the default content API document.
    fn custom_query(
        &self,
        _url: &str,
        _variant_id: &str,
        _default: &GraphqlDocument,
    ) -> HookResult<Override<GraphqlDocument>> {
        Ok(Override::Default)
    }
}

/// Hooks that never override anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl RequestHooks for NoHooks {}

/// Pairs each hook with its built-in default. The default is always computed
/// first and handed to the hook.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: Arc<dyn RequestHooks>,
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new(Arc::new(NoHooks))
    }
}

impl HookRegistry {
    pub fn new(hooks: Arc<dyn RequestHooks>) -> Self {
        Self { hooks }
    }

    pub async fn on_request(&self, req: &Parts, res: &mut ResponseWriter) -> HookResult<()> {
        self.hooks.on_request(req, res).await
    }

    pub fn should_call_content_api(&self, req: &Parts) -> HookResult<bool> {
        let default = classifier::is_content_api_eligible(req);
        Ok(self.hooks.should_call_content_api(req, default)?.resolve(default))
    }

    pub fn should_skip_rendering(&self, req: &Parts) -> HookResult<bool> {
        let default = classifier::is_render_bypassed(req);
        Ok(self.hooks.should_skip_rendering(req, default)?.resolve(default))
    }

    pub fn additional_data(&self, result: Option<&ContentApiResult>) -> HookResult<Value> {
        let default = Value::Object(Map::new());
        Ok(self.hooks.additional_data(result)?.resolve(default))
    }

    pub fn prepare_query(&self, url: &str, variant_id: &str) -> HookResult<GraphqlDocument> {
        let default = build_default_query(url, variant_id, default_data_content_fragment());
        Ok(self.hooks.custom_query(url, variant_id, &default)?.resolve(default))
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry").finish_non_exhaustive()
    }
}
