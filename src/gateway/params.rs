//! Controller parameters and render parameters.
//!
//! Controller parameters are accumulated by value through the pipeline stages
//! and handed to the renderer at the end. Fields that were never filled are
//! omitted, so a disabled feature renders as `{}`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::content_api::types::ContentApiResult;
use crate::gateway::parsed_url::ParsedUrl;

/// Key of the request target in the render parameters.
pub const URL_KEY: &str = "url";

/// Key of the controller parameters in the render parameters.
pub const CONTROLLER_PARAMS_KEY: &str = "controllerParameters";

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_api_result: Option<ContentApiResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_url: Option<ParsedUrl>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mobile_client: Option<bool>,
}

impl ControllerParameters {
    /// True when no stage contributed anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_content_api_result(mut self, result: ContentApiResult) -> Self {
        self.content_api_result = Some(result);
        self
    }

    pub fn enrich(mut self, custom_data: Value, parsed_url: ParsedUrl, is_mobile_client: bool) -> Self {
        self.custom_data = Some(custom_data);
        self.parsed_url = Some(parsed_url);
        self.is_mobile_client = Some(is_mobile_client);
        self
    }
}

/// Parameters passed to the renderer: the request's query string merged with
/// the request target and the controller parameters. The latter two win on
/// key collisions.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub query: Map<String, Value>,
    pub url: String,
    pub controller_parameters: ControllerParameters,
}

impl RenderParams {
    pub fn new(query: Map<String, Value>, url: impl Into<String>, controller_parameters: ControllerParameters) -> Self {
        Self {
            query,
            url: url.into(),
            controller_parameters,
        }
    }

    /// The merged parameters as a JSON object.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl Serialize for RenderParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let passthrough = self
            .query
            .iter()
            .filter(|(k, _)| k.as_str() != URL_KEY && k.as_str() != CONTROLLER_PARAMS_KEY);

        let mut map = serializer.serialize_map(None)?;
        for (key, value) in passthrough {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(URL_KEY, &self.url)?;
        map.serialize_entry(CONTROLLER_PARAMS_KEY, &self.controller_parameters)?;
        map.end()
    }
}
