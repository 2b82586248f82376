//! Content API payload types and error definitions.
//!
//! The lookup result is kept as the raw GraphQL `data` object. Whatever a
//! custom query selects reaches the hooks and the renderer untouched; the
//! accessors below read the few fields the gateway acts on and treat anything
//! unexpected as absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Raw `data` of a `site` lookup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ContentApiResult(Value);

impl ContentApiResult {
    pub fn new(data: Value) -> Self {
        Self(data)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The `site` object, if the payload has one.
    pub fn site(&self) -> Option<&Value> {
        self.0.get("site").filter(|site| site.is_object())
    }

    /// `site.statusCode`, when it is a number that fits an HTTP status.
    pub fn status_code(&self) -> Option<u16> {
        let status = self.site()?.get("statusCode")?.as_u64()?;
        u16::try_from(status).ok()
    }

    /// `site.headers.location`, when it is a string.
    pub fn location(&self) -> Option<&str> {
        self.site()?.get("headers")?.get("location")?.as_str()
    }

    /// Redirect target reported by the content API, if both a non-empty
    /// location and a non-zero status code are present.
    pub fn redirect(&self) -> Option<(u16, &str)> {
        let location = self.location().filter(|l| !l.is_empty())?;
        let status = self.status_code().filter(|s| *s != 0)?;
        Some((status, location))
    }

    /// `site.data.node.id` as reported, without interpretation.
    pub fn node_id(&self) -> Option<&Value> {
        self.site()?.get("data")?.get("node")?.get("id").filter(|id| !id.is_null())
    }

    /// Typed view of `site.data.content`. `None` when the content is missing or
    /// does not carry a recognisable `__typename`.
    pub fn content(&self) -> Option<SiteContent> {
        let content = self.site()?.get("data")?.get("content")?;
        SiteContent::deserialize(content).ok()
    }
}

impl From<Value> for ContentApiResult {
    fn from(data: Value) -> Self {
        Self(data)
    }
}

/// Polymorphic page content, discriminated by the GraphQL `__typename`.
///
/// Ids are kept as the API reports them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "__typename")]
pub enum SiteContent {
    Story {
        id: Option<Value>,
        title: Option<String>,
    },
    SiteNode {
        id: Option<Value>,
        slug: Option<String>,
    },
    Topic {
        id: Option<Value>,
        name: Option<String>,
    },
    Source {
        id: Option<Value>,
        name: Option<String>,
    },
    Author {
        id: Option<Value>,
        name: Option<String>,
    },
    CustomAction {
        id: Option<Value>,
        action: Option<String>,
    },
    /// Any other node type; only `data.node.id` is meaningful.
    #[serde(other)]
    Node,
}

impl SiteContent {
    /// The GraphQL type name of this content.
    pub fn type_name(&self) -> &'static str {
        match self {
            SiteContent::Story { .. } => "Story",
            SiteContent::SiteNode { .. } => "SiteNode",
            SiteContent::Topic { .. } => "Topic",
            SiteContent::Source { .. } => "Source",
            SiteContent::Author { .. } => "Author",
            SiteContent::CustomAction { .. } => "CustomAction",
            SiteContent::Node => "Node",
        }
    }

    /// Content id, when the type carries one.
    pub fn id(&self) -> Option<&Value> {
        match self {
            SiteContent::Story { id, .. }
            | SiteContent::SiteNode { id, .. }
            | SiteContent::Topic { id, .. }
            | SiteContent::Source { id, .. }
            | SiteContent::Author { id, .. }
            | SiteContent::CustomAction { id, .. } => id.as_ref(),
            SiteContent::Node => None,
        }
    }
}

/// Errors that can occur while talking to the content API.
#[derive(Debug, Error)]
pub enum ContentApiError {
    /// Request could not be sent or the response could not be read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response.
    #[error("Content API returned status {0}")]
    Status(u16),

    /// GraphQL errors with no data.
    #[error("GraphQL error: {0}")]
    Graphql(String),

    /// Response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Client could not be constructed.
    #[error("Client setup failed: {0}")]
    Setup(String),
}

/// Result type for content API operations.
pub type ContentApiResultOf<T> = Result<T, ContentApiError>;
