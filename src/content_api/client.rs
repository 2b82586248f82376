//! Content API client.
//!
//! # Responsibilities
//! - Send GraphQL documents to the content API endpoint
//! - Authenticate with the credential triple
//! - Return the raw `data` payload, surfacing transport, status and GraphQL errors
//!
//! No retries and no timeout of its own: a failed call is the caller's problem.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ContentApiConfig;
use crate::content_api::query::GraphqlDocument;
use crate::content_api::types::{ContentApiError, ContentApiResult, ContentApiResultOf};

pub const ACCESS_KEY_HEADER: &str = "x-websites-access-key";
pub const SECRET_KEY_HEADER: &str = "x-websites-secret-key";
pub const SPACE_UUID_HEADER: &str = "x-websites-space-uuid";

/// Credentials identifying a namespace of the content API.
#[derive(Clone, PartialEq, Eq)]
pub struct ContentApiCredentials {
    pub access_key: String,
    pub secret_key: String,
    pub space_uuid: String,
}

impl ContentApiCredentials {
    /// Credentials from config. `None` when any part is absent.
    pub fn from_config(config: &ContentApiConfig) -> Option<Self> {
        Some(Self {
            access_key: config.access_key.clone()?,
            secret_key: config.secret_key.clone()?,
            space_uuid: config.namespace_id.clone()?,
        })
    }
}

impl std::fmt::Debug for ContentApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentApiCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("space_uuid", &self.space_uuid)
            .finish()
    }
}

/// A client able to run a `site` lookup.
#[async_trait]
pub trait ContentApiClient: Send + Sync {
    async fn query(&self, document: &GraphqlDocument) -> ContentApiResultOf<ContentApiResult>;
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a GraphqlDocument,
}

#[derive(Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

/// Decode a raw GraphQL response body.
///
/// Errors alongside data are tolerated; errors without data fail the call.
/// `data` is not checked against any schema.
pub fn decode_response(body: &[u8]) -> ContentApiResultOf<ContentApiResult> {
    let response: GraphqlResponse = serde_json::from_slice(body)?;
    match response.data {
        Some(data) => {
            if !response.errors.is_empty() {
                tracing::warn!(errors = response.errors.len(), "Content API returned partial data");
            }
            Ok(ContentApiResult::new(data))
        }
        None if !response.errors.is_empty() => {
            let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
            Err(ContentApiError::Graphql(messages.join("; ")))
        }
        None => Ok(ContentApiResult::default()),
    }
}

/// HTTP implementation of [`ContentApiClient`] over reqwest.
#[derive(Clone)]
pub struct HttpContentApiClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: ContentApiCredentials,
}

impl HttpContentApiClient {
    /// Create a new client. Construction does not touch the network.
    pub fn new(endpoint: impl Into<String>, credentials: ContentApiCredentials) -> ContentApiResultOf<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ContentApiError::Setup(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            credentials,
        })
    }
}

#[async_trait]
impl ContentApiClient for HttpContentApiClient {
    async fn query(&self, document: &GraphqlDocument) -> ContentApiResultOf<ContentApiResult> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCESS_KEY_HEADER, &self.credentials.access_key)
            .header(SECRET_KEY_HEADER, &self.credentials.secret_key)
            .header(SPACE_UUID_HEADER, &self.credentials.space_uuid)
            .json(&GraphqlRequest { query: document })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentApiError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        decode_response(&body)
    }
}

impl std::fmt::Debug for HttpContentApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpContentApiClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .finish()
    }
}
