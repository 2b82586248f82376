//! Shared, lazily constructed content API client.
//!
//! The client is built on first use and reused by every request afterwards.
//! `OnceCell` guarantees a single construction even when requests race on
//! a multi-threaded runtime.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::content_api::client::{ContentApiClient, ContentApiCredentials, HttpContentApiClient};
use crate::content_api::types::ContentApiResultOf;

/// Builds a client from credentials. Called at most once per handle.
pub type ClientFactory =
    Arc<dyn Fn(&ContentApiCredentials) -> ContentApiResultOf<Arc<dyn ContentApiClient>> + Send + Sync>;

/// Factory producing [`HttpContentApiClient`]s for `endpoint`.
pub fn http_client_factory(endpoint: impl Into<String>) -> ClientFactory {
    let endpoint = endpoint.into();
    Arc::new(move |credentials: &ContentApiCredentials| -> ContentApiResultOf<Arc<dyn ContentApiClient>> {
        let client = HttpContentApiClient::new(endpoint.clone(), credentials.clone())?;
        Ok(Arc::new(client) as Arc<dyn ContentApiClient>)
    })
}

/// Owned once-initialized handle to the content API client.
pub struct ContentApiHandle {
    cell: OnceCell<Arc<dyn ContentApiClient>>,
    factory: ClientFactory,
    credentials: ContentApiCredentials,
}

impl ContentApiHandle {
    pub fn new(credentials: ContentApiCredentials, factory: ClientFactory) -> Self {
        Self {
            cell: OnceCell::new(),
            factory,
            credentials,
        }
    }

    /// The shared client, constructing it on first call.
    pub async fn client(&self) -> ContentApiResultOf<Arc<dyn ContentApiClient>> {
        let client = self
            .cell
            .get_or_try_init(|| async {
                tracing::debug!(space_uuid = %self.credentials.space_uuid, "Creating content API client");
                (self.factory)(&self.credentials)
            })
            .await?;
        Ok(client.clone())
    }

    /// Whether the client has been constructed yet.
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

impl std::fmt::Debug for ContentApiHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentApiHandle")
            .field("initialized", &self.is_initialized())
            .field("credentials", &self.credentials)
            .finish()
    }
}
