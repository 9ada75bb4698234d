//! API keys API.
//!
//! Keys belong to the caller's account, so these paths are not tenant-scoped.

use std::sync::Arc;

use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use crate::paths::ResourcePath;
use crate::types::{Ack, ApiKey, ApiKeySecret, CreateApiKeyRequest, Page, PageQuery};

/// API keys client.
pub struct ApiKeysApi {
    http: Arc<HttpClient>,
    path: ResourcePath,
}

impl ApiKeysApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            path: ResourcePath::root("api-keys"),
        }
    }

    /// List API keys.
    pub async fn list(&self, query: &PageQuery) -> Result<Page<ApiKey>> {
        let options = RequestOptions::new().query_from(query);
        self.http.get(self.path.base(), options).await
    }

    /// Get an API key by ID.
    pub async fn get(&self, id: &str) -> Result<ApiKey> {
        self.http.get(&self.path.join(id), RequestOptions::new()).await
    }

    /// Create a key. The full secret is only returned here.
    pub async fn create(&self, request: &CreateApiKeyRequest) -> Result<ApiKeySecret> {
        let options = RequestOptions::new().json(request);
        self.http.post(self.path.base(), options).await
    }

    /// Revoke a key.
    pub async fn revoke(&self, id: &str) -> Result<Ack> {
        self.http.delete(&self.path.join(id), RequestOptions::new()).await
    }

    /// Replace a key's secret, invalidating the old one.
    pub async fn rotate(&self, id: &str) -> Result<ApiKeySecret> {
        self.http
            .post(&self.path.join(&format!("{}/rotate", id)), RequestOptions::new())
            .await
    }
}
