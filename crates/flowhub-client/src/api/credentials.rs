//! Credentials API.

use std::sync::Arc;

use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use crate::paths::ResourcePath;
use crate::types::{
    Ack, CreateCredentialRequest, Credential, ListCredentialsQuery, Page, TestResult,
    UpdateCredentialRequest,
};

/// Credentials API client.
pub struct CredentialsApi {
    http: Arc<HttpClient>,
    path: ResourcePath,
}

impl CredentialsApi {
    pub(crate) fn new(http: Arc<HttpClient>, tenant_id: &str) -> Self {
        Self {
            http,
            path: ResourcePath::tenant(tenant_id, "credentials"),
        }
    }

    /// List credentials.
    pub async fn list(&self, query: &ListCredentialsQuery) -> Result<Page<Credential>> {
        let options = RequestOptions::new().query_from(query);
        self.http.get(self.path.base(), options).await
    }

    /// Get a credential by ID.
    pub async fn get(&self, id: &str) -> Result<Credential> {
        self.http.get(&self.path.join(id), RequestOptions::new()).await
    }

    /// Store a new credential.
    pub async fn create(&self, request: &CreateCredentialRequest) -> Result<Credential> {
        let options = RequestOptions::new().json(request);
        self.http.post(self.path.base(), options).await
    }

    /// Update a credential's name or secret data.
    pub async fn update(&self, id: &str, request: &UpdateCredentialRequest) -> Result<Credential> {
        let options = RequestOptions::new().json(request);
        self.http.patch(&self.path.join(id), options).await
    }

    /// Delete a credential.
    pub async fn delete(&self, id: &str) -> Result<Ack> {
        self.http.delete(&self.path.join(id), RequestOptions::new()).await
    }

    /// Check that the stored secret still authenticates against its provider.
    pub async fn test(&self, id: &str) -> Result<TestResult> {
        self.http
            .post(&self.path.join(&format!("{}/test", id)), RequestOptions::new())
            .await
    }
}
