//! Channels API.

use std::sync::Arc;

use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use crate::paths::ResourcePath;
use crate::types::{
    Ack, Channel, CreateChannelRequest, ListChannelsQuery, Page, TestResult,
    UpdateChannelRequest,
};

/// Channels API client.
pub struct ChannelsApi {
    http: Arc<HttpClient>,
    path: ResourcePath,
}

impl ChannelsApi {
    pub(crate) fn new(http: Arc<HttpClient>, tenant_id: &str) -> Self {
        Self {
            http,
            path: ResourcePath::tenant(tenant_id, "channels"),
        }
    }

    /// List channels.
    pub async fn list(&self, query: &ListChannelsQuery) -> Result<Page<Channel>> {
        let options = RequestOptions::new().query_from(query);
        self.http.get(self.path.base(), options).await
    }

    /// Get a channel by ID.
    pub async fn get(&self, id: &str) -> Result<Channel> {
        self.http.get(&self.path.join(id), RequestOptions::new()).await
    }

    /// Create a channel.
    pub async fn create(&self, request: &CreateChannelRequest) -> Result<Channel> {
        let options = RequestOptions::new().json(request);
        self.http.post(self.path.base(), options).await
    }

    /// Update a channel.
    pub async fn update(&self, id: &str, request: &UpdateChannelRequest) -> Result<Channel> {
        let options = RequestOptions::new().json(request);
        self.http.patch(&self.path.join(id), options).await
    }

    /// Delete a channel.
    pub async fn delete(&self, id: &str) -> Result<Ack> {
        self.http.delete(&self.path.join(id), RequestOptions::new()).await
    }

    /// Send a test message through the channel.
    pub async fn test(&self, id: &str) -> Result<TestResult> {
        self.http
            .post(&self.path.join(&format!("{}/test", id)), RequestOptions::new())
            .await
    }
}
