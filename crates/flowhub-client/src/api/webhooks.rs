//! Webhooks API.

use std::sync::Arc;

use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use crate::paths::ResourcePath;
use crate::types::{
    Ack, CreateWebhookRequest, CreatedWebhook, ListWebhooksQuery, Page, PageQuery, TestResult,
    UpdateWebhookRequest, Webhook, WebhookDelivery,
};

/// Webhooks API client.
pub struct WebhooksApi {
    http: Arc<HttpClient>,
    path: ResourcePath,
}

impl WebhooksApi {
    pub(crate) fn new(http: Arc<HttpClient>, tenant_id: &str) -> Self {
        Self {
            http,
            path: ResourcePath::tenant(tenant_id, "webhooks"),
        }
    }

    /// List webhooks.
    pub async fn list(&self, query: &ListWebhooksQuery) -> Result<Page<Webhook>> {
        let options = RequestOptions::new().query_from(query);
        self.http.get(self.path.base(), options).await
    }

    /// Get a webhook by ID.
    pub async fn get(&self, id: &str) -> Result<Webhook> {
        self.http.get(&self.path.join(id), RequestOptions::new()).await
    }

    /// Subscribe a URL to events. The response carries the signing secret.
    pub async fn create(&self, request: &CreateWebhookRequest) -> Result<CreatedWebhook> {
        let options = RequestOptions::new().json(request);
        self.http.post(self.path.base(), options).await
    }

    /// Update a webhook.
    pub async fn update(&self, id: &str, request: &UpdateWebhookRequest) -> Result<Webhook> {
        let options = RequestOptions::new().json(request);
        self.http.patch(&self.path.join(id), options).await
    }

    /// Delete a webhook.
    pub async fn delete(&self, id: &str) -> Result<Ack> {
        self.http.delete(&self.path.join(id), RequestOptions::new()).await
    }

    /// Send a `ping` event to the webhook URL.
    pub async fn test(&self, id: &str) -> Result<TestResult> {
        self.http
            .post(&self.path.join(&format!("{}/test", id)), RequestOptions::new())
            .await
    }

    /// List past delivery attempts.
    pub async fn deliveries(&self, id: &str, query: &PageQuery) -> Result<Page<WebhookDelivery>> {
        let options = RequestOptions::new().query_from(query);
        self.http
            .get(&self.path.join(&format!("{}/deliveries", id)), options)
            .await
    }
}
