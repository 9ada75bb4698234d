//! Tools API.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use crate::paths::ResourcePath;
use crate::types::{Ack, ListToolsQuery, Page, TestResult, Tool, ToolRequest};

/// Tools API client.
pub struct ToolsApi {
    http: Arc<HttpClient>,
    path: ResourcePath,
}

impl ToolsApi {
    pub(crate) fn new(http: Arc<HttpClient>, tenant_id: &str) -> Self {
        Self {
            http,
            path: ResourcePath::tenant(tenant_id, "tools"),
        }
    }

    /// List tools.
    pub async fn list(&self, query: &ListToolsQuery) -> Result<Page<Tool>> {
        let options = RequestOptions::new().query_from(query);
        self.http.get(self.path.base(), options).await
    }

    /// Get a tool by ID.
    pub async fn get(&self, id: &str) -> Result<Tool> {
        self.http.get(&self.path.join(id), RequestOptions::new()).await
    }

    /// Create a tool.
    pub async fn create(&self, request: &ToolRequest) -> Result<Tool> {
        let options = RequestOptions::new().json(request);
        self.http.post(self.path.base(), options).await
    }

    /// Replace a tool.
    pub async fn update(&self, id: &str, request: &ToolRequest) -> Result<Tool> {
        let options = RequestOptions::new().json(request);
        self.http.put(&self.path.join(id), options).await
    }

    /// Delete a tool.
    pub async fn delete(&self, id: &str) -> Result<Ack> {
        self.http.delete(&self.path.join(id), RequestOptions::new()).await
    }

    /// Invoke a tool with sample input.
    pub async fn test(&self, id: &str, input: &Value) -> Result<TestResult> {
        let options = RequestOptions::new().json(&serde_json::json!({ "input": input }));
        self.http
            .post(&self.path.join(&format!("{}/test", id)), options)
            .await
    }
}
