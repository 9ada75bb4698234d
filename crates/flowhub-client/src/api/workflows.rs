//! Workflows API.

use std::sync::Arc;

use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use crate::paths::ResourcePath;
use crate::types::{
    Ack, CreateWorkflowRequest, ExecuteWorkflowRequest, Execution, ListExecutionsQuery,
    ListWorkflowsQuery, Page, UpdateWorkflowRequest, Workflow,
};

/// Workflows API client.
pub struct WorkflowsApi {
    http: Arc<HttpClient>,
    path: ResourcePath,
}

impl WorkflowsApi {
    pub(crate) fn new(http: Arc<HttpClient>, tenant_id: &str) -> Self {
        Self {
            http,
            path: ResourcePath::tenant(tenant_id, "workflows"),
        }
    }

    /// List workflows.
    pub async fn list(&self, query: &ListWorkflowsQuery) -> Result<Page<Workflow>> {
        let options = RequestOptions::new().query_from(query);
        self.http.get(self.path.base(), options).await
    }

    /// Get a workflow by ID.
    pub async fn get(&self, id: &str) -> Result<Workflow> {
        self.http.get(&self.path.join(id), RequestOptions::new()).await
    }

    /// Create a new workflow.
    pub async fn create(&self, request: &CreateWorkflowRequest) -> Result<Workflow> {
        let options = RequestOptions::new().json(request);
        self.http.post(self.path.base(), options).await
    }

    /// Replace a workflow.
    pub async fn update(&self, id: &str, request: &UpdateWorkflowRequest) -> Result<Workflow> {
        let options = RequestOptions::new().json(request);
        self.http.put(&self.path.join(id), options).await
    }

    /// Delete a workflow.
    pub async fn delete(&self, id: &str) -> Result<Ack> {
        self.http.delete(&self.path.join(id), RequestOptions::new()).await
    }

    /// Activate a workflow so its triggers fire.
    pub async fn activate(&self, id: &str) -> Result<Workflow> {
        self.http
            .post(&self.path.join(&format!("{}/activate", id)), RequestOptions::new())
            .await
    }

    /// Deactivate a workflow.
    pub async fn deactivate(&self, id: &str) -> Result<Workflow> {
        self.http
            .post(&self.path.join(&format!("{}/deactivate", id)), RequestOptions::new())
            .await
    }

    /// Copy a workflow. The copy starts inactive.
    pub async fn duplicate(&self, id: &str) -> Result<Workflow> {
        self.http
            .post(&self.path.join(&format!("{}/duplicate", id)), RequestOptions::new())
            .await
    }

    /// Run a workflow.
    pub async fn execute(&self, id: &str, request: &ExecuteWorkflowRequest) -> Result<Execution> {
        let options = RequestOptions::new().json(request);
        self.http
            .post(&self.path.join(&format!("{}/execute", id)), options)
            .await
    }

    /// List runs of a workflow.
    pub async fn executions(
        &self,
        id: &str,
        query: &ListExecutionsQuery,
    ) -> Result<Page<Execution>> {
        let options = RequestOptions::new().query_from(query);
        self.http
            .get(&self.path.join(&format!("{}/executions", id)), options)
            .await
    }

    /// Get a single run.
    pub async fn execution(&self, id: &str, execution_id: &str) -> Result<Execution> {
        self.http
            .get(
                &self.path.join(&format!("{}/executions/{}", id, execution_id)),
                RequestOptions::new(),
            )
            .await
    }
}
