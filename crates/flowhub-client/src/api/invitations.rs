//! Invitations API.

use std::sync::Arc;

use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use crate::paths::ResourcePath;
use crate::types::{Ack, CreateInvitationRequest, Invitation, ListInvitationsQuery, Page};

/// Invitations API client.
pub struct InvitationsApi {
    http: Arc<HttpClient>,
    path: ResourcePath,
}

impl InvitationsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            path: ResourcePath::root("invitations"),
        }
    }

    /// List invitations.
    pub async fn list(&self, query: &ListInvitationsQuery) -> Result<Page<Invitation>> {
        let options = RequestOptions::new().query_from(query);
        self.http.get(self.path.base(), options).await
    }

    /// Get an invitation by ID.
    pub async fn get(&self, id: &str) -> Result<Invitation> {
        self.http.get(&self.path.join(id), RequestOptions::new()).await
    }

    /// Invite a user by email.
    pub async fn create(&self, request: &CreateInvitationRequest) -> Result<Invitation> {
        let options = RequestOptions::new().json(request);
        self.http.post(self.path.base(), options).await
    }

    /// Accept an invitation with the token from the invite email.
    pub async fn accept(&self, token: &str) -> Result<Invitation> {
        self.http
            .post(&self.path.join(&format!("{}/accept", token)), RequestOptions::new())
            .await
    }

    /// Send the invite email again.
    pub async fn resend(&self, id: &str) -> Result<Ack> {
        self.http
            .post(&self.path.join(&format!("{}/resend", id)), RequestOptions::new())
            .await
    }

    /// Revoke a pending invitation.
    pub async fn revoke(&self, id: &str) -> Result<Ack> {
        self.http.delete(&self.path.join(id), RequestOptions::new()).await
    }
}
