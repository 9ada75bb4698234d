//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use crate::api::{
    ApiKeysApi, ChannelsApi, CredentialsApi, InvitationsApi, ToolsApi, WebhooksApi, WorkflowsApi,
};
use crate::error::{Error, Result};
use crate::hooks::{Hooks, RequestContext, ResponseInfo};
use crate::http::{HttpClient, HttpConfig, DEFAULT_TIMEOUT};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.flowhub.io";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "FLOWHUB_API_KEY";
/// Environment variable holding the tenant ID.
pub const TENANT_ID_ENV: &str = "FLOWHUB_TENANT_ID";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "FLOWHUB_BASE_URL";
/// Environment variable overriding the timeout, in milliseconds.
pub const TIMEOUT_MS_ENV: &str = "FLOWHUB_TIMEOUT_MS";

/// Flowhub API client.
///
/// Provides typed access to every resource family. Cloning is cheap and all
/// clones share one transport core.
///
/// # Example
///
/// ```no_run
/// use flowhub_client::{FlowhubClient, ListWorkflowsQuery};
///
/// # async fn example() -> flowhub_client::Result<()> {
/// let client = FlowhubClient::builder()
///     .api_key("fh_live_123")
///     .tenant_id("acme")
///     .build()?;
///
/// let workflows = client.workflows().list(&ListWorkflowsQuery::default()).await?;
/// println!("{} workflows", workflows.total);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FlowhubClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: Arc<HttpClient>,
    tenant_id: String,
    workflows: WorkflowsApi,
    tools: ToolsApi,
    credentials: CredentialsApi,
    channels: ChannelsApi,
    webhooks: WebhooksApi,
    api_keys: ApiKeysApi,
    invitations: InvitationsApi,
}

impl FlowhubClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the production API with default settings.
    pub fn new(api_key: impl Into<String>, tenant_id: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).tenant_id(tenant_id).build()
    }

    /// Normalized base URL.
    pub fn base_url(&self) -> &str {
        self.inner.http.base_url()
    }

    /// Tenant every tenant-scoped service is bound to.
    pub fn tenant_id(&self) -> &str {
        &self.inner.tenant_id
    }

    /// The transport core, for endpoints without a dedicated service.
    pub fn http(&self) -> &HttpClient {
        &self.inner.http
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the workflows API.
    pub fn workflows(&self) -> &WorkflowsApi {
        &self.inner.workflows
    }

    /// Access the tools API.
    pub fn tools(&self) -> &ToolsApi {
        &self.inner.tools
    }

    /// Access the credentials API.
    pub fn credentials(&self) -> &CredentialsApi {
        &self.inner.credentials
    }

    /// Access the channels API.
    pub fn channels(&self) -> &ChannelsApi {
        &self.inner.channels
    }

    /// Access the webhooks API.
    pub fn webhooks(&self) -> &WebhooksApi {
        &self.inner.webhooks
    }

    /// Access the API keys API.
    pub fn api_keys(&self) -> &ApiKeysApi {
        &self.inner.api_keys
    }

    /// Access the invitations API.
    pub fn invitations(&self) -> &InvitationsApi {
        &self.inner.invitations
    }
}

impl std::fmt::Debug for FlowhubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowhubClient")
            .field("base_url", &self.base_url())
            .field("tenant_id", &self.tenant_id())
            .finish_non_exhaustive()
    }
}

/// Builder for creating a FlowhubClient.
#[derive(Debug)]
pub struct ClientBuilder {
    api_key: Option<String>,
    tenant_id: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
    headers: Vec<(String, String)>,
    hooks: Hooks,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            api_key: None,
            tenant_id: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
            hooks: Hooks::default(),
        }
    }

    /// Start from the `FLOWHUB_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Start from `FLOWHUB_*` variables resolved through `lookup`.
    ///
    /// Missing variables leave the builder defaults in place; `build()` still
    /// rejects a missing API key or tenant.
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::new();
        builder.api_key = lookup(API_KEY_ENV);
        builder.tenant_id = lookup(TENANT_ID_ENV);
        builder.base_url = lookup(BASE_URL_ENV);
        if let Some(raw) = lookup(TIMEOUT_MS_ENV) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                Error::config(format!(
                    "{} must be a number of milliseconds, got '{}'",
                    TIMEOUT_MS_ENV, raw
                ))
            })?;
            builder.timeout = Duration::from_millis(ms);
        }
        Ok(builder)
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the tenant ID.
    pub fn tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Override the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the default request timeout in milliseconds.
    pub fn timeout_ms(self, ms: u64) -> Self {
        self.timeout(Duration::from_millis(ms))
    }

    /// Add a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add several headers sent with every request.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set all hooks at once.
    pub fn hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Observe every request before it is sent.
    pub fn on_request<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        self.hooks = self.hooks.on_request(hook);
        self
    }

    /// Observe every response before its body is read.
    pub fn on_response<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(ResponseInfo) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        self.hooks = self.hooks.on_response(hook);
        self
    }

    /// Observe every error before it is returned.
    pub fn on_error<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Error) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        self.hooks = self.hooks.on_error(hook);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<FlowhubClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::config("API key is required"))?;
        let tenant_id = self
            .tenant_id
            .filter(|tenant| !tenant.trim().is_empty())
            .ok_or_else(|| Error::config("Tenant ID is required"))?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let http = Arc::new(HttpClient::new(HttpConfig {
            base_url,
            token: api_key,
            timeout: self.timeout,
            headers: self.headers,
            hooks: self.hooks,
        })?);

        tracing::debug!(
            base_url = %http.base_url(),
            tenant = %tenant_id,
            timeout_ms = self.timeout.as_millis() as u64,
            "flowhub client created"
        );

        Ok(FlowhubClient {
            inner: Arc::new(ClientInner {
                workflows: WorkflowsApi::new(http.clone(), &tenant_id),
                tools: ToolsApi::new(http.clone(), &tenant_id),
                credentials: CredentialsApi::new(http.clone(), &tenant_id),
                channels: ChannelsApi::new(http.clone(), &tenant_id),
                webhooks: WebhooksApi::new(http.clone(), &tenant_id),
                api_keys: ApiKeysApi::new(http.clone()),
                invitations: InvitationsApi::new(http.clone()),
                http,
                tenant_id,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
