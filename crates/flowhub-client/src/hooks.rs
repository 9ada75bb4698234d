//! Lifecycle hooks.
//!
//! Hooks are observers. Each one is awaited to completion before the
//! pipeline moves on, but none of them can change the request, the response
//! or the error.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::error::Error;
use crate::http::{Credentials, Method};

/// Snapshot of a request about to be sent.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Fully resolved URL, query string included.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Final headers, `Authorization` included.
    pub headers: HeaderMap,
    /// Serialized body, if one will be sent.
    pub body: Option<String>,
    /// Effective timeout.
    pub timeout: Duration,
    /// Cookie inclusion policy.
    pub credentials: Credentials,
}

/// Snapshot of a response taken before its body is read.
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    /// Final URL after redirects.
    pub url: String,
    /// Response status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
}

impl ResponseInfo {
    pub(crate) fn from_response(response: &reqwest::Response) -> Self {
        Self {
            url: response.url().to_string(),
            status: response.status(),
            headers: response.headers().clone(),
        }
    }
}

/// Hook invoked before each request is issued.
pub type RequestHook = Arc<dyn Fn(RequestContext) -> BoxFuture<'static, ()> + Send + Sync>;

/// Hook invoked when a response arrives.
pub type ResponseHook = Arc<dyn Fn(ResponseInfo) -> BoxFuture<'static, ()> + Send + Sync>;

/// Hook invoked with every classified error.
pub type ErrorHook = Arc<dyn Fn(Error) -> BoxFuture<'static, ()> + Send + Sync>;

/// The optional hooks of a client.
#[derive(Clone, Default)]
pub struct Hooks {
    pub(crate) on_request: Option<RequestHook>,
    pub(crate) on_response: Option<ResponseHook>,
    pub(crate) on_error: Option<ErrorHook>,
}

impl Hooks {
    /// No hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pre-request hook.
    pub fn on_request<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_request = Some(Arc::new(move |ctx: RequestContext| -> BoxFuture<'static, ()> {
            Box::pin(hook(ctx))
        }));
        self
    }

    /// Set the post-response hook.
    pub fn on_response<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(ResponseInfo) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_response = Some(Arc::new(move |info: ResponseInfo| -> BoxFuture<'static, ()> {
            Box::pin(hook(info))
        }));
        self
    }

    /// Set the error hook.
    pub fn on_error<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Error) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_error = Some(Arc::new(move |err: Error| -> BoxFuture<'static, ()> {
            Box::pin(hook(err))
        }));
        self
    }

    pub(crate) async fn request(&self, ctx: RequestContext) {
        if let Some(hook) = &self.on_request {
            hook(ctx).await;
        }
    }

    pub(crate) async fn response(&self, info: ResponseInfo) {
        if let Some(hook) = &self.on_response {
            hook(info).await;
        }
    }

    pub(crate) async fn error(&self, err: &Error) {
        if let Some(hook) = &self.on_error {
            hook(err.clone()).await;
        }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_request", &self.on_request.is_some())
            .field("on_response", &self.on_response.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
