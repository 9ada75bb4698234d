//! Transport core.
//!
//! [`HttpClient`] issues one HTTP exchange per call: it resolves headers and
//! URL, races the send against a timeout, runs the lifecycle hooks, parses
//! the body and classifies failures into an [`Error`].

use std::fmt;
use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::time::Instant;
use url::Url;

use crate::error::{Error, Result};
use crate::hooks::{Hooks, RequestContext, ResponseInfo};
use crate::query::{append_query, to_query, QueryParams};

/// Default timeout for requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// User agent sent with every request.
pub const USER_AGENT_STRING: &str = concat!("flowhub-client/", env!("CARGO_PKG_VERSION"));

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Cookie inclusion policy of a request.
///
/// reqwest keeps no cookie jar for this client, so the policy only travels
/// with the request as metadata visible to the request hook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Credentials {
    Omit,
    #[default]
    SameOrigin,
    Include,
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent as-is.
    Text(String),
    /// JSON-encoded before sending.
    Json(Value),
}

impl RequestBody {
    /// Serialize a value into a JSON body.
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        serde_json::to_value(body)
            .map(RequestBody::Json)
            .map_err(|e| Error::unknown(format!("Failed to serialize request body: {}", e)))
    }

    fn into_string(self) -> Result<String> {
        match self {
            RequestBody::Text(text) => Ok(text),
            RequestBody::Json(value) => serde_json::to_string(&value)
                .map_err(|e| Error::unknown(format!("Failed to serialize request body: {}", e))),
        }
    }
}

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    method: Method,
    headers: Vec<(String, String)>,
    query: Option<QueryParams>,
    body: Option<RequestBody>,
    timeout: Option<Duration>,
    credentials: Credentials,
    /// Serialization failure recorded while building, reported by `request`.
    deferred_error: Option<Error>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a header. Overrides client defaults, never `Authorization`.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = Some(query);
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// JSON-encode `body` as the request body.
    ///
    /// A serialization failure surfaces as an `Unknown` error from the call.
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Self {
        match RequestBody::json(body) {
            Ok(body) => self.body(body),
            Err(err) => self.defer(err),
        }
    }

    /// Serialize a query struct into the query mapping.
    ///
    /// A serialization failure surfaces as an `Unknown` error from the call.
    pub fn query_from<Q: Serialize + ?Sized>(self, query: &Q) -> Self {
        match to_query(query) {
            Ok(query) => self.query(query),
            Err(err) => self.defer(err),
        }
    }

    fn defer(mut self, err: Error) -> Self {
        self.deferred_error.get_or_insert(err);
        self
    }

    /// Send `body` unchanged.
    pub fn text(self, body: impl Into<String>) -> Self {
        self.body(RequestBody::Text(body.into()))
    }

    /// Override the client's default timeout for this call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }
}

/// Construction parameters of the transport core.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
    /// Merged over the built-in defaults, under per-call headers.
    pub headers: Vec<(String, String)>,
    pub hooks: Hooks,
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
            hooks: Hooks::default(),
        }
    }
}

/// Transport core shared by every resource service.
///
/// Immutable after construction, so one instance can serve concurrent calls.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    default_headers: HeaderMap,
    authorization: HeaderValue,
    hooks: Hooks,
}

impl HttpClient {
    /// Build the transport core.
    ///
    /// Fails with a `Configuration` error if the base URL does not parse, a
    /// default header is invalid, or the token cannot be used as a header.
    pub fn new(config: HttpConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .strip_suffix('/')
            .unwrap_or(&config.base_url)
            .to_string();
        Url::parse(&base_url)
            .map_err(|e| Error::config(format!("Invalid base URL '{}': {}", base_url, e)))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));
        for (name, value) in &config.headers {
            let (name, value) = parse_header(name, value).map_err(Error::config)?;
            default_headers.insert(name, value);
        }

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| Error::config("Invalid API key"))?;
        authorization.set_sensitive(true);

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            timeout: config.timeout,
            default_headers,
            authorization,
            hooks: config.hooks,
        })
    }

    /// Normalized base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Default timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute one request and decode a successful body into `T`.
    ///
    /// Use `T = serde_json::Value` to get the parsed body untouched.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        match self.execute(path, options).await {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(
                    path = %path,
                    kind = ?err.kind(),
                    status = ?err.status(),
                    code = ?err.code(),
                    "request failed: {}",
                    err
                );
                self.hooks.error(&err).await;
                Err(err)
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        self.request(path, options.method(Method::Get)).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        self.request(path, options.method(Method::Post)).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        self.request(path, options.method(Method::Put)).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        self.request(path, options.method(Method::Patch)).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        self.request(path, options.method(Method::Delete)).await
    }

    /// Build the final URL for a path and optional query.
    pub fn url(&self, path: &str, query: Option<&QueryParams>) -> String {
        let url = format!("{}{}", self.base_url, path);
        match query {
            Some(query) => append_query(&url, query),
            None => url,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let RequestOptions {
            method,
            headers,
            query,
            body,
            timeout,
            credentials,
            deferred_error,
        } = options;
        if let Some(err) = deferred_error {
            return Err(err);
        }
        let timeout = timeout.unwrap_or(self.timeout);
        let headers = self.resolve_headers(&headers)?;
        let url = self.url(path, query.as_ref());
        let parsed_url =
            Url::parse(&url).map_err(|e| Error::unknown(format!("Invalid URL '{}': {}", url, e)))?;
        let body = match body {
            Some(body) if method != Method::Get => Some(body.into_string()?),
            _ => None,
        };

        self.hooks
            .request(RequestContext {
                url: url.clone(),
                method,
                headers: headers.clone(),
                body: body.clone(),
                timeout,
                credentials,
            })
            .await;

        let mut builder = self.http.request(method.into(), parsed_url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        tracing::debug!(
            method = %method,
            url = %url,
            timeout_ms = timeout.as_millis() as u64,
            "sending request"
        );

        // The budget covers sending and reading the body, not the response hook.
        let deadline = Instant::now() + timeout;
        let response = match tokio::time::timeout_at(deadline, builder.send()).await {
            Err(_) => return Err(Error::timeout(timeout.as_millis())),
            Ok(Err(e)) => return Err(Error::network(e)),
            Ok(Ok(response)) => response,
        };

        let status = response.status();
        tracing::debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            "received response"
        );

        let remaining = deadline.saturating_duration_since(Instant::now());
        self.hooks.response(ResponseInfo::from_response(&response)).await;

        let body = tokio::time::timeout_at(Instant::now() + remaining, parse_body(response))
            .await
            .map_err(|_| Error::timeout(timeout.as_millis()))?;
        if status.is_success() {
            serde_json::from_value(body)
                .map_err(|e| Error::unknown(format!("Failed to decode response body: {}", e)))
        } else {
            Err(Error::from_response(status.as_u16(), &body))
        }
    }

    fn resolve_headers(&self, overrides: &[(String, String)]) -> Result<HeaderMap> {
        let mut headers = self.default_headers.clone();
        for (name, value) in overrides {
            let (name, value) = parse_header(name, value).map_err(Error::unknown)?;
            headers.insert(name, value);
        }
        headers.insert(AUTHORIZATION, self.authorization.clone());
        Ok(headers)
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

fn parse_header(name: &str, value: &str) -> std::result::Result<(HeaderName, HeaderValue), String> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| format!("Invalid header name '{}'", name))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|_| format!("Invalid value for header '{}'", name))?;
    Ok((header_name, header_value))
}

/// Media types compare case-insensitively.
fn is_json_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("application/json") || content_type.contains("+json")
}

/// Parse a response body, never failing.
///
/// JSON content types are decoded as JSON. Anything else is read as text and
/// wrapped as `{"message": text}`. Unreadable or malformed bodies become `{}`.
async fn parse_body(response: reqwest::Response) -> Value {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_json_content_type);

    let empty = || Value::Object(Map::new());
    if is_json {
        match response.bytes().await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|_| empty()),
            Err(_) => empty(),
        }
    } else {
        match response.text().await {
            Ok(text) if !text.is_empty() => serde_json::json!({ "message": text }),
            _ => empty(),
        }
    }
}
