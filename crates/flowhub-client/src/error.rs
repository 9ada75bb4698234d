//! Client error types.
//!
//! Every failed call surfaces exactly one [`Error`], classified into an
//! [`ErrorKind`]. Callers are expected to branch on the kind rather than on
//! the message text.

use serde_json::Value;
use thiserror::Error;

const DEFAULT_API_MESSAGE: &str = "An error occurred";
const DEFAULT_UNKNOWN_MESSAGE: &str = "An unknown error occurred";
const NETWORK_MESSAGE: &str = "Network request failed. Please check your connection.";

/// Classification of a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401 responses.
    Authentication,
    /// 403 responses.
    Authorization,
    /// 404 responses.
    NotFound,
    /// 400 and 422 responses.
    Validation,
    /// 429 responses.
    RateLimit {
        /// Seconds the server asked us to wait, from the body's `retry_after`.
        retry_after: Option<u64>,
    },
    /// The request never produced an HTTP response.
    Network,
    /// 500, 502, 503 and 504 responses.
    Server {
        /// Originating status code.
        status: u16,
    },
    /// The request did not complete within the configured timeout.
    Timeout,
    /// Any other non-2xx response.
    Api,
    /// Anything else that went wrong inside the pipeline.
    Unknown,
    /// The client could not be constructed.
    Configuration,
}

impl ErrorKind {
    /// Machine code attached when the server did not send one.
    pub fn default_code(&self) -> Option<&'static str> {
        match self {
            ErrorKind::Authentication => Some("AUTHENTICATION_ERROR"),
            ErrorKind::Authorization => Some("AUTHORIZATION_ERROR"),
            ErrorKind::NotFound => Some("NOT_FOUND"),
            ErrorKind::Validation => Some("VALIDATION_ERROR"),
            ErrorKind::RateLimit { .. } => Some("RATE_LIMIT_ERROR"),
            ErrorKind::Network => Some("NETWORK_ERROR"),
            ErrorKind::Server { .. } => Some("SERVER_ERROR"),
            ErrorKind::Timeout => Some("TIMEOUT_ERROR"),
            ErrorKind::Unknown => Some("UNKNOWN_ERROR"),
            ErrorKind::Configuration => Some("CONFIGURATION_ERROR"),
            ErrorKind::Api => None,
        }
    }

    fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::Authentication => "Authentication failed",
            ErrorKind::Authorization => "Insufficient permissions",
            ErrorKind::NotFound => "Resource not found",
            ErrorKind::Validation => "Validation failed",
            ErrorKind::RateLimit { .. } => "Rate limit exceeded",
            ErrorKind::Server { .. } => "Internal server error",
            ErrorKind::Network => NETWORK_MESSAGE,
            ErrorKind::Unknown => DEFAULT_UNKNOWN_MESSAGE,
            ErrorKind::Timeout | ErrorKind::Api | ErrorKind::Configuration => {
                DEFAULT_API_MESSAGE
            }
        }
    }
}

/// Client error type.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    code: Option<String>,
    status: Option<u16>,
    details: Option<Value>,
}

impl Error {
    /// Create an error of the given kind with its default code.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let code = kind.default_code().map(str::to_string);
        Self {
            kind,
            message: message.into(),
            code,
            status: None,
            details: None,
        }
    }

    /// Classify a non-2xx response from its status and parsed body.
    ///
    /// The body fields `message` (or `error`), `code`, `details` and
    /// `retry_after` are used when present.
    pub fn from_response(status: u16, body: &Value) -> Self {
        let kind = match status {
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Authorization,
            404 => ErrorKind::NotFound,
            400 | 422 => ErrorKind::Validation,
            429 => ErrorKind::RateLimit {
                retry_after: body.get("retry_after").and_then(parse_retry_after),
            },
            500 | 502 | 503 | 504 => ErrorKind::Server { status },
            _ => ErrorKind::Api,
        };

        let message = body
            .get("message")
            .and_then(stringify_message)
            .or_else(|| body.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| kind.default_message().to_string());

        let code = body
            .get("code")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| kind.default_code().map(str::to_string));

        let details = body.get("details").filter(|d| !d.is_null()).cloned();

        Self {
            kind,
            message,
            code,
            status: Some(status),
            details,
        }
    }

    /// The request timed out after `timeout_ms` milliseconds.
    pub fn timeout(timeout_ms: u128) -> Self {
        Self::new(
            ErrorKind::Timeout,
            format!("Request timeout after {}ms", timeout_ms),
        )
    }

    /// The transport failed before an HTTP response arrived.
    pub fn network(cause: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Network, NETWORK_MESSAGE)
            .with_details(serde_json::json!({ "cause": cause.to_string() }))
    }

    /// Something unexpected failed inside the pipeline.
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Self::new(ErrorKind::Unknown, DEFAULT_UNKNOWN_MESSAGE)
        } else {
            Self::new(ErrorKind::Unknown, message)
        }
    }

    /// The client configuration is invalid.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Attach a details payload.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Error classification.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Machine error code, from the server or the kind's default.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// HTTP status, if the error came from a response.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Structured details from the error body.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Seconds to wait before retrying, for rate limit errors.
    pub fn retry_after(&self) -> Option<u64> {
        match self.kind {
            ErrorKind::RateLimit { retry_after } => retry_after,
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.kind == ErrorKind::Authentication
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind, ErrorKind::RateLimit { .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Server { .. })
    }

    /// Check if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::Timeout
    }

    /// Check if this is a transport failure.
    pub fn is_network_error(&self) -> bool {
        self.kind == ErrorKind::Network
    }

    /// Whether retrying the same call later could succeed.
    ///
    /// The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::RateLimit { .. }
                | ErrorKind::Server { .. }
                | ErrorKind::Network
                | ErrorKind::Timeout
        )
    }
}

fn stringify_message(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_retry_after(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.ceil() as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
