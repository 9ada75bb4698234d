//! HTTP client SDK for the Flowhub workflow automation API.
//!
//! This crate provides a typed client for the Flowhub REST API. A single
//! transport core ([`HttpClient`]) issues every request, enforces the
//! timeout, runs the optional lifecycle hooks and classifies failures into
//! one [`Error`] per call.
//!
//! # Example
//!
//! ```no_run
//! use flowhub_client::{ErrorKind, ExecuteWorkflowRequest, FlowhubClient};
//!
//! # async fn example() -> flowhub_client::Result<()> {
//! let client = FlowhubClient::builder()
//!     .api_key("fh_live_123")
//!     .tenant_id("acme")
//!     .timeout_ms(10_000)
//!     .on_error(|err| async move {
//!         eprintln!("flowhub call failed: {}", err);
//!     })
//!     .build()?;
//!
//! let request = ExecuteWorkflowRequest {
//!     input: serde_json::json!({ "order_id": 42 }),
//!     ..Default::default()
//! };
//!
//! match client.workflows().execute("wf_123", &request).await {
//!     Ok(execution) => println!("run {} is {}", execution.id, execution.status),
//!     Err(err) => match err.kind() {
//!         ErrorKind::RateLimit { retry_after } => {
//!             println!("slow down, retry in {:?}s", retry_after)
//!         }
//!         ErrorKind::NotFound => println!("no such workflow"),
//!         _ => return Err(err),
//!     },
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! Tenant-scoped (`/api/tenant/{tenant_id}/...`):
//!
//! - **Workflows**: CRUD, activation, duplication, execution and run history
//! - **Tools**: CRUD and test invocation
//! - **Credentials**: CRUD and connectivity test
//! - **Channels**: CRUD and test message
//! - **Webhooks**: CRUD, ping and delivery history
//!
//! Account-level:
//!
//! - **API keys**: list, create, revoke, rotate
//! - **Invitations**: list, create, accept, resend, revoke

pub mod api;
pub mod client;
pub mod error;
pub mod hooks;
pub mod http;
pub mod paths;
pub mod query;
pub mod types;

pub use client::{ClientBuilder, FlowhubClient, DEFAULT_BASE_URL};
pub use error::{Error, ErrorKind, Result};
pub use hooks::{Hooks, RequestContext, ResponseInfo};
pub use http::{Credentials, HttpClient, HttpConfig, Method, RequestBody, RequestOptions};
pub use query::{append_query, build_query_string, to_query, QueryParams};
pub use types::*;
