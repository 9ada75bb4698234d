//! API endpoint implementations.
//!
//! One service per resource family. Services only build paths and bodies;
//! errors pass through from the transport core untouched.

mod api_keys;
mod channels;
mod credentials;
mod invitations;
mod tools;
mod webhooks;
mod workflows;

pub use api_keys::ApiKeysApi;
pub use channels::ChannelsApi;
pub use credentials::CredentialsApi;
pub use invitations::InvitationsApi;
pub use tools::ToolsApi;
pub use webhooks::WebhooksApi;
pub use workflows::WorkflowsApi;
