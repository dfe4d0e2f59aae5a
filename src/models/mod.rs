//! Request-scoped data types.
//!
//! Nothing here is persisted: resource tags, normalized search hits, upstream
//! envelopes and request payloads, and inbound webhook events.

pub mod resource;
pub mod search_result;
pub mod upstream;
pub mod webhook;

pub use resource::ResourceType;
pub use search_result::SearchResult;
pub use upstream::{
    unwrap_data, CreateCallRequest, CreateContactRequest, ListQuery, SendMessageRequest,
    UpstreamPage,
};
pub use webhook::WebhookEvent;
