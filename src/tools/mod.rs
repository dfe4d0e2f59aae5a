//! Adapter operations exposed to MCP agent clients.
//!
//! This module provides four categories of tools:
//! - **Search**: Concurrent search across messages, contacts and calls
//! - **Fetch**: Read a single resource by type tag and id
//! - **Messaging**: Send SMS and place calls
//! - **Directory**: List messages, contacts, calls and numbers; create contacts
//!
//! Every tool validates its input before any upstream call is made.

pub mod directory;
pub mod fetch;
pub mod messaging;
pub mod search;

pub use directory::{
    CreateContactParams, CreateContactResponse, DirectoryTools, ListCallsParams,
    ListCallsResponse, ListContactsParams, ListContactsResponse, ListMessagesParams,
    ListMessagesResponse, PhoneNumbersResponse,
};
pub use fetch::{FetchParams, FetchResponse, FetchTools};
pub use messaging::{MakeCallParams, MakeCallResponse, MessagingTools, SendSmsParams, SendSmsResponse};
pub use search::{SearchParams, SearchResponse, SearchTools};

use crate::error::{AdapterError, AdapterResult};

/// Unwrap a required string input, treating blank values as missing.
pub(crate) fn require_field(value: Option<String>, field: &str) -> AdapterResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AdapterError::missing_field(field)),
    }
}
