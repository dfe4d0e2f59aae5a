//! Wire types exchanged with the OpenPhone API.
//!
//! Upstream entities are relayed as raw JSON values; only the envelope around
//! them and the request payloads the adapter builds are typed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamPage {
    /// The items on this page
    #[serde(default)]
    pub data: Vec<Value>,

    /// Total number of items across all pages, if reported
    #[serde(default)]
    pub total_items: Option<u64>,

    /// Whether more pages exist, if reported
    #[serde(default)]
    pub has_more: Option<bool>,

    /// Cursor for the next page
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl UpstreamPage {
    /// Build a page from items alone, as some mocks and tests do.
    pub fn from_items(data: Vec<Value>) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    /// Upstream total when reported, otherwise the page length.
    pub fn total(&self) -> u64 {
        self.total_items.unwrap_or(self.data.len() as u64)
    }
}

/// Query parameters for upstream list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Page size (`maxResults`)
    pub max_results: usize,

    /// Restrict to a single OpenPhone number (`phoneNumberId`)
    pub phone_number_id: Option<String>,

    /// Server-side text filter (`search`)
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(max_results: usize) -> Self {
        Self {
            max_results,
            phone_number_id: None,
            search: None,
        }
    }

    pub fn with_phone_number_id(mut self, phone_number_id: Option<String>) -> Self {
        self.phone_number_id = phone_number_id;
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    /// Query string pairs in the order they are sent upstream.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("maxResults", self.max_results.to_string())];
        if let Some(id) = &self.phone_number_id {
            pairs.push(("phoneNumberId", id.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// Body for `POST /messages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendMessageRequest {
    pub to: Vec<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

/// Body for `POST /calls`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCallRequest {
    pub to: String,
    pub from: String,
}

/// Body for `POST /contacts`.
///
/// Absent optional fields are left out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Strip the upstream `{"data": ...}` wrapper if there is one.
pub fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
