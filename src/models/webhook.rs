//! Inbound webhook events.

use serde::Deserialize;
use serde_json::Value;

/// The few envelope fields the receiver logs. Everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebhookEvent {
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub event_type: Option<String>,

    pub created_at: Option<String>,
}

impl WebhookEvent {
    /// Read the envelope fields from an arbitrary payload.
    ///
    /// Payloads that are not objects, or carry fields of the wrong type, yield
    /// an empty event instead of an error.
    pub fn from_payload(payload: &Value) -> Self {
        serde_json::from_value(payload.clone()).unwrap_or_default()
    }
}
