//! Normalized search hits built from upstream messages, contacts and calls.

use crate::models::ResourceType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single entry in a search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Which upstream kind this hit came from
    #[serde(rename = "type")]
    pub result_type: ResourceType,

    /// Upstream id (null if the upstream item had none)
    pub id: Option<String>,

    pub title: Option<String>,

    pub content: Option<String>,

    /// Selected upstream fields, copied as-is
    pub metadata: Map<String, Value>,
}

fn str_field(item: &Value, key: &str) -> Option<String> {
    item.get(key).and_then(Value::as_str).map(str::to_string)
}

fn pick(item: &Value, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .map(|key| (key.to_string(), item.get(*key).cloned().unwrap_or(Value::Null)))
        .collect()
}

impl SearchResult {
    pub fn from_message(item: &Value) -> Self {
        Self {
            result_type: ResourceType::Message,
            id: str_field(item, "id"),
            title: str_field(item, "from").map(|from| format!("Message from {}", from)),
            content: str_field(item, "text").or_else(|| str_field(item, "content")),
            metadata: pick(item, &["from", "to", "direction", "createdAt"]),
        }
    }

    pub fn from_contact(item: &Value) -> Self {
        let fields = item.get("defaultFields").unwrap_or(item);

        let full_name = [str_field(fields, "firstName"), str_field(fields, "lastName")]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let title = if full_name.is_empty() {
            str_field(item, "name")
        } else {
            Some(full_name)
        };

        Self {
            result_type: ResourceType::Contact,
            id: str_field(item, "id"),
            title,
            content: str_field(fields, "company"),
            metadata: pick(fields, &["phoneNumbers", "emails", "company"]),
        }
    }

    pub fn from_call(item: &Value) -> Self {
        let participants = call_participants(item);
        let title = if participants.is_empty() {
            None
        } else {
            Some(format!("Call with {}", participants.join(", ")))
        };

        Self {
            result_type: ResourceType::Call,
            id: str_field(item, "id"),
            title,
            content: str_field(item, "status"),
            metadata: pick(item, &["participants", "direction", "duration", "createdAt"]),
        }
    }
}

/// String entries of a call's `participants` array.
pub fn call_participants(call: &Value) -> Vec<&str> {
    call.get("participants")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
