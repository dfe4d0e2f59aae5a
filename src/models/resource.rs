//! Resource type tags and their upstream endpoint mapping.

use crate::error::AdapterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of upstream entity a fetch request or search result refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    Message,
    Contact,
    Call,
    PhoneNumbers,
}

impl ResourceType {
    /// Tag as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Message => "message",
            ResourceType::Contact => "contact",
            ResourceType::Call => "call",
            ResourceType::PhoneNumbers => "phone-numbers",
        }
    }

    /// Upstream read path for a resource of this type.
    ///
    /// `phone-numbers` is a collection endpoint and ignores `id`.
    pub fn upstream_path(&self, id: &str) -> String {
        let id = urlencoding::encode(id);
        match self {
            ResourceType::Message => format!("/messages/{}", id),
            ResourceType::Contact => format!("/contacts/{}", id),
            ResourceType::Call => format!("/calls/{}", id),
            ResourceType::PhoneNumbers => "/phone-numbers".to_string(),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(ResourceType::Message),
            "contact" => Ok(ResourceType::Contact),
            "call" => Ok(ResourceType::Call),
            "phone-numbers" => Ok(ResourceType::PhoneNumbers),
            other => Err(AdapterError::UnsupportedResourceType(other.to_string())),
        }
    }
}
