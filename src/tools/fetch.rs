//! Single-resource reads by type tag.

use crate::client::AsyncOpenPhoneClient;
use crate::error::AdapterResult;
use crate::models::ResourceType;
use crate::tools::require_field;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Parameters for a fetch request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchParams {
    pub resource_id: Option<String>,

    /// Resource type tag: message, contact, call or phone-numbers
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    pub resource_id: Option<String>,

    #[serde(rename = "type")]
    pub resource_type: ResourceType,

    pub data: Value,
}

#[derive(Clone)]
pub struct FetchTools {
    client: Arc<dyn AsyncOpenPhoneClient>,
}

impl FetchTools {
    pub fn new(client: Arc<dyn AsyncOpenPhoneClient>) -> Self {
        Self { client }
    }

    /// Read one resource from the upstream endpoint its type maps to.
    ///
    /// The type tag is checked first, so an unknown tag fails without any
    /// upstream call. `phone-numbers` needs no id.
    pub async fn fetch(&self, params: FetchParams) -> AdapterResult<FetchResponse> {
        let resource_type: ResourceType = require_field(params.resource_type, "type")?.parse()?;

        let resource_id = match resource_type {
            ResourceType::PhoneNumbers => params.resource_id,
            _ => Some(require_field(params.resource_id, "resource_id")?),
        };

        let data = match resource_type {
            ResourceType::PhoneNumbers => self.client.list_phone_numbers().await?,
            _ => {
                let id = resource_id.as_deref().unwrap_or_default();
                self.client.get_resource(resource_type, id).await?
            }
        };

        Ok(FetchResponse {
            resource_id,
            resource_type,
            data,
        })
    }
}
