//! Listing upstream collections and creating contacts.

use crate::client::AsyncOpenPhoneClient;
use crate::error::{AdapterError, AdapterResult};
use crate::models::{CreateContactRequest, ListQuery, UpstreamPage};
use crate::tools::require_field;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Default page size for list tools.
pub const DEFAULT_LIST_LIMIT: usize = 20;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMessagesParams {
    pub limit: Option<usize>,
    pub phone_number_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListContactsParams {
    pub limit: Option<usize>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCallsParams {
    pub limit: Option<usize>,
    pub phone_number_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<Value>,
    pub total: u64,
    #[serde(rename = "hasMore")]
    pub has_more: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListContactsResponse {
    pub contacts: Vec<Value>,
    pub total: u64,
    #[serde(rename = "hasMore")]
    pub has_more: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCallsResponse {
    pub calls: Vec<Value>,
    pub total: u64,
    #[serde(rename = "hasMore")]
    pub has_more: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneNumbersResponse {
    #[serde(rename = "phoneNumbers")]
    pub phone_numbers: Value,
}

/// Parameters for creating a contact.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactParams {
    pub phone_number: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactResponse {
    pub success: bool,
    pub contact: Value,
}

/// Directory tools for browsing upstream collections.
#[derive(Clone)]
pub struct DirectoryTools {
    client: Arc<dyn AsyncOpenPhoneClient>,
}

fn list_limit(limit: Option<usize>) -> AdapterResult<usize> {
    match limit.unwrap_or(DEFAULT_LIST_LIMIT) {
        0 => Err(AdapterError::Validation(
            "limit must be at least 1".to_string(),
        )),
        n => Ok(n),
    }
}

impl DirectoryTools {
    pub fn new(client: Arc<dyn AsyncOpenPhoneClient>) -> Self {
        Self { client }
    }

    pub async fn list_messages(
        &self,
        params: ListMessagesParams,
    ) -> AdapterResult<ListMessagesResponse> {
        let query = ListQuery::new(list_limit(params.limit)?)
            .with_phone_number_id(params.phone_number_id);
        let page: UpstreamPage = self.client.list_messages(&query).await?;

        Ok(ListMessagesResponse {
            total: page.total(),
            has_more: page.has_more,
            messages: page.data,
        })
    }

    pub async fn list_contacts(
        &self,
        params: ListContactsParams,
    ) -> AdapterResult<ListContactsResponse> {
        let query = ListQuery::new(list_limit(params.limit)?).with_search(params.search);
        let page = self.client.list_contacts(&query).await?;

        Ok(ListContactsResponse {
            total: page.total(),
            has_more: page.has_more,
            contacts: page.data,
        })
    }

    pub async fn list_calls(&self, params: ListCallsParams) -> AdapterResult<ListCallsResponse> {
        let query = ListQuery::new(list_limit(params.limit)?)
            .with_phone_number_id(params.phone_number_id);
        let page = self.client.list_calls(&query).await?;

        Ok(ListCallsResponse {
            total: page.total(),
            has_more: page.has_more,
            calls: page.data,
        })
    }

    pub async fn list_phone_numbers(&self) -> AdapterResult<PhoneNumbersResponse> {
        let phone_numbers = self.client.list_phone_numbers().await?;
        Ok(PhoneNumbersResponse { phone_numbers })
    }

    /// Create a contact. Only `phoneNumber` is required; absent optional
    /// fields are not sent upstream.
    pub async fn create_contact(
        &self,
        params: CreateContactParams,
    ) -> AdapterResult<CreateContactResponse> {
        let request = CreateContactRequest {
            phone_number: require_field(params.phone_number, "phoneNumber")?,
            name: params.name,
            email: params.email,
            tags: params.tags,
        };

        let contact = self.client.create_contact(&request).await?;
        tracing::info!("Contact created");

        Ok(CreateContactResponse {
            success: true,
            contact,
        })
    }
}
