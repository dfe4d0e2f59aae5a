//! Async wrapper around the synchronous OpenPhoneClient.
//!
//! This module provides an async interface to the blocking client by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread
//! pool, keeping the request-handling runtime free.

use crate::client::OpenPhoneClient;
use crate::error::{OpenPhoneApiError, OpenPhoneApiResult};
use crate::metrics::Metrics;
use crate::models::*;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Async upstream operations used by the adapter's tools.
///
/// This is the seam tests replace with an in-memory mock.
#[async_trait]
pub trait AsyncOpenPhoneClient: Send + Sync {
    async fn list_messages(&self, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage>;
    async fn list_contacts(&self, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage>;
    async fn list_calls(&self, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage>;
    async fn list_phone_numbers(&self) -> OpenPhoneApiResult<Value>;

    async fn get_resource(&self, resource_type: ResourceType, id: &str)
        -> OpenPhoneApiResult<Value>;

    async fn send_message(&self, request: &SendMessageRequest) -> OpenPhoneApiResult<Value>;
    async fn create_call(&self, request: &CreateCallRequest) -> OpenPhoneApiResult<Value>;
    async fn create_contact(&self, request: &CreateContactRequest) -> OpenPhoneApiResult<Value>;
}

/// Async wrapper around the synchronous OpenPhoneClient.
#[derive(Clone)]
pub struct AsyncOpenPhoneClientImpl {
    client: Arc<OpenPhoneClient>,
}

impl AsyncOpenPhoneClientImpl {
    pub fn new(client: OpenPhoneClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Metrics of the underlying blocking client.
    pub fn metrics(&self) -> &Metrics {
        self.client.metrics()
    }

    async fn run<T, F>(&self, op: F) -> OpenPhoneApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&OpenPhoneClient) -> OpenPhoneApiResult<T> + Send + 'static,
    {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || op(client.as_ref()))
            .await
            .map_err(|e| OpenPhoneApiError::HttpError(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl AsyncOpenPhoneClient for AsyncOpenPhoneClientImpl {
    async fn list_messages(&self, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage> {
        let query = query.clone();
        self.run(move |client| client.list_messages(&query)).await
    }

    async fn list_contacts(&self, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage> {
        let query = query.clone();
        self.run(move |client| client.list_contacts(&query)).await
    }

    async fn list_calls(&self, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage> {
        let query = query.clone();
        self.run(move |client| client.list_calls(&query)).await
    }

    async fn list_phone_numbers(&self) -> OpenPhoneApiResult<Value> {
        self.run(|client| client.list_phone_numbers()).await
    }

    async fn get_resource(
        &self,
        resource_type: ResourceType,
        id: &str,
    ) -> OpenPhoneApiResult<Value> {
        let id = id.to_string();
        self.run(move |client| client.get_resource(resource_type, &id))
            .await
    }

    async fn send_message(&self, request: &SendMessageRequest) -> OpenPhoneApiResult<Value> {
        let request = request.clone();
        self.run(move |client| client.send_message(&request)).await
    }

    async fn create_call(&self, request: &CreateCallRequest) -> OpenPhoneApiResult<Value> {
        let request = request.clone();
        self.run(move |client| client.create_call(&request)).await
    }

    async fn create_contact(&self, request: &CreateContactRequest) -> OpenPhoneApiResult<Value> {
        let request = request.clone();
        self.run(move |client| client.create_contact(&request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[tokio::test]
    async fn test_async_client_creation() {
        let config = Config {
            openphone_api_key: "test_key".to_string(),
            ..Config::default()
        };
        let client = OpenPhoneClient::new(&config);
        let async_client = AsyncOpenPhoneClientImpl::new(client);

        let cloned = async_client.clone();
        assert_eq!(cloned.metrics().upstream_calls(), 0);
    }

    #[tokio::test]
    async fn test_connection_failure_is_mapped() {
        // Port 9 on localhost is reserved (discard) and normally closed
        let client = OpenPhoneClient::with_base_url(
            "http://127.0.0.1:9".to_string(),
            "test_key".to_string(),
        );
        let async_client = AsyncOpenPhoneClientImpl::new(client);

        let result = async_client.list_phone_numbers().await;
        assert!(result.is_err());
        assert_eq!(async_client.metrics().upstream_failures(), 1);
    }
}
