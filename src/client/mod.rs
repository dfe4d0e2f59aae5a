//! HTTP client for the OpenPhone REST API.
//!
//! This module provides a synchronous HTTP client that is driven from async
//! handlers via `tokio::task::spawn_blocking`. The client handles the
//! credential header, error mapping, and unwrapping of upstream envelopes.

mod async_wrapper;
pub use async_wrapper::{AsyncOpenPhoneClient, AsyncOpenPhoneClientImpl};

use crate::config::Config;
use crate::error::{OpenPhoneApiError, OpenPhoneApiResult};
use crate::metrics::Metrics;
use crate::models::{
    unwrap_data, CreateCallRequest, CreateContactRequest, ListQuery, ResourceType,
    SendMessageRequest, UpstreamPage,
};
use serde_json::Value;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the OpenPhone API.
///
/// This client uses `ureq` for synchronous HTTP requests. One instance (and its
/// connection pool) is shared by every request the adapter serves.
#[derive(Clone)]
pub struct OpenPhoneClient {
    /// Base URL for the OpenPhone API
    base_url: String,

    /// API key for authentication
    api_key: String,

    agent: Arc<ureq::Agent>,

    metrics: Metrics,
}

fn build_agent(timeout: Duration) -> Arc<ureq::Agent> {
    Arc::new(ureq::AgentBuilder::new().timeout(timeout).build())
}

impl OpenPhoneClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.openphone_api_url.clone(),
            api_key: config.openphone_api_key.clone(),
            agent: build_agent(Duration::from_secs(config.request_timeout)),
            metrics: Metrics::new(),
        }
    }

    /// Create a client with a custom base URL (useful for testing).
    ///
    /// Uses the default configured timeout; see [`Self::with_timeout`].
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            ..Self::new(&Config::default())
        }
    }

    /// Replace the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = build_agent(timeout);
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &self.api_key)
            .set("Content-Type", "application/json")
    }

    /// GET `path` and decode the JSON body with `decode`.
    fn get<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        decode: impl FnOnce(Value) -> OpenPhoneApiResult<T>,
    ) -> OpenPhoneApiResult<T> {
        let url = self.build_url(path);
        tracing::debug!("GET {}", url);

        let mut request = self.request("GET", &url);
        for (key, value) in query {
            request = request.query(key, value);
        }

        self.execute("GET", &url, || request.call(), decode)
    }

    /// POST a JSON body to `path` and decode the JSON response with `decode`.
    fn post<T>(
        &self,
        path: &str,
        body: &Value,
        decode: impl FnOnce(Value) -> OpenPhoneApiResult<T>,
    ) -> OpenPhoneApiResult<T> {
        let url = self.build_url(path);
        // message text and contact details stay out of the logs
        tracing::debug!(bytes = body.to_string().len(), "POST {}", url);

        let request = self.request("POST", &url);
        self.execute("POST", &url, || request.send_json(body), decode)
    }

    /// Send, read, decode; the whole sequence is one timed upstream call.
    fn execute<T>(
        &self,
        method: &str,
        url: &str,
        send: impl FnOnce() -> Result<ureq::Response, ureq::Error>,
        decode: impl FnOnce(Value) -> OpenPhoneApiResult<T>,
    ) -> OpenPhoneApiResult<T> {
        let timer = self.metrics.start_upstream_call();

        let result = send()
            .map_err(map_error)
            .and_then(read_json)
            .and_then(decode);

        timer.finish(&result);
        match &result {
            Ok(_) => tracing::debug!("{} {} - Success", method, url),
            Err(e) => tracing::error!("{} {} - Error: {}", method, url, e),
        }
        result
    }

    // ========================= List Operations =========================

    fn list(&self, path: &str, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage> {
        self.get(path, &query.to_pairs(), |body| {
            serde_json::from_value(body)
                .map_err(|e| OpenPhoneApiError::MalformedResponse(format!("{} list: {}", path, e)))
        })
    }

    /// List messages, optionally filtered by phone number and text.
    pub fn list_messages(&self, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage> {
        self.list("/messages", query)
    }

    /// List contacts, optionally filtered by text.
    pub fn list_contacts(&self, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage> {
        self.list("/contacts", query)
    }

    /// List calls.
    ///
    /// The upstream ignores text filters for calls, so `query.search` should be
    /// left empty and filtering done by the caller.
    pub fn list_calls(&self, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage> {
        self.list("/calls", query)
    }

    pub fn list_phone_numbers(&self) -> OpenPhoneApiResult<Value> {
        self.get("/phone-numbers", &[], data)
    }

    // ========================= Read Operations =========================

    /// Read a single resource of the given type.
    pub fn get_resource(&self, resource_type: ResourceType, id: &str) -> OpenPhoneApiResult<Value> {
        self.get(&resource_type.upstream_path(id), &[], data)
    }

    // ========================= Write Operations =========================

    pub fn send_message(&self, request: &SendMessageRequest) -> OpenPhoneApiResult<Value> {
        tracing::info!("Sending message to {} recipient(s)", request.to.len());
        let body = serde_json::to_value(request)?;
        self.post("/messages", &body, data)
    }

    /// Place an outbound call.
    pub fn create_call(&self, request: &CreateCallRequest) -> OpenPhoneApiResult<Value> {
        tracing::info!("Creating call to {}", request.to);
        let body = serde_json::to_value(request)?;
        self.post("/calls", &body, data)
    }

    pub fn create_contact(&self, request: &CreateContactRequest) -> OpenPhoneApiResult<Value> {
        let body = serde_json::to_value(request)?;
        self.post("/contacts", &body, data)
    }
}

/// Decoder for single-entity responses.
fn data(body: Value) -> OpenPhoneApiResult<Value> {
    Ok(unwrap_data(body))
}

fn read_json(response: ureq::Response) -> OpenPhoneApiResult<Value> {
    let body = response
        .into_string()
        .map_err(|e| OpenPhoneApiError::HttpError(e.to_string()))?;
    Ok(serde_json::from_str(&body)?)
}

/// Map a ureq error to an OpenPhoneApiError.
fn map_error(error: ureq::Error) -> OpenPhoneApiError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            match code {
                401 => OpenPhoneApiError::Unauthorized,
                404 => OpenPhoneApiError::NotFound(message),
                429 => OpenPhoneApiError::RateLimitExceeded,
                _ => OpenPhoneApiError::ApiError {
                    status: code,
                    message,
                },
            }
        }
        ureq::Error::Transport(transport) => match transport.kind() {
            ureq::ErrorKind::ConnectionFailed => {
                OpenPhoneApiError::HttpError("Connection failed".to_string())
            }
            ureq::ErrorKind::Io if is_timeout(&transport) => OpenPhoneApiError::Timeout,
            _ => OpenPhoneApiError::HttpError(transport.to_string()),
        },
    }
}

/// Whether a transport error was caused by the agent's deadline.
fn is_timeout(transport: &ureq::Transport) -> bool {
    std::error::Error::source(transport)
        .and_then(|source| source.downcast_ref::<io::Error>())
        .is_some_and(|e| matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock))
}
