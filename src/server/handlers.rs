//! HTTP handlers for the adapter's endpoints.
//!
//! Handlers only extract input and delegate to the tools; every failure is an
//! `AdapterError` and gets rendered by its `IntoResponse` impl.

use crate::client::AsyncOpenPhoneClient;
use crate::error::AdapterResult;
use crate::metrics::Metrics;
use crate::models::WebhookEvent;
use crate::tools::{
    CreateContactParams, CreateContactResponse, DirectoryTools, FetchParams, FetchResponse,
    FetchTools, ListCallsParams, ListCallsResponse, ListContactsParams, ListContactsResponse,
    ListMessagesParams, ListMessagesResponse, MakeCallParams, MakeCallResponse, MessagingTools,
    PhoneNumbersResponse, SearchParams, SearchResponse, SearchTools, SendSmsParams,
    SendSmsResponse,
};
use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Names of the operations advertised in the service metadata.
pub const CAPABILITIES: &[&str] = &[
    "search",
    "fetch",
    "send-sms",
    "make-call",
    "list-messages",
    "list-contacts",
    "list-calls",
    "list-phone-numbers",
    "create-contact",
];

/// Service metadata returned by `/mcp/info` and embedded in `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub upstream: &'static str,
    pub capabilities: &'static [&'static str],
}

impl ServiceInfo {
    pub fn current() -> Self {
        Self {
            name: "openphone-mcp-adapter",
            version: env!("CARGO_PKG_VERSION"),
            description: "MCP adapter for OpenPhone messaging, calls and contacts",
            upstream: "OpenPhone",
            capabilities: CAPABILITIES,
        }
    }
}

/// Shared state behind every handler: one set of tools over one client.
#[derive(Clone)]
pub struct OpenPhoneMcpServer {
    search_tools: SearchTools,
    fetch_tools: FetchTools,
    messaging_tools: MessagingTools,
    directory_tools: DirectoryTools,
}

impl OpenPhoneMcpServer {
    /// Create the server state (tools are constructed internally).
    pub fn new(client: Arc<dyn AsyncOpenPhoneClient>) -> Self {
        Self::with_metrics(client, Metrics::new())
    }

    /// Like [`Self::new`], recording search counters into `metrics`.
    pub fn with_metrics(client: Arc<dyn AsyncOpenPhoneClient>, metrics: Metrics) -> Self {
        Self {
            search_tools: SearchTools::with_metrics(client.clone(), metrics),
            fetch_tools: FetchTools::new(client.clone()),
            messaging_tools: MessagingTools::new(client.clone()),
            directory_tools: DirectoryTools::new(client),
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "server": ServiceInfo::current(),
    }))
}

pub async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo::current())
}

pub async fn search(
    State(server): State<OpenPhoneMcpServer>,
    payload: Result<Json<SearchParams>, JsonRejection>,
) -> AdapterResult<Json<SearchResponse>> {
    let Json(params) = payload?;
    Ok(Json(server.search_tools.search(params).await?))
}

pub async fn fetch(
    State(server): State<OpenPhoneMcpServer>,
    payload: Result<Json<FetchParams>, JsonRejection>,
) -> AdapterResult<Json<FetchResponse>> {
    let Json(params) = payload?;
    Ok(Json(server.fetch_tools.fetch(params).await?))
}

pub async fn send_sms(
    State(server): State<OpenPhoneMcpServer>,
    payload: Result<Json<SendSmsParams>, JsonRejection>,
) -> AdapterResult<Json<SendSmsResponse>> {
    let Json(params) = payload?;
    Ok(Json(server.messaging_tools.send_sms(params).await?))
}

pub async fn make_call(
    State(server): State<OpenPhoneMcpServer>,
    payload: Result<Json<MakeCallParams>, JsonRejection>,
) -> AdapterResult<Json<MakeCallResponse>> {
    let Json(params) = payload?;
    Ok(Json(server.messaging_tools.make_call(params).await?))
}

pub async fn list_messages(
    State(server): State<OpenPhoneMcpServer>,
    query: Result<Query<ListMessagesParams>, QueryRejection>,
) -> AdapterResult<Json<ListMessagesResponse>> {
    let Query(params) = query?;
    Ok(Json(server.directory_tools.list_messages(params).await?))
}

pub async fn list_contacts(
    State(server): State<OpenPhoneMcpServer>,
    query: Result<Query<ListContactsParams>, QueryRejection>,
) -> AdapterResult<Json<ListContactsResponse>> {
    let Query(params) = query?;
    Ok(Json(server.directory_tools.list_contacts(params).await?))
}

pub async fn list_calls(
    State(server): State<OpenPhoneMcpServer>,
    query: Result<Query<ListCallsParams>, QueryRejection>,
) -> AdapterResult<Json<ListCallsResponse>> {
    let Query(params) = query?;
    Ok(Json(server.directory_tools.list_calls(params).await?))
}

pub async fn list_phone_numbers(
    State(server): State<OpenPhoneMcpServer>,
) -> AdapterResult<Json<PhoneNumbersResponse>> {
    Ok(Json(server.directory_tools.list_phone_numbers().await?))
}

pub async fn create_contact(
    State(server): State<OpenPhoneMcpServer>,
    payload: Result<Json<CreateContactParams>, JsonRejection>,
) -> AdapterResult<Json<CreateContactResponse>> {
    let Json(params) = payload?;
    Ok(Json(server.directory_tools.create_contact(params).await?))
}

/// Log and acknowledge an upstream event.
///
/// No signature check and no side effects; anything that is not JSON is
/// logged as an empty event and still acknowledged.
pub async fn openphone_webhook(body: Bytes) -> Json<Value> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let event = WebhookEvent::from_payload(&payload);

    tracing::info!(
        event_type = event.event_type.as_deref().unwrap_or("unknown"),
        event_id = event.id.as_deref().unwrap_or("unknown"),
        created_at = event.created_at.as_deref().unwrap_or("unknown"),
        received_at = %chrono::Utc::now().to_rfc3339(),
        "Received OpenPhone webhook"
    );

    Json(json!({ "received": true }))
}

