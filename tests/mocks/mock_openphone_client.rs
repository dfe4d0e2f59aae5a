use async_trait::async_trait;
use openphone_mcp_adapter::client::AsyncOpenPhoneClient;
use openphone_mcp_adapter::error::{OpenPhoneApiError, OpenPhoneApiResult};
use openphone_mcp_adapter::models::{
    CreateCallRequest, CreateContactRequest, ListQuery, ResourceType, SendMessageRequest,
    UpstreamPage,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockState {
    messages: UpstreamPage,
    contacts: UpstreamPage,
    calls: UpstreamPage,
    phone_numbers: Value,
    resources: HashMap<(ResourceType, String), Value>,
    failing: HashSet<String>,
    call_counts: HashMap<String, usize>,
    list_queries: HashMap<String, Vec<ListQuery>>,
    sent_messages: Vec<SendMessageRequest>,
    created_calls: Vec<CreateCallRequest>,
    created_contacts: Vec<CreateContactRequest>,
}

/// In-memory stand-in for the OpenPhone API.
///
/// Serves configured pages and resources, records every call and its input,
/// and can be told to fail individual methods.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockOpenPhoneClient {
    state: Arc<Mutex<MockState>>,
}

#[allow(dead_code)]
impl MockOpenPhoneClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_messages(&self, page: UpstreamPage) {
        self.state.lock().unwrap().messages = page;
    }

    pub fn set_contacts(&self, page: UpstreamPage) {
        self.state.lock().unwrap().contacts = page;
    }

    pub fn set_calls(&self, page: UpstreamPage) {
        self.state.lock().unwrap().calls = page;
    }

    pub fn set_phone_numbers(&self, numbers: Value) {
        self.state.lock().unwrap().phone_numbers = numbers;
    }

    pub fn add_resource(&self, resource_type: ResourceType, id: &str, data: Value) {
        self.state
            .lock()
            .unwrap()
            .resources
            .insert((resource_type, id.to_string()), data);
    }

    /// Make every call to `method` fail with an upstream 500.
    pub fn fail(&self, method: &str) {
        self.state.lock().unwrap().failing.insert(method.to_string());
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let state = self.state.lock().unwrap();
        *state.call_counts.get(method).unwrap_or(&0)
    }

    /// Total calls across every method.
    pub fn total_calls(&self) -> usize {
        self.state.lock().unwrap().call_counts.values().sum()
    }

    pub fn list_queries(&self, method: &str) -> Vec<ListQuery> {
        let state = self.state.lock().unwrap();
        state.list_queries.get(method).cloned().unwrap_or_default()
    }

    pub fn sent_messages(&self) -> Vec<SendMessageRequest> {
        self.state.lock().unwrap().sent_messages.clone()
    }

    pub fn created_calls(&self) -> Vec<CreateCallRequest> {
        self.state.lock().unwrap().created_calls.clone()
    }

    pub fn created_contacts(&self) -> Vec<CreateContactRequest> {
        self.state.lock().unwrap().created_contacts.clone()
    }

    fn enter(&self, method: &str) -> OpenPhoneApiResult<()> {
        let mut state = self.state.lock().unwrap();
        *state.call_counts.entry(method.to_string()).or_insert(0) += 1;
        if state.failing.contains(method) {
            return Err(OpenPhoneApiError::ApiError {
                status: 500,
                message: format!("mock failure in {}", method),
            });
        }
        Ok(())
    }

    fn list(&self, method: &str, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage> {
        self.enter(method)?;
        let mut state = self.state.lock().unwrap();
        state
            .list_queries
            .entry(method.to_string())
            .or_default()
            .push(query.clone());

        let page = match method {
            "list_messages" => &state.messages,
            "list_contacts" => &state.contacts,
            _ => &state.calls,
        };
        let mut page = page.clone();
        page.data.truncate(query.max_results);
        Ok(page)
    }
}

#[async_trait]
impl AsyncOpenPhoneClient for MockOpenPhoneClient {
    async fn list_messages(&self, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage> {
        self.list("list_messages", query)
    }

    async fn list_contacts(&self, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage> {
        self.list("list_contacts", query)
    }

    async fn list_calls(&self, query: &ListQuery) -> OpenPhoneApiResult<UpstreamPage> {
        self.list("list_calls", query)
    }

    async fn list_phone_numbers(&self) -> OpenPhoneApiResult<Value> {
        self.enter("list_phone_numbers")?;
        Ok(self.state.lock().unwrap().phone_numbers.clone())
    }

    async fn get_resource(
        &self,
        resource_type: ResourceType,
        id: &str,
    ) -> OpenPhoneApiResult<Value> {
        self.enter("get_resource")?;
        let state = self.state.lock().unwrap();
        state
            .resources
            .get(&(resource_type, id.to_string()))
            .cloned()
            .ok_or_else(|| OpenPhoneApiError::NotFound(format!("{} {}", resource_type, id)))
    }

    async fn send_message(&self, request: &SendMessageRequest) -> OpenPhoneApiResult<Value> {
        self.enter("send_message")?;
        let mut state = self.state.lock().unwrap();
        state.sent_messages.push(request.clone());
        Ok(json!({
            "id": format!("MSG{}", state.sent_messages.len()),
            "to": request.to,
            "text": request.content,
            "status": "queued"
        }))
    }

    async fn create_call(&self, request: &CreateCallRequest) -> OpenPhoneApiResult<Value> {
        self.enter("create_call")?;
        let mut state = self.state.lock().unwrap();
        state.created_calls.push(request.clone());
        Ok(json!({
            "id": format!("AC{}", state.created_calls.len()),
            "participants": [request.from, request.to],
            "status": "ringing"
        }))
    }

    async fn create_contact(&self, request: &CreateContactRequest) -> OpenPhoneApiResult<Value> {
        self.enter("create_contact")?;
        let mut state = self.state.lock().unwrap();
        state.created_contacts.push(request.clone());
        let mut contact = serde_json::to_value(request).unwrap();
        contact["id"] = json!(format!("CT{}", state.created_contacts.len()));
        Ok(contact)
    }
}
