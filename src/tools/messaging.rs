//! Outbound SMS and calls.

use crate::client::AsyncOpenPhoneClient;
use crate::error::AdapterResult;
use crate::models::{CreateCallRequest, SendMessageRequest};
use crate::tools::require_field;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Parameters for sending an SMS.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendSmsParams {
    /// Destination phone number (E.164)
    pub to: Option<String>,

    /// Message body
    pub message: Option<String>,

    /// Sending OpenPhone number or number id; upstream default when absent
    pub from: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendSmsResponse {
    pub success: bool,
    pub message_id: Option<String>,
    pub data: Value,
}

/// Parameters for placing a call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MakeCallParams {
    pub to: Option<String>,
    pub from: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeCallResponse {
    pub success: bool,
    pub call_id: Option<String>,
    pub data: Value,
}

#[derive(Clone)]
pub struct MessagingTools {
    client: Arc<dyn AsyncOpenPhoneClient>,
}

fn created_id(data: &Value) -> Option<String> {
    data.get("id").and_then(Value::as_str).map(str::to_string)
}

impl MessagingTools {
    pub fn new(client: Arc<dyn AsyncOpenPhoneClient>) -> Self {
        Self { client }
    }

    /// Send a text message. Requires `to` and `message`.
    pub async fn send_sms(&self, params: SendSmsParams) -> AdapterResult<SendSmsResponse> {
        let to = require_field(params.to, "to")?;
        let content = require_field(params.message, "message")?;

        let request = SendMessageRequest {
            to: vec![to],
            content,
            from: params.from,
        };
        let data = self.client.send_message(&request).await?;
        let message_id = created_id(&data);
        tracing::info!(message_id = ?message_id, "Message sent");

        Ok(SendSmsResponse {
            success: true,
            message_id,
            data,
        })
    }

    /// Place a call. Requires both `to` and `from`.
    pub async fn make_call(&self, params: MakeCallParams) -> AdapterResult<MakeCallResponse> {
        let to = require_field(params.to, "to")?;
        let from = require_field(params.from, "from")?;

        let data = self
            .client
            .create_call(&CreateCallRequest { to, from })
            .await?;
        let call_id = created_id(&data);
        tracing::info!(call_id = ?call_id, "Call created");

        Ok(MakeCallResponse {
            success: true,
            call_id,
            data,
        })
    }
}
