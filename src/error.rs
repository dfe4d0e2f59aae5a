//! Error types for the OpenPhone MCP adapter.
//!
//! Upstream and configuration failures each get their own `thiserror` enum.
//! [`AdapterError`] is what request handlers return; its `IntoResponse` impl is
//! the only place errors are turned into `{error, message}` JSON bodies.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur when calling the OpenPhone API.
#[derive(Error, Debug)]
pub enum OpenPhoneApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Response was valid JSON but not the expected shape
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors surfaced by adapter operations to HTTP callers.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Missing or invalid request input; no upstream call was made
    #[error("{0}")]
    Validation(String),

    /// Fetch was asked for a resource type with no upstream mapping
    #[error("Unsupported resource type: {0}")]
    UnsupportedResourceType(String),

    /// The upstream call failed
    #[error(transparent)]
    Upstream(#[from] OpenPhoneApiError),
}

impl AdapterError {
    /// Convenience constructor for a missing required field.
    pub fn missing_field(field: &str) -> Self {
        AdapterError::Validation(format!("Missing required field: {}", field))
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdapterError::Validation(_) | AdapterError::UnsupportedResourceType(_) => {
                StatusCode::BAD_REQUEST
            }
            AdapterError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short error label used in the `error` field of the envelope.
    pub fn label(&self) -> &'static str {
        match self {
            AdapterError::Validation(_) => "Validation error",
            AdapterError::UnsupportedResourceType(_) => "Unsupported resource type",
            AdapterError::Upstream(_) => "Upstream request failed",
        }
    }
}

impl From<JsonRejection> for AdapterError {
    fn from(rejection: JsonRejection) -> Self {
        AdapterError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AdapterError {
    fn from(rejection: QueryRejection) -> Self {
        AdapterError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AdapterError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }

        let body = json!({
            "error": self.label(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for Results with OpenPhoneApiError
pub type OpenPhoneApiResult<T> = Result<T, OpenPhoneApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with AdapterError
pub type AdapterResult<T> = Result<T, AdapterError>;
