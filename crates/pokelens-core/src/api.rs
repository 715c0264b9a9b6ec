//! Shared API response envelope.
//!
//! Every pokelens endpoint that participates in the identification flow
//! responds with this envelope. Handled validation failures keep HTTP 200
//! and communicate the failure through `error`; only unexpected failures
//! surface as 5xx.

use serde::{Deserialize, Serialize};

/// Uniform response envelope for pokelens endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload when `success` is true.
    pub data: Option<T>,
    /// Error detail when `success` is false.
    pub error: Option<ApiErrorBody>,
    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: f64,
    /// Unix timestamp (seconds, fractional) when the response was built.
    pub timestamp: f64,
    /// Unique request identifier (UUIDv7).
    pub request_id: String,
}

/// Structured error payload carried inside the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Stable machine-readable code (e.g. "FILE_TOO_LARGE").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Accepted MIME types, attached to upload validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_formats: Option<Vec<String>>,
    /// Formatted size limit, attached to upload validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Build a success envelope.
    pub fn ok(data: T, processing_time_ms: f64, request_id: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            processing_time_ms,
            timestamp: now_unix(),
            request_id,
        }
    }

    /// Build a failure envelope.
    pub fn err(error: ApiErrorBody, processing_time_ms: f64, request_id: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            processing_time_ms,
            timestamp: now_unix(),
            request_id,
        }
    }
}

impl ApiErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            supported_formats: None,
            max_file_size: None,
        }
    }
}

/// Generate a time-ordered request identifier.
pub fn new_request_id() -> String {
    format!("req_{}", uuid::Uuid::now_v7().simple())
}

fn now_unix() -> f64 {
    let now = chrono::Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_millis()) / 1000.0
}
