//! HTTP error mapping for non-upload endpoints.
//!
//! Upload validation failures are handled inline by the identify handler
//! (they keep HTTP 200); this type covers the lookup endpoints and anything
//! unexpected. Handlers attach the middleware's correlation ID so the
//! envelope matches the `x-request-id` header even on error responses.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use pokelens_core::api::{new_request_id, ApiErrorBody, ApiResponse};
use pokelens_pokeapi::PokeApiError;

#[derive(Debug)]
pub enum ApiErrorKind {
    BadRequest(String),
    NotFound(String),
    BadGateway(String),
    Internal(String),
}

#[derive(Debug)]
pub struct ApiError {
    kind: ApiErrorKind,
    request_id: Option<String>,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiErrorKind::BadRequest(msg.into()).into()
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiErrorKind::Internal(msg.into()).into()
    }

    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    /// Attach the request's correlation ID for the response envelope.
    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

impl From<ApiErrorKind> for ApiError {
    fn from(kind: ApiErrorKind) -> Self {
        Self {
            kind,
            request_id: None,
        }
    }
}

impl From<PokeApiError> for ApiError {
    fn from(err: PokeApiError) -> Self {
        let kind = match err {
            PokeApiError::InvalidArgument(msg) => ApiErrorKind::BadRequest(msg),
            PokeApiError::NotFound(url) => {
                ApiErrorKind::NotFound(format!("Pokemon not found: {}", url))
            }
            PokeApiError::Remote { .. } => ApiErrorKind::BadGateway(err.to_string()),
        };
        kind.into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self.kind {
            ApiErrorKind::BadRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", msg),
            ApiErrorKind::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiErrorKind::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg),
            ApiErrorKind::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    // Never leak internals to the client.
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let request_id = self.request_id.unwrap_or_else(new_request_id);
        let body: ApiResponse<serde_json::Value> =
            ApiResponse::err(ApiErrorBody::new(code, message), 0.0, request_id);
        (status, Json(body)).into_response()
    }
}
