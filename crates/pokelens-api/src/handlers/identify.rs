//! Image upload and identification endpoint.
//!
//! The full pipeline runs inline: metadata checks, byte re-validation,
//! decode, hash, preprocess, predict. Handled validation failures keep
//! HTTP 200 and report the failure through the response envelope.

use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::request_id::RequestId;
use crate::state::AppState;
use pokelens_core::api::{ApiErrorBody, ApiResponse};
use pokelens_imaging::{format_size, ImagingError, UploadedFile};
use pokelens_recognition::{Identification, RecognitionError};

/// Stats about the accepted upload, echoed back alongside the result.
#[derive(Debug, Serialize)]
pub struct FileStats {
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub size: String,
    pub hash: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

/// Payload of a successful identify call.
#[derive(Debug, Serialize)]
pub struct IdentifyData {
    pub file: FileStats,
    pub identification: Identification,
}

/// `POST /api/v1/identify` with a multipart `image` field.
pub async fn identify(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let started = Instant::now();

    // Locate the `image` field. A request without it is a malformed call,
    // not a rejected upload, so it gets 422 instead of the 200 envelope.
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(f)) if f.name() == Some("image") => break f,
            Ok(Some(_)) => continue,
            Ok(None) => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ApiResponse::<IdentifyData>::err(
                        ApiErrorBody::new("NO_FILE_PROVIDED", "Multipart field 'image' is required"),
                        elapsed_ms(started),
                        request_id,
                    )),
                )
                    .into_response();
            }
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "Malformed multipart body");
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ApiResponse::<IdentifyData>::err(
                        ApiErrorBody::new("NO_FILE_PROVIDED", "Malformed multipart body"),
                        elapsed_ms(started),
                        request_id,
                    )),
                )
                    .into_response();
            }
        }
    };

    let upload = UploadedFile {
        filename: field.file_name().map(str::to_string),
        content_type: field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string(),
        declared_size: None,
    };

    if let Err(e) = state.policy.validate_metadata(&upload) {
        return rejected(&state, e, started, request_id);
    }

    let bytes = match field.bytes().await {
        Ok(b) => b,
        // The stream aborts at the body-limit boundary when the upload is
        // far above the cap; that is still a size rejection, not a decode
        // failure.
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            let size = declared_body_size(&headers)
                .unwrap_or(crate::request_body_limit(state.policy.max_file_size) as u64);
            return rejected(
                &state,
                ImagingError::FileTooLarge {
                    size,
                    max: state.policy.max_file_size,
                },
                started,
                request_id,
            );
        }
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "Failed to read upload body");
            return rejected(
                &state,
                ImagingError::InvalidFormat("failed to read upload body".to_string()),
                started,
                request_id,
            );
        }
    };

    let decoded = match state.policy.decode_and_validate(&bytes) {
        Ok(d) => d,
        Err(e) => return rejected(&state, e, started, request_id),
    };

    let identification = match state.recognition.identify(&decoded, &bytes).await {
        Ok(i) => i,
        Err(RecognitionError::Imaging(e)) => return rejected(&state, e, started, request_id),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Identification failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<IdentifyData>::err(
                    ApiErrorBody::new("INTERNAL_SERVER_ERROR", "An unexpected error occurred"),
                    elapsed_ms(started),
                    request_id,
                )),
            )
                .into_response();
        }
    };

    let size_bytes = bytes.len() as u64;
    let data = IdentifyData {
        file: FileStats {
            filename: upload.filename.unwrap_or_default(),
            content_type: upload.content_type,
            size_bytes,
            size: format_size(size_bytes),
            hash: identification.image_hash.clone(),
            width: decoded.width(),
            height: decoded.height(),
            format: decoded.format_name().to_string(),
        },
        identification,
    };

    info!(
        request_id = %request_id,
        pokemon = %data.identification.primary.name,
        size_bytes,
        "Identify request served"
    );
    Json(ApiResponse::ok(data, elapsed_ms(started), request_id)).into_response()
}

/// `GET /api/v1/identify/info` - upload constraints and pipeline summary.
pub async fn identify_info(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
) -> Response {
    let started = Instant::now();
    let data = json!({
        "supported_formats": state.policy.allowed_mime_types,
        "max_file_size_bytes": state.policy.max_file_size,
        "max_file_size": format_size(state.policy.max_file_size),
        "min_dimension": state.policy.min_dimension,
        "max_pixels": state.policy.max_pixels,
        "target_size": state.settings.target_size,
        "preprocessing": format!(
            "RGB convert, aspect-preserving center-crop to {0}x{0}, scale to [0,1]",
            state.settings.target_size
        ),
    });
    Json(ApiResponse::ok(data, elapsed_ms(started), request_id)).into_response()
}

/// Whole-body Content-Length, when the client declared one. Includes
/// multipart framing overhead, so it only approximates the file size.
fn declared_body_size(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// HTTP 200 envelope for a handled upload rejection.
fn rejected(
    state: &AppState,
    err: ImagingError,
    started: Instant,
    request_id: String,
) -> Response {
    warn!(request_id = %request_id, code = err.code(), error = %err, "Upload rejected");

    let mut body = ApiErrorBody::new(err.code(), err.to_string());
    match &err {
        ImagingError::UnsupportedType { .. } | ImagingError::InvalidFormat(_) => {
            body.supported_formats = Some(state.policy.allowed_mime_types.clone());
        }
        ImagingError::FileTooLarge { .. } => {
            body.max_file_size = Some(format_size(state.policy.max_file_size));
        }
        _ => {}
    }

    // 200 by contract: the request itself was well-formed.
    Json(ApiResponse::<IdentifyData>::err(
        body,
        elapsed_ms(started),
        request_id,
    ))
    .into_response()
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
