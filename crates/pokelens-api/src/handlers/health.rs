//! Liveness and model status endpoints.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::request_id::RequestId;
use crate::state::AppState;
use pokelens_core::api::ApiResponse;
use pokelens_recognition::ModelStatus;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub uptime_secs: u64,
}

/// `GET /health`
pub async fn health(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
) -> Json<ApiResponse<HealthStatus>> {
    let started = Instant::now();
    let data = HealthStatus {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.settings.environment.clone(),
        uptime_secs: state.uptime_secs(),
    };
    Json(ApiResponse::ok(
        data,
        started.elapsed().as_secs_f64() * 1000.0,
        request_id,
    ))
}

/// `GET /api/v1/models/status`
pub async fn models_status(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
) -> Json<ApiResponse<ModelStatus>> {
    let started = Instant::now();
    Json(ApiResponse::ok(
        state.recognition.model_status(),
        started.elapsed().as_secs_f64() * 1000.0,
        request_id,
    ))
}
