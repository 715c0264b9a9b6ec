//! Reference-data lookup endpoints backed by the cached PokéAPI client.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use crate::error::ApiError;
use crate::request_id::RequestId;
use crate::state::AppState;
use pokelens_core::api::ApiResponse;
use pokelens_pokeapi::{CacheStats, PokemonSummary};

/// `GET /api/v1/pokemon/:id`
///
/// The id segment is parsed by hand so a non-numeric value still gets the
/// standard error envelope instead of the framework's plain-text rejection.
pub async fn get_by_id(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PokemonSummary>>, ApiError> {
    let started = Instant::now();
    let id: i64 = id.parse().map_err(|_| {
        ApiError::bad_request(format!("Invalid Pokemon id '{}': expected an integer", id))
            .with_request_id(request_id.clone())
    })?;
    let summary = state
        .pokeapi
        .summary_by_id(id)
        .await
        .map_err(|e| ApiError::from(e).with_request_id(request_id.clone()))?;
    Ok(Json(ApiResponse::ok(
        summary,
        elapsed_ms(started),
        request_id,
    )))
}

/// `GET /api/v1/pokemon/name/:name`
pub async fn get_by_name(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<PokemonSummary>>, ApiError> {
    let started = Instant::now();
    let summary = state
        .pokeapi
        .summary_by_name(&name)
        .await
        .map_err(|e| ApiError::from(e).with_request_id(request_id.clone()))?;
    Ok(Json(ApiResponse::ok(
        summary,
        elapsed_ms(started),
        request_id,
    )))
}

/// `GET /api/v1/pokemon/cache/stats`
pub async fn cache_stats(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
) -> Json<ApiResponse<CacheStats>> {
    let started = Instant::now();
    Json(ApiResponse::ok(
        state.pokeapi.cache_stats(),
        elapsed_ms(started),
        request_id,
    ))
}

/// `DELETE /api/v1/pokemon/cache`
pub async fn clear_cache(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
) -> Json<ApiResponse<serde_json::Value>> {
    let started = Instant::now();
    state.pokeapi.clear_cache();
    info!(request_id = %request_id, "Cache cleared via API");
    Json(ApiResponse::ok(
        serde_json::json!({ "cleared": true }),
        elapsed_ms(started),
        request_id,
    ))
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
