//! # pokelens-api
//!
//! HTTP surface for the pokelens identification service. The router and
//! application state live here so integration tests can boot the exact
//! production stack against an ephemeral port.

pub mod error;
pub mod handlers;
pub mod request_id;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub use error::ApiError;
pub use request_id::RequestId;
pub use state::AppState;

use request_id::MakeRequestUuidV7;

/// Body-limit headroom above the upload cap.
///
/// Uploads within the headroom reach the gate's byte-count check; uploads
/// beyond it abort mid-read and are mapped to the same FILE_TOO_LARGE code
/// by the identify handler.
pub(crate) fn request_body_limit(max_file_size: u64) -> usize {
    (max_file_size as usize).saturating_mul(2).max(1024 * 1024)
}

/// Build the full application router with all middleware attached.
pub fn build_router(state: AppState) -> Router {
    let body_limit = request_body_limit(state.settings.max_file_size);

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/v1/identify", post(handlers::identify::identify))
        .route("/api/v1/identify/info", get(handlers::identify::identify_info))
        .route("/api/v1/pokemon/:id", get(handlers::pokemon::get_by_id))
        .route(
            "/api/v1/pokemon/name/:name",
            get(handlers::pokemon::get_by_name),
        )
        .route(
            "/api/v1/pokemon/cache/stats",
            get(handlers::pokemon::cache_stats),
        )
        .route(
            "/api/v1/pokemon/cache",
            delete(handlers::pokemon::clear_cache),
        )
        .route("/api/v1/models/status", get(handlers::health::models_status))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(CatchPanicLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
