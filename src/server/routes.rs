//! Router configuration for the analysis API.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::handlers;
use super::AppState;
use crate::config::MB;

/// Body cap above every per-endpoint limit, so the handlers own the
/// 413 decision.
const MAX_BODY_BYTES: usize = 64 * MB;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/v1/text/extract", post(handlers::extract_text))
        .route("/api/v1/text/analyze", post(handlers::analyze_text))
        .route("/api/v1/doc/analyze", post(handlers::analyze_document))
        .route("/api/v1/deepfake/analyze", post(handlers::analyze_deepfake))
        .route(
            "/api/v1/history",
            post(handlers::save_history).get(handlers::get_history),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .settings
        .cors_origins()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
