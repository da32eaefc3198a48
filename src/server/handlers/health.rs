//! Liveness and diagnostics handlers.

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Map, Value};

use super::super::AppState;
use crate::extract::TextExtractor;

/// Liveness endpoint.
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "AdShield AI API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy"
    }))
}

/// Diagnostics: configuration flags, model identifiers, and which
/// extraction tools are present on this host.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let tools: Map<String, Value> = TextExtractor::check_tools()
        .into_iter()
        .map(|(tool, available)| (tool, json!(available)))
        .collect();

    Json(json!({
        "status": "healthy",
        "hf_token_configured": state.settings.hf_api_token.is_some(),
        "models": {
            "text": state.settings.phishing_model,
            "spam": state.settings.spam_model,
            "deepfake": state.settings.deepfake_model,
        },
        "tools": tools,
    }))
}
