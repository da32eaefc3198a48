//! History endpoints.
//!
//! Placeholders until durable history storage lands; they keep the
//! API surface stable for clients.

use axum::extract::Query;
use axum::Json;
use serde_json::{json, Value};
use tracing::debug;

use super::types::HistoryParams;

/// Save an analysis summary to history (placeholder).
pub async fn save_history(Json(_summary): Json<Value>) -> Json<Value> {
    Json(json!({ "id": "mock-id-123" }))
}

/// Get analysis history (placeholder).
pub async fn get_history(Query(params): Query<HistoryParams>) -> Json<Value> {
    debug!(
        limit = params.limit.unwrap_or(10),
        offset = params.offset.unwrap_or(0),
        "history requested"
    );
    Json(json!([]))
}
