//! Text extraction and text analysis handlers.

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::debug;

use super::super::AppState;
use super::types::TextAnalysisRequest;
use super::{read_upload, ApiError};
use crate::analysis::TextVerdict;
use crate::config::MB;
use crate::utils::mime;

/// Upload cap for OCR images.
const OCR_UPLOAD_LIMIT: usize = 5 * MB;

/// Analyze text for phishing/scam content.
pub async fn analyze_text(
    State(state): State<AppState>,
    Json(request): Json<TextAnalysisRequest>,
) -> Result<Json<TextVerdict>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text content is required".to_string()));
    }
    if request.text.len() > state.settings.max_text_bytes() {
        return Err(ApiError::PayloadTooLarge("Text too large".to_string()));
    }

    let outcome = state.analyzer.analyze_text(&request.text).await;
    if let Some(reason) = outcome.degradation() {
        debug!(reason, "text analysis degraded");
    }
    Ok(Json(outcome.into_value()))
}

/// Extract text from an uploaded image via the OCR chain.
pub async fn extract_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let upload = read_upload(multipart).await?;

    if !mime::is_allowed(&upload.content_type, mime::IMAGE_TYPES) {
        return Err(ApiError::BadRequest(format!(
            "File type {} not supported",
            upload.content_type
        )));
    }
    if upload.bytes.len() > OCR_UPLOAD_LIMIT {
        return Err(ApiError::PayloadTooLarge("File too large".to_string()));
    }

    let outcome = state.analyzer.extract_text(&upload.bytes).await;
    if let Some(reason) = outcome.degradation() {
        debug!(reason, filename = %upload.filename, "text extraction degraded");
    }
    Ok(Json(json!({
        "text": outcome.into_value(),
        "filename": upload.filename,
    })))
}
