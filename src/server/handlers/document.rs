//! Document analysis handler.

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::debug;

use super::super::AppState;
use super::{read_upload, ApiError};
use crate::analysis::DocumentVerdict;
use crate::utils::mime;

/// Analyze an uploaded document for fraud indicators.
pub async fn analyze_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DocumentVerdict>, ApiError> {
    let upload = read_upload(multipart).await?;

    if !mime::is_allowed(&upload.content_type, mime::DOCUMENT_TYPES) {
        return Err(ApiError::BadRequest(format!(
            "File type {} not supported",
            upload.content_type
        )));
    }
    if upload.bytes.len() > state.settings.max_document_bytes() {
        return Err(ApiError::PayloadTooLarge("File too large".to_string()));
    }

    // Accepted for API compatibility; analysis does not use it
    if let Some(question) = &upload.question {
        debug!(%question, "document question received");
    }

    let outcome = state
        .analyzer
        .analyze_document(&upload.bytes, &upload.filename)
        .await;
    if let Some(reason) = outcome.degradation() {
        debug!(reason, filename = %upload.filename, "document analysis degraded");
    }
    Ok(Json(outcome.into_value()))
}
