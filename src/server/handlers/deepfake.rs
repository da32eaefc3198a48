//! Deepfake analysis handler.

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::debug;

use super::super::AppState;
use super::{read_upload, ApiError};
use crate::config::MB;
use crate::deepfake::DeepfakeReport;
use crate::utils::mime;

/// Upload cap for deepfake analysis.
const DEEPFAKE_UPLOAD_LIMIT: usize = 10 * MB;

/// Analyze an uploaded image for deepfake indicators.
pub async fn analyze_deepfake(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DeepfakeReport>, ApiError> {
    let upload = read_upload(multipart).await?;

    if !mime::is_allowed(&upload.content_type, mime::IMAGE_TYPES) {
        return Err(ApiError::BadRequest(format!(
            "File type {} not supported. Please upload JPEG, PNG, GIF, or WebP images.",
            upload.content_type
        )));
    }
    if upload.bytes.len() > DEEPFAKE_UPLOAD_LIMIT {
        return Err(ApiError::PayloadTooLarge(
            "File too large. Maximum size is 10MB.".to_string(),
        ));
    }

    let outcome = state.detector.analyze_image(&upload.bytes).await;
    if let Some(reason) = outcome.degradation() {
        debug!(reason, filename = %upload.filename, "deepfake analysis degraded");
    }
    Ok(Json(outcome.into_value()))
}
