//! HTTP request handlers for the analysis API.

#![allow(dead_code)]

mod deepfake;
mod document;
mod health;
mod history;
mod text;
mod types;

// Re-export handlers for use by the router
pub use deepfake::analyze_deepfake;
pub use document::analyze_document;
pub use health::{health, root};
pub use history::{get_history, save_history};
pub use text::{analyze_text, extract_text};

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error taxonomy for the HTTP surface.
///
/// Client input errors are strict (400/413); upstream failures never
/// reach here because the analysis layer degrades to fallback data;
/// anything else is an internal error reported with its message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::PayloadTooLarge(message) => (StatusCode::PAYLOAD_TOO_LARGE, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(format!("Invalid multipart request: {}", err))
    }
}

/// A parsed multipart upload.
pub(crate) struct Upload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
    /// Optional free-form question accompanying document uploads.
    pub question: Option<String>,
}

/// Read the `file` part (and optional `question` part) of a multipart
/// request.
pub(crate) async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let mut upload: Option<Upload> = None;
    let mut question: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?;
                upload = Some(Upload {
                    filename,
                    content_type,
                    bytes,
                    question: None,
                });
            }
            Some("question") => {
                question = field.text().await.ok().filter(|q| !q.trim().is_empty());
            }
            _ => {}
        }
    }

    let mut upload =
        upload.ok_or_else(|| ApiError::BadRequest("File field is required".to_string()))?;
    upload.question = question;
    Ok(upload)
}
