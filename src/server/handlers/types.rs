//! Request parameter types.

use serde::Deserialize;

/// Body of `POST /api/v1/text/analyze`.
#[derive(Debug, Deserialize)]
pub struct TextAnalysisRequest {
    pub text: String,
}

/// Query parameters for `GET /api/v1/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}
