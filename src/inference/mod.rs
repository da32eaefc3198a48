//! Client for the hosted-model inference API.
//!
//! Each call is a single HTTP POST with a bearer-token header and a
//! fixed 30 second timeout: no retry, no backoff. Failures are
//! reported as distinct error kinds so callers can log and degrade
//! deliberately; no call outcome is ever retried here. The one
//! exception to single-shot is OCR, where a short fixed list of
//! candidate models is tried in sequence because hosted OCR models
//! are frequently still loading (HTTP 503).

mod config;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

pub use config::{InferenceConfig, REQUEST_TIMEOUT};

/// Errors from the inference API, by cause.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No API token configured; remote calls are disabled.
    #[error("inference API token not configured")]
    Disabled,

    /// The API answered with a non-success status.
    #[error("inference API returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request hit the fixed timeout.
    #[error("inference API request timed out")]
    Timeout,

    /// Connection-level failure (DNS, TLS, refused, ...).
    #[error("inference API connection error: {0}")]
    Connection(String),

    /// The response body was not valid JSON.
    #[error("inference API response decode error: {0}")]
    Decode(String),

    /// Every OCR candidate model failed.
    #[error("all OCR candidate models failed")]
    OcrExhausted,
}

/// One classifier prediction as returned by hosted models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: Option<f64>,
}

/// Parse a model response into predictions, permissively.
///
/// Hosted classifiers answer with an array of `{label, score}`
/// objects; anything that does not fit that shape is skipped rather
/// than treated as an error.
pub fn parse_predictions(value: &Value) -> Vec<Prediction> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let object = item.as_object()?;
                let label = object.get("label")?.as_str()?.to_string();
                let score = object.get("score").and_then(Value::as_f64);
                Some(Prediction { label, score })
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Hosted-model inference client.
pub struct InferenceClient {
    config: InferenceConfig,
    client: Client,
}

impl InferenceClient {
    /// Create a new client with the given configuration.
    pub fn new(config: InferenceConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Whether remote calls are enabled (a token is configured).
    pub fn is_enabled(&self) -> bool {
        self.config.api_token.is_some()
    }

    /// Run a text-classification model: POST `{"inputs": text}`.
    pub async fn classify_text(&self, model: &str, text: &str) -> Result<Value, InferenceError> {
        self.query_json(model, &json!({ "inputs": text })).await
    }

    /// Run an image model with the raw bytes as the request body.
    pub async fn classify_image(&self, model: &str, bytes: &[u8]) -> Result<Value, InferenceError> {
        self.query_bytes(model, bytes).await
    }

    /// OCR an image via the candidate model list.
    ///
    /// A 503 (model loading) advances to the next candidate; the first
    /// success short-circuits; exhausting the list is an error.
    pub async fn ocr_image(&self, bytes: &[u8]) -> Result<Value, InferenceError> {
        if !self.is_enabled() {
            return Err(InferenceError::Disabled);
        }

        for model in &self.config.ocr_models {
            match self.query_bytes(model, bytes).await {
                Ok(value) => {
                    debug!(%model, "remote OCR succeeded");
                    return Ok(value);
                }
                Err(InferenceError::Http { status: 503, .. }) => {
                    debug!(%model, "model is loading, trying next candidate");
                }
                Err(err) => {
                    debug!(%model, %err, "remote OCR candidate failed");
                }
            }
        }

        Err(InferenceError::OcrExhausted)
    }

    async fn query_json(&self, model: &str, payload: &Value) -> Result<Value, InferenceError> {
        let token = self
            .config
            .api_token
            .as_deref()
            .ok_or(InferenceError::Disabled)?;

        let response = self
            .client
            .post(self.config.model_url(model))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .map_err(map_send_error)?;

        Self::read_json(response).await
    }

    async fn query_bytes(&self, model: &str, bytes: &[u8]) -> Result<Value, InferenceError> {
        let token = self
            .config
            .api_token
            .as_deref()
            .ok_or(InferenceError::Disabled)?;

        let response = self
            .client
            .post(self.config.model_url(model))
            .bearer_auth(token)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(map_send_error)?;

        Self::read_json(response).await
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, InferenceError> {
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| InferenceError::Decode(e.to_string()))
    }
}

fn map_send_error(err: reqwest::Error) -> InferenceError {
    if err.is_timeout() {
        InferenceError::Timeout
    } else {
        InferenceError::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disabled_client() -> InferenceClient {
        InferenceClient::new(InferenceConfig {
            api_token: None,
            base_url: "https://api.example/models/".to_string(),
            ocr_models: vec!["org/ocr-a".to_string()],
            timeout: REQUEST_TIMEOUT,
        })
    }

    #[tokio::test]
    async fn test_disabled_client_fails_fast() {
        let client = disabled_client();
        assert!(!client.is_enabled());

        let err = client.classify_text("org/model", "hi").await.unwrap_err();
        assert!(matches!(err, InferenceError::Disabled));

        let err = client.ocr_image(b"bytes").await.unwrap_err();
        assert!(matches!(err, InferenceError::Disabled));
    }

    #[test]
    fn test_parse_predictions_shapes() {
        let value = json!([
            {"label": "phishing", "score": 0.97},
            {"label": "benign"},
            "not an object",
            {"score": 0.5}
        ]);
        let preds = parse_predictions(&value);
        assert_eq!(preds.len(), 2);
        assert_eq!(preds[0].label, "phishing");
        assert_eq!(preds[0].score, Some(0.97));
        assert_eq!(preds[1].label, "benign");
        assert_eq!(preds[1].score, None);

        assert!(parse_predictions(&json!({"error": "loading"})).is_empty());
        assert!(parse_predictions(&json!(null)).is_empty());
    }
}
