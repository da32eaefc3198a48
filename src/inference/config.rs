//! Inference client configuration.

use std::time::Duration;

use crate::config::Settings;

/// Fixed timeout for every outbound inference call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the hosted-model inference client.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    /// Bearer token; `None` disables all remote calls.
    pub api_token: Option<String>,
    /// Base URL the model id is appended to.
    pub base_url: String,
    /// Candidate models for OCR, tried in order.
    pub ocr_models: Vec<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl InferenceConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            api_token: settings.hf_api_token.clone(),
            base_url: settings.inference_url.clone(),
            ocr_models: settings.ocr_models.clone(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Full URL for a model endpoint.
    pub fn model_url(&self, model: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, model)
        } else {
            format!("{}/{}", self.base_url, model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_url_joins_cleanly() {
        let config = InferenceConfig {
            api_token: None,
            base_url: "https://api.example/models/".to_string(),
            ocr_models: Vec::new(),
            timeout: REQUEST_TIMEOUT,
        };
        assert_eq!(
            config.model_url("org/model-a"),
            "https://api.example/models/org/model-a"
        );

        let config = InferenceConfig {
            base_url: "https://api.example/models".to_string(),
            ..config
        };
        assert_eq!(
            config.model_url("org/model-a"),
            "https://api.example/models/org/model-a"
        );
    }
}
