//! Configuration management for AdShield.
//!
//! Settings are assembled once at startup from built-in defaults plus
//! environment overrides (a `.env` file is loaded by `main` before
//! anything else reads the environment).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::Lexicon;

/// One megabyte, the unit all size limits are expressed in.
pub const MB: usize = 1024 * 1024;

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Bearer token for the hosted inference API. Without it the
    /// service runs on local heuristics and mock fallbacks only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hf_api_token: Option<String>,
    /// Base URL of the hosted inference API (model id is appended).
    #[serde(default = "default_inference_url")]
    pub inference_url: String,
    /// Model used for phishing classification.
    #[serde(default = "default_phishing_model")]
    pub phishing_model: String,
    /// Model used for spam classification.
    #[serde(default = "default_spam_model")]
    pub spam_model: String,
    /// Model used for deepfake image classification.
    #[serde(default = "default_deepfake_model")]
    pub deepfake_model: String,
    /// Candidate models for remote OCR, tried in order.
    #[serde(default = "default_ocr_models")]
    pub ocr_models: Vec<String>,
    /// Maximum accepted text payload, in megabytes.
    #[serde(default = "default_max_text_size_mb")]
    pub max_text_size_mb: usize,
    /// Maximum accepted document upload, in megabytes.
    #[serde(default = "default_max_document_size_mb")]
    pub max_document_size_mb: usize,
    /// Frontend origin allowed by CORS (dev origins are always added).
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// Default bind host for `serve`.
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// Default bind port for `serve`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Optional TOML file overriding the built-in keyword lexicon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

fn default_inference_url() -> String {
    "https://api-inference.huggingface.co/models/".to_string()
}

fn default_phishing_model() -> String {
    "ealvaradob/bert-finetuned-phishing".to_string()
}

fn default_spam_model() -> String {
    "mrm8488/bert-tiny-finetuned-sms-spam-detection".to_string()
}

fn default_deepfake_model() -> String {
    "prithivMLmods/deepfake-detector-model-v1".to_string()
}

fn default_ocr_models() -> Vec<String> {
    vec![
        "Salesforce/blip-image-captioning-base".to_string(),
        "nlpconnect/vit-gpt2-image-captioning".to_string(),
        "microsoft/trocr-base-printed".to_string(),
    ]
}

fn default_max_text_size_mb() -> usize {
    1
}

fn default_max_document_size_mb() -> usize {
    10
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_api_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    8000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hf_api_token: None,
            inference_url: default_inference_url(),
            phishing_model: default_phishing_model(),
            spam_model: default_spam_model(),
            deepfake_model: default_deepfake_model(),
            ocr_models: default_ocr_models(),
            max_text_size_mb: default_max_text_size_mb(),
            max_document_size_mb: default_max_document_size_mb(),
            frontend_url: default_frontend_url(),
            api_host: default_api_host(),
            api_port: default_api_port(),
            lexicon_path: None,
        }
    }
}

impl Settings {
    /// Build settings from defaults plus environment overrides.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `HF_API_TOKEN`: hosted inference API bearer token
    /// - `HF_INFERENCE_URL`: inference API base URL
    /// - `PHISHING_MODEL`, `SPAM_MODEL`, `DEEPFAKE_MODEL`: model ids
    /// - `OCR_MODELS`: comma-separated OCR candidate model ids
    /// - `MAX_TEXT_SIZE_MB`, `MAX_DOCUMENT_SIZE_MB`: size limits
    /// - `FRONTEND_URL`: allowed CORS origin
    /// - `API_HOST`, `API_PORT`: default bind address
    /// - `LEXICON_PATH`: keyword lexicon TOML file
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("HF_API_TOKEN") {
            if !val.is_empty() {
                self.hf_api_token = Some(val);
            }
        }
        if let Ok(val) = std::env::var("HF_INFERENCE_URL") {
            self.inference_url = val;
        }
        if let Ok(val) = std::env::var("PHISHING_MODEL") {
            self.phishing_model = val;
        }
        if let Ok(val) = std::env::var("SPAM_MODEL") {
            self.spam_model = val;
        }
        if let Ok(val) = std::env::var("DEEPFAKE_MODEL") {
            self.deepfake_model = val;
        }
        if let Ok(val) = std::env::var("OCR_MODELS") {
            let models: Vec<String> = val
                .split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect();
            if !models.is_empty() {
                self.ocr_models = models;
            }
        }
        if let Ok(val) = std::env::var("MAX_TEXT_SIZE_MB") {
            if let Ok(n) = val.parse() {
                self.max_text_size_mb = n;
            }
        }
        if let Ok(val) = std::env::var("MAX_DOCUMENT_SIZE_MB") {
            if let Ok(n) = val.parse() {
                self.max_document_size_mb = n;
            }
        }
        if let Ok(val) = std::env::var("FRONTEND_URL") {
            self.frontend_url = val;
        }
        if let Ok(val) = std::env::var("API_HOST") {
            self.api_host = val;
        }
        if let Ok(val) = std::env::var("API_PORT") {
            if let Ok(p) = val.parse() {
                self.api_port = p;
            }
        }
        if let Ok(val) = std::env::var("LEXICON_PATH") {
            self.lexicon_path = Some(PathBuf::from(val));
        }
        self
    }

    /// Maximum text payload in bytes.
    pub fn max_text_bytes(&self) -> usize {
        self.max_text_size_mb * MB
    }

    /// Maximum document upload in bytes.
    pub fn max_document_bytes(&self) -> usize {
        self.max_document_size_mb * MB
    }

    /// Load the keyword lexicon, from the configured TOML file when set.
    pub fn load_lexicon(&self) -> anyhow::Result<Lexicon> {
        match &self.lexicon_path {
            Some(path) => Lexicon::from_path(path),
            None => Ok(Lexicon::builtin()),
        }
    }

    /// Origins allowed by CORS: the configured frontend URL, the local
    /// dev-server origins, and the www/non-www twin of an https
    /// frontend domain.
    pub fn cors_origins(&self) -> Vec<String> {
        let mut origins = vec![
            self.frontend_url.clone(),
            "http://localhost:5173".to_string(),
            "http://localhost:5174".to_string(),
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:5173".to_string(),
            "http://127.0.0.1:5174".to_string(),
        ];

        if self.frontend_url.starts_with("https://") {
            let twin = if self.frontend_url.contains("www.") {
                self.frontend_url.replace("https://www.", "https://")
            } else {
                self.frontend_url.replace("https://", "https://www.")
            };
            origins.push(twin);
        }

        origins.sort();
        origins.dedup();
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.hf_api_token.is_none());
        assert_eq!(settings.max_text_size_mb, 1);
        assert_eq!(settings.max_document_size_mb, 10);
        assert_eq!(settings.ocr_models.len(), 3);
        assert!(settings.inference_url.ends_with('/'));
    }

    #[test]
    fn test_cors_includes_dev_origins() {
        let settings = Settings::default();
        let origins = settings.cors_origins();
        assert!(origins.iter().any(|o| o == "http://localhost:3000"));
        assert!(origins.iter().any(|o| o == "http://localhost:5173"));
    }

    #[test]
    fn test_cors_adds_www_twin() {
        let settings = Settings {
            frontend_url: "https://adshield.example".to_string(),
            ..Settings::default()
        };
        let origins = settings.cors_origins();
        assert!(origins.iter().any(|o| o == "https://www.adshield.example"));

        let settings = Settings {
            frontend_url: "https://www.adshield.example".to_string(),
            ..Settings::default()
        };
        let origins = settings.cors_origins();
        assert!(origins.iter().any(|o| o == "https://adshield.example"));
    }
}
