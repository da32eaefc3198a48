//! Deepfake image detection.
//!
//! Thin wrapper around a hosted deepfake classifier, fused with local
//! signals (container format sniffing, payload size) into a risk
//! report. When the model is unreachable the detector degrades to a
//! deterministic heuristic-only report instead of failing.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::analysis::Outcome;
use crate::inference::{parse_predictions, InferenceClient, Prediction};
use crate::utils::mime::sniff_mime;

/// Risk report for one analyzed image.
#[derive(Debug, Clone, Serialize)]
pub struct DeepfakeReport {
    pub is_deepfake: bool,
    pub confidence: f64,
    pub label: String,
    pub risk_score: f64,
    pub risk_level: String,
    pub explanations: Vec<String>,
    pub recommendations: Vec<String>,
    pub details: Map<String, Value>,
    pub model_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Labels hosted classifiers use for generated imagery.
const FAKE_MARKERS: &[&str] = &["fake", "synthetic", "generated", "artificial"];

/// Labels hosted classifiers use for genuine imagery.
const REAL_MARKERS: &[&str] = &["real", "authentic", "human"];

fn risk_level(score: f64) -> &'static str {
    if score >= 0.7 {
        "high"
    } else if score >= 0.4 {
        "medium"
    } else {
        "low"
    }
}

fn recommendations_for(level: &str) -> Vec<String> {
    let lines: &[&str] = match level {
        "high" => &[
            "Do not trust this image for identity or payment verification",
            "Request the original media through a trusted channel",
            "Report the content to the platform it appeared on",
        ],
        "medium" => &[
            "Verify the image with the person or organization it claims to show",
            "Look for corroborating sources before sharing",
        ],
        _ => &["No action needed; remain cautious with unsolicited media"],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

/// Deepfake detector collaborator.
pub struct DeepfakeDetector {
    client: Arc<InferenceClient>,
    model: String,
}

impl DeepfakeDetector {
    pub fn new(client: Arc<InferenceClient>, model: String) -> Self {
        Self { client, model }
    }

    /// Analyze image bytes for deepfake indicators.
    pub async fn analyze_image(&self, bytes: &[u8]) -> Outcome<DeepfakeReport> {
        let format = sniff_mime(bytes);

        match self.client.classify_image(&self.model, bytes).await {
            Ok(value) => {
                let predictions = parse_predictions(&value);
                if predictions.is_empty() {
                    debug!(model = %self.model, "deepfake model returned no predictions");
                    return Outcome::degraded(
                        self.fallback_report(format, bytes.len(), "model returned no predictions"),
                        "model returned no predictions",
                    );
                }
                Outcome::Full(self.fuse(&predictions, format, bytes.len()))
            }
            Err(err) => {
                debug!(model = %self.model, %err, "deepfake classification failed");
                Outcome::degraded(
                    self.fallback_report(format, bytes.len(), &err.to_string()),
                    err.to_string(),
                )
            }
        }
    }

    /// Fuse classifier predictions with local signals.
    fn fuse(
        &self,
        predictions: &[Prediction],
        format: Option<&'static str>,
        size: usize,
    ) -> DeepfakeReport {
        let class_score = |markers: &[&str]| -> f64 {
            predictions
                .iter()
                .filter(|p| {
                    let label = p.label.to_lowercase();
                    markers.iter().any(|m| label.contains(m))
                })
                .filter_map(|p| p.score)
                .fold(0.0_f64, f64::max)
        };

        let fake_score = class_score(FAKE_MARKERS);
        let real_score = class_score(REAL_MARKERS);

        let is_deepfake = fake_score > real_score;
        let confidence = fake_score.max(real_score).max(0.5);
        let risk_score = fake_score.clamp(0.0, 1.0);
        let level = risk_level(risk_score);

        let mut explanations = vec![format!(
            "Classifier rated synthetic-generation likelihood at {:.0}%",
            fake_score * 100.0
        )];
        if real_score > 0.0 {
            explanations.push(format!(
                "Classifier rated authenticity at {:.0}%",
                real_score * 100.0
            ));
        }
        if format.is_none() {
            explanations
                .push("Payload does not match a known image container format".to_string());
        }

        DeepfakeReport {
            is_deepfake,
            confidence,
            label: if is_deepfake { "deepfake" } else { "real" }.to_string(),
            risk_score,
            risk_level: level.to_string(),
            explanations,
            recommendations: recommendations_for(level),
            details: self.details(format, size, Some(predictions)),
            model_version: self.model.clone(),
            error: None,
        }
    }

    /// Deterministic report for when the model is unreachable.
    fn fallback_report(
        &self,
        format: Option<&'static str>,
        size: usize,
        reason: &str,
    ) -> DeepfakeReport {
        // Without the model only container-level signals remain; an
        // unrecognized container is itself mildly suspicious.
        let risk_score = if format.is_some() { 0.3 } else { 0.5 };
        let level = risk_level(risk_score);

        let mut explanations =
            vec!["Deepfake model unavailable - container-level signals only".to_string()];
        match format {
            Some(mime) => explanations.push(format!("Image container recognized as {}", mime)),
            None => explanations
                .push("Payload does not match a known image container format".to_string()),
        }

        DeepfakeReport {
            is_deepfake: false,
            confidence: 0.5,
            label: "unverified".to_string(),
            risk_score,
            risk_level: level.to_string(),
            explanations,
            recommendations: recommendations_for(level),
            details: self.details(format, size, None),
            model_version: self.model.clone(),
            error: Some(reason.to_string()),
        }
    }

    fn details(
        &self,
        format: Option<&'static str>,
        size: usize,
        predictions: Option<&[Prediction]>,
    ) -> Map<String, Value> {
        let mut details = Map::new();
        details.insert("model".to_string(), json!(self.model));
        details.insert("format".to_string(), json!(format));
        details.insert("size_bytes".to_string(), json!(size));
        details.insert(
            "analyzed_at".to_string(),
            json!(chrono::Utc::now().to_rfc3339()),
        );
        if let Some(predictions) = predictions {
            details.insert("predictions".to_string(), json!(predictions));
        }
        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{InferenceConfig, REQUEST_TIMEOUT};

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    fn detector() -> DeepfakeDetector {
        let client = Arc::new(InferenceClient::new(InferenceConfig {
            api_token: None,
            base_url: "https://api.example/models/".to_string(),
            ocr_models: Vec::new(),
            timeout: REQUEST_TIMEOUT,
        }));
        DeepfakeDetector::new(client, "org/deepfake-detector".to_string())
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(risk_level(0.9), "high");
        assert_eq!(risk_level(0.7), "high");
        assert_eq!(risk_level(0.5), "medium");
        assert_eq!(risk_level(0.1), "low");
    }

    #[tokio::test]
    async fn test_degrades_without_model() {
        let outcome = detector().analyze_image(PNG_MAGIC).await;
        assert!(outcome.is_degraded());
        let report = outcome.value();
        assert!(!report.is_deepfake);
        assert_eq!(report.label, "unverified");
        assert_eq!(report.risk_level, "low");
        assert!(report.error.is_some());
        assert_eq!(report.details["format"], json!("image/png"));
    }

    #[tokio::test]
    async fn test_unknown_container_raises_fallback_risk() {
        let outcome = detector().analyze_image(b"definitely not an image").await;
        let report = outcome.value();
        assert_eq!(report.risk_level, "medium");
        assert!(report
            .explanations
            .iter()
            .any(|e| e.contains("known image container")));
    }

    #[test]
    fn test_fuse_prefers_fake_class() {
        let report = detector().fuse(
            &[
                Prediction {
                    label: "Deepfake".to_string(),
                    score: Some(0.83),
                },
                Prediction {
                    label: "Realism".to_string(),
                    score: Some(0.17),
                },
            ],
            Some("image/jpeg"),
            1024,
        );
        assert!(report.is_deepfake);
        assert_eq!(report.label, "deepfake");
        assert_eq!(report.risk_level, "high");
        assert_eq!(report.confidence, 0.83);
        assert!(report.error.is_none());
    }

    #[test]
    fn test_fuse_real_image() {
        let report = detector().fuse(
            &[
                Prediction {
                    label: "fake".to_string(),
                    score: Some(0.04),
                },
                Prediction {
                    label: "real".to_string(),
                    score: Some(0.96),
                },
            ],
            Some("image/png"),
            2048,
        );
        assert!(!report.is_deepfake);
        assert_eq!(report.label, "real");
        assert_eq!(report.risk_level, "low");
    }
}
