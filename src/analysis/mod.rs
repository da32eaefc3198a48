//! Content analysis: keyword heuristics, document field extraction,
//! and synthesis of remote classifier signals into risk verdicts.

mod document;
mod lexicon;
mod mock;
mod outcome;
mod text;

pub use document::{Bbox, DocumentLabel, DocumentVerdict, Finding};
pub use lexicon::Lexicon;
pub use mock::{document_result as mock_document_result, MOCK_MODEL_VERSION, OCR_FALLBACK_TEXT};
pub use outcome::Outcome;
pub use text::{Highlight, TextLabel, TextVerdict, ADVANCE_FEE_REASON, NO_INDICATORS_REASON};

use std::sync::Arc;

use tracing::debug;

use crate::config::Settings;
use crate::extract::TextExtractor;
use crate::inference::{parse_predictions, InferenceClient, InferenceError, Prediction};

/// Minimum extracted characters before a document is analyzed as text
/// instead of falling back to the mock result.
const MIN_EXTRACTED_CHARS: usize = 10;

/// Request-scoped analysis orchestrator.
///
/// Owns the immutable lexicon, the remote inference client, and the
/// text-extraction chain. Every method degrades to deterministic
/// results instead of failing when an upstream dependency is down.
pub struct Analyzer {
    lexicon: Lexicon,
    client: Arc<InferenceClient>,
    extractor: TextExtractor,
    phishing_model: String,
    spam_model: String,
}

impl Analyzer {
    pub fn new(
        settings: &Settings,
        lexicon: Lexicon,
        client: Arc<InferenceClient>,
        extractor: TextExtractor,
    ) -> Self {
        Self {
            lexicon,
            client,
            extractor,
            phishing_model: settings.phishing_model.clone(),
            spam_model: settings.spam_model.clone(),
        }
    }

    /// Analyze text for phishing/scam content.
    ///
    /// Remote classifier failures degrade to a heuristics-only verdict;
    /// the heuristic stages themselves always run.
    pub async fn analyze_text(&self, text: &str) -> Outcome<TextVerdict> {
        let phishing = self.classify(&self.phishing_model, text).await;
        let spam = self.classify(&self.spam_model, text).await;

        let verdict = text::analyze(
            text,
            &self.lexicon,
            phishing.as_ref().ok().map(|p| p.as_slice()),
            spam.as_ref().ok().map(|p| p.as_slice()),
        );

        match phishing.err().or(spam.err()) {
            Some(err) => Outcome::degraded(
                verdict,
                format!("remote classification unavailable: {}", err),
            ),
            None => Outcome::Full(verdict),
        }
    }

    /// Analyze an uploaded document for fraud indicators.
    ///
    /// Extracts text by file type, then layers document-specific checks
    /// over the text verdict. When extraction yields (next to) nothing
    /// the filename-keyed mock result is returned instead.
    pub async fn analyze_document(&self, bytes: &[u8], filename: &str) -> Outcome<DocumentVerdict> {
        let extracted = self.extractor.extract_document(bytes, filename).await;
        let extraction_degraded = extracted.degradation().map(str::to_string);
        let text = extracted.into_value();

        if text.trim().len() <= MIN_EXTRACTED_CHARS {
            debug!(filename, "no usable text extracted, using mock document result");
            return Outcome::degraded(
                mock::document_result(filename),
                "no text extracted from document",
            );
        }

        let text_outcome = self.analyze_text(&text).await;
        let analysis_degraded = text_outcome.degradation().map(str::to_string);
        let verdict = document::analyze(&text, text_outcome.value());

        match extraction_degraded.or(analysis_degraded) {
            Some(reason) => Outcome::degraded(verdict, reason),
            None => Outcome::Full(verdict),
        }
    }

    /// Run the OCR chain over an uploaded image.
    pub async fn extract_text(&self, bytes: &[u8]) -> Outcome<String> {
        self.extractor.extract_image(bytes).await
    }

    async fn classify(&self, model: &str, text: &str) -> Result<Vec<Prediction>, InferenceError> {
        match self.client.classify_text(model, text).await {
            Ok(value) => Ok(parse_predictions(&value)),
            Err(err) => {
                debug!(model, %err, "remote classification failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::InferenceConfig;

    fn analyzer() -> Analyzer {
        let settings = Settings::default();
        let client = Arc::new(InferenceClient::new(InferenceConfig::from_settings(
            &settings,
        )));
        let extractor = TextExtractor::new(client.clone());
        Analyzer::new(&settings, Lexicon::builtin(), client, extractor)
    }

    #[tokio::test]
    async fn test_text_analysis_degrades_without_token() {
        let outcome = analyzer().analyze_text("Meeting moved to 3pm tomorrow").await;
        assert!(outcome.is_degraded());
        let verdict = outcome.value();
        assert_eq!(verdict.label, TextLabel::Legit);
        assert!(verdict.score < 0.3);
        assert_eq!(verdict.reasons, vec![NO_INDICATORS_REASON.to_string()]);
    }

    #[tokio::test]
    async fn test_unrecognized_extension_uses_mock() {
        let outcome = analyzer()
            .analyze_document(b"not a real document", "invoice.xyz")
            .await;
        assert!(outcome.is_degraded());
        let verdict = outcome.value();
        assert_eq!(verdict.label, DocumentLabel::Suspicious);
        assert_eq!(verdict.score, 0.7);
        assert_eq!(verdict.model_version, MOCK_MODEL_VERSION);
    }
}
