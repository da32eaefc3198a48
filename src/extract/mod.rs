//! Text extraction from uploaded images and documents.
//!
//! Extracts text using:
//! - Tesseract OCR via the system binary (default)
//! - OCRS for pure-Rust OCR (feature: ocr-ocrs)
//! - Hosted OCR-capable models through the inference client
//! - pdftotext (Poppler) for PDF text, with page OCR for scans
//! - A zip-based extractor for Word (OOXML) documents
//!
//! Image OCR runs an ordered chain of strategies: each is attempted
//! only if the previous produced no usable (non-empty, trimmed) text,
//! and per-step errors are logged rather than aborting the chain.

mod docx;
mod pdf;
mod remote;
mod tesseract;

#[cfg(feature = "ocr-ocrs")]
mod ocrs_backend;

pub use remote::RemoteOcrStrategy;
pub use tesseract::TesseractStrategy;

#[cfg(feature = "ocr-ocrs")]
pub use ocrs_backend::OcrsStrategy;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::{Outcome, OCR_FALLBACK_TEXT};
use crate::inference::{InferenceClient, InferenceError};
use crate::utils::mime::file_extension;

/// Image extensions routed through the OCR chain.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    Failed(String),

    #[error("Backend not available: {0}")]
    Unavailable(String),

    #[error("Remote OCR error: {0}")]
    Remote(#[from] InferenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One named OCR strategy in the extraction chain.
#[async_trait]
pub trait OcrStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Cheap availability check; unavailable strategies are skipped.
    fn is_available(&self) -> bool;

    /// Extract text from raw image bytes.
    async fn extract(&self, image: &[u8]) -> Result<String, ExtractError>;
}

/// Handle command output, extracting stdout on success or returning
/// the appropriate error.
pub(crate) fn handle_cmd_output(
    result: std::io::Result<std::process::Output>,
    tool_name: &str,
    error_prefix: &str,
) -> Result<String, ExtractError> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractError::Failed(format!("{}: {}", error_prefix, stderr)))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractError::Io(e)),
    }
}

/// Check command status, returning the appropriate error on failure.
pub(crate) fn check_cmd_status(
    result: std::io::Result<std::process::ExitStatus>,
    tool_name: &str,
    error_msg: &str,
) -> Result<(), ExtractError> {
    match result {
        Ok(s) if s.success() => Ok(()),
        Ok(_) => Err(ExtractError::Failed(error_msg.to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractError::Io(e)),
    }
}

/// Check if a binary is available in PATH.
pub(crate) fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Text extractor dispatching uploads to the right strategy.
pub struct TextExtractor {
    strategies: Vec<Box<dyn OcrStrategy>>,
}

impl TextExtractor {
    /// Build the default strategy chain.
    pub fn new(client: Arc<InferenceClient>) -> Self {
        let mut strategies: Vec<Box<dyn OcrStrategy>> = vec![Box::new(TesseractStrategy::new())];

        #[cfg(feature = "ocr-ocrs")]
        strategies.push(Box::new(OcrsStrategy::new()));

        strategies.push(Box::new(RemoteOcrStrategy::new(client)));

        Self { strategies }
    }

    /// Build an extractor with an explicit strategy list.
    pub fn with_strategies(strategies: Vec<Box<dyn OcrStrategy>>) -> Self {
        Self { strategies }
    }

    /// Extract text from an uploaded image.
    ///
    /// When every strategy fails the instructional fallback text is
    /// returned on the degraded path.
    pub async fn extract_image(&self, bytes: &[u8]) -> Outcome<String> {
        match self.run_chain(bytes).await {
            Some(text) => Outcome::Full(text),
            None => Outcome::degraded(
                OCR_FALLBACK_TEXT.to_string(),
                "no OCR strategy produced text",
            ),
        }
    }

    /// Extract text from an uploaded document, dispatching by file
    /// extension. Unrecognized extensions yield empty text; extraction
    /// failures degrade to empty text rather than erroring.
    pub async fn extract_document(&self, bytes: &[u8], filename: &str) -> Outcome<String> {
        let extension = file_extension(filename);
        match extension.as_deref() {
            Some("pdf") => match pdf::extract_pdf(bytes) {
                Ok(text) => Outcome::Full(text),
                Err(err) => {
                    warn!(filename, %err, "PDF extraction failed");
                    Outcome::degraded(String::new(), format!("PDF extraction failed: {}", err))
                }
            },
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => match self.run_chain(bytes).await {
                Some(text) => Outcome::Full(text),
                None => Outcome::degraded(String::new(), "no OCR strategy produced text"),
            },
            Some("doc") | Some("docx") => match docx::extract_docx(bytes) {
                Ok(text) => Outcome::Full(text),
                Err(err) => {
                    warn!(filename, %err, "Word document extraction failed");
                    Outcome::degraded(String::new(), format!("Word extraction failed: {}", err))
                }
            },
            _ => {
                debug!(filename, "unrecognized file extension, no text extracted");
                Outcome::Full(String::new())
            }
        }
    }

    /// Run the OCR chain, returning the first usable text.
    async fn run_chain(&self, bytes: &[u8]) -> Option<String> {
        for strategy in &self.strategies {
            if !strategy.is_available() {
                debug!(strategy = strategy.name(), "OCR strategy unavailable, skipping");
                continue;
            }
            match strategy.extract(bytes).await {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(strategy = strategy.name(), "OCR strategy produced text");
                    return Some(text.trim().to_string());
                }
                Ok(_) => {
                    debug!(strategy = strategy.name(), "OCR strategy produced no text");
                }
                Err(err) => {
                    warn!(strategy = strategy.name(), %err, "OCR strategy failed");
                }
            }
        }
        None
    }

    /// Check which external extraction tools are available.
    pub fn check_tools() -> Vec<(String, bool)> {
        ["tesseract", "pdftotext", "pdftoppm"]
            .iter()
            .map(|tool| (tool.to_string(), check_binary(tool)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubStrategy {
        name: &'static str,
        available: bool,
        result: Result<&'static str, &'static str>,
    }

    #[async_trait]
    impl OcrStrategy for StubStrategy {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn extract(&self, _image: &[u8]) -> Result<String, ExtractError> {
            match self.result {
                Ok(text) => Ok(text.to_string()),
                Err(msg) => Err(ExtractError::Failed(msg.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_chain_returns_first_usable_text() {
        let extractor = TextExtractor::with_strategies(vec![
            Box::new(StubStrategy {
                name: "unavailable",
                available: false,
                result: Ok("never read"),
            }),
            Box::new(StubStrategy {
                name: "failing",
                available: true,
                result: Err("engine crashed"),
            }),
            Box::new(StubStrategy {
                name: "empty",
                available: true,
                result: Ok("   "),
            }),
            Box::new(StubStrategy {
                name: "working",
                available: true,
                result: Ok("  extracted text  "),
            }),
        ]);

        let outcome = extractor.extract_image(b"image").await;
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.value(), "extracted text");
    }

    #[tokio::test]
    async fn test_chain_falls_back_to_instructions() {
        let extractor = TextExtractor::with_strategies(vec![Box::new(StubStrategy {
            name: "failing",
            available: true,
            result: Err("engine crashed"),
        })]);

        let outcome = extractor.extract_image(b"image").await;
        assert!(outcome.is_degraded());
        assert_eq!(outcome.value(), OCR_FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn test_unrecognized_extension_yields_empty() {
        let extractor = TextExtractor::with_strategies(vec![]);
        let outcome = extractor.extract_document(b"data", "notes.xyz").await;
        assert!(!outcome.is_degraded());
        assert!(outcome.value().is_empty());
    }

    #[tokio::test]
    async fn test_image_extension_uses_chain() {
        let extractor = TextExtractor::with_strategies(vec![Box::new(StubStrategy {
            name: "working",
            available: true,
            result: Ok("from the screenshot"),
        })]);
        let outcome = extractor.extract_document(b"data", "screenshot.PNG").await;
        assert_eq!(outcome.value(), "from the screenshot");
    }

    #[test]
    fn test_check_tools_lists_all() {
        let tools = TextExtractor::check_tools();
        assert_eq!(tools.len(), 3);
        assert!(tools.iter().any(|(name, _)| name == "tesseract"));
    }
}
