//! Tesseract OCR strategy.
//!
//! Uses the Tesseract binary for text extraction. This is the
//! traditional, widely-available OCR option and the first link in the
//! extraction chain.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use async_trait::async_trait;
use tempfile::NamedTempFile;

use super::{check_binary, handle_cmd_output, ExtractError, OcrStrategy};

/// Tesseract OCR via the system binary.
pub struct TesseractStrategy {
    language: String,
}

impl TesseractStrategy {
    pub fn new() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }

    /// Set the Tesseract language.
    #[allow(dead_code)]
    pub fn with_language(mut self, lang: &str) -> Self {
        self.language = lang.to_string();
        self
    }
}

impl Default for TesseractStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrStrategy for TesseractStrategy {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        check_binary("tesseract")
    }

    async fn extract(&self, image: &[u8]) -> Result<String, ExtractError> {
        let mut file = NamedTempFile::new()?;
        file.write_all(image)?;
        run_tesseract(file.path(), &self.language)
    }
}

/// Run Tesseract OCR on an image file.
pub(crate) fn run_tesseract(image_path: &Path, language: &str) -> Result<String, ExtractError> {
    let output = Command::new("tesseract")
        .arg(image_path)
        .arg("stdout")
        .args(["-l", language])
        .output();

    handle_cmd_output(output, "tesseract (install tesseract-ocr)", "tesseract failed")
}
