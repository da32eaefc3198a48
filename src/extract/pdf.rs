//! PDF text extraction using pdftotext and page OCR.
//!
//! pdftotext (Poppler) is the primary path; when it is unavailable or
//! the PDF has no text layer, pages are rasterized with pdftoppm and
//! run through Tesseract.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use tempfile::{NamedTempFile, TempDir};
use tracing::{debug, warn};

use super::tesseract::run_tesseract;
use super::{check_cmd_status, handle_cmd_output, ExtractError};

/// Extract text from PDF bytes.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut file = NamedTempFile::new()?;
    file.write_all(bytes)?;
    let path = file.path();

    match run_pdftotext(path) {
        Ok(text) if !text.trim().is_empty() => Ok(text),
        Ok(_) => {
            debug!("PDF has no text layer, falling back to page OCR");
            ocr_pdf(path)
        }
        Err(err) => {
            debug!(%err, "pdftotext failed, falling back to page OCR");
            ocr_pdf(path)
        }
    }
}

/// Run pdftotext on a PDF file.
fn run_pdftotext(file_path: &Path) -> Result<String, ExtractError> {
    let output = Command::new("pdftotext")
        .args(["-layout", "-enc", "UTF-8"])
        .arg(file_path)
        .arg("-") // Output to stdout
        .output();

    handle_cmd_output(output, "pdftotext (install poppler-utils)", "pdftotext failed")
}

/// OCR a PDF by converting pages to images and running Tesseract.
fn ocr_pdf(file_path: &Path) -> Result<String, ExtractError> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path();

    // Convert PDF to images using pdftoppm
    let status = Command::new("pdftoppm")
        .args(["-png", "-r", "300"]) // 300 DPI
        .arg(file_path)
        .arg(temp_path.join("page"))
        .status();

    check_cmd_status(
        status,
        "pdftoppm (install poppler-utils)",
        "pdftoppm failed to convert PDF",
    )?;

    // Find all generated images
    let mut images: Vec<_> = std::fs::read_dir(temp_path)?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == "png")
                .unwrap_or(false)
        })
        .map(|e| e.path())
        .collect();

    images.sort();

    if images.is_empty() {
        return Err(ExtractError::Failed(
            "No images generated from PDF".to_string(),
        ));
    }

    // OCR each image
    let mut all_text = String::new();
    for (i, image_path) in images.iter().enumerate() {
        match run_tesseract(image_path, "eng") {
            Ok(text) => {
                if !all_text.is_empty() {
                    all_text.push_str("\n\n--- Page ");
                    all_text.push_str(&(i + 1).to_string());
                    all_text.push_str(" ---\n\n");
                }
                all_text.push_str(&text);
            }
            Err(err) => {
                warn!(page = i + 1, %err, "OCR failed for page");
            }
        }
    }

    Ok(all_text)
}
