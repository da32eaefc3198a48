//! Content-type allow-lists and helpers for uploads.

/// Content types accepted by the image endpoints (OCR, deepfake).
pub const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Content types accepted by the document analysis endpoint.
pub const DOCUMENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "application/pdf"];

/// Whether a declared content type is in the allow-list. Parameters
/// (e.g. `; charset=...`) are ignored.
pub fn is_allowed(content_type: &str, allowed: &[&str]) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    allowed.contains(&essence.as_str())
}

/// Lowercased file extension, when the filename has one.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Sniff the MIME type from file content.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    infer::get(bytes).map(|t| t.mime_type())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_allowed() {
        assert!(is_allowed("image/png", IMAGE_TYPES));
        assert!(is_allowed("IMAGE/PNG", IMAGE_TYPES));
        assert!(is_allowed("image/jpeg; charset=binary", IMAGE_TYPES));
        assert!(!is_allowed("image/webp", DOCUMENT_TYPES));
        assert!(!is_allowed("text/plain", DOCUMENT_TYPES));
        assert!(is_allowed("application/pdf", DOCUMENT_TYPES));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("scan.PDF"), Some("pdf".to_string()));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn test_sniff_mime() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(sniff_mime(&png), Some("image/png"));
        assert_eq!(sniff_mime(b"not an image"), None);
    }
}
