//! Word (OOXML) document text extraction.
//!
//! A .docx file is a zip archive; the document body lives in
//! `word/document.xml`. Paragraph closes become newlines and all other
//! markup is stripped.

use std::io::{Cursor, Read};

use super::ExtractError;

/// Extract text from Word document bytes.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Failed(format!("not a Word archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Failed(format!("missing document body: {}", e)))?
        .read_to_string(&mut xml)?;

    Ok(document_xml_text(&xml))
}

/// Strip OOXML markup, turning paragraph ends into newlines.
fn document_xml_text(xml: &str) -> String {
    let mut out = String::new();
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        out.push_str(&decode_entities(&rest[..open]));
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        let tag = &rest[open + 1..open + close];
        if tag == "/w:p" {
            out.push('\n');
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(&decode_entities(rest));

    out.trim().to_string()
}

fn decode_entities(text: &str) -> String {
    // &amp; last, so "&amp;lt;" decodes to the literal "&lt;"
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn docx_with_body(body_xml: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(Cursor::new(&mut buf));
            writer
                .start_file("word/document.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf
    }

    #[test]
    fn test_extracts_paragraphs() {
        let bytes = docx_with_body(
            "<w:document><w:body>\
             <w:p><w:r><w:t>Invoice &amp; receipt</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Total $5</w:t></w:r></w:p>\
             </w:body></w:document>",
        );
        let text = extract_docx(&bytes).unwrap();
        assert!(text.contains("Invoice & receipt"));
        assert!(text.contains("Total $5"));
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_not_an_archive() {
        let err = extract_docx(b"plain bytes").unwrap_err();
        assert!(matches!(err, ExtractError::Failed(_)));
    }

    #[test]
    fn test_archive_without_document_body() {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(Cursor::new(&mut buf));
            writer
                .start_file("other.txt", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"hello").unwrap();
            writer.finish().unwrap();
        }
        let err = extract_docx(&buf).unwrap_err();
        assert!(matches!(err, ExtractError::Failed(_)));
    }

    #[test]
    fn test_entity_decoding_order() {
        assert_eq!(decode_entities("a &amp;lt; b"), "a &lt; b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
    }
}
