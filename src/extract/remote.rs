//! Hosted-model OCR strategy.
//!
//! Last resort in the extraction chain: posts the raw image bytes to
//! OCR-capable hosted models through the inference client and reads
//! the caption-style response permissively.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{ExtractError, OcrStrategy};
use crate::inference::InferenceClient;

/// OCR through the hosted inference API.
pub struct RemoteOcrStrategy {
    client: Arc<InferenceClient>,
}

impl RemoteOcrStrategy {
    pub fn new(client: Arc<InferenceClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OcrStrategy for RemoteOcrStrategy {
    fn name(&self) -> &'static str {
        "hosted-inference"
    }

    fn is_available(&self) -> bool {
        self.client.is_enabled()
    }

    async fn extract(&self, image: &[u8]) -> Result<String, ExtractError> {
        let value = self.client.ocr_image(image).await?;
        Ok(collect_caption_text(&value))
    }
}

/// Pull text out of the various response shapes OCR models answer
/// with: a list of objects, or a single object, carrying either a
/// `generated_text` or a `text` key.
fn collect_caption_text(value: &Value) -> String {
    fn object_text(value: &Value) -> Option<&str> {
        let object = value.as_object()?;
        object
            .get("generated_text")
            .or_else(|| object.get("text"))
            .and_then(Value::as_str)
    }

    match value {
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(object_text).collect();
            parts.join(" ").trim().to_string()
        }
        other => object_text(other).unwrap_or_default().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collects_generated_text_list() {
        let value = json!([
            {"generated_text": "URGENT NOTICE"},
            {"text": "verify your account"},
            {"score": 0.4}
        ]);
        assert_eq!(collect_caption_text(&value), "URGENT NOTICE verify your account");
    }

    #[test]
    fn test_collects_single_object() {
        let value = json!({"text": " hello "});
        assert_eq!(collect_caption_text(&value), "hello");
    }

    #[test]
    fn test_unexpected_shapes_yield_empty() {
        assert_eq!(collect_caption_text(&json!("plain string")), "");
        assert_eq!(collect_caption_text(&json!(null)), "");
        assert_eq!(collect_caption_text(&json!([1, 2])), "");
    }
}
