//! OCRS OCR strategy.
//!
//! Uses the ocrs crate for pure-Rust OCR without external binaries.
//! Models are looked up in `ADSHIELD_OCRS_MODELS` or the default cache
//! directory; download them from:
//! https://ocrs-models.s3-accelerate.amazonaws.com/

use std::path::PathBuf;
use std::sync::OnceLock;

use async_trait::async_trait;

use super::{ExtractError, OcrStrategy};

/// Global cached OcrEngine instance (initialized once, reused for all
/// OCR calls). OcrEngine is Send+Sync and its methods take &self, so
/// no Mutex needed.
static OCR_ENGINE: OnceLock<ocrs::OcrEngine> = OnceLock::new();

const DETECTION_MODEL: &str = "text-detection.rten";
const RECOGNITION_MODEL: &str = "text-recognition.rten";

/// OCRS OCR (pure Rust).
pub struct OcrsStrategy;

impl OcrsStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Find the model directory, checking the env override and the
    /// default cache location.
    fn find_model_dir() -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(dir) = std::env::var("ADSHIELD_OCRS_MODELS") {
            candidates.push(PathBuf::from(dir));
        }
        if let Ok(home) = std::env::var("HOME") {
            candidates.push(PathBuf::from(home).join(".cache/adshield/ocrs"));
        }

        candidates
            .into_iter()
            .find(|dir| dir.join(DETECTION_MODEL).exists() && dir.join(RECOGNITION_MODEL).exists())
    }

    /// Get or initialize the cached OCR engine.
    fn get_or_init_engine() -> Result<&'static ocrs::OcrEngine, ExtractError> {
        if let Some(engine) = OCR_ENGINE.get() {
            return Ok(engine);
        }

        let model_dir = Self::find_model_dir().ok_or_else(|| {
            ExtractError::Unavailable(
                "OCRS models not found; set ADSHIELD_OCRS_MODELS or place them in \
                 ~/.cache/adshield/ocrs"
                    .to_string(),
            )
        })?;

        let detection_model = rten::Model::load_file(model_dir.join(DETECTION_MODEL))
            .map_err(|e| ExtractError::Failed(format!("Failed to load detection model: {}", e)))?;
        let recognition_model = rten::Model::load_file(model_dir.join(RECOGNITION_MODEL))
            .map_err(|e| {
                ExtractError::Failed(format!("Failed to load recognition model: {}", e))
            })?;

        let engine = ocrs::OcrEngine::new(ocrs::OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|e| ExtractError::Failed(format!("Failed to create OCR engine: {}", e)))?;

        // If another thread beat us, that's fine
        let _ = OCR_ENGINE.set(engine);
        OCR_ENGINE
            .get()
            .ok_or_else(|| ExtractError::Failed("Failed to cache OCR engine".to_string()))
    }
}

impl Default for OcrsStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrStrategy for OcrsStrategy {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn is_available(&self) -> bool {
        Self::find_model_dir().is_some()
    }

    async fn extract(&self, image: &[u8]) -> Result<String, ExtractError> {
        let engine = Self::get_or_init_engine()?;

        let img = image::load_from_memory(image)
            .map_err(|e| ExtractError::Failed(format!("Failed to decode image: {}", e)))?;
        let rgb_img = img.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let img_source = ocrs::ImageSource::from_bytes(rgb_img.as_raw(), (width, height))
            .map_err(|e| ExtractError::Failed(format!("Failed to convert image: {}", e)))?;

        let input = engine
            .prepare_input(img_source)
            .map_err(|e| ExtractError::Failed(format!("Failed to prepare input: {}", e)))?;

        engine
            .get_text(&input)
            .map_err(|e| ExtractError::Failed(format!("Failed to extract text: {}", e)))
    }
}
