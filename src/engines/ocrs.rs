//! OCRS engine implementation
//!
//! Pure Rust OCR engine using the ocrs library. No system dependencies required.
//! Downloads neural network models automatically on first use.

use super::download;
use crate::config::Config;
use crate::engine::{TextBox, TextEngine};
use crate::error::OcrError;
use crate::validation::RecognitionConfig;
use image::{DynamicImage, GrayImage};
use ocrs::{
    DecodeMethod, ImageSource, OcrEngine as OcrsOcrEngine, OcrEngineParams, OcrInput, TextItem,
    TextLine,
};
use rten::Model;

/// Default model URLs from the ocrs project
const DETECTION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-detection.rten";
const RECOGNITION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-recognition.rten";

/// OCR Engine wrapping the ocrs library
pub struct OcrsEngine {
    engine: OcrsOcrEngine,
}

impl OcrsEngine {
    /// Create a new OCR engine, downloading models if needed
    pub fn new(_config: &Config) -> Result<Self, OcrError> {
        let models_dir = download::cache_dir("models")?;
        let detection_model_path =
            download::ensure_cached(DETECTION_MODEL_URL, &models_dir, "text-detection.rten")?;
        let recognition_model_path =
            download::ensure_cached(RECOGNITION_MODEL_URL, &models_dir, "text-recognition.rten")?;

        let detection_model = Model::load_file(&detection_model_path).map_err(|e| {
            OcrError::InitializationError(format!("Failed to load detection model: {}", e))
        })?;
        let recognition_model = Model::load_file(&recognition_model_path).map_err(|e| {
            OcrError::InitializationError(format!("Failed to load recognition model: {}", e))
        })?;

        let engine = OcrsOcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            decode_method: DecodeMethod::Greedy,
            ..Default::default()
        })
        .map_err(|e| {
            OcrError::InitializationError(format!("Failed to create OCR engine: {}", e))
        })?;

        tracing::info!("ocrs engine initialized successfully");

        Ok(Self { engine })
    }

    fn prepare(&self, image: &GrayImage) -> Result<OcrInput, OcrError> {
        // ImageSource::from_bytes expects HWC RGB data
        let rgb_img = DynamicImage::ImageLuma8(image.clone()).into_rgb8();
        let dimensions = rgb_img.dimensions();

        let img_source = ImageSource::from_bytes(rgb_img.as_raw(), dimensions).map_err(|e| {
            OcrError::Recognition(format!("Failed to create image source: {}", e))
        })?;

        self.engine
            .prepare_input(img_source)
            .map_err(|e| OcrError::Recognition(format!("Failed to prepare input: {}", e)))
    }

    /// Detect words, group them into lines and recognize each line
    fn read_lines(&self, image: &GrayImage) -> Result<Vec<Option<TextLine>>, OcrError> {
        let ocr_input = self.prepare(image)?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .map_err(|e| OcrError::Recognition(format!("Failed to detect words: {}", e)))?;

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);

        self.engine
            .recognize_text(&ocr_input, &line_rects)
            .map_err(|e| OcrError::Recognition(format!("Failed to recognize text: {}", e)))
    }
}

impl TextEngine for OcrsEngine {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn description(&self) -> &'static str {
        "Pure Rust OCR engine - fast, no system dependencies required"
    }

    fn detect_boxes(&self, image: &GrayImage) -> Result<Vec<TextBox>, OcrError> {
        let lines = self.read_lines(image)?;

        let boxes = lines
            .iter()
            .flatten()
            .flat_map(|line| line.words())
            .map(|word| {
                let rect = word.bounding_rect();
                TextBox {
                    left: rect.left(),
                    top: rect.top(),
                    width: rect.width(),
                    height: rect.height(),
                    text: word.to_string(),
                    confidence: None,
                }
            })
            .collect();

        Ok(boxes)
    }

    fn recognize_text(
        &self,
        image: &GrayImage,
        config: &RecognitionConfig,
    ) -> Result<String, OcrError> {
        // ocrs has a single recognition model and its own layout analysis
        tracing::debug!("ocrs ignores recognition config '{}'", config);

        let lines = self.read_lines(image)?;

        let text = lines
            .iter()
            .filter_map(|line| line.as_ref())
            .map(|line| {
                line.words()
                    .map(|word| word.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(text)
    }

    fn supported_languages(&self) -> Vec<String> {
        // ocrs currently only supports English/Latin alphabet
        vec!["eng".to_string()]
    }
}
