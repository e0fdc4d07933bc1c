use crate::error::OcrError;
use crate::validation::RecognitionConfig;
use image::GrayImage;

/// A word-level region reported by an engine's detection pass
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    /// Recognized fragment, may be empty
    pub text: String,
    /// Engine confidence in 0.0-1.0, when the engine reports one
    pub confidence: Option<f32>,
}

impl TextBox {
    /// Box with only the fields glyph measurement relies on
    pub fn new(height: i32, text: impl Into<String>) -> Self {
        Self {
            left: 0,
            top: 0,
            width: 0,
            height,
            text: text.into(),
            confidence: None,
        }
    }

    /// Whether this box can take part in glyph height estimation
    pub fn is_measurable(&self) -> bool {
        self.height > 0 && !self.text.trim().is_empty()
    }
}

/// Trait that all OCR engines must implement.
///
/// Both the preliminary glyph measurement and the final recognition go through
/// the same engine, so they share one failure type.
pub trait TextEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "ocrs", "leptess")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Quick pass returning word boxes with their recognized fragments
    fn detect_boxes(&self, image: &GrayImage) -> Result<Vec<TextBox>, OcrError>;

    /// Full recognition of a normalized image
    fn recognize_text(
        &self,
        image: &GrayImage,
        config: &RecognitionConfig,
    ) -> Result<String, OcrError>;

    /// Get supported languages
    fn supported_languages(&self) -> Vec<String>;
}
