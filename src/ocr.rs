//! Request-level orchestration: validate, normalize, recognize, clean.

use crate::config::Config;
use crate::engines::{EngineInfo, EngineRegistry};
use crate::error::OcrError;
use crate::preprocessing::{NormalizeOptions, NormalizedOutput, Normalizer};
use crate::text;
use crate::validation::{self, RecognitionConfig};

/// One recognition request
#[derive(Debug, Clone, Copy)]
pub struct OcrRequest<'a> {
    pub bytes: &'a [u8],
    pub engine_mode: i64,
    pub segmentation_mode: i64,
    /// Engine name; the registry default when `None`
    pub engine: Option<&'a str>,
}

impl<'a> OcrRequest<'a> {
    pub fn new(bytes: &'a [u8], engine_mode: i64, segmentation_mode: i64) -> Self {
        Self {
            bytes,
            engine_mode,
            segmentation_mode,
            engine: None,
        }
    }
}

/// Cleaned text plus everything the caller needs to report about the run
#[derive(Debug, Clone)]
pub struct OcrOutcome {
    pub text: String,
    pub error_count: usize,
    pub errors: Vec<String>,
    pub config: RecognitionConfig,
    pub engine: &'static str,
    pub normalization: NormalizedOutput,
}

pub struct OcrProcessor {
    engines: EngineRegistry,
    normalizer: Normalizer,
}

impl OcrProcessor {
    /// Initialize every compiled-in engine
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        let engines = EngineRegistry::new(config)?;
        Ok(Self::with_engines(engines, config.normalize))
    }

    pub fn with_engines(engines: EngineRegistry, options: NormalizeOptions) -> Self {
        Self {
            engines,
            normalizer: Normalizer::new(options),
        }
    }

    /// Run the whole pipeline for one image. Stages are never retried.
    pub fn process(&self, request: OcrRequest<'_>) -> Result<OcrOutcome, OcrError> {
        let check = validation::validate(request.engine_mode, request.segmentation_mode);
        if check.error_count > 0 {
            tracing::warn!("Recognition parameters corrected: {:?}", check.errors);
        }

        let engine = match request.engine {
            Some(name) => self.engines.get(name).ok_or_else(|| {
                OcrError::InvalidRequest(format!(
                    "Unknown engine '{}', available: {}",
                    name,
                    self.engines.list().join(", ")
                ))
            })?,
            None => self
                .engines
                .default()
                .ok_or_else(|| OcrError::Internal("Default engine missing".to_string()))?,
        };

        let normalization = self.normalizer.run(request.bytes, engine.as_ref())?;

        let raw = engine.recognize_text(&normalization.image, &check.config)?;
        let text = text::clean(&raw);

        tracing::debug!(
            "Recognized {} chars ({} after cleaning) with {} using '{}'",
            raw.len(),
            text.len(),
            engine.name(),
            check.config
        );

        Ok(OcrOutcome {
            text,
            error_count: check.error_count,
            errors: check.errors,
            config: check.config,
            engine: engine.name(),
            normalization,
        })
    }

    pub fn default_engine(&self) -> &str {
        self.engines.default_name()
    }

    pub fn engines(&self) -> Vec<EngineInfo> {
        self.engines.info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{encode_png, glyph_sheet, FailingEngine, InkBoxEngine};
    use image::{GrayImage, Luma};
    use std::sync::Arc;

    fn processor() -> OcrProcessor {
        let engines =
            EngineRegistry::from_engines(vec![Arc::new(InkBoxEngine), Arc::new(FailingEngine)])
                .unwrap();
        OcrProcessor::with_engines(engines, NormalizeOptions::default())
    }

    #[test]
    fn test_process_returns_cleaned_text() {
        let bytes = encode_png(&glyph_sheet(200, 120, 60, false));
        let outcome = processor().process(OcrRequest::new(&bytes, 3, 11)).unwrap();

        assert_eq!(outcome.text, "hello world");
        assert_eq!(outcome.error_count, 0);
        assert_eq!(outcome.config.to_string(), "--oem 3 --psm 11");
        assert_eq!(outcome.engine, "ink");
        assert_eq!(outcome.normalization.scaling_factor, 0.5);
    }

    #[test]
    fn test_invalid_modes_are_reported_not_fatal() {
        let bytes = encode_png(&glyph_sheet(200, 120, 60, false));
        let outcome = processor().process(OcrRequest::new(&bytes, 99, 11)).unwrap();

        assert_eq!(outcome.error_count, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.config.to_string(), "--oem 3 --psm 11");
        assert_eq!(outcome.text, "hello world");
    }

    #[test]
    fn test_blank_image_is_no_glyphs() {
        let blank = encode_png(&GrayImage::from_pixel(50, 50, Luma([255])));
        let err = processor().process(OcrRequest::new(&blank, 3, 11)).unwrap_err();
        assert!(matches!(err, OcrError::NoGlyphsDetected));
    }

    #[test]
    fn test_corrupt_input_is_decode_error() {
        let err = processor()
            .process(OcrRequest::new(b"\x89PNG\r\n\x1a\n\0\0", 3, 11))
            .unwrap_err();
        assert!(matches!(err, OcrError::Decode(_)));
    }

    #[test]
    fn test_engine_failure_propagates() {
        let bytes = encode_png(&glyph_sheet(200, 120, 60, false));
        let request = OcrRequest {
            engine: Some("failing"),
            ..OcrRequest::new(&bytes, 3, 11)
        };

        match processor().process(request) {
            Err(OcrError::Recognition(msg)) => assert_eq!(msg, "model not loaded"),
            other => panic!("expected recognition error, got {:?}", other.map(|o| o.text)),
        }
    }

    #[test]
    fn test_unknown_engine_is_rejected() {
        let bytes = encode_png(&glyph_sheet(200, 120, 60, false));
        let request = OcrRequest {
            engine: Some("tesseract"),
            ..OcrRequest::new(&bytes, 3, 11)
        };
        assert!(matches!(
            processor().process(request),
            Err(OcrError::InvalidRequest(_))
        ));
    }
}
