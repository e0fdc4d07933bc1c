use crate::engine::TextEngine;
use crate::error::OcrError;
use image::imageops::FilterType;
use image::GrayImage;
use serde::Serialize;
use std::time::Instant;

use super::steps;
use super::steps::glyph_height::{self, TARGET_GLYPH_HEIGHT};

/// White margin added around the normalized image, in pixels
pub const DEFAULT_BORDER: u32 = 10;

/// Upper bound on the rescaled image area, in pixels
pub const DEFAULT_MAX_PIXELS: u64 = 64_000_000;

/// Settings for a normalization run.
///
/// Passed explicitly into every run instead of living in process-wide state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    /// Glyph height (px) the dominant text size is scaled to
    pub target_glyph_height: u32,
    /// Width of the white border added on every side
    pub border: u32,
    /// Resampling kernel for the rescale step
    pub rescale_filter: FilterType,
    /// Largest area the rescale step may produce
    pub max_pixels: u64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            target_glyph_height: TARGET_GLYPH_HEIGHT,
            border: DEFAULT_BORDER,
            rescale_filter: FilterType::Lanczos3,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// Timing information for a single normalization step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of normalization including timing stats
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedOutput {
    /// Normalized image (not serialized)
    #[serde(skip)]
    pub image: GrayImage,
    /// Most frequent glyph height found by the detection pass
    pub dominant_height: u32,
    /// Factor applied on both axes during rescaling
    pub scaling_factor: f64,
    /// Total normalization time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Decode, measure, rescale, binarize, repolarize, denoise and pad
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize an encoded image. `engine` provides the glyph-height probe.
    pub fn run(&self, bytes: &[u8], engine: &dyn TextEngine) -> Result<NormalizedOutput, OcrError> {
        let start = Instant::now();
        let mut timings = Vec::new();

        let gray = self.run_step("decode", &mut timings, || steps::decode::apply(bytes))?;

        let dominant_height = self.run_step("measure", &mut timings, || {
            let boxes = engine.detect_boxes(&gray)?;
            tracing::debug!("Detection pass returned {} boxes", boxes.len());
            glyph_height::dominant_height(&boxes)
        })?;

        let scaling_factor =
            glyph_height::scaling_factor(self.options.target_glyph_height, dominant_height);
        tracing::debug!(
            "Dominant glyph height {}px, scaling by {}",
            dominant_height,
            scaling_factor
        );

        let img = self.run_step("rescale", &mut timings, || {
            steps::rescale::apply(
                gray,
                scaling_factor,
                self.options.rescale_filter,
                self.options.max_pixels,
            )
        })?;
        let img = self.run_step("binarize", &mut timings, || steps::threshold::apply(img))?;
        let img = self.run_step("repolarize", &mut timings, || steps::polarity::apply(img))?;
        let img = self.run_step("denoise", &mut timings, || steps::denoise::apply(img))?;
        let img = self.run_step("pad", &mut timings, || {
            steps::pad::apply(img, self.options.border)
        })?;

        Ok(NormalizedOutput {
            image: img,
            dominant_height,
            scaling_factor,
            total_time_ms: start.elapsed().as_millis() as u64,
            steps: timings,
        })
    }

    fn run_step<T, F>(
        &self,
        name: &str,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<T, OcrError>
    where
        F: FnOnce() -> Result<T, OcrError>,
    {
        let step_start = Instant::now();
        let result = step_fn();
        let time_ms = step_start.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => tracing::debug!("Step {} finished in {}ms", name, time_ms),
            Err(e) => tracing::debug!("Step {} failed after {}ms: {}", name, time_ms, e),
        }

        timings.push(StepTiming {
            name: name.to_string(),
            time_ms,
        });
        result
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}
