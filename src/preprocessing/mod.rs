//! Image normalization for OCR
//!
//! Turns an uploaded scan into a high-contrast binary image with text of a
//! canonical height, dark on light, framed by a white margin.

pub mod pipeline;
pub mod steps;

pub use pipeline::{
    NormalizeOptions, NormalizedOutput, Normalizer, StepTiming, DEFAULT_MAX_PIXELS,
};
