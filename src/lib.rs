//! Scan normalization and OCR.
//!
//! Uploaded scans are rescaled so their dominant glyph height is about 30px,
//! binarized with Otsu's method, flipped to dark-on-light when needed, lightly
//! blurred and padded before being handed to an OCR engine. The recognized text
//! is flattened to a single lowercase line.

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod ocr;
pub mod preprocessing;
pub mod server;
pub mod text;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use config::{Args, Config};
pub use engine::{TextBox, TextEngine};
pub use error::OcrError;
pub use ocr::{OcrOutcome, OcrProcessor, OcrRequest};
pub use validation::{validate, ParamCheck, RecognitionConfig};
