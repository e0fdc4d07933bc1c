//! Recognition parameter validation
//!
//! Out-of-range modes are never fatal: they are replaced with a default and
//! reported back to the caller alongside the result.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::RangeInclusive;

/// Engine modes accepted by the recognizer (0 is the legacy engine, unsupported)
pub const ENGINE_MODES: RangeInclusive<i64> = 1..=3;
/// Page segmentation modes accepted by the recognizer
pub const SEGMENTATION_MODES: RangeInclusive<i64> = 0..=11;

pub const DEFAULT_ENGINE_MODE: u8 = 3;
pub const DEFAULT_SEGMENTATION_MODE: u8 = 3;

/// Values used when a request does not send the field at all
pub const REQUEST_ENGINE_MODE: i64 = 3;
pub const REQUEST_SEGMENTATION_MODE: i64 = 11;

/// Engine and page segmentation mode handed to the recognizer.
///
/// Renders as `--oem <engine_mode> --psm <segmentation_mode>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognitionConfig {
    engine_mode: u8,
    segmentation_mode: u8,
}

impl RecognitionConfig {
    pub fn engine_mode(&self) -> u8 {
        self.engine_mode
    }

    pub fn segmentation_mode(&self) -> u8 {
        self.segmentation_mode
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            engine_mode: DEFAULT_ENGINE_MODE,
            segmentation_mode: DEFAULT_SEGMENTATION_MODE,
        }
    }
}

impl fmt::Display for RecognitionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "--oem {} --psm {}",
            self.engine_mode, self.segmentation_mode
        )
    }
}

impl Serialize for RecognitionConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of parameter validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamCheck {
    pub error_count: usize,
    pub errors: Vec<String>,
    pub config: RecognitionConfig,
}

/// Clamp the requested modes into their supported ranges.
pub fn validate(engine_mode: i64, segmentation_mode: i64) -> ParamCheck {
    let mut errors = Vec::new();

    let engine_mode = if ENGINE_MODES.contains(&engine_mode) {
        engine_mode as u8
    } else {
        tracing::debug!("engine_mode {} out of range, using default", engine_mode);
        errors.push(format!(
            "engine_mode of {} unexpected: value from {} to including {} is acceptable. Defaulting to {}.",
            engine_mode,
            ENGINE_MODES.start(),
            ENGINE_MODES.end(),
            DEFAULT_ENGINE_MODE
        ));
        DEFAULT_ENGINE_MODE
    };

    let segmentation_mode = if SEGMENTATION_MODES.contains(&segmentation_mode) {
        segmentation_mode as u8
    } else {
        tracing::debug!(
            "segmentation_mode {} out of range, using default",
            segmentation_mode
        );
        errors.push(format!(
            "segmentation_mode of {} unexpected: value from {} to including {} is acceptable. Defaulting to {}.",
            segmentation_mode,
            SEGMENTATION_MODES.start(),
            SEGMENTATION_MODES.end(),
            DEFAULT_SEGMENTATION_MODE
        ));
        DEFAULT_SEGMENTATION_MODE
    };

    ParamCheck {
        error_count: errors.len(),
        errors,
        config: RecognitionConfig {
            engine_mode,
            segmentation_mode,
        },
    }
}
