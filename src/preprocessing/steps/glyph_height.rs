use crate::engine::TextBox;
use crate::error::OcrError;
use std::collections::BTreeMap;

/// Glyph height every image is rescaled towards
pub const TARGET_GLYPH_HEIGHT: u32 = 30;

/// Count how often each box height occurs, ignoring boxes without text or height
pub fn height_histogram(boxes: &[TextBox]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for text_box in boxes.iter().filter(|b| b.is_measurable()) {
        *counts.entry(text_box.height as u32).or_insert(0) += 1;
    }
    counts
}

/// Most frequent glyph height. Ties go to the smallest height.
pub fn dominant_height(boxes: &[TextBox]) -> Result<u32, OcrError> {
    let counts = height_histogram(boxes);

    let mut best: Option<(u32, usize)> = None;
    // BTreeMap iterates in ascending height order, so a strict comparison keeps
    // the smallest height among equally frequent ones.
    for (&height, &count) in &counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((height, count));
        }
    }

    best.map(|(height, _)| height)
        .ok_or(OcrError::NoGlyphsDetected)
}

/// `round(target / height, 2)`
pub fn scaling_factor(target_height: u32, dominant_height: u32) -> f64 {
    let raw = target_height as f64 / dominant_height as f64;
    (raw * 100.0).round() / 100.0
}
