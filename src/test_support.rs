//! Helpers shared by unit tests: synthetic glyph images and an engine that
//! reports the bounding box of the ink it sees.

use crate::engine::{TextBox, TextEngine};
use crate::error::OcrError;
use crate::validation::RecognitionConfig;
use image::{GrayImage, ImageFormat, Luma};
use std::io::Cursor;

pub const INK_TEXT: &str = "  Hello\n\nWORLD ";

pub fn encode_png(image: &GrayImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

/// Sheet with one "A"-shaped glyph exactly `glyph_height` pixels tall,
/// centred on the page. `inverted` draws light ink on a dark page.
pub fn glyph_sheet(width: u32, height: u32, glyph_height: u32, inverted: bool) -> GrayImage {
    let (paper, ink) = if inverted { (20u8, 235u8) } else { (250u8, 15u8) };
    let mut img = GrayImage::from_pixel(width, height, Luma([paper]));

    let top = (height - glyph_height) / 2;
    let centre = width as i64 / 2;
    let half_width = (glyph_height as f64 * 0.4) as i64;
    let stroke = (glyph_height / 8).max(2) as i64;
    let bar = (glyph_height as f64 * 0.6) as u32;

    for row in 0..glyph_height {
        let y = top + row;
        let spread = (half_width as f64 * row as f64 / glyph_height as f64) as i64;
        let legs = [centre - spread, centre + spread - stroke + 1];
        for leg in legs {
            for x in leg..leg + stroke {
                if x >= 0 && x < width as i64 {
                    img.put_pixel(x as u32, y, Luma([ink]));
                }
            }
        }
        if row >= bar && row < bar + stroke as u32 {
            for x in centre - spread..=centre + spread {
                img.put_pixel(x as u32, y, Luma([ink]));
            }
        }
    }
    img
}

/// Engine stub: one box around all minority-class pixels, fixed text.
pub struct InkBoxEngine;

impl InkBoxEngine {
    fn ink_bounds(image: &GrayImage) -> Option<(u32, u32, u32, u32)> {
        let dark = image.pixels().filter(|p| p.0[0] < 128).count();
        let light = image.len() - dark;
        let ink_is_dark = dark <= light;

        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, pixel) in image.enumerate_pixels() {
            if (pixel.0[0] < 128) != ink_is_dark {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        bounds
    }
}

impl TextEngine for InkBoxEngine {
    fn name(&self) -> &'static str {
        "ink"
    }

    fn description(&self) -> &'static str {
        "Test engine reporting the ink bounding box"
    }

    fn detect_boxes(&self, image: &GrayImage) -> Result<Vec<TextBox>, OcrError> {
        Ok(Self::ink_bounds(image)
            .map(|(x0, y0, x1, y1)| TextBox {
                left: x0 as i32,
                top: y0 as i32,
                width: (x1 - x0 + 1) as i32,
                height: (y1 - y0 + 1) as i32,
                text: "A".to_string(),
                confidence: Some(0.9),
            })
            .into_iter()
            .collect())
    }

    fn recognize_text(
        &self,
        image: &GrayImage,
        _config: &RecognitionConfig,
    ) -> Result<String, OcrError> {
        Ok(match Self::ink_bounds(image) {
            Some(_) => INK_TEXT.to_string(),
            None => String::new(),
        })
    }

    fn supported_languages(&self) -> Vec<String> {
        vec!["eng".to_string()]
    }
}

/// Engine stub whose recognition pass always fails
pub struct FailingEngine;

impl TextEngine for FailingEngine {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn description(&self) -> &'static str {
        "Test engine that finds glyphs but cannot recognize them"
    }

    fn detect_boxes(&self, _image: &GrayImage) -> Result<Vec<TextBox>, OcrError> {
        Ok(vec![TextBox::new(30, "x")])
    }

    fn recognize_text(
        &self,
        _image: &GrayImage,
        _config: &RecognitionConfig,
    ) -> Result<String, OcrError> {
        Err(OcrError::Recognition("model not loaded".to_string()))
    }

    fn supported_languages(&self) -> Vec<String> {
        Vec::new()
    }
}
