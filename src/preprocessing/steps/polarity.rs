use crate::error::OcrError;
use image::GrayImage;

/// Number of pure white and pure black samples
pub fn count_extremes(image: &GrayImage) -> (usize, usize) {
    image
        .pixels()
        .fold((0, 0), |(white, black), pixel| match pixel.0[0] {
            255 => (white + 1, black),
            0 => (white, black + 1),
            _ => (white, black),
        })
}

/// Enforce dark text on a light background.
///
/// Inverts the image when black samples outnumber white ones.
pub fn apply(image: GrayImage) -> Result<GrayImage, OcrError> {
    let (white, black) = count_extremes(&image);
    if black <= white {
        return Ok(image);
    }

    tracing::debug!(
        "Inverting light-on-dark image (white: {}, black: {})",
        white,
        black
    );
    let mut inverted = image;
    image::imageops::invert(&mut inverted);
    Ok(inverted)
}
