use crate::error::OcrError;
use image::{imageops, GrayImage, Luma};

/// Surround the image with a uniform white border of `border` pixels
pub fn apply(image: GrayImage, border: u32) -> Result<GrayImage, OcrError> {
    if border == 0 {
        return Ok(image);
    }

    let (width, height) = image.dimensions();
    let mut canvas = GrayImage::from_pixel(
        width + 2 * border,
        height + 2 * border,
        Luma([255u8]),
    );
    imageops::replace(&mut canvas, &image, border as i64, border as i64);
    Ok(canvas)
}
