use crate::error::OcrError;
use image::GrayImage;
use imageproc::filter::filter3x3;

/// 3x3 Gaussian kernel, sigma derived from the kernel size (outer product of 1-2-1)
const GAUSSIAN_3X3: [f32; 9] = [
    1.0 / 16.0,
    2.0 / 16.0,
    1.0 / 16.0,
    2.0 / 16.0,
    4.0 / 16.0,
    2.0 / 16.0,
    1.0 / 16.0,
    2.0 / 16.0,
    1.0 / 16.0,
];

/// Soften binarization artifacts with a small Gaussian blur
pub fn apply(image: GrayImage) -> Result<GrayImage, OcrError> {
    Ok(filter3x3(&image, &GAUSSIAN_3X3))
}
