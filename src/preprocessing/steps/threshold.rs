use crate::error::OcrError;
use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;

/// Binarize with a single global threshold chosen by Otsu's method.
///
/// Samples strictly above the threshold become 255, the rest 0. Uniform
/// images get threshold 0.
pub fn apply(image: GrayImage) -> Result<GrayImage, OcrError> {
    let level = otsu_level(&image);
    tracing::debug!("Otsu threshold: {}", level);

    let mut binary = image;
    for pixel in binary.pixels_mut() {
        *pixel = if pixel.0[0] > level {
            Luma([255u8])
        } else {
            Luma([0u8])
        };
    }
    Ok(binary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarizes_image() {
        // Create a simple gradient image
        let img = GrayImage::from_fn(50, 50, |x, _| Luma([(x as u8 * 5).min(255)]));

        let result = apply(img).unwrap();

        // Result should only contain 0 or 255
        for pixel in result.pixels() {
            assert!(
                pixel.0[0] == 0 || pixel.0[0] == 255,
                "Expected binary pixel, got {}",
                pixel.0[0]
            );
        }
    }

    #[test]
    fn test_otsu_separates_bimodal_histogram() {
        // Two populations around 40 and 200
        let img = GrayImage::from_fn(40, 10, |x, _| {
            if x < 20 {
                Luma([35 + (x % 3) as u8 * 5])
            } else {
                Luma([195 + (x % 3) as u8 * 5])
            }
        });

        let level = otsu_level(&img);
        assert!((45..195).contains(&level), "unexpected level {}", level);

        let result = apply(img).unwrap();
        assert_eq!(result.get_pixel(5, 5).0[0], 0);
        assert_eq!(result.get_pixel(30, 5).0[0], 255);
    }

    #[test]
    fn test_threshold_handles_text_pattern() {
        // Dark text on light background
        let mut img = GrayImage::from_pixel(50, 20, Luma([240]));
        for x in 10..40 {
            img.put_pixel(x, 10, Luma([20]));
        }

        let result = apply(img).unwrap();

        assert_eq!(result.get_pixel(25, 10).0[0], 0);
        assert_eq!(result.get_pixel(25, 5).0[0], 255);
    }

    #[test]
    fn test_uniform_image_uses_zero_level() {
        let white = GrayImage::from_pixel(8, 8, Luma([255]));
        assert_eq!(otsu_level(&white), 0);
        assert!(apply(white).unwrap().pixels().all(|p| p.0[0] == 255));

        let black = GrayImage::from_pixel(8, 8, Luma([0]));
        assert!(apply(black).unwrap().pixels().all(|p| p.0[0] == 0));
    }
}
