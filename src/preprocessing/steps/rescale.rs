use crate::error::OcrError;
use image::{imageops::FilterType, GrayImage};

/// Resample the image by `factor` on both axes.
///
/// Output dimensions are rounded and never drop below one pixel. Results
/// larger than `max_pixels` are refused before anything is allocated.
pub fn apply(
    image: GrayImage,
    factor: f64,
    filter: FilterType,
    max_pixels: u64,
) -> Result<GrayImage, OcrError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(OcrError::Internal(format!(
            "invalid scaling factor {}",
            factor
        )));
    }

    let (width, height) = image.dimensions();
    let new_width = scaled_dimension(width, factor);
    let new_height = scaled_dimension(height, factor);

    if (new_width, new_height) == (width, height) {
        return Ok(image);
    }

    if new_width as u64 * new_height as u64 > max_pixels {
        return Err(OcrError::ScaledImageTooLarge {
            width: new_width,
            height: new_height,
            max_pixels,
        });
    }

    Ok(image::imageops::resize(&image, new_width, new_height, filter))
}

fn scaled_dimension(dim: u32, factor: f64) -> u32 {
    // `as` saturates at u32::MAX, which the area check then rejects
    ((dim as f64 * factor).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    const LIMIT: u64 = 1_000_000;

    #[test]
    fn test_rescale_halves_dimensions() {
        let img = GrayImage::from_pixel(200, 120, Luma([255]));
        let result = apply(img, 0.5, FilterType::Lanczos3, LIMIT).unwrap();
        assert_eq!(result.dimensions(), (100, 60));
    }

    #[test]
    fn test_rescale_enlarges_with_rounding() {
        let img = GrayImage::from_pixel(15, 10, Luma([0]));
        let result = apply(img, 4.29, FilterType::Lanczos3, LIMIT).unwrap();
        // 15 * 4.29 = 64.35, 10 * 4.29 = 42.9
        assert_eq!(result.dimensions(), (64, 43));
    }

    #[test]
    fn test_rescale_identity_keeps_pixels() {
        let img = GrayImage::from_fn(9, 9, |x, y| Luma([((x * 9 + y) * 3) as u8]));
        let result = apply(img.clone(), 1.0, FilterType::Lanczos3, LIMIT).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_rescale_never_collapses_to_zero() {
        let img = GrayImage::from_pixel(3, 3, Luma([128]));
        let result = apply(img, 0.01, FilterType::Lanczos3, LIMIT).unwrap();
        assert_eq!(result.dimensions(), (1, 1));
    }

    #[test]
    fn test_rescale_rejects_zero_factor() {
        let img = GrayImage::new(4, 4);
        assert!(apply(img, 0.0, FilterType::Lanczos3, LIMIT).is_err());
    }

    #[test]
    fn test_rescale_refuses_oversized_output() {
        let img = GrayImage::from_pixel(300, 200, Luma([255]));
        match apply(img, 30.0, FilterType::Lanczos3, LIMIT) {
            Err(OcrError::ScaledImageTooLarge {
                width,
                height,
                max_pixels,
            }) => {
                assert_eq!((width, height), (9000, 6000));
                assert_eq!(max_pixels, LIMIT);
            }
            other => panic!(
                "expected ScaledImageTooLarge, got {:?}",
                other.map(|i| i.dimensions())
            ),
        }
    }

    #[test]
    fn test_rescale_allows_output_at_the_limit() {
        let img = GrayImage::from_pixel(500, 500, Luma([255]));
        let result = apply(img, 2.0, FilterType::Lanczos3, LIMIT).unwrap();
        assert_eq!(result.dimensions(), (1000, 1000));
    }
}
