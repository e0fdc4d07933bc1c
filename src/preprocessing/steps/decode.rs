use crate::error::OcrError;
use image::GrayImage;

/// Decode an encoded image (PNG, JPEG, ...) into an 8-bit grayscale raster
pub fn apply(bytes: &[u8]) -> Result<GrayImage, OcrError> {
    if bytes.is_empty() {
        return Err(OcrError::Decode("empty input".to_string()));
    }

    let decoded = image::load_from_memory(bytes)
        .map_err(|e| OcrError::Decode(e.to_string()))?;
    let gray = decoded.into_luma8();

    if gray.width() == 0 || gray.height() == 0 {
        return Err(OcrError::Decode("image has no pixels".to_string()));
    }

    Ok(gray)
}
