//! Leptess/Tesseract engine implementation
//!
//! Tesseract-based OCR engine. Honours the requested engine mode (`--oem`) and
//! page segmentation mode (`--psm`).
//! Uses tesseract-static crate for static linking (no system dependencies).
//! Downloads tessdata (training data) automatically on first use.

use super::download;
use crate::config::Config;
use crate::engine::{TextBox, TextEngine};
use crate::error::OcrError;
use crate::validation::RecognitionConfig;
use image::{DynamicImage, GrayImage};
use std::path::Path;
use tesseract_static::tesseract::{OcrEngineMode, Tesseract};

/// Columns in Tesseract's TSV output
const TSV_COLUMNS: usize = 12;

/// Tesseract OCR Engine
pub struct LeptessEngine {
    /// Path to tessdata directory
    tessdata_path: String,
    /// Default language for OCR
    default_language: String,
}

impl LeptessEngine {
    /// Create a new Tesseract-based OCR engine
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        let default_language = config.default_language.clone();

        let tessdata_path = match &config.tessdata_path {
            Some(path) => path.clone(),
            None => ensure_tessdata_available(&default_language)?,
        };

        // Validate that tessdata is accessible by doing a test initialization
        let test_tess =
            Tesseract::new(Some(&tessdata_path), Some(&default_language)).map_err(|e| {
                OcrError::InitializationError(format!("Failed to initialize Tesseract: {}", e))
            })?;
        drop(test_tess);

        tracing::info!(
            "Leptess engine initialized (tessdata: {}, language: {})",
            tessdata_path,
            default_language
        );

        Ok(Self {
            tessdata_path,
            default_language,
        })
    }

    /// Load the image into a fresh Tesseract instance
    fn load(&self, tess: Tesseract, image: &GrayImage) -> Result<Tesseract, OcrError> {
        let bmp_data = to_bmp(image)?;
        let (width, height) = image.dimensions();

        tracing::debug!(
            "Processing image: {}x{}, BMP size: {} bytes",
            width,
            height,
            bmp_data.len()
        );

        tess.set_image_from_mem(&bmp_data).map_err(|e| {
            OcrError::Recognition(format!(
                "Failed to set image ({}x{}, {} bytes): {}",
                width,
                height,
                bmp_data.len(),
                e
            ))
        })
    }
}

impl TextEngine for LeptessEngine {
    fn name(&self) -> &'static str {
        "leptess"
    }

    fn description(&self) -> &'static str {
        "Tesseract OCR engine - honours engine and page segmentation modes"
    }

    fn detect_boxes(&self, image: &GrayImage) -> Result<Vec<TextBox>, OcrError> {
        let tess = Tesseract::new(Some(&self.tessdata_path), Some(&self.default_language))
            .map_err(|e| OcrError::Recognition(format!("Failed to create Tesseract: {}", e)))?;

        let mut tess = self
            .load(tess, image)?
            .recognize()
            .map_err(|e| OcrError::Recognition(format!("Failed to recognize text: {}", e)))?;

        let tsv = tess
            .get_tsv_text(0)
            .map_err(|e| OcrError::Recognition(format!("Failed to get TSV output: {}", e)))?;

        Ok(parse_tsv(&tsv))
    }

    fn recognize_text(
        &self,
        image: &GrayImage,
        config: &RecognitionConfig,
    ) -> Result<String, OcrError> {
        let tess = Tesseract::new_with_oem(
            Some(&self.tessdata_path),
            Some(&self.default_language),
            engine_mode(config.engine_mode()),
        )
        .map_err(|e| {
            OcrError::Recognition(format!("Failed to create Tesseract ({}): {}", config, e))
        })?;

        let tess = tess
            .set_variable(
                "tessedit_pageseg_mode",
                &config.segmentation_mode().to_string(),
            )
            .map_err(|e| {
                OcrError::Recognition(format!("Failed to set page segmentation mode: {}", e))
            })?;

        let mut tess = self
            .load(tess, image)?
            .recognize()
            .map_err(|e| OcrError::Recognition(format!("Failed to recognize text: {}", e)))?;

        tess.get_text()
            .map_err(|e| OcrError::Recognition(format!("Failed to get text: {}", e)))
    }

    fn supported_languages(&self) -> Vec<String> {
        // Tesseract supports many languages - return common ones
        // Users can install additional language packs
        vec![
            "eng".to_string(),     // English
            "deu".to_string(),     // German
            "fra".to_string(),     // French
            "spa".to_string(),     // Spanish
            "ita".to_string(),     // Italian
            "por".to_string(),     // Portuguese
            "nld".to_string(),     // Dutch
            "rus".to_string(),     // Russian
        ]
    }
}

fn engine_mode(mode: u8) -> OcrEngineMode {
    match mode {
        0 => OcrEngineMode::TesseractOnly,
        1 => OcrEngineMode::LstmOnly,
        2 => OcrEngineMode::TesseractLstmCombined,
        _ => OcrEngineMode::Default,
    }
}

/// Convert to BMP in memory (BMP is always supported by leptonica)
fn to_bmp(image: &GrayImage) -> Result<Vec<u8>, OcrError> {
    let rgb_img = DynamicImage::ImageLuma8(image.clone()).into_rgb8();
    let mut bmp_data = Vec::new();
    rgb_img
        .write_to(&mut std::io::Cursor::new(&mut bmp_data), image::ImageFormat::Bmp)
        .map_err(|e| OcrError::Recognition(format!("Failed to convert to BMP: {}", e)))?;
    Ok(bmp_data)
}

/// Parse Tesseract TSV rows into boxes. Header and malformed rows are skipped.
fn parse_tsv(tsv: &str) -> Vec<TextBox> {
    tsv.lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.splitn(TSV_COLUMNS, '\t').collect();
            if fields.len() < TSV_COLUMNS - 1 {
                return None;
            }

            let number = |idx: usize| fields[idx].trim().parse::<i32>().ok();
            let confidence = fields[10]
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|c| *c >= 0.0)
                .map(|c| c / 100.0);

            Some(TextBox {
                left: number(6)?,
                top: number(7)?,
                width: number(8)?,
                height: number(9)?,
                text: fields.get(11).copied().unwrap_or_default().to_string(),
                confidence,
            })
        })
        .collect()
}

// ============================================================================
// Tessdata download helpers
// ============================================================================

/// Ensure tessdata is available, downloading if needed
fn ensure_tessdata_available(language: &str) -> Result<String, OcrError> {
    let cache_dir = download::cache_dir("tessdata")?;
    let traineddata_file = format!("{}.traineddata", language);

    download::ensure_cached(&tessdata_url(language), &cache_dir, &traineddata_file)?;

    // Tesseract expects the directory, not the file
    path_string(&cache_dir)
}

fn path_string(path: &Path) -> Result<String, OcrError> {
    path.to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| OcrError::InitializationError("Invalid tessdata path".to_string()))
}

/// Get tessdata download URL for a language
fn tessdata_url(language: &str) -> String {
    // Full tessdata (not tessdata_fast) also carries the legacy model used by --oem 2
    format!(
        "https://github.com/tesseract-ocr/tessdata/raw/main/{}.traineddata",
        language
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv_reads_word_rows() {
        let tsv = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
                   1\t1\t0\t0\t0\t0\t0\t0\t640\t480\t-1\t\n\
                   5\t1\t1\t1\t1\t1\t36\t92\t60\t24\t96.5\tHello\n\
                   5\t1\t1\t1\t1\t2\t104\t92\t74\t24\t91.0\tWorld\n";

        let boxes = parse_tsv(tsv);

        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].text, "");
        assert_eq!(boxes[0].confidence, None);
        assert_eq!(boxes[1].height, 24);
        assert_eq!(boxes[1].text, "Hello");
        assert!((boxes[1].confidence.unwrap() - 0.965).abs() < 1e-6);
        assert_eq!(boxes[2].left, 104);
    }

    #[test]
    fn test_parse_tsv_skips_garbage() {
        assert!(parse_tsv("").is_empty());
        assert!(parse_tsv("not\ta\ttsv").is_empty());
    }

    #[test]
    fn test_engine_mode_mapping() {
        assert!(matches!(engine_mode(1), OcrEngineMode::LstmOnly));
        assert!(matches!(engine_mode(3), OcrEngineMode::Default));
    }
}
