use crate::preprocessing::{NormalizeOptions, DEFAULT_MAX_PIXELS};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "scanprep-ocr-server")]
#[command(about = "OCR server that normalizes scanned images before recognition")]
#[command(version)]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "OCR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "OCR_PORT", default_value = "4321")]
    pub port: u16,

    /// Default language for OCR (e.g., "eng", "deu", "fra")
    #[arg(long, env = "OCR_DEFAULT_LANGUAGE", default_value = "eng")]
    pub default_language: String,

    /// Maximum file size in bytes (default: 50MB)
    #[arg(long, env = "OCR_MAX_FILE_SIZE", default_value = "52428800")]
    pub max_file_size: usize,

    /// Largest image area (pixels) the rescale step may produce
    #[arg(long, env = "OCR_MAX_SCALED_PIXELS", default_value_t = DEFAULT_MAX_PIXELS)]
    pub max_scaled_pixels: u64,

    /// Path to tessdata directory (downloaded to the cache dir if not set)
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub default_language: String,
    pub max_file_size: usize,
    pub tessdata_path: Option<String>,
    pub normalize: NormalizeOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4321,
            default_language: "eng".to_string(),
            max_file_size: 50 * 1024 * 1024,
            tessdata_path: None,
            normalize: NormalizeOptions::default(),
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            default_language: args.default_language,
            max_file_size: args.max_file_size,
            tessdata_path: args.tessdata_path,
            normalize: NormalizeOptions {
                max_pixels: args.max_scaled_pixels,
                ..NormalizeOptions::default()
            },
        }
    }
}
