//! Cached downloads of model and training data files

use crate::error::OcrError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Recognition models are larger than ureq's default body limit
const MAX_DOWNLOAD_BYTES: u64 = 256 * 1024 * 1024;

/// Cache directory for downloaded engine data, created on demand
pub fn cache_dir(kind: &str) -> Result<PathBuf, OcrError> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("scanprep-ocr")
        .join(kind);

    std::fs::create_dir_all(&dir).map_err(|e| {
        OcrError::InitializationError(format!("Failed to create cache directory {:?}: {}", dir, e))
    })?;

    Ok(dir)
}

/// Return `dir/filename`, downloading it from `url` first if it is missing
pub fn ensure_cached(url: &str, dir: &Path, filename: &str) -> Result<PathBuf, OcrError> {
    let path = dir.join(filename);

    if path.exists() {
        tracing::info!("Using cached {} from {:?}", filename, dir);
        return Ok(path);
    }

    tracing::info!("Downloading {} (this may take a moment)...", filename);
    download_file(url, &path)?;
    tracing::info!("Downloaded {} to {:?}", filename, path);

    Ok(path)
}

/// Download a file from URL to path using ureq
fn download_file(url: &str, path: &Path) -> Result<(), OcrError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| OcrError::InitializationError(format!("Failed to download {}: {}", url, e)))?;

    let buffer = response
        .into_body()
        .with_config()
        .limit(MAX_DOWNLOAD_BYTES)
        .read_to_vec()
        .map_err(|e| {
            OcrError::InitializationError(format!("Failed to read response from {}: {}", url, e))
        })?;

    // Partial downloads never appear under the final name
    let partial = path.with_extension("part");
    let mut file = File::create(&partial).map_err(|e| {
        OcrError::InitializationError(format!("Failed to create {:?}: {}", partial, e))
    })?;
    file.write_all(&buffer).map_err(|e| {
        OcrError::InitializationError(format!("Failed to write {:?}: {}", partial, e))
    })?;

    std::fs::rename(&partial, path).map_err(|e| {
        OcrError::InitializationError(format!("Failed to move {:?} into place: {}", partial, e))
    })?;

    Ok(())
}
