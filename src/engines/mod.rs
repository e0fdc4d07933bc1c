//! OCR engine implementations
//!
//! This module contains implementations of the TextEngine trait for different
//! OCR backends. Engines are conditionally compiled based on feature flags.

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

#[cfg(feature = "engine-leptess")]
pub mod leptess;

#[cfg(any(feature = "engine-ocrs", feature = "engine-leptess"))]
mod download;

use crate::config::Config;
use crate::engine::TextEngine;
use crate::error::OcrError;
use serde::Serialize;
use std::sync::Arc;

/// Information about an available engine
#[derive(Debug, Clone, Serialize)]
pub struct EngineInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub supported_languages: Vec<String>,
}

/// Registry of available OCR engines
pub struct EngineRegistry {
    engines: Vec<Arc<dyn TextEngine>>,
    default_engine: String,
}

impl EngineRegistry {
    /// Create a new engine registry with all available engines initialized
    #[allow(unused_variables, unused_mut)]
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        let mut engines: Vec<Arc<dyn TextEngine>> = Vec::new();

        #[cfg(feature = "engine-ocrs")]
        {
            tracing::info!("Initializing ocrs engine...");
            engines.push(Arc::new(ocrs::OcrsEngine::new(config)?));
        }

        #[cfg(feature = "engine-leptess")]
        {
            tracing::info!("Initializing leptess engine...");
            engines.push(Arc::new(leptess::LeptessEngine::new(config)?));
        }

        Self::from_engines(engines)
    }

    /// Build a registry from already constructed engines; the first one is the default
    pub fn from_engines(engines: Vec<Arc<dyn TextEngine>>) -> Result<Self, OcrError> {
        let default_engine = engines
            .first()
            .map(|e| e.name().to_string())
            .ok_or_else(|| {
                OcrError::InitializationError(
                    "No OCR engines available. Build with --features engine-ocrs or --features engine-leptess".to_string(),
                )
            })?;

        Ok(Self {
            engines,
            default_engine,
        })
    }

    /// Get an engine by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn TextEngine>> {
        self.engines.iter().find(|e| e.name() == name).cloned()
    }

    /// Get the default engine
    pub fn default(&self) -> Option<Arc<dyn TextEngine>> {
        self.get(&self.default_engine)
    }

    /// Get the default engine name
    pub fn default_name(&self) -> &str {
        &self.default_engine
    }

    /// List all available engine names
    pub fn list(&self) -> Vec<&str> {
        self.engines.iter().map(|e| e.name()).collect()
    }

    /// Get info about all available engines
    pub fn info(&self) -> Vec<EngineInfo> {
        self.engines
            .iter()
            .map(|e| EngineInfo {
                name: e.name(),
                description: e.description(),
                supported_languages: e.supported_languages(),
            })
            .collect()
    }
}
