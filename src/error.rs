use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("No text glyphs detected in image")]
    NoGlyphsDetected,

    #[error("Recognition failed: {0}")]
    Recognition(String),

    #[error("Image too large: upload exceeds {max} bytes")]
    ImageTooLarge { max: usize },

    #[error("Rescaled image would be {width}x{height} pixels (max: {max_pixels} pixels)")]
    ScaledImageTooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    #[error("Missing file in request")]
    MissingFile,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OcrError {
    /// Stable machine-readable code, also used in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            OcrError::InitializationError(_) => "INIT_ERROR",
            OcrError::Decode(_) => "DECODE_ERROR",
            OcrError::NoGlyphsDetected => "NO_GLYPHS_DETECTED",
            OcrError::Recognition(_) => "RECOGNITION_ERROR",
            OcrError::ImageTooLarge { .. } => "IMAGE_TOO_LARGE",
            OcrError::ScaledImageTooLarge { .. } => "SCALED_IMAGE_TOO_LARGE",
            OcrError::MissingFile => "MISSING_FILE",
            OcrError::InvalidRequest(_) => "INVALID_REQUEST",
            OcrError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            OcrError::InitializationError(_)
            | OcrError::Recognition(_)
            | OcrError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            OcrError::Decode(_) | OcrError::MissingFile | OcrError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            OcrError::NoGlyphsDetected | OcrError::ScaledImageTooLarge { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            OcrError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for OcrError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::info!("Request rejected: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}
