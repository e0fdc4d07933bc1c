use crate::config::Config;
use crate::engines::EngineInfo;
use crate::error::OcrError;
use crate::ocr::{OcrProcessor, OcrRequest};
use crate::preprocessing::StepTiming;
use crate::validation::{RecognitionConfig, REQUEST_ENGINE_MODE, REQUEST_SEGMENTATION_MODE};
use axum::{
    body::Bytes,
    extract::{
        multipart::{Field, MultipartError},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

/// Version of the response document
const RESPONSE_VERSION: f64 = 0.1;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<OcrProcessor>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(processor: OcrProcessor, config: Config) -> Self {
        Self {
            processor: Arc::new(processor),
            config: Arc::new(config),
        }
    }
}

/// Image-to-text response
#[derive(Serialize)]
pub struct OcrResponse {
    pub text: String,
    pub version: f64,
    pub details: JobDetails,
    pub errors: ParameterErrors,
    pub config: RecognitionConfig,
}

#[derive(Serialize)]
pub struct JobDetails {
    /// Seconds, rounded to four decimals
    pub duration: f64,
    pub job_id: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub engine: String,
    pub scaling_factor: f64,
    pub preprocessing: Vec<StepTiming>,
}

/// Out-of-range parameters that were replaced with defaults
#[derive(Serialize)]
pub struct ParameterErrors {
    pub count: usize,
    pub error: Vec<String>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Server info response
#[derive(Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub default_engine: String,
    pub available_engines: Vec<EngineInfo>,
    pub max_file_size_bytes: usize,
    pub default_language: String,
}

/// Build the router around an initialized processor
pub fn router(state: AppState) -> Router {
    let max_file_size = state.config.max_file_size;

    Router::new()
        .route("/image-to-text", post(handle_image_to_text))
        .route("/health", get(handle_health))
        .route("/info", get(handle_info))
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server
pub async fn run(config: Config) -> anyhow::Result<()> {
    let processor = OcrProcessor::new(&config)?;
    let addr = format!("{}:{}", config.host, config.port);

    let app = router(AppState::new(processor, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Handle image-to-text requests
async fn handle_image_to_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OcrResponse>, OcrError> {
    let start = Instant::now();
    let job_id = uuid::Uuid::new_v4().simple().to_string();

    let mut file_data: Option<Bytes> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut engine_mode = REQUEST_ENGINE_MODE;
    let mut segmentation_mode = REQUEST_SEGMENTATION_MODE;
    let mut engine: Option<String> = None;
    let max = state.config.max_file_size;

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max, "Failed to parse multipart"))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                filename = field.file_name().map(|s| s.to_string());
                content_type = field.content_type().map(|s| s.to_string());
                file_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| multipart_error(e, max, "Failed to read file data"))?,
                );
            }
            "engine_mode" => engine_mode = integer_field(field, "engine_mode", max).await?,
            "segmentation_mode" => {
                segmentation_mode = integer_field(field, "segmentation_mode", max).await?
            }
            "engine" => {
                engine = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| multipart_error(e, max, "Invalid engine"))?,
                );
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    // Validate file was provided
    let data = file_data.ok_or(OcrError::MissingFile)?;

    if let Some(mime) = &content_type {
        if !mime.starts_with("image/") {
            tracing::warn!("Received file with content type: {}", mime);
        }
    }

    // Normalization and recognition are CPU-bound; keep them off the I/O threads
    let processor = Arc::clone(&state.processor);
    let outcome = tokio::task::spawn_blocking(move || {
        processor.process(OcrRequest {
            bytes: &data[..],
            engine_mode,
            segmentation_mode,
            engine: engine.as_deref(),
        })
    })
    .await
    .map_err(|e| OcrError::Internal(format!("OCR task failed: {}", e)))??;

    let duration = (start.elapsed().as_secs_f64() * 10_000.0).round() / 10_000.0;

    tracing::info!(
        job_id = %job_id,
        "OCR completed in {:.4}s, scaling factor: {}, text length: {}",
        duration,
        outcome.normalization.scaling_factor,
        outcome.text.len()
    );

    Ok(Json(OcrResponse {
        text: outcome.text,
        version: RESPONSE_VERSION,
        details: JobDetails {
            duration,
            job_id,
            filename,
            content_type,
            engine: outcome.engine.to_string(),
            scaling_factor: outcome.normalization.scaling_factor,
            preprocessing: outcome.normalization.steps,
        },
        errors: ParameterErrors {
            count: outcome.error_count,
            error: outcome.errors,
        },
        config: outcome.config,
    }))
}

/// The body limit surfaces as a multipart error with status 413
fn multipart_error(err: MultipartError, max: usize, context: &str) -> OcrError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        OcrError::ImageTooLarge { max }
    } else {
        OcrError::InvalidRequest(format!("{}: {}", context, err))
    }
}

async fn integer_field(field: Field<'_>, name: &str, max: usize) -> Result<i64, OcrError> {
    let raw = field
        .text()
        .await
        .map_err(|e| multipart_error(e, max, &format!("Failed to read {}", name)))?;

    raw.trim().parse::<i64>().map_err(|_| {
        OcrError::InvalidRequest(format!("{} must be an integer, got '{}'", name, raw))
    })
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle info requests
async fn handle_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        default_engine: state.processor.default_engine().to_string(),
        available_engines: state.processor.engines(),
        max_file_size_bytes: state.config.max_file_size,
        default_language: state.config.default_language.clone(),
    })
}
