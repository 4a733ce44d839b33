use axum::{
    extract::{DefaultBodyLimit, Multipart},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;
use smolimg_common::OutputFormat;
use smolimg_core::{process_batch, BatchItem, TransformRequest};
use tower_http::cors::{Any, CorsLayer};

pub const SERVICE_NAME: &str = "smolimg";

const DEFAULT_QUALITY: u8 = 80;
const DEFAULT_RESIZE_FACTOR: u8 = 100;

/// One successfully compressed upload
#[derive(Debug, Serialize)]
pub struct CompressedFile {
    pub name: String,
    pub original_size: usize,
    pub compressed_size: usize,
    pub savings_pct: f64,
    pub data_uri: String,
    pub mime_type: &'static str,
}

/// One upload that could not be processed
#[derive(Debug, Serialize)]
pub struct FailedFile {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct CompressResponse {
    pub results: Vec<CompressedFile>,
    pub errors: Vec<FailedFile>,
}

/// Request-level failure, rendered as a JSON error body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Build the application router. CORS is wide open (development posture).
pub fn router(max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/compress", post(compress_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": SERVICE_NAME }))
}

/// Accept a multipart batch and return per-file compression results.
///
/// Form fields: `files` (repeatable), `quality` (default 80), `format`
/// (default WEBP), `resize_factor` (default 100). Settings apply uniformly
/// to every file. Files that fail to process land in `errors`; they never
/// abort the rest of the batch.
async fn compress_handler(
    mut multipart: Multipart,
) -> Result<Json<CompressResponse>, ApiError> {
    let mut items: Vec<BatchItem> = Vec::new();
    let mut quality = DEFAULT_QUALITY;
    let mut format = OutputFormat::default();
    let mut resize_factor = DEFAULT_RESIZE_FACTOR;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "files" => {
                let name = field
                    .file_name()
                    .unwrap_or("upload")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read upload {}: {}", name, e))
                })?;

                items.push(BatchItem {
                    name,
                    bytes: bytes.to_vec(),
                });
            }
            "quality" => {
                quality = parse_int_field(field, "quality").await?;
            }
            "format" => {
                let text = text_field(field, "format").await?;
                format = OutputFormat::from_name(text.trim()).ok_or_else(|| {
                    ApiError::bad_request(format!("Unsupported format: {}", text.trim()))
                })?;
            }
            "resize_factor" => {
                resize_factor = parse_int_field(field, "resize_factor").await?;
            }
            other => {
                tracing::debug!("Ignoring unknown form field: {}", other);
            }
        }
    }

    let request = TransformRequest::new(quality, format, resize_factor);
    tracing::info!(
        "Compress request: {} files, {:?}",
        items.len(),
        request
    );

    // CPU-bound work off the async runtime; the per-request loop itself
    // stays sequential.
    let outcomes = tokio::task::spawn_blocking(move || process_batch(items, &request))
        .await
        .map_err(|e| ApiError::internal(format!("Batch task failed: {}", e)))?;

    let mut results = Vec::new();
    let mut errors = Vec::new();

    for outcome in outcomes {
        match outcome.result {
            Ok(res) => results.push(CompressedFile {
                name: outcome.name,
                original_size: res.original_size,
                compressed_size: res.compressed_size,
                savings_pct: res.savings_pct,
                data_uri: format!("data:{};base64,{}", res.mime_type, base64::encode(&res.data)),
                mime_type: res.mime_type,
            }),
            Err(e) => errors.push(FailedFile {
                name: outcome.name,
                error: e.to_string(),
            }),
        }
    }

    Ok(Json(CompressResponse { results, errors }))
}

async fn text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read field {}: {}", name, e)))
}

async fn parse_int_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<u8, ApiError> {
    let text = text_field(field, name).await?;
    text.trim()
        .parse::<u8>()
        .map_err(|_| ApiError::bad_request(format!("Field {} must be a percentage integer: {}", name, text)))
}
