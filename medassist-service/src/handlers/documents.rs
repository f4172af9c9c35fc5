use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

use crate::dtos::DocumentSummaryResponse;
use crate::error::AssistError;
use crate::services::metrics;
use crate::startup::AppState;

/// Multipart field carrying the uploaded document.
const FILE_FIELD: &str = "file";

pub async fn process_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DocumentSummaryResponse>, AppError> {
    let (filename, content) = match read_file_field(&mut multipart).await {
        Ok(upload) => upload,
        Err(e) => {
            metrics::record_request("process_document", upload_outcome(&e));
            return Err(e);
        }
    };

    tracing::info!(
        filename = %filename,
        size = content.len(),
        "Document upload received"
    );

    match state.assistant.summarize_document(&filename, content).await {
        Ok(summary) => {
            metrics::record_request("process_document", "success");
            Ok(Json(DocumentSummaryResponse { summary }))
        }
        Err(e) => {
            metrics::record_request("process_document", e.outcome());
            Err(e.into())
        }
    }
}

/// Read the whole `file` field into memory. Other fields are ignored.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content = field.bytes().await.map_err(upload_error)?;
        return Ok((filename, content));
    }

    Err(AppError::ValidationError(anyhow::anyhow!(
        "Field '{}' is required",
        FILE_FIELD
    )))
}

/// Metric label for a request that failed before extraction started.
fn upload_outcome(err: &AppError) -> &'static str {
    match err {
        AppError::ValidationError(_) => "validation_failure",
        AppError::PayloadTooLarge(_) => "payload_too_large",
        _ => "upload_failure",
    }
}

fn upload_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(anyhow::anyhow!("Error reading file: {}", err.body_text()))
    } else {
        AssistError::Upload(err.body_text()).into()
    }
}
