//! Failure taxonomy of the assistant flow.

use crate::services::extraction::ExtractionError;
use crate::services::providers::ProviderError;
use service_core::error::AppError;
use thiserror::Error;

pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "Unsupported file format. Only PDF, DOCX, and TXT are allowed.";

#[derive(Debug, Error)]
pub enum AssistError {
    /// Upload filename has no supported extension. Raised before extraction.
    #[error("{}", UNSUPPORTED_FORMAT_MESSAGE)]
    UnsupportedFormat,

    #[error("Failed to read upload: {0}")]
    Upload(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Model(#[from] ProviderError),
}

impl AssistError {
    /// Metric label for the request outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            AssistError::UnsupportedFormat => "unsupported_format",
            AssistError::Upload(_) => "upload_failure",
            AssistError::Extraction(_) => "extraction_failure",
            AssistError::Model(_) => "model_failure",
        }
    }
}

/// Client-facing mapping: unsupported formats are client errors, everything
/// else collapses into a 500 with the cause in the detail string.
impl From<AssistError> for AppError {
    fn from(err: AssistError) -> Self {
        match err {
            AssistError::UnsupportedFormat => {
                AppError::BadRequest(anyhow::anyhow!(UNSUPPORTED_FORMAT_MESSAGE))
            }
            AssistError::Upload(_) | AssistError::Extraction(_) => {
                AppError::InternalError(anyhow::anyhow!("Error reading file: {}", err))
            }
            AssistError::Model(_) => AppError::InternalError(anyhow::anyhow!(
                "Error in processing the request: {}",
                err
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn unsupported_format_is_client_error() {
        let err: AppError = AssistError::UnsupportedFormat.into();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), UNSUPPORTED_FORMAT_MESSAGE);
    }

    #[test]
    fn model_failure_keeps_underlying_message() {
        let err: AppError =
            AssistError::Model(ProviderError::ApiError("quota exceeded".to_string())).into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Error in processing the request: API error: quota exceeded"
        );
    }

    #[test]
    fn extraction_failure_is_reported_as_read_error() {
        let err: AppError =
            AssistError::Extraction(ExtractionError::PdfParsing("bad xref".to_string())).into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Error reading file: Failed to parse PDF: bad xref"
        );
    }
}
