//! Plain-text extraction from uploaded documents.
//!
//! The format is a closed set resolved from the upload's filename before any
//! bytes are parsed; anything outside it is rejected by the caller.

mod docx;
mod pdf;
mod txt;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::services::metrics;

/// Error type for extraction operations.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to parse PDF: {0}")]
    PdfParsing(String),

    #[error("Failed to parse DOCX: {0}")]
    DocxParsing(String),

    #[error("Text is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Extraction task failed: {0}")]
    Interrupted(String),
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Resolve the format from the text after the last `.` of `filename`,
    /// compared case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        filename
            .rsplit('.')
            .next()
            .and_then(|ext| ext.to_lowercase().parse().ok())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            _ => Err(format!("Unsupported document format: {}", s)),
        }
    }
}

/// Extract the plain text of `content` interpreted as `format`.
pub fn extract(content: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
    let result = match format {
        DocumentFormat::Pdf => pdf::extract_text(content),
        DocumentFormat::Docx => docx::extract_text(content),
        DocumentFormat::Txt => txt::extract_text(content),
    };

    match &result {
        Ok(text) => {
            metrics::record_extraction(format.as_str(), "success");
            tracing::debug!(
                format = %format,
                input_bytes = content.len(),
                text_len = text.len(),
                "Extracted document text"
            );
        }
        Err(e) => {
            metrics::record_extraction(format.as_str(), "failure");
            tracing::warn!(format = %format, error = %e, "Document text extraction failed");
        }
    }

    result
}
