use super::ExtractionError;

/// Decode the upload as strict UTF-8, byte for byte.
pub(super) fn extract_text(content: &[u8]) -> Result<String, ExtractionError> {
    Ok(String::from_utf8(content.to_vec())?)
}
