use super::ExtractionError;
use lopdf::Document;

/// Concatenate the text of every page in page order, without separators.
///
/// A page whose text cannot be decoded contributes nothing; only a buffer that
/// does not load as a PDF at all is an error.
pub(super) fn extract_text(content: &[u8]) -> Result<String, ExtractionError> {
    let document =
        Document::load_mem(content).map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

    let mut text = String::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                tracing::warn!(
                    page = page_number,
                    error = %e,
                    "Skipping PDF page without extractable text"
                );
            }
        }
    }

    Ok(text)
}
