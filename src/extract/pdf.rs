//! PDF text extraction.

use lopdf::Document;
use tracing::warn;

use crate::extract::error::ExtractError;

/// Extract the text content of a PDF held in memory.
///
/// Pages that cannot be decoded are skipped with a warning; the document as
/// a whole only fails if it does not parse at all.
///
/// # Errors
/// Returns an error if the bytes are not a readable PDF document.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let document = Document::load_mem(bytes)?;

    let mut text = String::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => warn!(page = page_number, "skipping unreadable PDF page: {e}"),
        }
    }

    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_error_instead_of_panic() {
        let result = extract_pdf(b"this is not a pdf at all");
        assert!(matches!(result, Err(ExtractError::Pdf(_))));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(extract_pdf(&[]).is_err());
    }
}
