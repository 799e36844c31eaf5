//! Error types for text extraction.

use thiserror::Error;

/// Errors that can occur while extracting text from documents or web pages.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// HTTP client configuration error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Content type not supported.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// File extension not supported for upload extraction.
    #[error("Unsupported file type.")]
    UnsupportedFileType(String),

    /// PDF parsing error.
    #[error("PDF parsing error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// DOCX archive error.
    #[error("DOCX archive error: {0}")]
    DocxArchive(#[from] zip::result::ZipError),

    /// DOCX markup error.
    #[error("DOCX markup error: {0}")]
    DocxMarkup(#[from] quick_xml::Error),

    /// The page yielded no readable main content.
    #[error("Failed to extract content from URL")]
    NoContent(String),

    /// Content extraction failed.
    #[error("Content extraction failed: {0}")]
    ExtractionFailed(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Whether the error was caused by the caller's input rather than the
    /// service or a collaborator.
    #[must_use]
    pub const fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_) | Self::UnsupportedFileType(_) | Self::NoContent(_)
        )
    }
}
