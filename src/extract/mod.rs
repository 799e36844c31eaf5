//! Text extraction from uploaded documents and web pages.
//!
//! These are thin wrappers around external collaborators: a PDF parser, a
//! DOCX archive reader and an HTML main-content extractor. The pipeline
//! only ever sees plain text.

pub mod docx;
pub mod error;
pub mod pdf;
pub mod web;

pub use docx::extract_docx;
pub use error::ExtractError;
pub use pdf::extract_pdf;
pub use web::PageFetcher;
