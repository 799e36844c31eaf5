//! DOCX text extraction.
//!
//! A DOCX file is a zip archive; the document body lives in
//! `word/document.xml`. Text runs are collected in order, with paragraph
//! ends mapped to newlines.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::extract::error::ExtractError;

/// Extract the text content of a DOCX document held in memory.
///
/// # Errors
/// Returns an error if the archive or the document markup cannot be read.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::Empty(e) if e.name().as_ref() == b"w:tab" => text.push(' '),
            Event::Empty(e) if e.name().as_ref() == b"w:br" => text.push('\n'),
            Event::End(e) if e.name().as_ref() == b"w:p" => text.push('\n'),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text.trim().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    use super::*;

    fn make_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extracts_paragraph_text() {
        let bytes = make_docx(
            r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
    <w:p><w:r><w:t>Second one.</w:t></w:r></w:p>
  </w:body>
</w:document>"#,
        );

        let text = extract_docx(&bytes).unwrap();
        assert!(text.contains("First paragraph."));
        assert!(text.contains("Second one."));
        // Paragraph boundary survives as a line break.
        let first_line = text.lines().next().unwrap();
        assert!(first_line.contains("First paragraph."));
        assert!(!first_line.contains("Second one."));
    }

    #[test]
    fn test_missing_document_part_is_an_error() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/other.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(matches!(
            extract_docx(&bytes),
            Err(ExtractError::DocxArchive(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_error_instead_of_panic() {
        assert!(extract_docx(b"not a zip archive").is_err());
    }
}
