use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::{debug, warn};

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const DOC_MIME: &str = "application/msword";

#[derive(Debug, Error, PartialEq)]
pub enum ResumeError {
    #[error("Unsupported file format. Please upload a PDF, Word document, or text file.")]
    UnsupportedFormat { mime: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Word,
    PlainText,
}

impl ResumeFormat {
    /// Maps a MIME type (parameters such as `charset` ignored) to a decoder.
    pub fn from_mime(mime: &str) -> Result<Self, ResumeError> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PDF_MIME => Ok(ResumeFormat::Pdf),
            DOCX_MIME | DOC_MIME => Ok(ResumeFormat::Word),
            t if t.starts_with("text/") => Ok(ResumeFormat::PlainText),
            _ => Err(ResumeError::UnsupportedFormat {
                mime: mime.to_string(),
            }),
        }
    }
}

/// Decodes a document to plain text. Decoding failures degrade to empty text
/// so extraction yields default values instead of an error.
pub async fn extract_text(format: ResumeFormat, bytes: Bytes) -> String {
    let decoded = match format {
        ResumeFormat::PlainText => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        ResumeFormat::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|e| anyhow::anyhow!("failed to extract PDF text: {e}"))
        })
        .await
        .context("PDF extraction task panicked")
        .and_then(|r| r),
        ResumeFormat::Word => tokio::task::spawn_blocking(move || docx_text(&bytes))
            .await
            .context("DOCX extraction task panicked")
            .and_then(|r| r),
    };

    match decoded {
        Ok(text) => {
            debug!(?format, chars = text.len(), "Resume decoded");
            text
        }
        Err(e) => {
            warn!(?format, "Resume could not be decoded, continuing with empty text: {e:#}");
            String::new()
        }
    }
}

/// Body text of a DOCX package: `w:t` runs, one line per paragraph.
fn docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).context("document is not a zip package")?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .context("package has no word/document.xml")?
        .read_to_string(&mut xml)?;

    document_xml_text(&xml)
}

fn document_xml_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => out.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Smith</w:t></w:r></w:p>
    <w:p><w:r><w:t>jane@x.com</w:t><w:tab/><w:t>R&amp;D</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            zip.start_file("word/document.xml", zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(document_xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_format_from_mime() {
        assert_eq!(ResumeFormat::from_mime("application/pdf"), Ok(ResumeFormat::Pdf));
        assert_eq!(ResumeFormat::from_mime(DOCX_MIME), Ok(ResumeFormat::Word));
        assert_eq!(ResumeFormat::from_mime("application/msword"), Ok(ResumeFormat::Word));
        assert_eq!(
            ResumeFormat::from_mime("text/plain; charset=utf-8"),
            Ok(ResumeFormat::PlainText)
        );
        assert_eq!(ResumeFormat::from_mime("Text/Markdown"), Ok(ResumeFormat::PlainText));
    }

    #[test]
    fn test_image_mime_is_unsupported() {
        let err = ResumeFormat::from_mime("image/png").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported file format. Please upload a PDF, Word document, or text file."
        );
        assert!(ResumeFormat::from_mime("").is_err());
    }

    #[test]
    fn test_document_xml_paragraphs_become_lines() {
        let text = document_xml_text(DOCUMENT_XML).unwrap();
        assert_eq!(text, "Jane Smith\njane@x.com\tR&D\n");
    }

    #[test]
    fn test_docx_package_round_trip() {
        let text = docx_text(&docx_bytes(DOCUMENT_XML)).unwrap();
        assert!(text.starts_with("Jane Smith\n"));
    }

    #[tokio::test]
    async fn test_plain_text_is_lossy_utf8() {
        let bytes = Bytes::from_static(b"Jane Smith\n\xff");
        let text = extract_text(ResumeFormat::PlainText, bytes).await;
        assert!(text.starts_with("Jane Smith\n"));
    }

    #[tokio::test]
    async fn test_corrupt_documents_degrade_to_empty_text() {
        let junk = Bytes::from_static(b"definitely not a document");
        assert_eq!(extract_text(ResumeFormat::Word, junk.clone()).await, "");
        assert_eq!(extract_text(ResumeFormat::Pdf, junk).await, "");
    }
}
