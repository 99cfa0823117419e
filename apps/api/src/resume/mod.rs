// Resume ingestion: MIME dispatch and decoding, then regex field inference.

pub mod decode;
pub mod extractor;
pub mod handlers;

use bytes::Bytes;

use crate::resume::decode::{extract_text, ResumeError, ResumeFormat};
use crate::resume::extractor::{parse_text, ParsedResumeData};

/// Decodes and parses an uploaded resume. Only an unrecognised MIME type fails;
/// every other problem degrades to empty fields.
pub async fn parse_resume(mime: &str, bytes: Bytes) -> Result<ParsedResumeData, ResumeError> {
    let format = ResumeFormat::from_mime(mime)?;
    let text = extract_text(format, bytes).await;
    Ok(parse_text(&text))
}
