//! Document Extractor: turns an uploaded résumé (PDF or DOCX) into plain text.
//!
//! Output is whitespace-collapsed before it is handed to the prompt builder,
//! which keeps prompt size and model variance bounded.

mod docx;

use thiserror::Error;
use tracing::{debug, warn};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Could not extract text from the uploaded file: {0}")]
    ExtractionFailed(String),
}

/// The document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolves a declared media type. Parameters such as `; charset=...` are ignored.
    pub fn from_media_type(media_type: &str) -> Result<Self, ExtractionError> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PDF_MEDIA_TYPE => Ok(DocumentKind::Pdf),
            DOCX_MEDIA_TYPE => Ok(DocumentKind::Docx),
            "" => Err(ExtractionError::UnsupportedFormat(
                "missing content type".to_string(),
            )),
            _ => Err(ExtractionError::UnsupportedFormat(essence)),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            DocumentKind::Pdf => PDF_MEDIA_TYPE,
            DocumentKind::Docx => DOCX_MEDIA_TYPE,
        }
    }
}

/// Extracts whitespace-collapsed plain text from a document buffer.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::ExtractionFailed(
            "the file is empty".to_string(),
        ));
    }

    let raw = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::ExtractionFailed(format!("PDF parse error: {e}")))?,
        DocumentKind::Docx => docx::extract_docx_text(bytes)?,
    };

    let text = collapse_whitespace(&raw);
    if text.is_empty() {
        return Err(ExtractionError::ExtractionFailed(
            "no text found; the file might be empty or corrupted".to_string(),
        ));
    }

    debug!("Extracted {} chars from {:?} document", text.len(), kind);
    Ok(text)
}

/// Runs [`extract_text`] on the blocking pool. A panicking parser is reported
/// as `ExtractionFailed`.
pub async fn extract_text_blocking(
    bytes: bytes::Bytes,
    kind: DocumentKind,
) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes, kind))
        .await
        .unwrap_or_else(|e| {
            warn!("Document parser aborted: {e}");
            Err(ExtractionError::ExtractionFailed(
                "the document parser aborted".to_string(),
            ))
        })
}

/// Collapses every run of whitespace into a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
