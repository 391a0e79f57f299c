//! Content normalization.
//!
//! Every file's text goes through exactly one strategy chosen from its
//! mimetype. There is no fallback between strategies.

use async_trait::async_trait;

use drivegate_common::{Error, Result};
use drivegate_storage::{GOOGLE_DOC_MIME_TYPE, PDF_MIME_TYPE};

/// How text is obtained for a mimetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Ask Drive to export the native document as plain text.
    NativeExport,
    /// Download the raw bytes and run PDF text extraction.
    PdfDownload,
    /// No strategy exists.
    Unsupported,
}

impl ExtractionStrategy {
    /// Select the strategy for `mime_type`. Matching is exact.
    pub fn for_mime_type(mime_type: &str) -> Self {
        match mime_type {
            GOOGLE_DOC_MIME_TYPE => ExtractionStrategy::NativeExport,
            PDF_MIME_TYPE => ExtractionStrategy::PdfDownload,
            _ => ExtractionStrategy::Unsupported,
        }
    }
}

/// Error for a mimetype without a strategy.
pub fn unsupported(mime_type: &str) -> Error {
    Error::UnsupportedMediaType(format!(
        "Unsupported mimeType for text extraction: {}",
        mime_type
    ))
}

/// Decode exported document bytes.
///
/// Invalid UTF-8 sequences are dropped; everything else, including a
/// leading byte-order mark, is kept as exported.
pub fn decode_export(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Turns a PDF's bytes into text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract all text from a fully downloaded PDF.
    async fn extract_pdf(&self, bytes: Vec<u8>) -> Result<String>;
}

/// [`TextExtractor`] backed by the `pdf-extract` crate.
///
/// Parsing is CPU-bound and runs on the blocking pool. A panic inside the
/// parser surfaces as an extraction error.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_pdf(&self, bytes: Vec<u8>) -> Result<String> {
        let size = bytes.len();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| Error::Extraction(format!("PDF extraction aborted: {}", e)))?
            .map_err(|e| Error::Extraction(format!("Failed to extract text from PDF: {}", e)))?;

        tracing::debug!(bytes = size, chars = text.len(), "Extracted PDF text");
        Ok(text)
    }
}
