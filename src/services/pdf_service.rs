//! PDF-to-text conversion.

use async_trait::async_trait;

use crate::errors::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PdfTextExtractor: Send + Sync {
    /// Extracts all text from a PDF byte buffer.
    async fn extract_text(&self, data: Vec<u8>) -> AppResult<String>;
}

/// Extractor backed by the `pdf-extract` crate.
///
/// Parsing is CPU-bound and panics on some malformed PDFs, so it runs on the
/// blocking pool where a panic surfaces as a join error.
pub struct PdfExtractTextExtractor;

#[async_trait]
impl PdfTextExtractor for PdfExtractTextExtractor {
    async fn extract_text(&self, data: Vec<u8>) -> AppResult<String> {
        let parsed = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
            .await
            .map_err(|e| AppError::InternalError(format!("PDF parse task failed: {}", e)))?;

        parsed.map_err(|e| AppError::InternalError(format!("PDF parse failed: {}", e)))
    }
}
