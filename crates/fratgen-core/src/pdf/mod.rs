//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text layer of the entire PDF, pages in order.
    fn extract_text(&self) -> Result<String>;

    /// Whether the document carries a usable text layer.
    ///
    /// Scanned documents without OCR text return `false`; extraction on
    /// such documents yields missing fields, not an error.
    fn has_text_layer(&self, min_len: usize) -> bool {
        self.extract_text()
            .map(|text| text.trim().len() >= min_len)
            .unwrap_or(false)
    }
}
