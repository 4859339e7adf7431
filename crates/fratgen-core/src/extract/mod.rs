//! Field extraction from recovered document text.
//!
//! Extraction over text is infallible: a pattern that does not match
//! leaves its field absent. Only the PDF step can fail, and only
//! structurally (unreadable document).

mod contract;
mod payslip;
pub mod rules;

pub use contract::ContractExtractor;
pub use payslip::PayslipExtractor;

use crate::error::Result;
use crate::models::ExtractedFields;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Recover the newline-joined text layer of a PDF.
///
/// A scanned document without OCR text yields an empty string, not an
/// error; only structural failures propagate.
pub fn read_pdf_text(data: &[u8]) -> Result<String> {
    let extractor = PdfExtractor::from_bytes(data)?;
    Ok(extractor.extract_text()?)
}

/// A stateless, single-pass field extractor over document text.
pub trait FieldsExtractor {
    /// Scan `text` and return every field found.
    fn extract(&self, text: &str) -> ExtractedFields;

    /// Extract fields straight from PDF bytes.
    fn extract_pdf(&self, data: &[u8]) -> Result<ExtractedFields> {
        Ok(self.extract(&read_pdf_text(data)?))
    }
}
