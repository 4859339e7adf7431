//! Error types for the fratgen-core library.

use thiserror::Error;

/// Main error type for the fratgen library.
#[derive(Error, Debug)]
pub enum FratgenError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
///
/// These are the only hard failures in the pipeline: a document that
/// cannot be opened or paginated fails the whole extraction call. A
/// pattern that does not match is never an error.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Result type for the fratgen library.
pub type Result<T> = std::result::Result<T, FratgenError>;
