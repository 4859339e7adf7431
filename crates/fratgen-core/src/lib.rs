//! Core library for Danish termination-document preparation.
//!
//! This crate provides:
//! - PDF text-layer recovery (employment contracts, payslips)
//! - Anchor-window field extraction (CVR/CPR blocks, salary, dates,
//!   bonus, clause references)
//! - Template context assembly merging extracted fields with
//!   user-edited form values
//!
//! The document renderer, web UI and case-management API live outside
//! this crate; it ends at a flat key→value mapping.

pub mod context;
pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;

pub use context::{ContextBuilder, FormValues, TemplateContext};
pub use error::{FratgenError, PdfError, Result};
pub use extract::{read_pdf_text, ContractExtractor, FieldsExtractor, PayslipExtractor};
pub use models::{ExtractedFields, ExtractionConfig, FieldKey, FratgenConfig, PdfConfig};
pub use pdf::{PdfExtractor, PdfProcessor};
