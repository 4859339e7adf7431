//! Data models: extracted field vocabulary and pipeline configuration.

pub mod config;
pub mod fields;

pub use config::{ExtractionConfig, FratgenConfig, PdfConfig};
pub use fields::{ExtractedFields, FieldKey};
