//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the fratgen pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FratgenConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to treat the PDF as carrying a text layer.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lower bound for a plausible monthly salary, exclusive.
    ///
    /// Guards against non-salary numeric matches such as floor or room
    /// numbers ending up in the salary field.
    pub min_monthly_salary: u32,

    /// Upper bound for a plausible monthly salary, exclusive.
    pub max_monthly_salary: u32,

    /// Lines inspected above the CVR anchor for the employer block.
    pub employer_window: usize,

    /// Lines inspected above the CPR anchor for the employee block.
    pub employee_window: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_monthly_salary: 5_000,
            max_monthly_salary: 300_000,
            employer_window: 3,
            employee_window: 4,
        }
    }
}

impl FratgenConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
