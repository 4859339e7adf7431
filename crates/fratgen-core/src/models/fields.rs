//! Extracted field vocabulary and the first-match-wins field mapping.

use std::collections::BTreeMap;

use serde::Serialize;

/// The closed vocabulary of fields the extractors can produce.
///
/// Serialized names are the exact placeholder names used by the document
/// templates, so the mapping can be handed to the renderer as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FieldKey {
    /// Employer legal name.
    #[serde(rename = "C_Name")]
    CompanyName,
    /// Employer street address including postal code.
    #[serde(rename = "C_Address")]
    CompanyAddress,
    /// Employer CVR registration number (8 digits).
    #[serde(rename = "C_CoRegCVR")]
    CompanyCvr,
    /// Employee full name.
    #[serde(rename = "P_Name")]
    EmployeeName,
    /// Employee address.
    #[serde(rename = "P_Address")]
    EmployeeAddress,
    /// First day of employment.
    #[serde(rename = "EmploymentStart")]
    EmploymentStart,
    /// Gross monthly salary, canonical amount string.
    #[serde(rename = "MonthlySalary")]
    MonthlySalary,
    /// Year a bonus applies to.
    #[serde(rename = "BonusYear")]
    BonusYear,
    /// Bonus amount, canonical amount string.
    #[serde(rename = "BonusAmount")]
    BonusAmount,
    /// Contract clause number covering confidentiality.
    #[serde(rename = "ConfidentialityClauseRef")]
    ConfidentialityClauseRef,
    /// Contract clause number covering intellectual property.
    #[serde(rename = "EmploymentClauseRef")]
    EmploymentClauseRef,
    /// Payslip period start.
    #[serde(rename = "PeriodFrom")]
    PeriodFrom,
    /// Payslip period end.
    #[serde(rename = "PeriodTo")]
    PeriodTo,
}

impl FieldKey {
    /// All keys, in template order.
    pub const ALL: [FieldKey; 13] = [
        FieldKey::CompanyName,
        FieldKey::CompanyAddress,
        FieldKey::CompanyCvr,
        FieldKey::EmployeeName,
        FieldKey::EmployeeAddress,
        FieldKey::EmploymentStart,
        FieldKey::MonthlySalary,
        FieldKey::BonusYear,
        FieldKey::BonusAmount,
        FieldKey::ConfidentialityClauseRef,
        FieldKey::EmploymentClauseRef,
        FieldKey::PeriodFrom,
        FieldKey::PeriodTo,
    ];

    /// The template placeholder name for this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::CompanyName => "C_Name",
            FieldKey::CompanyAddress => "C_Address",
            FieldKey::CompanyCvr => "C_CoRegCVR",
            FieldKey::EmployeeName => "P_Name",
            FieldKey::EmployeeAddress => "P_Address",
            FieldKey::EmploymentStart => "EmploymentStart",
            FieldKey::MonthlySalary => "MonthlySalary",
            FieldKey::BonusYear => "BonusYear",
            FieldKey::BonusAmount => "BonusAmount",
            FieldKey::ConfidentialityClauseRef => "ConfidentialityClauseRef",
            FieldKey::EmploymentClauseRef => "EmploymentClauseRef",
            FieldKey::PeriodFrom => "PeriodFrom",
            FieldKey::PeriodTo => "PeriodTo",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flat mapping of extracted fields.
///
/// Absence means "not found", never an error. Insertion is
/// first-match-wins: once a key holds a value it is never overwritten,
/// and empty values are never stored.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ExtractedFields {
    values: BTreeMap<FieldKey, String>,
}

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key` unless the key is already set or the
    /// value is blank.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        self.values.entry(key).or_insert(value);
    }

    /// Like [`set`](Self::set) but accepts an optional value.
    pub fn set_opt(&mut self, key: FieldKey, value: Option<String>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Flatten into a plain string map keyed by template placeholder name.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.clone()))
            .collect()
    }

    /// Merge two extraction results, `overlay` taking precedence.
    ///
    /// Used to combine contract and payslip output before pre-filling
    /// form defaults: payslip values shadow contract values.
    pub fn merged(base: &ExtractedFields, overlay: &ExtractedFields) -> ExtractedFields {
        let mut out = overlay.clone();
        for (key, value) in base.iter() {
            out.set(key, value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_match_wins() {
        let mut fields = ExtractedFields::new();
        fields.set(FieldKey::CompanyCvr, "12345678");
        fields.set(FieldKey::CompanyCvr, "87654321");
        assert_eq!(fields.get(FieldKey::CompanyCvr), Some("12345678"));
    }

    #[test]
    fn test_blank_values_are_dropped() {
        let mut fields = ExtractedFields::new();
        fields.set(FieldKey::CompanyName, "   ");
        fields.set(FieldKey::CompanyName, "");
        assert!(fields.is_empty());
        assert!(!fields.contains(FieldKey::CompanyName));
    }

    #[test]
    fn test_merged_overlay_precedence() {
        let mut contract = ExtractedFields::new();
        contract.set(FieldKey::MonthlySalary, "30000");
        contract.set(FieldKey::CompanyName, "ABC A/S");

        let mut payslip = ExtractedFields::new();
        payslip.set(FieldKey::MonthlySalary, "36500");

        let merged = ExtractedFields::merged(&contract, &payslip);
        assert_eq!(merged.get(FieldKey::MonthlySalary), Some("36500"));
        assert_eq!(merged.get(FieldKey::CompanyName), Some("ABC A/S"));
    }

    #[test]
    fn test_serializes_under_template_names() {
        let mut fields = ExtractedFields::new();
        fields.set(FieldKey::CompanyCvr, "12345678");
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"C_CoRegCVR":"12345678"}"#);
    }
}
