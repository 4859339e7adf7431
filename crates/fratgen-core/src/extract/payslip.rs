//! Payslip field extraction.
//!
//! Payslips are table-shaped, so the gross salary is found by a label
//! vocabulary rather than phrase patterns, harvesting every numeral on
//! the label line and the line below it. Net-pay and tax lines carry
//! equally plausible numbers and are excluded explicitly.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{ExtractionConfig, ExtractedFields, FieldKey};

use super::rules::patterns::{
    BONUS_NEAR, BONUS_YEAR, ISO_DATE, NAVN_LINE, NETTO_LABEL, NUMERAL, PAYSLIP_SALARY_LABELS,
    PAY_PERIOD, SALARY_NEAR_LOEN, TAX_LABEL,
};
use super::rules::{
    canonical_amount, ceil_char_boundary, floor_char_boundary, normalize_whitespace, parse_amount,
    parse_dk_date, LineIndex,
};
use super::FieldsExtractor;

/// Radius in bytes around a fallback salary match inspected for net-pay
/// and tax labels.
const EXCLUSION_RADIUS: usize = 20;

/// Extractor for payslips.
pub struct PayslipExtractor {
    min_salary: Decimal,
    max_salary: Decimal,
}

impl PayslipExtractor {
    /// Create an extractor with default plausibility guards.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor from an [`ExtractionConfig`].
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_salary: Decimal::from(config.min_monthly_salary),
            max_salary: Decimal::from(config.max_monthly_salary),
        }
    }

    /// Override the open plausibility range for salaries.
    pub fn with_salary_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.min_salary = min;
        self.max_salary = max;
        self
    }

    fn plausible(&self, amount: Decimal) -> bool {
        amount > self.min_salary && amount < self.max_salary
    }

    /// Labeled salary: for the first label line that yields a plausible
    /// numeral on itself or the following line, take the maximum.
    fn extract_labeled_salary(&self, lines: &LineIndex, out: &mut ExtractedFields) {
        for label in PAYSLIP_SALARY_LABELS.iter() {
            for idx in 0..lines.len() {
                let Some(line) = lines.get(idx) else { break };
                if !label.is_match(line) {
                    continue;
                }

                let mut combined = line.to_string();
                if let Some(next) = lines.get(idx + 1) {
                    combined.push(' ');
                    combined.push_str(next);
                }

                let best = NUMERAL
                    .find_iter(&combined)
                    .filter_map(|m| parse_amount(m.as_str()))
                    .filter(|amount| self.plausible(*amount))
                    .max();

                if let Some(best) = best {
                    out.set(FieldKey::MonthlySalary, canonical_amount(best));
                    return;
                }
            }
        }
    }

    /// Fallback salary: any numeral within 80 characters of a "løn"
    /// token, skipping matches adjacent to net-pay or tax labels.
    fn extract_fallback_salary(&self, text: &str, out: &mut ExtractedFields) {
        if out.contains(FieldKey::MonthlySalary) {
            return;
        }

        let mut candidates = Vec::new();
        for caps in SALARY_NEAR_LOEN.captures_iter(text) {
            let whole = caps.get(0).expect("match group 0");
            let start = floor_char_boundary(text, whole.start().saturating_sub(EXCLUSION_RADIUS));
            let end = ceil_char_boundary(text, whole.end() + EXCLUSION_RADIUS);
            let segment = &text[start..end];
            if NETTO_LABEL.is_match(segment) || TAX_LABEL.is_match(segment) {
                debug!("skipping salary candidate near excluded label: {:?}", segment);
                continue;
            }

            if let Some(amount) = parse_amount(&caps[1]) {
                if self.plausible(amount) {
                    candidates.push(amount);
                }
            }
        }

        if let Some(best) = candidates.into_iter().max() {
            out.set(FieldKey::MonthlySalary, canonical_amount(best));
        }
    }

    /// Bonus amount: the maximum positive numeral on any "bonus" line.
    fn extract_bonus(&self, text: &str, out: &mut ExtractedFields) {
        let best = BONUS_NEAR
            .captures_iter(text)
            .filter_map(|caps| parse_amount(&caps[1]))
            .filter(|amount| amount > &Decimal::ZERO)
            .max();
        if let Some(best) = best {
            out.set(FieldKey::BonusAmount, canonical_amount(best));
        }

        if let Some(caps) = BONUS_YEAR.captures(text) {
            out.set(FieldKey::BonusYear, &caps[1]);
        } else {
            // No explicit bonus year: borrow it from the pay period
            let period = out
                .get(FieldKey::PeriodTo)
                .or_else(|| out.get(FieldKey::PeriodFrom));
            if let Some(date) = period {
                if ISO_DATE.is_match(date) {
                    let year = date[..4].to_string();
                    out.set(FieldKey::BonusYear, year);
                }
            }
        }
    }
}

impl Default for PayslipExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldsExtractor for PayslipExtractor {
    fn extract(&self, text: &str) -> ExtractedFields {
        let mut out = ExtractedFields::new();
        let lines = LineIndex::new(text);

        if let Some(caps) = PAY_PERIOD.captures(text) {
            out.set(FieldKey::PeriodFrom, parse_dk_date(&caps[1]));
            out.set(FieldKey::PeriodTo, parse_dk_date(&caps[2]));
        }

        self.extract_labeled_salary(&lines, &mut out);
        self.extract_fallback_salary(text, &mut out);

        if let Some(caps) = NAVN_LINE.captures(text) {
            out.set(FieldKey::EmployeeName, normalize_whitespace(&caps[1]));
        }

        self.extract_bonus(text, &mut out);

        debug!("payslip extraction found {} fields", out.len());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> ExtractedFields {
        PayslipExtractor::new().extract(text)
    }

    #[test]
    fn test_period_and_labeled_salary() {
        let text = "Fra: 01-01-2025 Til: 31-01-2025\nFast månedsløn 36.500,00";
        let fields = extract(text);
        assert_eq!(fields.get(FieldKey::PeriodFrom), Some("2025-01-01"));
        assert_eq!(fields.get(FieldKey::PeriodTo), Some("2025-01-31"));
        assert_eq!(fields.get(FieldKey::MonthlySalary), Some("36500"));
    }

    #[test]
    fn test_period_spanning_intermediate_text() {
        let text = "Lønperiode\nFra: 01.02.2025\nAfdeling 12\nTil: 28.02.2025";
        let fields = extract(text);
        assert_eq!(fields.get(FieldKey::PeriodFrom), Some("2025-02-01"));
        assert_eq!(fields.get(FieldKey::PeriodTo), Some("2025-02-28"));
    }

    #[test]
    fn test_amount_on_line_below_label() {
        let text = "Månedsløn\n38.250,00\nPension 3.000,00";
        let fields = extract(text);
        assert_eq!(fields.get(FieldKey::MonthlySalary), Some("38250"));
    }

    #[test]
    fn test_label_priority_over_later_labels() {
        // "Fast månedsløn" outranks "Månedsløn" even when the latter
        // appears first in the document.
        let text = "Månedsløn 30.000,00\nFast månedsløn 36.500,00";
        let fields = extract(text);
        assert_eq!(fields.get(FieldKey::MonthlySalary), Some("36500"));
    }

    #[test]
    fn test_implausible_label_numbers_ignored() {
        // Account codes on the label line fall outside the plausible
        // range and must not shadow the real amount.
        let text = "Fast månedsløn konto 1100 36.500,00";
        let fields = extract(text);
        assert_eq!(fields.get(FieldKey::MonthlySalary), Some("36500"));
    }

    #[test]
    fn test_fallback_scan_excludes_netto_and_tax() {
        let text = "Nettoløn 25.000,00\nA-skat løn 12.000,00\nUdbetalt løn i alt 31.000,00";
        let fields = extract(text);
        assert_eq!(fields.get(FieldKey::MonthlySalary), Some("31000"));
    }

    #[test]
    fn test_fallback_scan_takes_maximum() {
        let text = "Løn 28.000,00\nFerieløn 6.000,00";
        let fields = extract(text);
        assert_eq!(fields.get(FieldKey::MonthlySalary), Some("28000"));
    }

    #[test]
    fn test_no_salary_when_nothing_plausible() {
        let text = "Løn 100,00\nNettoløn 25.000,00";
        let fields = extract(text);
        assert!(!fields.contains(FieldKey::MonthlySalary));
    }

    #[test]
    fn test_employee_name() {
        let text = "Navn:  Jens   Jensen\nAdresse: Parkvej 7";
        let fields = extract(text);
        assert_eq!(fields.get(FieldKey::EmployeeName), Some("Jens Jensen"));
    }

    #[test]
    fn test_bonus_amount_takes_maximum_positive() {
        let text = "Bonus 0,00\nBonus udbetaling 15.000,00";
        let fields = extract(text);
        assert_eq!(fields.get(FieldKey::BonusAmount), Some("15000"));
    }

    #[test]
    fn test_bonus_year_from_explicit_mention() {
        let text = "Fra: 01-01-2024 Til: 31-01-2024\nBonus for 2023 udbetales";
        let fields = extract(text);
        assert_eq!(fields.get(FieldKey::BonusYear), Some("2023"));
    }

    #[test]
    fn test_bonus_year_derived_from_period() {
        let text = "Fra: 01-01-2025 Til: 31-01-2025\nFast månedsløn 36.500,00";
        let fields = extract(text);
        assert_eq!(fields.get(FieldKey::BonusYear), Some("2025"));
    }

    #[test]
    fn test_unparseable_period_kept_verbatim_and_no_year_derived() {
        let text = "Fra: 99-99-9999 Til: 99-99-9999";
        let fields = extract(text);
        assert_eq!(fields.get(FieldKey::PeriodFrom), Some("99-99-9999"));
        assert!(!fields.contains(FieldKey::BonusYear));
    }

    #[test]
    fn test_empty_text_yields_empty_mapping() {
        assert!(extract("").is_empty());
    }
}
