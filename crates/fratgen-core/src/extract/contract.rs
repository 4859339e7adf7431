//! Employment-contract field extraction.
//!
//! Contracts are loosely structured: the employer block ends in a CVR
//! line, the employee block ends in a CPR line, and everything else is
//! found by phrase patterns. Each field group is a single anchor-window
//! scan; a group that finds nothing simply leaves its fields unset.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{ExtractionConfig, ExtractedFields, FieldKey};

use super::rules::patterns::{
    AND_PARTY, BONUS_AMOUNT, BONUS_YEAR, CPR_ANCHOR, CVR_ANCHOR, DK_POSTAL, EFFECT_FROM,
    LEADING_PARTY_TOKEN, SALARY_PATTERNS,
};
use super::rules::{
    canonical_amount, normalize_whitespace, parse_amount, parse_dk_date, LineIndex,
    CONFIDENTIALITY_CLAUSE, IP_CLAUSE,
};
use super::FieldsExtractor;

/// Extractor for employment contracts.
pub struct ContractExtractor {
    min_monthly_salary: Decimal,
    employer_window: usize,
    employee_window: usize,
}

impl ContractExtractor {
    /// Create an extractor with default guards.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor from an [`ExtractionConfig`].
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_monthly_salary: Decimal::from(config.min_monthly_salary),
            employer_window: config.employer_window,
            employee_window: config.employee_window,
        }
    }

    /// Override the minimum plausible monthly salary.
    pub fn with_min_monthly_salary(mut self, min: Decimal) -> Self {
        self.min_monthly_salary = min;
        self
    }

    /// Employer block: up to `employer_window` lines above the CVR line.
    /// The first window line is the name, the rest form the address up
    /// to and including the first line with a postal code.
    fn extract_employer(&self, lines: &LineIndex, out: &mut ExtractedFields) {
        let Some(cvr_idx) = lines.position(&CVR_ANCHOR) else {
            return;
        };

        if let Some(caps) = lines.get(cvr_idx).and_then(|line| CVR_ANCHOR.captures(line)) {
            out.set(FieldKey::CompanyCvr, &caps[1]);
        }

        let window = lines.window_before(cvr_idx, self.employer_window);
        let Some(first) = window.first() else {
            return;
        };

        let name = LEADING_PARTY_TOKEN.replace(first, "");
        out.set(FieldKey::CompanyName, name.trim());

        let rest = &window[1..];
        let cut = rest
            .iter()
            .position(|line| DK_POSTAL.is_match(line))
            .map(|idx| idx + 1)
            .unwrap_or(rest.len());
        if cut > 0 {
            out.set(
                FieldKey::CompanyAddress,
                normalize_whitespace(&rest[..cut].join(" ")),
            );
        }
    }

    /// Employee block: up to `employee_window` lines above the CPR line.
    /// Without a CPR anchor, fall back to the party introduced by "AND".
    fn extract_employee(&self, text: &str, lines: &LineIndex, out: &mut ExtractedFields) {
        if let Some(cpr_idx) = lines.position(&CPR_ANCHOR) {
            let window = lines.window_before(cpr_idx, self.employee_window);

            // Name: the last window line with no digits
            if let Some(name) = window
                .iter()
                .rev()
                .find(|line| !line.chars().any(|c| c.is_ascii_digit()))
            {
                out.set(
                    FieldKey::EmployeeName,
                    normalize_whitespace(&LEADING_PARTY_TOKEN.replace(name, "")),
                );
            }

            // Address: street line + postal line when a postal code is
            // present, otherwise the last line carrying any digit
            if let Some(postal_idx) = window.iter().position(|line| DK_POSTAL.is_match(line)) {
                let street = if postal_idx >= 1 {
                    window[postal_idx - 1].as_str()
                } else {
                    ""
                };
                out.set(
                    FieldKey::EmployeeAddress,
                    normalize_whitespace(&format!("{} {}", street, window[postal_idx])),
                );
            } else if let Some(addr) = window
                .iter()
                .rev()
                .find(|line| line.chars().any(|c| c.is_ascii_digit()))
            {
                out.set(FieldKey::EmployeeAddress, normalize_whitespace(addr));
            }
        } else if let Some(caps) = AND_PARTY.captures(text) {
            let tail_start = caps.get(1).map(|m| m.start()).unwrap_or(0);
            let tail: Vec<&str> = text[tail_start..]
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();

            if let Some(first) = tail.first() {
                out.set(FieldKey::EmployeeName, *first);
            }
            for segment in tail.iter().skip(1).take(3) {
                if DK_POSTAL.is_match(segment) {
                    out.set(FieldKey::EmployeeAddress, normalize_whitespace(segment));
                    break;
                }
            }
        }
    }

    /// Salary pattern chain: first pattern whose capture parses wins.
    /// Annual figures are divided by 12; anything at or below the
    /// minimum guard is discarded.
    fn extract_salary(&self, text: &str, out: &mut ExtractedFields) {
        let mut monthly = None;
        for pattern in SALARY_PATTERNS.iter() {
            let Some(caps) = pattern.regex.captures(text) else {
                continue;
            };
            if let Some(amount) = parse_amount(&caps[1]) {
                monthly = Some(if pattern.annual {
                    amount / Decimal::from(12)
                } else {
                    amount
                });
                break;
            }
            // unparseable capture: keep trying the remaining patterns
        }

        match monthly {
            Some(amount) if amount > self.min_monthly_salary => {
                out.set(FieldKey::MonthlySalary, canonical_amount(amount));
            }
            Some(amount) => {
                debug!("discarding implausible contract salary {}", amount);
            }
            None => {}
        }
    }

    fn extract_bonus(&self, text: &str, out: &mut ExtractedFields) {
        if let Some(caps) = BONUS_YEAR.captures(text) {
            out.set(FieldKey::BonusYear, &caps[1]);
        }
        if let Some(caps) = BONUS_AMOUNT.captures(text) {
            if let Some(amount) = parse_amount(&caps[1]) {
                out.set(FieldKey::BonusAmount, canonical_amount(amount));
            }
        }
    }
}

impl Default for ContractExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldsExtractor for ContractExtractor {
    fn extract(&self, text: &str) -> ExtractedFields {
        let mut out = ExtractedFields::new();
        let lines = LineIndex::new(text);

        self.extract_employer(&lines, &mut out);
        self.extract_employee(text, &lines, &mut out);

        if let Some(caps) = EFFECT_FROM.captures(text) {
            out.set(FieldKey::EmploymentStart, parse_dk_date(&caps[1]));
        }

        self.extract_salary(text, &mut out);
        self.extract_bonus(text, &mut out);

        out.set_opt(
            FieldKey::ConfidentialityClauseRef,
            CONFIDENTIALITY_CLAUSE.find(text, &lines),
        );
        out.set_opt(FieldKey::EmploymentClauseRef, IP_CLAUSE.find(text, &lines));

        debug!("contract extraction found {} fields", out.len());
        out
    }
}
