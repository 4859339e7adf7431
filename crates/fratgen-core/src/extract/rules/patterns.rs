//! Common regex patterns for contract and payslip extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Employer anchor: CVR registration number (8 digits)
    pub static ref CVR_ANCHOR: Regex = Regex::new(
        r"(?i)\bCVR\b\s*:?\s*(\d{8})"
    ).unwrap();

    // Danish postal code (4 digits)
    pub static ref DK_POSTAL: Regex = Regex::new(
        r"\b\d{4}\b"
    ).unwrap();

    // Employee anchor: the CPR marker line (the number itself is never read)
    pub static ref CPR_ANCHOR: Regex = Regex::new(
        r"(?i)^CPR\b\s*:?"
    ).unwrap();

    // Leading party token on name lines ("BETWEEN X", "AND Y")
    pub static ref LEADING_PARTY_TOKEN: Regex = Regex::new(
        r"(?i)^(?:BETWEEN|AND)\s+"
    ).unwrap();

    // Fallback employee anchor when no CPR marker exists: the second
    // party introduced with "AND" followed by content on the same line
    pub static ref AND_PARTY: Regex = Regex::new(
        r"(?im)\bAND\b[^\S\r\n]*(\S.*)$"
    ).unwrap();

    // Employment start phrase
    pub static ref EFFECT_FROM: Regex = Regex::new(
        r"(?i)With effect from ([A-Za-z0-9,\.\-/\s]+?),\s*the Employee is employed"
    ).unwrap();

    // Bonus year: first 4-digit year in the 2000s near the word "bonus"
    pub static ref BONUS_YEAR: Regex = Regex::new(
        r"(?i)\bbonus(?:året|year)?\s*(?:for\s*)?(20\d{2})\b"
    ).unwrap();

    // Bonus amount following the word "bonus"
    pub static ref BONUS_AMOUNT: Regex = Regex::new(
        r"(?i)bonus\s*(?:på|of)?\s*(?:DKK|kr\.?)?\s*([\d.,]+)"
    ).unwrap();

    // Payslip period: "Fra: <date> ... Til: <date>" with anything between
    pub static ref PAY_PERIOD: Regex = Regex::new(
        r"(?is)\bFra:\s*([0-9\-\./]+).*?\bTil:\s*([0-9\-\./]+)"
    ).unwrap();

    // Payslip employee name line
    pub static ref NAVN_LINE: Regex = Regex::new(
        r"(?i)\bNavn\b\s*:\s*([^\n\r]+)"
    ).unwrap();

    // Any numeral token (European or plain formatting)
    pub static ref NUMERAL: Regex = Regex::new(
        r"[\d.,]+"
    ).unwrap();

    // Payslip fallback: a numeral within 80 characters after a "løn" token
    pub static ref SALARY_NEAR_LOEN: Regex = Regex::new(
        r"(?i)l[øo]n[^\n\r]{0,80}?([\d.,]+)"
    ).unwrap();

    // Net-pay labels that must not be mistaken for gross salary
    pub static ref NETTO_LABEL: Regex = Regex::new(
        r"(?i)netto\s*l[øo]n|nettol[øo]n|netto"
    ).unwrap();

    // Tax labels that must not be mistaken for gross salary
    pub static ref TAX_LABEL: Regex = Regex::new(
        r"(?i)AM\s*-\s*bidrag|AM-bidrag|A\s*-\s*skat|A-skat"
    ).unwrap();

    // Payslip bonus: numeral on the same line as the word "bonus"
    pub static ref BONUS_NEAR: Regex = Regex::new(
        r"(?i)bonus[^\n\r]*?([\d.,]+)"
    ).unwrap();

    // ISO date prefix, used when deriving the bonus year from the period
    pub static ref ISO_DATE: Regex = Regex::new(
        r"^\d{4}-\d{2}-\d{2}"
    ).unwrap();

    // Payslip gross-salary label vocabulary, in priority order
    pub static ref PAYSLIP_SALARY_LABELS: Vec<Regex> = [
        r"(?i)Fast\s*månedsløn",
        r"(?i)Brutto\s*månedsløn",
        r"(?i)Månedsløn",
        r"(?i)Fast\s*løn",
        r"(?i)Løn\s*\(måned\)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// One entry in the contract salary pattern chain.
pub struct SalaryPattern {
    /// Pattern with the amount as the first capture group.
    pub regex: Regex,
    /// Whether the captured amount is an annual figure to divide by 12.
    pub annual: bool,
}

lazy_static! {
    // Contract salary phrasings, tried in order; the first one whose
    // capture parses as a number wins.
    pub static ref SALARY_PATTERNS: Vec<SalaryPattern> = vec![
        SalaryPattern {
            regex: Regex::new(r"(?i)fixed\s+annual\s+salary\s+of\s+(?:DKK|kr\.?)\s*([\d.,]+)")
                .unwrap(),
            annual: true,
        },
        SalaryPattern {
            regex: Regex::new(
                r"(?i)(?:gross\s+)?monthly\s+salary\s+(?:is|of)\s+(?:DKK|kr\.?)\s*([\d.,]+)"
            )
            .unwrap(),
            annual: false,
        },
        SalaryPattern {
            regex: Regex::new(
                r"(?i)(?:base|fixed)?\s*salary\s*(?:is|of|amounts\s*to)\s*(?:DKK|kr\.?)?\s*([\d.,]+)\s*(?:per\s*month|pr\.\s*måned|monthly)"
            )
            .unwrap(),
            annual: false,
        },
        SalaryPattern {
            regex: Regex::new(r"(?i)\bmånedsløn\b[^\d]*([\d.,]+)").unwrap(),
            annual: false,
        },
        SalaryPattern {
            regex: Regex::new(r"(?i)\bårsløn\b[^\d]*([\d.,]+)").unwrap(),
            annual: true,
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cvr_anchor_matches_with_and_without_colon() {
        assert!(CVR_ANCHOR.is_match("CVR: 12345678"));
        assert!(CVR_ANCHOR.is_match("cvr 12345678"));
        assert!(!CVR_ANCHOR.is_match("CVR: 1234567"));
    }

    #[test]
    fn test_cpr_anchor_is_line_leading() {
        assert!(CPR_ANCHOR.is_match("CPR:"));
        assert!(CPR_ANCHOR.is_match("CPR nr."));
        assert!(!CPR_ANCHOR.is_match("Medarbejderens CPR:"));
    }

    #[test]
    fn test_postal_requires_exactly_four_digits() {
        assert!(DK_POSTAL.is_match("1000 København"));
        assert!(!DK_POSTAL.is_match("12345 somewhere"));
    }

    #[test]
    fn test_salary_pattern_order() {
        let text = "a fixed annual salary of DKK 600.000,00 and a monthly salary of DKK 1";
        let first = SALARY_PATTERNS
            .iter()
            .position(|p| p.regex.is_match(text))
            .unwrap();
        assert_eq!(first, 0);
        assert!(SALARY_PATTERNS[first].annual);
    }
}
