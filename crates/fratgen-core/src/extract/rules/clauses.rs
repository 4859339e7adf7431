//! Clause-reference lookup.
//!
//! Contracts refer back to numbered clauses ("pkt. 12.3 om tavshedspligt")
//! and the termination templates need those numbers. Lookup runs an
//! explicit ordered rule chain so the priority policy stays auditable:
//! a line-anchored heading, then an inline reference, then a two-line
//! heading where the number and the keyword sit on separate lines. The
//! first rule that produces a number wins.

use lazy_static::lazy_static;
use regex::Regex;

use super::LineIndex;

/// Compiled lookup rules for one clause keyword family.
pub struct ClauseRules {
    // "12.3 Confidentiality" or "Pkt. 12.3 - Tavshedspligt"
    heading: Regex,
    // "clause 12.3 on confidentiality"
    inline: Regex,
    // bare section number on its own line
    bare_number: Regex,
    // keyword on the following line
    keyword: Regex,
}

impl ClauseRules {
    /// Build the rule chain for a set of keyword alternatives. Keywords
    /// are regex fragments, so `Non\s*Disclosure` style entries work.
    pub fn new(keywords: &[&str]) -> Self {
        let alternation = keywords.join("|");
        Self {
            heading: Regex::new(&format!(
                r"(?im)^(?:\s*(?:Section|Pkt\.?|Punkt)\s*)?(\d{{1,2}}(?:\.\d+)*)\s*[-–.)]?\s*(?:{})\b",
                alternation
            ))
            .unwrap(),
            inline: Regex::new(&format!(
                r"(?i)(?:clause|pkt\.?|punkt)\s*(\d+(?:\.\d+)*)\s*(?:om|on)?\s*(?:{})",
                alternation
            ))
            .unwrap(),
            bare_number: Regex::new(r"(?i)^(?:Section\s*)?(\d{1,2}(?:\.\d+)*)\s*[-–.)]?$").unwrap(),
            keyword: Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).unwrap(),
        }
    }

    /// Find the clause number for this keyword family, or `None` when no
    /// keyword variant appears anywhere in the text.
    pub fn find(&self, text: &str, lines: &LineIndex) -> Option<String> {
        if let Some(caps) = self.heading.captures(text) {
            return Some(caps[1].to_string());
        }

        if let Some(caps) = self.inline.captures(text) {
            return Some(caps[1].to_string());
        }

        // Heading split across two lines: a bare section number followed
        // by a line mentioning the keyword.
        for idx in 0..lines.len().saturating_sub(1) {
            let line = lines.get(idx)?;
            if let Some(caps) = self.bare_number.captures(line) {
                if self.keyword.is_match(lines.get(idx + 1)?) {
                    return Some(caps[1].to_string());
                }
            }
        }

        None
    }
}

lazy_static! {
    /// Confidentiality / non-disclosure clause keywords.
    pub static ref CONFIDENTIALITY_CLAUSE: ClauseRules = ClauseRules::new(&[
        "Confidentiality",
        "Tavshedspligt",
        r"Non\s*Disclosure",
        "Fortrolighed",
    ]);

    /// Intellectual-property clause keywords.
    pub static ref IP_CLAUSE: ClauseRules = ClauseRules::new(&[
        r"Intellectual\s*Property",
        r"Immaterielle\s*rettigheder",
        r"IP\s*Rights",
        r"Immaterial\s*rights",
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn find(text: &str, rules: &ClauseRules) -> Option<String> {
        rules.find(text, &LineIndex::new(text))
    }

    #[test]
    fn test_heading_rule() {
        let text = "11. Holidays\n12.3 Confidentiality\nThe Employee shall...";
        assert_eq!(find(text, &CONFIDENTIALITY_CLAUSE).as_deref(), Some("12.3"));
    }

    #[test]
    fn test_heading_with_label() {
        let text = "Pkt. 7 - Tavshedspligt\nMedarbejderen er forpligtet...";
        assert_eq!(find(text, &CONFIDENTIALITY_CLAUSE).as_deref(), Some("7"));
    }

    #[test]
    fn test_inline_rule() {
        let text = "as set out in clause 9.2 on intellectual property rights";
        assert_eq!(find(text, &IP_CLAUSE).as_deref(), Some("9.2"));
    }

    #[test]
    fn test_two_line_fallback() {
        let text = "Section 14\nImmaterielle rettigheder\nAlle rettigheder tilfalder...";
        assert_eq!(find(text, &IP_CLAUSE).as_deref(), Some("14"));
    }

    #[test]
    fn test_heading_beats_inline() {
        let text = "5. Confidentiality\nsee also clause 9 on confidentiality";
        assert_eq!(find(text, &CONFIDENTIALITY_CLAUSE).as_deref(), Some("5"));
    }

    #[test]
    fn test_absent_keyword_is_none() {
        let text = "1. Salary\n2. Holidays\n3. Termination";
        assert_eq!(find(text, &CONFIDENTIALITY_CLAUSE), None);
        assert_eq!(find(text, &IP_CLAUSE), None);
    }
}
