//! Anchor-window rule primitives shared by the contract and payslip
//! extractors.

pub mod amounts;
pub mod clauses;
pub mod dates;
pub mod patterns;

pub use amounts::{canonical_amount, normalize_amount, parse_amount, CurrencyFormat, DANISH};
pub use clauses::{ClauseRules, CONFIDENTIALITY_CLAUSE, IP_CLAUSE};
pub use dates::{format_date_long, parse_date, parse_dk_date};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapse consecutive whitespace and trim the ends.
pub fn normalize_whitespace(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value.trim(), " ").into_owned()
}

/// The trimmed, non-empty lines of a document, preserving order.
///
/// Anchor-window scans run against this index: locate a marker line,
/// then inspect a fixed number of lines immediately before it.
#[derive(Debug, Clone)]
pub struct LineIndex {
    lines: Vec<String>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Index of the first line matching `pattern`.
    pub fn position(&self, pattern: &Regex) -> Option<usize> {
        self.lines.iter().position(|line| pattern.is_match(line))
    }

    /// Up to `n` lines immediately preceding `idx` (the anchor itself
    /// excluded).
    pub fn window_before(&self, idx: usize, n: usize) -> &[String] {
        &self.lines[idx.saturating_sub(n)..idx]
    }
}

/// Largest char boundary at or below `idx`.
pub fn floor_char_boundary(s: &str, idx: usize) -> usize {
    let mut idx = idx.min(s.len());
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Smallest char boundary at or above `idx`.
pub fn ceil_char_boundary(s: &str, idx: usize) -> usize {
    let mut idx = idx.min(s.len());
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \t b\n c  "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_line_index_drops_blanks() {
        let index = LineIndex::new("first\n\n  second  \n\t\nthird");
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(1), Some("second"));
    }

    #[test]
    fn test_window_before_clamps_at_start() {
        let index = LineIndex::new("a\nb\nc");
        assert_eq!(index.window_before(1, 3), &["a".to_string()]);
        assert_eq!(index.window_before(0, 3).len(), 0);
    }

    #[test]
    fn test_char_boundaries_on_multibyte() {
        let s = "løn";
        // byte 2 falls inside the two-byte ø
        assert_eq!(floor_char_boundary(s, 2), 1);
        assert_eq!(ceil_char_boundary(s, 2), 3);
        assert_eq!(ceil_char_boundary(s, 100), s.len());
    }
}
