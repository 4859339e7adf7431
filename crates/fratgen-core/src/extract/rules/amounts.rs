//! Amount parsing and formatting for Danish numeral conventions.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

lazy_static! {
    // A comma followed by 1-2 trailing digits marks a decimal comma
    static ref DECIMAL_COMMA_TAIL: Regex = Regex::new(r"\d,\d{1,2}$").unwrap();
    static ref CANONICAL_NUMERAL: Regex = Regex::new(r"[-+]?\d+(?:\.\d+)?").unwrap();
}

/// Parse a Danish- or plain-formatted amount (e.g. `36.500,00` or `36500`).
///
/// If the string ends in a comma followed by 1-2 digits, or contains both
/// separators, `.` is read as thousands and `,` as decimal; otherwise
/// commas are stripped as thousands separators.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if DECIMAL_COMMA_TAIL.is_match(&cleaned)
        || (cleaned.contains(',') && cleaned.contains('.'))
    {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned.replace(',', "")
    };

    let numeral = CANONICAL_NUMERAL.find(&normalized)?;
    Decimal::from_str(numeral.as_str()).ok()
}

/// Canonical amount string: rounded to two decimals, trailing zeros and a
/// trailing decimal point trimmed (`36500.50` becomes `"36500.5"`).
pub fn canonical_amount(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

/// Parse and re-emit a raw numeral in canonical form.
pub fn normalize_amount(raw: &str) -> Option<String> {
    parse_amount(raw).map(canonical_amount)
}

/// Explicit thousands/decimal separator convention for display formatting.
///
/// Replaces process-wide locale state: callers pick a convention instead
/// of the formatter inheriting whatever locale the process happens to run
/// under.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyFormat {
    pub thousands: char,
    pub decimal: char,
}

/// Danish convention: `123.456,78`.
pub const DANISH: CurrencyFormat = CurrencyFormat {
    thousands: '.',
    decimal: ',',
};

impl CurrencyFormat {
    /// Format with two decimals and grouped thousands.
    pub fn format(&self, value: Decimal) -> String {
        let plain = format!("{:.2}", value.round_dp(2));
        let (number, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
        let (sign, digits) = match number.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", number),
        };

        let chars: Vec<char> = digits.chars().collect();
        let mut grouped = String::new();
        for (i, c) in chars.iter().enumerate() {
            if i > 0 && (chars.len() - i) % 3 == 0 {
                grouped.push(self.thousands);
            }
            grouped.push(*c);
        }

        format!("{}{}{}{}", sign, grouped, self.decimal, fraction)
    }

    /// Format a raw numeral string, returning it unchanged when it does
    /// not parse.
    pub fn format_raw(&self, raw: &str) -> String {
        match parse_amount(raw) {
            Some(value) => self.format(value),
            None => raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_european_and_plain_forms_agree() {
        assert_eq!(normalize_amount("36.500,00").as_deref(), Some("36500"));
        assert_eq!(normalize_amount("36500").as_deref(), Some("36500"));
        assert_eq!(normalize_amount("36500,00").as_deref(), Some("36500"));
    }

    #[test]
    fn test_decimal_comma_tail() {
        assert_eq!(normalize_amount("36.500,5").as_deref(), Some("36500.5"));
        assert_eq!(normalize_amount("987,65").as_deref(), Some("987.65"));
    }

    #[test]
    fn test_plain_thousands_commas_stripped() {
        assert_eq!(normalize_amount("1,234,567").as_deref(), Some("1234567"));
    }

    #[test]
    fn test_idempotent_under_reparse() {
        for s in ["36.500,00", "36500", "1.234,56", "987,65", "600.000,00"] {
            let once = parse_amount(s).unwrap();
            let twice = parse_amount(&canonical_amount(once)).unwrap();
            assert_eq!(once, twice, "reparse diverged for {s}");
        }
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("ingen"), None);
        assert_eq!(parse_amount(",."), None);
    }

    #[test]
    fn test_danish_display_format() {
        assert_eq!(DANISH.format(parse_amount("1234.56").unwrap()), "1.234,56");
        assert_eq!(DANISH.format(parse_amount("36500").unwrap()), "36.500,00");
        assert_eq!(
            DANISH.format(parse_amount("12345678.9").unwrap()),
            "12.345.678,90"
        );
    }

    #[test]
    fn test_format_raw_passes_junk_through() {
        assert_eq!(DANISH.format_raw("efter aftale"), "efter aftale");
        assert_eq!(DANISH.format_raw("36500.5"), "36.500,50");
    }
}
