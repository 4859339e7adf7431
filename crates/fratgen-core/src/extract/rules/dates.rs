//! Day-first date parsing and Danish date formatting.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::normalize_whitespace;

lazy_static! {
    // "1 August 2022", "15. august 2022", "1st of January 2024"
    static ref DAY_MONTH_YEAR: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\.?\s*(?:of\s+)?([A-Za-zæøåÆØÅ]+),?\s*(\d{4})\b"
    )
    .unwrap();
    // "August 1, 2022"
    static ref MONTH_DAY_YEAR: Regex = Regex::new(
        r"(?i)\b([A-Za-zæøåÆØÅ]+)\s+(\d{1,2})(?:st|nd|rd|th)?,?\s*(\d{4})\b"
    )
    .unwrap();
}

// Numeric layouts tried in order; day-first variants come before the
// ISO form so "01-02-2025" reads as 1 February.
const NUMERIC_FORMATS: [&str; 8] = [
    "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%Y", "%Y-%m-%d", "%Y/%m/%d", "%d-%m-%y", "%d.%m.%y", "%d/%m/%y",
];

/// Parse a Danish/European date string into a [`NaiveDate`] if possible.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let cleaned = normalize_whitespace(value);
    let cleaned = cleaned.trim_matches(|c: char| c == ',' || c == '.' || c.is_whitespace());
    if cleaned.is_empty() {
        return None;
    }

    for format in NUMERIC_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cleaned, format) {
            return Some(date);
        }
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(cleaned) {
        let day: u32 = caps[1].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        if let Some(month) = month_number(&caps[2]) {
            return NaiveDate::from_ymd_opt(year, month, day);
        }
    }

    if let Some(caps) = MONTH_DAY_YEAR.captures(cleaned) {
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        if let Some(month) = month_number(&caps[1]) {
            return NaiveDate::from_ymd_opt(year, month, day);
        }
    }

    None
}

/// Parse a date to ISO `YYYY-MM-DD`, keeping the raw text verbatim when
/// it does not parse.
pub fn parse_dk_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => value.to_string(),
    }
}

/// Danish long form, e.g. `15. august 2022`; unchanged input on failure.
pub fn format_date_long(value: &str) -> String {
    match parse_date(value) {
        Some(date) => format!(
            "{}. {} {}",
            date.day(),
            danish_month_name(date.month()),
            date.year()
        ),
        None => value.to_string(),
    }
}

fn danish_month_name(month: u32) -> &'static str {
    match month {
        1 => "januar",
        2 => "februar",
        3 => "marts",
        4 => "april",
        5 => "maj",
        6 => "juni",
        7 => "juli",
        8 => "august",
        9 => "september",
        10 => "oktober",
        11 => "november",
        12 => "december",
        _ => unreachable!("chrono months are 1-12"),
    }
}

fn month_number(name: &str) -> Option<u32> {
    // Danish and English names share enough of a prefix that three
    // letters disambiguate every month except maj/may and oktober/october.
    match name.to_lowercase().as_str() {
        "januar" | "january" | "jan" => Some(1),
        "februar" | "february" | "feb" => Some(2),
        "marts" | "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "maj" | "may" => Some(5),
        "juni" | "june" | "jun" => Some(6),
        "juli" | "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" | "sept" => Some(9),
        "oktober" | "october" | "okt" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numeric_day_first() {
        assert_eq!(parse_dk_date("01-01-2025"), "2025-01-01");
        assert_eq!(parse_dk_date("31.01.2025"), "2025-01-31");
        assert_eq!(parse_dk_date("15/8/2022"), "2022-08-15");
    }

    #[test]
    fn test_iso_passthrough() {
        assert_eq!(parse_dk_date("2025-03-01"), "2025-03-01");
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(parse_dk_date("15.01.24"), "2024-01-15");
    }

    #[test]
    fn test_month_names() {
        assert_eq!(parse_dk_date("1 August 2022"), "2022-08-01");
        assert_eq!(parse_dk_date("15. august 2022"), "2022-08-15");
        assert_eq!(parse_dk_date("August 1, 2022"), "2022-08-01");
        assert_eq!(parse_dk_date("1st of January 2024"), "2024-01-01");
    }

    #[test]
    fn test_unparseable_kept_verbatim() {
        assert_eq!(parse_dk_date("upon mutual agreement"), "upon mutual agreement");
        assert_eq!(parse_dk_date("32-13-2022"), "32-13-2022");
    }

    #[test]
    fn test_format_date_long() {
        assert_eq!(format_date_long("2022-08-15"), "15. august 2022");
        assert_eq!(format_date_long("01-03-2025"), "1. marts 2025");
        assert_eq!(format_date_long("not a date"), "not a date");
    }
}
