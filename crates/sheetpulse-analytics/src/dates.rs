//! Lenient parsing for the value shapes the upstream service puts in cells.
//!
//! Malformed values never abort a computation; callers treat a parse failure
//! as "field absent" (and the data-quality scorer counts it separately).

use chrono::NaiveDate;

/// Parse a date from any of the shapes the upstream service delivers:
/// an RFC3339 timestamp (`2024-01-01T08:00:00Z`), a plain ISO date
/// (`2024-01-01`), or a US-style date (`01/15/2024`).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Timestamp: the date is the first ten characters
    if trimmed.len() >= 10 && trimmed.as_bytes().get(10) == Some(&b'T') {
        if let Ok(date) = NaiveDate::parse_from_str(&trimmed[..10], "%Y-%m-%d") {
            return Some(date);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .ok()
}

/// Extract the leading numeric value of a duration string: `"9d"` -> 9.0,
/// `"0"` -> 0.0, `"2.5h"` -> 2.5. Returns `None` when the string does not
/// begin with a number.
pub fn leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let end = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.' || *c == '-')
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    trimmed[..end].parse().ok()
}
