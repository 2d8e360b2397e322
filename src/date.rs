//! Date normalization to `YYYY-MM-DD`.
//!
//! Accepts EXIF text (`"2023:07:04 10:11:12"`) as well as loosely formatted
//! dates typed by hand into an answers file. Colons become dashes first, since
//! EXIF writes the date portion as `YYYY:MM:DD`, then a calendar parse is
//! attempted. The calendar fields come out exactly as parsed; no timezone is
//! applied.

use chrono::{Datelike, NaiveDate};

/// Full-string date layouts, tried in order after colons become dashes.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Leading date layouts that may be followed by a time of day.
const DATE_PREFIX_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Normalize a free-form date string to `YYYY-MM-DD`.
///
/// - `None`, empty, or whitespace-only input → `None`
/// - already `DDDD-DD-DD` → returned as-is (trimmed)
/// - anything else → colons replaced with dashes, parsed, reformatted
/// - `YYYY` and `YYYY-MM` → first day of the year or month
pub fn to_iso_date(input: Option<&str>) -> Option<String> {
    let trimmed = input?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if is_iso_shaped(trimmed) {
        return Some(trimmed.to_string());
    }

    let normalized = trimmed.replace(':', "-");
    let date = parse_calendar_date(&normalized)?;
    Some(format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    ))
}

/// `DDDD-DD-DD` with ASCII digits. Shape only, no calendar validation.
fn is_iso_shaped(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }

    // "2023-07-04 10-11-12", "2023-07-04T10-11-12Z", ...
    if let Some(date) = DATE_PREFIX_FORMATS.iter().find_map(|fmt| {
        let (date, rest) = NaiveDate::parse_and_remainder(s, fmt).ok()?;
        (rest.starts_with(' ') || rest.starts_with('T')).then_some(date)
    }) {
        return Some(date);
    }

    parse_partial_date(s)
}

/// `YYYY` or `YYYY-M(M)`, pinned to day 1 (and January for a bare year).
fn parse_partial_date(s: &str) -> Option<NaiveDate> {
    let (year, month) = s.split_once('-').unwrap_or((s, "1"));
    let all_digits = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
    if year.len() != 4 || !(1..=2).contains(&month.len()) {
        return None;
    }
    if !all_digits(year) || !all_digits(month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}
