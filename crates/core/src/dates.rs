//! Date normalization for heterogeneous announcement text.
//!
//! Pages in the wild carry publication dates as ISO strings, US month-name
//! forms (`April 2, 2025`), Japanese era-free forms (`2025年4月17日`), bare
//! numeric forms (`2025.4.17`), or month/day pairs with the year implied.
//! [`scan`] finds the first date-shaped substring and returns it as a
//! [`NaiveDate`]; [`normalize`] additionally degrades to the current time
//! when nothing matches, so it can never fail.
//!
//! Because `normalize` cannot signal absence, callers that must distinguish
//! "no date present" from "date defaulted" use [`scan`] and branch on the
//! `Option` themselves.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})-(\d{1,2})-(\d{1,2})").unwrap());

static MONTH_NAME_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]+)\.?\s+(\d{1,2}),?\s+(\d{4})").unwrap());

static JAPANESE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})年\s*(\d{1,2})月\s*(\d{1,2})日").unwrap());

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})[./](\d{1,2})[./](\d{1,2})").unwrap());

static PARTIAL_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2})[-./月]\s*(\d{1,2})日?").unwrap());

/// English month names and their three-letter abbreviations.
const MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sep", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTHS.iter().find(|(n, _)| *n == lower).map(|(_, m)| *m)
}

/// Finds the first date-shaped substring carrying an explicit year.
///
/// Patterns are tried in a fixed order, first successful match wins:
/// ISO (`2025-10-15`), month name (`April 2, 2025` / `Apr 2, 2025`),
/// Japanese (`2025年10月15日`), then bare numeric (`2025/10/15`,
/// `2025.10.15`). Returns `None` when no pattern matches.
///
/// Safe on arbitrary page text: the yearless `MM/DD` form is deliberately
/// excluded here, because version strings like `3.2.0` would otherwise
/// read as dates. Use [`scan_with_hint`] for text already known to be a
/// date string.
pub fn scan(text: &str) -> Option<NaiveDate> {
    for caps in ISO_DATE.captures_iter(text) {
        if let Some(date) = ymd(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }

    for caps in MONTH_NAME_DATE.captures_iter(text) {
        if let Some(month) = month_number(&caps[1]) {
            let day: u32 = caps[2].parse().ok()?;
            let year: i32 = caps[3].parse().ok()?;
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(date);
            }
        }
    }

    for caps in JAPANESE_DATE.captures_iter(text) {
        if let Some(date) = ymd(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }

    for caps in NUMERIC_DATE.captures_iter(text) {
        if let Some(date) = ymd(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }

    None
}

/// [`scan`] extended with the partial `MM[./-]DD` form, completed with
/// `year_hint` (or the current year).
///
/// Meant for text that is already known to be a date — the display text of
/// a date element, a previously captured date substring — where a yearless
/// month/day pair is a plausible last resort rather than a false positive.
pub fn scan_with_hint(text: &str, year_hint: Option<i32>) -> Option<NaiveDate> {
    if let Some(date) = scan(text) {
        return Some(date);
    }

    let year = year_hint.unwrap_or_else(|| Utc::now().year());
    for caps in PARTIAL_DATE.captures_iter(text) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    None
}

/// Normalizes free-form date text to a timestamp, never failing.
///
/// Falls back to the current processing time when no date-shaped substring
/// is found. This is a deliberate lossy default; use [`scan`] when absence
/// must be detected.
pub fn normalize(text: &str, year_hint: Option<i32>) -> DateTime<Utc> {
    match scan_with_hint(text, year_hint) {
        Some(date) => to_timestamp(date),
        None => Utc::now(),
    }
}

/// Converts a calendar date to the canonical midnight-UTC timestamp.
pub fn to_timestamp(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).expect("midnight is always valid").and_utc()
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
