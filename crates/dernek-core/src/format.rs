//! Display formatting for identifiers shown in tables and exports.
//!
//! Empty values render as `-`, the placeholder the list pages use for
//! missing cells. Values that do not have the expected shape are echoed
//! unchanged so nothing the user typed is hidden.

use chrono::{Datelike, NaiveDate};

use crate::validation::normalize_iban;

/// Placeholder for empty cells.
pub const EMPTY_CELL: &str = "-";

/// Formats a phone number as `5XX XXX XX XX` using its last 10 digits.
///
/// ## Example
/// ```rust
/// use dernek_core::format::format_phone;
///
/// assert_eq!(format_phone("+90 (532) 123-45-67"), "532 123 45 67");
/// assert_eq!(format_phone(""), "-");
/// ```
pub fn format_phone(phone: &str) -> String {
    if phone.is_empty() {
        return EMPTY_CELL.to_string();
    }

    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 10 {
        return phone.to_string();
    }

    let last10: String = digits[digits.len() - 10..].iter().collect();
    format!(
        "{} {} {} {}",
        &last10[0..3],
        &last10[3..6],
        &last10[6..8],
        &last10[8..10]
    )
}

/// Formats a TC kimlik number as `XXX XXX XXX XX`.
pub fn format_tc_kimlik(tc: &str) -> String {
    if tc.is_empty() {
        return EMPTY_CELL.to_string();
    }

    if tc.len() != 11 || !tc.is_ascii() {
        return tc.to_string();
    }

    format!("{} {} {} {}", &tc[0..3], &tc[3..6], &tc[6..9], &tc[9..11])
}

/// Formats an IBAN in groups of four: `TR33 0006 1005 ...`.
pub fn format_iban(iban: &str) -> String {
    let cleaned = normalize_iban(iban);
    if cleaned.is_empty() {
        return EMPTY_CELL.to_string();
    }

    cleaned
        .chars()
        .collect::<Vec<_>>()
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Dates and Dues Periods
// =============================================================================

const MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

const WEEKDAYS: [&str; 7] = [
    "Pazartesi", "Salı", "Çarşamba", "Perşembe", "Cuma", "Cumartesi", "Pazar",
];

/// How [`format_date`] renders a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `13.01.2026`
    #[default]
    Short,
    /// `13 Ocak 2026`
    Long,
    /// `13 Ocak 2026 Salı`
    Full,
    /// `2026-01-13`, the value date inputs expect
    Iso,
}

/// Formats a `YYYY-MM-DD`-prefixed value for display.
///
/// Only the calendar date as written is used; a time or offset after it
/// is ignored. Empty or unparsable values render as `-`.
///
/// ## Example
/// ```rust
/// use dernek_core::format::{format_date, DateStyle};
///
/// assert_eq!(format_date("2026-01-13", DateStyle::Short), "13.01.2026");
/// assert_eq!(format_date("2026-01-13T09:30:00", DateStyle::Full), "13 Ocak 2026 Salı");
/// assert_eq!(format_date("dün", DateStyle::Long), "-");
/// ```
pub fn format_date(value: &str, style: DateStyle) -> String {
    let Some(date) = value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    else {
        return EMPTY_CELL.to_string();
    };

    let month = MONTHS[date.month0() as usize];
    match style {
        DateStyle::Short => date.format("%d.%m.%Y").to_string(),
        DateStyle::Long => format!("{} {month} {}", date.day(), date.year()),
        DateStyle::Full => {
            let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
            format!("{} {month} {} {weekday}", date.day(), date.year())
        }
        DateStyle::Iso => date.format("%Y-%m-%d").to_string(),
    }
}

/// Turkish month name for `1..=12`, `-` otherwise.
pub fn format_ay(month: u32) -> &'static str {
    match month {
        1..=12 => MONTHS[month as usize - 1],
        _ => EMPTY_CELL,
    }
}

/// Dues period label: `Ocak 2026`.
pub fn format_donem(year: i32, month: u32) -> String {
    format!("{} {year}", format_ay(month))
}
