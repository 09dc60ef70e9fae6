//! # Sorting Module
//!
//! Generic, stable, locale-aware record sorting for list pages.
//!
//! ## Comparator Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    compare(a[field], b[field])                          │
//! │                                                                         │
//! │  1. Nulls ─────────── null after any value, BOTH directions            │
//! │                        (decided before the direction flip)             │
//! │                                                                         │
//! │  2. Number × Number ── numeric                                         │
//! │                                                                         │
//! │  3. Date × Date ────── "YYYY-MM-DD..." strings that both parse         │
//! │                        compared as timestamps                          │
//! │                                                                         │
//! │  4. Text × Text ────── Turkish collation, case-insensitive             │
//! │                                                                         │
//! │  5. Anything else ──── stringify both, then rule 4                     │
//! │                                                                         │
//! │  Descending reverses rules 2-5 only.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Field Access
//! Records are any `T`. The caller passes an accessor
//! `Fn(&T, &str) -> SortValue` mapping a column id to the cell value, so
//! typed records never go through string-keyed reflection. JSON records
//! (as received over IPC) can use [`json_field`].
//!
//! ## Example
//! ```rust
//! use dernek_core::sorting::{sort_records, SortValue};
//! use dernek_core::SortDescriptor;
//!
//! struct Uye { ad: &'static str, yas: Option<u32> }
//!
//! fn field(uye: &Uye, field: &str) -> SortValue {
//!     match field {
//!         "ad" => uye.ad.into(),
//!         "yas" => uye.yas.into(),
//!         _ => SortValue::Null,
//!     }
//! }
//!
//! let uyeler = vec![
//!     Uye { ad: "Ayşe", yas: Some(30) },
//!     Uye { ad: "ayse", yas: None },
//!     Uye { ad: "Zeynep", yas: Some(25) },
//! ];
//!
//! let by_age = sort_records(uyeler, &SortDescriptor::ascending("yas"), field);
//! let names: Vec<_> = by_age.iter().map(|u| u.ad).collect();
//! assert_eq!(names, ["Zeynep", "Ayşe", "ayse"]);
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

use crate::collation::{with_turkish, TextCollator};
use crate::config::CollationSettings;
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{SortDescriptor, SortDirection};

static DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("date regex should compile"));

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// =============================================================================
// Sort Value
// =============================================================================

/// A single cell value as seen by the comparator.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    /// Missing or null; always sorts last.
    Null,
    Bool(bool),
    Number(f64),
    /// Free text or a date-like string.
    Text(String),
}

impl SortValue {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, SortValue::Null)
    }

    /// Milliseconds since the epoch if this is a date-like string.
    fn timestamp(&self) -> Option<i64> {
        match self {
            SortValue::Text(text) => date_timestamp(text),
            _ => None,
        }
    }
}

/// Stringification used when operand types differ.
///
/// Numbers print in their shortest form (`30`, `2.5`), matching how the
/// front end renders them.
impl fmt::Display for SortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortValue::Null => f.write_str("null"),
            SortValue::Bool(b) => write!(f, "{b}"),
            SortValue::Number(n) if n.is_nan() => f.write_str("NaN"),
            SortValue::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // Avoid "-0"
            SortValue::Number(n) if *n == 0.0 => f.write_str("0"),
            SortValue::Number(n) => write!(f, "{n}"),
            SortValue::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for SortValue {
                fn from(value: $t) -> Self {
                    SortValue::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for SortValue {
    fn from(value: bool) -> Self {
        SortValue::Bool(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        SortValue::Text(value.to_string())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        SortValue::Text(value)
    }
}

impl From<&String> for SortValue {
    fn from(value: &String) -> Self {
        SortValue::Text(value.clone())
    }
}

impl From<Money> for SortValue {
    fn from(value: Money) -> Self {
        SortValue::Number(value.kurus() as f64)
    }
}

impl From<NaiveDate> for SortValue {
    fn from(value: NaiveDate) -> Self {
        SortValue::Text(value.format("%Y-%m-%d").to_string())
    }
}

impl From<NaiveDateTime> for SortValue {
    fn from(value: NaiveDateTime) -> Self {
        SortValue::Text(value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for SortValue
where
    Tz::Offset: fmt::Display,
{
    fn from(value: DateTime<Tz>) -> Self {
        SortValue::Text(value.to_rfc3339())
    }
}

impl<T: Into<SortValue>> From<Option<T>> for SortValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SortValue::Null, Into::into)
    }
}

impl From<&Value> for SortValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => SortValue::Null,
            Value::Bool(b) => SortValue::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(SortValue::Null, SortValue::Number),
            Value::String(s) => SortValue::Text(s.clone()),
            other => SortValue::Text(other.to_string()),
        }
    }
}

/// Accessor for JSON object records: missing keys read as null.
pub fn json_field(record: &Value, field_id: &str) -> SortValue {
    record.get(field_id).map_or(SortValue::Null, SortValue::from)
}

// =============================================================================
// Date-like Strings
// =============================================================================

/// Parses a `YYYY-MM-DD`-prefixed string into epoch milliseconds.
///
/// - Date only: midnight UTC
/// - Date and time without offset: read as UTC
/// - RFC 3339 with offset: honoured
fn date_timestamp(text: &str) -> Option<i64> {
    if !DATE_PREFIX.is_match(text) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

// =============================================================================
// Comparator
// =============================================================================

/// Orders two present (non-null) values ascending.
fn compare_present(collator: &TextCollator, a: &SortValue, b: &SortValue) -> Ordering {
    match (a, b) {
        (SortValue::Number(x), SortValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortValue::Text(x), SortValue::Text(y)) => match (a.timestamp(), b.timestamp()) {
            (Some(ta), Some(tb)) => ta.cmp(&tb),
            _ => collator.compare(x, y),
        },
        _ => collator.compare(&a.to_string(), &b.to_string()),
    }
}

/// Full comparator: nulls last, then typed comparison, then direction.
fn compare_keys(
    collator: &TextCollator,
    a: &SortValue,
    b: &SortValue,
    direction: SortDirection,
) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let ordering = compare_present(collator, a, b);
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Compares two cell values with the default Turkish collation.
pub fn compare_values(a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
    with_turkish(|collator| compare_keys(collator, a, b, direction))
}

/// Compares two records on `field_id`.
///
/// ## Example
/// ```rust
/// use std::cmp::Ordering;
/// use dernek_core::sorting::{compare, SortValue};
/// use dernek_core::SortDirection;
///
/// let a = (Some(5_i64),);
/// let b = (None::<i64>,);
/// let field = |r: &(Option<i64>,), _: &str| SortValue::from(r.0);
///
/// // Null stays last even when descending
/// assert_eq!(compare(&a, &b, "tutar", SortDirection::Ascending, field), Ordering::Less);
/// assert_eq!(compare(&a, &b, "tutar", SortDirection::Descending, field), Ordering::Less);
/// ```
pub fn compare<T, F>(a: &T, b: &T, field_id: &str, direction: SortDirection, accessor: F) -> Ordering
where
    F: Fn(&T, &str) -> SortValue,
{
    compare_values(&accessor(a, field_id), &accessor(b, field_id), direction)
}

// =============================================================================
// Stable Sort
// =============================================================================

/// Bottom-up merge sort over positions.
///
/// Stable: on ties the left run wins. Unlike `slice::sort_by`, this never
/// panics when the comparator is not a total order, which mixed-type
/// columns (numbers next to text) can produce.
fn merge_sort_positions<F>(len: usize, mut less: F) -> Vec<usize>
where
    F: FnMut(usize, usize) -> bool,
{
    let mut order: Vec<usize> = (0..len).collect();
    let mut buffer = order.clone();
    let mut width = 1;

    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut left, mut right) = (start, mid);

            for slot in buffer.iter_mut().take(end).skip(start) {
                let take_right =
                    left >= mid || (right < end && less(order[right], order[left]));
                if take_right {
                    *slot = order[right];
                    right += 1;
                } else {
                    *slot = order[left];
                    left += 1;
                }
            }

            start = end;
        }

        std::mem::swap(&mut order, &mut buffer);
        width *= 2;
    }

    order
}

/// Stable-sorts `records` by the descriptor's field using `collator`.
fn sort_with<T, F>(
    collator: &TextCollator,
    records: Vec<T>,
    descriptor: &SortDescriptor,
    accessor: F,
) -> Vec<T>
where
    F: Fn(&T, &str) -> SortValue,
{
    // No direction: hand back the input untouched, comparator never runs
    let Some(direction) = descriptor.direction else {
        return records;
    };

    trace!(field = %descriptor.field_id, %direction, count = records.len(), "Sorting records");

    let keys: Vec<SortValue> = records
        .iter()
        .map(|record| accessor(record, &descriptor.field_id))
        .collect();

    let order = merge_sort_positions(keys.len(), |a, b| {
        compare_keys(collator, &keys[a], &keys[b], direction) == Ordering::Less
    });

    let mut slots: Vec<Option<T>> = records.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|position| slots[position].take())
        .collect()
}

/// Sorts records for display with the default Turkish collation.
///
/// - `descriptor.direction == None`: returns `records` in input order
/// - Equal keys keep their input order (stable)
/// - Null keys are always at the end
pub fn sort_records<T, F>(records: Vec<T>, descriptor: &SortDescriptor, accessor: F) -> Vec<T>
where
    F: Fn(&T, &str) -> SortValue,
{
    with_turkish(|collator| sort_with(collator, records, descriptor, accessor))
}

/// Sorts JSON object records (as received over IPC).
pub fn sort_json_records(records: Vec<Value>, descriptor: &SortDescriptor) -> Vec<Value> {
    sort_records(records, descriptor, json_field)
}

// =============================================================================
// Sorter
// =============================================================================

/// Sorting with a configured collation instead of the default.
///
/// Holds its own collator; build one per table or per thread.
#[derive(Debug)]
pub struct Sorter {
    collator: TextCollator,
}

impl Sorter {
    /// Builds a sorter for the given collation settings.
    pub fn new(settings: &CollationSettings) -> CoreResult<Self> {
        Ok(Sorter {
            collator: TextCollator::new(settings)?,
        })
    }

    /// Compares two cell values.
    pub fn compare_values(&self, a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
        compare_keys(&self.collator, a, b, direction)
    }

    /// Sorts records; same rules as [`sort_records`].
    pub fn sort<T, F>(&self, records: Vec<T>, descriptor: &SortDescriptor, accessor: F) -> Vec<T>
    where
        F: Fn(&T, &str) -> SortValue,
    {
        sort_with(&self.collator, records, descriptor, accessor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn asc(a: SortValue, b: SortValue) -> Ordering {
        compare_values(&a, &b, SortDirection::Ascending)
    }

    fn desc(a: SortValue, b: SortValue) -> Ordering {
        compare_values(&a, &b, SortDirection::Descending)
    }

    fn num(n: f64) -> SortValue {
        SortValue::Number(n)
    }

    #[test]
    fn test_number_against_null() {
        assert_eq!(asc(num(5.0), SortValue::Null), Ordering::Less);
        assert_eq!(desc(num(5.0), SortValue::Null), Ordering::Less);
        assert_eq!(asc(SortValue::Null, num(5.0)), Ordering::Greater);
        assert_eq!(desc(SortValue::Null, num(5.0)), Ordering::Greater);
        assert_eq!(asc(SortValue::Null, SortValue::Null), Ordering::Equal);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(asc(num(2.0), num(10.0)), Ordering::Less);
        assert_eq!(desc(num(2.0), num(10.0)), Ordering::Greater);
        assert_eq!(asc(num(-1.5), num(-1.5)), Ordering::Equal);
        assert_eq!(asc(num(f64::NAN), num(1.0)), Ordering::Equal);
    }

    #[test]
    fn test_date_with_and_without_time() {
        assert_eq!(
            asc("2024-01-15".into(), "2024-01-15T10:30:00".into()),
            Ordering::Less
        );
        assert_eq!(
            asc("2024-01-16".into(), "2024-01-15T23:59:00".into()),
            Ordering::Greater
        );
        assert_eq!(
            asc("2024-01-15T00:00:00Z".into(), "2024-01-15".into()),
            Ordering::Equal
        );
        // Offset honoured: 02:00+03:00 is 23:00 UTC the previous day
        assert_eq!(
            asc("2024-01-15T02:00:00+03:00".into(), "2024-01-15".into()),
            Ordering::Less
        );
    }

    #[test]
    fn test_invalid_date_falls_back_to_text() {
        assert_eq!(date_timestamp("2024-13-45"), None);
        assert_eq!(date_timestamp("15.01.2024"), None);
        assert!(date_timestamp("2024-02-29").is_some());
        // Both compared as text then
        assert_eq!(asc("2024-13-45".into(), "2024-13-46".into()), Ordering::Less);
    }

    #[test]
    fn test_turkish_strings() {
        assert_eq!(asc("İstanbul".into(), "istanbul".into()), Ordering::Equal);
        assert_eq!(asc("Istanbul".into(), "istanbul".into()), Ordering::Less);
        assert_eq!(asc("ayse".into(), "Ayşe".into()), Ordering::Less);
        assert_eq!(asc("Çorum".into(), "Denizli".into()), Ordering::Less);
        assert_eq!(asc("Ceyhan".into(), "Çorum".into()), Ordering::Less);
    }

    #[test]
    fn test_mixed_types_stringify() {
        // "10" vs "9" as text
        assert_eq!(asc(num(10.0), "9".into()), Ordering::Less);
        assert_eq!(asc(true.into(), "false".into()), Ordering::Greater);
        assert_eq!(num(30.0).to_string(), "30");
        assert_eq!(num(2.5).to_string(), "2.5");
        assert_eq!(num(-0.0).to_string(), "0");
    }

    #[test]
    fn test_no_direction_returns_input() {
        let records = vec![3, 1, 2];
        let sorted = sort_records(records, &SortDescriptor::unsorted(), |_: &i32, _| {
            panic!("comparator must not run")
        });
        assert_eq!(sorted, vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let records = vec![(1, 'a'), (2, 'b'), (1, 'c'), (2, 'd'), (1, 'e')];
        let field = |r: &(i32, char), _: &str| SortValue::from(r.0);

        let sorted = sort_records(records.clone(), &SortDescriptor::ascending("n"), field);
        let tags: String = sorted.iter().map(|r| r.1).collect();
        assert_eq!(tags, "acebd");

        let sorted = sort_records(records, &SortDescriptor::descending("n"), field);
        let tags: String = sorted.iter().map(|r| r.1).collect();
        assert_eq!(tags, "bdace");
    }

    #[test]
    fn test_json_records() {
        let records = vec![
            json!({"name": "Ayşe", "age": 30}),
            json!({"name": "ayse", "age": null}),
            json!({"name": "Zeynep", "age": 25}),
        ];

        let by_age = sort_json_records(records.clone(), &SortDescriptor::ascending("age"));
        let names: Vec<_> = by_age.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["Zeynep", "Ayşe", "ayse"]);

        let by_name = sort_json_records(records, &SortDescriptor::ascending("name"));
        let names: Vec<_> = by_name.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["ayse", "Ayşe", "Zeynep"]);
    }

    #[test]
    fn test_missing_json_field_is_null() {
        let record = json!({"name": "Ali"});
        assert_eq!(json_field(&record, "age"), SortValue::Null);
        assert_eq!(json_field(&json!([1, 2]), "age"), SortValue::Null);
    }

    #[test]
    fn test_merge_sort_handles_inconsistent_comparator() {
        // 9 < "5"? no; "5" < 10 as text; 10 > 9 numerically: a cycle
        let records = vec![
            num(10.0),
            SortValue::from("5"),
            num(9.0),
            SortValue::Null,
        ];
        let sorted = sort_records(records, &SortDescriptor::ascending("v"), |v, _| v.clone());
        assert_eq!(sorted.len(), 4);
        assert_eq!(sorted[3], SortValue::Null);
    }

    #[test]
    fn test_sorter_with_settings() {
        let sorter = Sorter::new(&CollationSettings::default()).unwrap();
        assert_eq!(
            sorter.compare_values(&"ayse".into(), &"Ayşe".into(), SortDirection::Ascending),
            Ordering::Less
        );

        let sorted = sorter.sort(
            vec!["Zeynep", "ayse", "Ayşe"],
            &SortDescriptor::descending("ad"),
            |s, _| SortValue::from(*s),
        );
        assert_eq!(sorted, vec!["Zeynep", "Ayşe", "ayse"]);
    }

    #[test]
    fn test_money_and_dates_convert() {
        assert_eq!(SortValue::from(Money::from_kurus(150)), SortValue::Number(150.0));
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(SortValue::from(date), SortValue::Text("2025-03-01".to_string()));
        assert_eq!(SortValue::from(None::<i32>), SortValue::Null);
    }
}
