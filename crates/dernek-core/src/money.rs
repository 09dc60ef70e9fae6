//! # Money Module
//!
//! Provides the `Money` type for Turkish lira amounts.
//!
//! ## Why Integer Kuruş?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Dues of 0,10 ₺ + 0,20 ₺ in floating point:                             │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer kuruş (1 ₺ = 100 kuruş)                          │
//! │    10 + 20 = 30 kuruş  ✅                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dernek_core::money::Money;
//!
//! let aidat = Money::from_kurus(12_550); // 125,50 ₺
//! assert_eq!(aidat.format_tr(), "₺125,50");
//!
//! // Amount fields accept Turkish and plain notation
//! assert_eq!(Money::parse_tr("1.234,56"), Some(Money::from_kurus(123_456)));
//! assert_eq!(Money::parse_tr("1234.56"), Some(Money::from_kurus(123_456)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in kuruş (1/100 TRY).
///
/// - **i64 (signed)**: refunds and corrections are negative
/// - **Single field tuple struct**: zero-cost over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from kuruş.
    #[inline]
    pub const fn from_kurus(kurus: i64) -> Self {
        Money(kurus)
    }

    /// Returns the value in kuruş.
    #[inline]
    pub const fn kurus(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses an amount typed into a form field.
    ///
    /// ## Accepted Notation
    /// ```text
    /// "1.234,56"  Turkish: dot groups, comma decimals
    /// "1234,56"   Turkish without grouping
    /// "1.250"     Grouping only (three digits after the dot)
    /// "1234.56"   Plain decimal point (one or two digits after the dot)
    /// "₺ 250"     Currency sign and spaces are ignored
    /// "-15,5"     Leading minus for corrections
    /// ```
    ///
    /// Returns `None` for empty input, stray characters, misplaced group
    /// dots, more than two decimals, or values that overflow.
    pub fn parse_tr(input: &str) -> Option<Money> {
        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '₺')
            .collect();

        let (negative, body) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.as_str()),
        };

        let (whole, fraction) = if body.contains(',') {
            let (whole, fraction) = body.split_once(',')?;
            (ungroup(whole)?, fraction.to_string())
        } else {
            match body.split_once('.') {
                // "1.250" and "1.234.567": three digits after a dot are a
                // thousands group, never kuruş
                Some((_, rest)) if body.matches('.').count() > 1 || rest.len() == 3 => {
                    (ungroup(body)?, String::new())
                }
                Some((whole, fraction)) => (whole.to_string(), fraction.to_string()),
                None => (body.to_string(), String::new()),
            }
        };

        if whole.is_empty()
            || fraction.len() > 2
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let lira: i64 = whole.parse().ok()?;
        let kurus: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().ok()? * 10,
            _ => fraction.parse().ok()?,
        };

        let total = lira.checked_mul(100)?.checked_add(kurus)?;
        Some(Money(if negative { -total } else { total }))
    }

    /// Formats as Turkish currency text: `₺1.234,56`.
    pub fn format_tr(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}₺{}", self.format_number_tr())
    }

    /// Formats without the currency sign: `1.234,56`.
    pub fn format_number_tr(&self) -> String {
        let abs = self.0.unsigned_abs();
        let lira = (abs / 100).to_string();
        let kurus = abs % 100;

        let mut grouped = String::with_capacity(lira.len() + lira.len() / 3);
        for (i, digit) in lira.chars().enumerate() {
            if i > 0 && (lira.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        format!("{grouped},{kurus:02}")
    }
}

/// Removes thousands dots, requiring `1-3` leading digits and groups of three.
fn ungroup(whole: &str) -> Option<String> {
    let mut groups = whole.split('.');
    let head = groups.next()?;
    if !whole.contains('.') {
        return Some(head.to_string());
    }

    if head.is_empty() || head.len() > 3 {
        return None;
    }

    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_tr())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kurus() {
        let money = Money::from_kurus(12_550);
        assert_eq!(money.kurus(), 12_550);
        assert!(!money.is_negative());
        assert_eq!(Money::default(), Money::zero());
    }

    #[test]
    fn test_format_tr() {
        assert_eq!(Money::from_kurus(0).format_tr(), "₺0,00");
        assert_eq!(Money::from_kurus(5).format_tr(), "₺0,05");
        assert_eq!(Money::from_kurus(99_900).format_tr(), "₺999,00");
        assert_eq!(Money::from_kurus(123_456).format_tr(), "₺1.234,56");
        assert_eq!(Money::from_kurus(123_456_789).format_tr(), "₺1.234.567,89");
        assert_eq!(Money::from_kurus(-550).format_tr(), "-₺5,50");
        assert_eq!(format!("{}", Money::from_kurus(100_000)), "₺1.000,00");
    }

    #[test]
    fn test_parse_tr_notations() {
        assert_eq!(Money::parse_tr("1.234,56"), Some(Money::from_kurus(123_456)));
        assert_eq!(Money::parse_tr("1234,56"), Some(Money::from_kurus(123_456)));
        assert_eq!(Money::parse_tr("1234.56"), Some(Money::from_kurus(123_456)));
        assert_eq!(Money::parse_tr("1.234.567"), Some(Money::from_kurus(123_456_700)));
        assert_eq!(Money::parse_tr("1.250"), Some(Money::from_kurus(125_000)));
        assert_eq!(Money::parse_tr("-1.250"), Some(Money::from_kurus(-125_000)));
        assert_eq!(Money::parse_tr("12.5"), Some(Money::from_kurus(1_250)));
        assert_eq!(Money::parse_tr("₺ 250"), Some(Money::from_kurus(25_000)));
        assert_eq!(Money::parse_tr("15,5"), Some(Money::from_kurus(1_550)));
        assert_eq!(Money::parse_tr("-15,5"), Some(Money::from_kurus(-1_550)));
        assert_eq!(Money::parse_tr("0"), Some(Money::zero()));
    }

    #[test]
    fn test_parse_tr_rejects_garbage() {
        assert_eq!(Money::parse_tr(""), None);
        assert_eq!(Money::parse_tr("   "), None);
        assert_eq!(Money::parse_tr("abc"), None);
        assert_eq!(Money::parse_tr("12,345"), None);
        assert_eq!(Money::parse_tr(",50"), None);
        assert_eq!(Money::parse_tr("1,2,3"), None);
        assert_eq!(Money::parse_tr("1.2345"), None);
        assert_eq!(Money::parse_tr("1.25.0"), None);
        assert_eq!(Money::parse_tr("1234.567"), None);
        assert_eq!(Money::parse_tr("12.34,56"), None);
        assert_eq!(Money::parse_tr("99999999999999999999"), None);
    }
}
