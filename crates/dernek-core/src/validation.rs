//! # Validation Module
//!
//! Form field validators for member, vendor and bookkeeping screens.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validator Shapes                                   │
//! │                                                                         │
//! │  is_valid_*(value) -> bool                                             │
//! │  └── Quick check (submit button state, table badges)                   │
//! │                                                                         │
//! │  validate_*(value) -> ValidationResult<()>                             │
//! │  └── Ordered checks, first failure wins, typed error                   │
//! │                                                                         │
//! │  *_error(value) -> String                                              │
//! │  └── Message shown under the field, "" when valid                      │
//! │                                                                         │
//! │  All validators are pure: same input, same answer, no I/O.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Optional Fields
//! Phone, e-mail and IBAN are optional on their forms: empty input is
//! valid. TC kimlik is required on the member form.
//!
//! ## Usage
//! ```rust
//! use dernek_core::validation::{is_valid_tc_kimlik, tc_kimlik_error, is_valid_phone};
//!
//! assert!(is_valid_tc_kimlik("10000000146"));
//! assert_eq!(tc_kimlik_error("10000000146"), "");
//! assert_eq!(tc_kimlik_error("00000000000"), "TC kimlik numarası 0 ile başlayamaz");
//! assert!(is_valid_phone("0532 123 45 67"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const TC_FIELD: &str = "TC kimlik numarası";
const TC_LENGTH: usize = 11;
const PHONE_FIELD: &str = "telefon numarası";
const PHONE_EXAMPLE: &str = "5XX XXX XX XX";
const IBAN_FIELD: &str = "IBAN";
const IBAN_EXAMPLE: &str = "TR00 0000 0000 0000 0000 0000 00";
const EMAIL_FIELD: &str = "email adresi";
const AMOUNT_FIELD: &str = "Tutar";

// ASCII digits only: `\d` would accept other scripts' digits
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:5[0-9]{9}|05[0-9]{9}|\+905[0-9]{9}|905[0-9]{9})$")
        .expect("phone regex should compile")
});

static TR_IBAN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^TR[0-9]{24}$").expect("IBAN regex should compile"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile")
});

/// Turns a check into the "" / message form used by form components.
fn error_message(result: ValidationResult<()>) -> String {
    match result {
        Ok(()) => String::new(),
        Err(e) => e.to_string(),
    }
}

// =============================================================================
// TC Kimlik No
// =============================================================================

/// Validates a TC kimlik number with ordered checks.
///
/// ## Check Order (first failure wins)
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  ""            → Required          "TC kimlik numarası zorunludur"      │
/// │  "1234567890A" → NotNumeric        "... sadece rakamlardan oluşmalıdır" │
/// │  "1234567890"  → WrongLength       "... 11 haneli olmalıdır"            │
/// │  "00000000000" → LeadingZero       "... 0 ile başlayamaz"               │
/// │  "12345678901" → ChecksumMismatch  "Geçersiz TC kimlik numarası"        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Checksum
/// With digits `d0..d10`:
/// - `d9  == (7 × (d0+d2+d4+d6+d8) − (d1+d3+d5+d7)) mod 10` (non-negative)
/// - `d10 == (d0+…+d9) mod 10`
pub fn validate_tc_kimlik(tc: &str) -> ValidationResult<()> {
    if tc.is_empty() {
        return Err(ValidationError::Required {
            field: TC_FIELD.to_string(),
        });
    }

    if !tc.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NotNumeric {
            field: TC_FIELD.to_string(),
        });
    }

    // All ASCII from here, so byte length equals digit count
    if tc.len() != TC_LENGTH {
        return Err(ValidationError::WrongLength {
            field: TC_FIELD.to_string(),
            digits: TC_LENGTH,
        });
    }

    let digits: Vec<i32> = tc.bytes().map(|b| i32::from(b - b'0')).collect();

    if digits[0] == 0 {
        return Err(ValidationError::LeadingZero {
            field: TC_FIELD.to_string(),
        });
    }

    if !tc_checksum_matches(&digits) {
        return Err(ValidationError::ChecksumMismatch {
            field: TC_FIELD.to_string(),
        });
    }

    Ok(())
}

fn tc_checksum_matches(d: &[i32]) -> bool {
    let odd_sum = d[0] + d[2] + d[4] + d[6] + d[8];
    let even_sum = d[1] + d[3] + d[5] + d[7];

    // Can go negative: 7 × 1 − 36 = −29
    let check_10 = (odd_sum * 7 - even_sum).rem_euclid(10);
    if check_10 != d[9] {
        return false;
    }

    let check_11 = d[..10].iter().sum::<i32>() % 10;
    check_11 == d[10]
}

/// Returns true if `tc` is a well-formed TC kimlik number.
pub fn is_valid_tc_kimlik(tc: &str) -> bool {
    validate_tc_kimlik(tc).is_ok()
}

/// Message for the TC kimlik field, `""` when valid.
pub fn tc_kimlik_error(tc: &str) -> String {
    error_message(validate_tc_kimlik(tc))
}

// =============================================================================
// IBAN
// =============================================================================

/// Removes whitespace and uppercases an IBAN.
pub fn normalize_iban(iban: &str) -> String {
    iban.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// ISO 13616 check: rotate the first four characters to the end, map
/// letters to 10..35, and reduce mod 97 one digit at a time.
fn iban_checksum_matches(iban: &str) -> bool {
    let (head, tail) = iban.split_at(4);

    let mut remainder: u32 = 0;
    for c in tail.chars().chain(head.chars()) {
        let value = match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 55,
            _ => return false,
        };

        // Letter values are two digits and feed in as two steps
        if value >= 10 {
            remainder = (remainder * 10 + value / 10) % 97;
            remainder = (remainder * 10 + value % 10) % 97;
        } else {
            remainder = (remainder * 10 + value) % 97;
        }
    }

    remainder == 1
}

/// Returns true if `iban` is a Turkish IBAN with a valid mod-97 checksum.
///
/// Spaces are ignored and letters may be lowercase. Empty input is
/// **not** valid here; use [`iban_error`] for optional form fields.
///
/// ## Example
/// ```rust
/// use dernek_core::validation::is_valid_iban;
///
/// assert!(is_valid_iban("TR33 0006 1005 1978 6457 8413 26"));
/// assert!(!is_valid_iban("TR33 0006 1005 1978 6457 8413 27"));
/// ```
pub fn is_valid_iban(iban: &str) -> bool {
    let cleaned = normalize_iban(iban);
    TR_IBAN_PATTERN.is_match(&cleaned) && iban_checksum_matches(&cleaned)
}

/// Validates an optional IBAN field.
pub fn validate_iban(iban: &str) -> ValidationResult<()> {
    let cleaned = normalize_iban(iban);
    if cleaned.is_empty() {
        return Ok(());
    }

    if !TR_IBAN_PATTERN.is_match(&cleaned) {
        return Err(ValidationError::InvalidFormat {
            field: IBAN_FIELD.to_string(),
            example: Some(IBAN_EXAMPLE.to_string()),
        });
    }

    if !iban_checksum_matches(&cleaned) {
        return Err(ValidationError::ChecksumMismatch {
            field: IBAN_FIELD.to_string(),
        });
    }

    Ok(())
}

/// Message for an optional IBAN field, `""` when valid or empty.
pub fn iban_error(iban: &str) -> String {
    error_message(validate_iban(iban))
}

// =============================================================================
// Phone
// =============================================================================

/// Strips the separators people type into phone fields.
fn clean_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

/// Returns true for a Turkish mobile number or an empty (optional) field.
///
/// ## Accepted Formats
/// ```text
/// 5XXXXXXXXX      10 digits, local
/// 05XXXXXXXXX     11 digits, with trunk zero
/// +905XXXXXXXXX   13 chars, international
/// 905XXXXXXXXX    12 digits, international without +
/// ```
/// Spaces, dashes and parentheses are ignored. Landlines and other
/// country codes are rejected.
pub fn is_valid_phone(phone: &str) -> bool {
    let cleaned = clean_phone(phone);
    cleaned.is_empty() || PHONE_PATTERN.is_match(&cleaned)
}

/// Validates an optional phone field.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: PHONE_FIELD.to_string(),
            example: Some(PHONE_EXAMPLE.to_string()),
        })
    }
}

/// Message for an optional phone field, `""` when valid or empty.
pub fn phone_error(phone: &str) -> String {
    error_message(validate_phone(phone))
}

// =============================================================================
// E-mail
// =============================================================================

/// Returns true for a plausible e-mail address or an empty (optional) field.
pub fn is_valid_email(email: &str) -> bool {
    email.is_empty() || EMAIL_PATTERN.is_match(email)
}

/// Message for an optional e-mail field, `""` when valid or empty.
pub fn email_error(email: &str) -> String {
    if is_valid_email(email) {
        String::new()
    } else {
        ValidationError::InvalidFormat {
            field: EMAIL_FIELD.to_string(),
            example: None,
        }
        .to_string()
    }
}

// =============================================================================
// Amounts
// =============================================================================

/// Validates a parsed amount against the configured ceiling.
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed `max`
pub fn validate_amount(amount: Money, max: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: AMOUNT_FIELD.to_string(),
        });
    }

    if amount > max {
        return Err(ValidationError::TooLarge {
            field: AMOUNT_FIELD.to_string(),
            max: max.format_tr(),
        });
    }

    Ok(())
}

/// Parses and validates an amount field.
///
/// Empty input is an error only when the field is `required`; the
/// returned `Option` is `None` in that optional-and-empty case.
pub fn parse_amount(input: &str, required: bool, max: Money) -> ValidationResult<Option<Money>> {
    if input.trim().is_empty() {
        return if required {
            Err(ValidationError::Required {
                field: AMOUNT_FIELD.to_string(),
            })
        } else {
            Ok(None)
        };
    }

    let amount = Money::parse_tr(input).ok_or_else(|| ValidationError::InvalidFormat {
        field: "tutar".to_string(),
        example: Some("1.250,00".to_string()),
    })?;

    validate_amount(amount, max)?;
    Ok(Some(amount))
}

/// Message for an amount field, `""` when valid.
pub fn amount_error(input: &str, required: bool, max: Money) -> String {
    error_message(parse_amount(input, required, max).map(|_| ()))
}

// =============================================================================
// Required Fields
// =============================================================================

/// Message for a required field, `""` when a non-blank value is present.
///
/// ## Example
/// ```rust
/// use dernek_core::validation::required_error;
///
/// assert_eq!(required_error(None, "Ad Soyad"), "Ad Soyad zorunludur");
/// assert_eq!(required_error(Some("Ayşe"), "Ad Soyad"), "");
/// ```
pub fn required_error(value: Option<&str>, field: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => String::new(),
        _ => ValidationError::Required {
            field: field.to_string(),
        }
        .to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_IBAN: &str = "TR330006100519786457841326";

    #[test]
    fn test_tc_known_vectors() {
        assert!(is_valid_tc_kimlik("10000000146"));
        assert!(!is_valid_tc_kimlik("00000000000"));
        assert!(!is_valid_tc_kimlik("1234567890"));
        assert!(!is_valid_tc_kimlik("1234567890A"));
        assert!(!is_valid_tc_kimlik("12345678901"));
    }

    #[test]
    fn test_tc_negative_intermediate_checksum() {
        // 7 × 1 − (9+9+9+9) = −29 → 1
        assert!(is_valid_tc_kimlik("19090909018"));
        assert!(!is_valid_tc_kimlik("19090909098"));
    }

    #[test]
    fn test_tc_error_messages_are_distinct() {
        assert_eq!(tc_kimlik_error(""), "TC kimlik numarası zorunludur");
        assert_eq!(
            tc_kimlik_error("1234567890A"),
            "TC kimlik numarası sadece rakamlardan oluşmalıdır"
        );
        assert_eq!(
            tc_kimlik_error("1234567890"),
            "TC kimlik numarası 11 haneli olmalıdır"
        );
        assert_eq!(
            tc_kimlik_error("00000000000"),
            "TC kimlik numarası 0 ile başlayamaz"
        );
        assert_eq!(tc_kimlik_error("10000000147"), "Geçersiz TC kimlik numarası");
        assert_eq!(tc_kimlik_error("10000000146"), "");
    }

    #[test]
    fn test_tc_check_order() {
        // Non-digit wins over wrong length
        assert!(matches!(
            validate_tc_kimlik("12A"),
            Err(ValidationError::NotNumeric { .. })
        ));
        // Wrong length wins over leading zero
        assert!(matches!(
            validate_tc_kimlik("0123"),
            Err(ValidationError::WrongLength { .. })
        ));
        // Unicode digits are not digits here
        assert!(matches!(
            validate_tc_kimlik("١٠٠٠٠٠٠٠١٤٦"),
            Err(ValidationError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_tc_tenth_and_eleventh_digit_failures() {
        // 10th digit wrong
        assert!(!is_valid_tc_kimlik("10000000156"));
        // 11th digit wrong
        assert!(!is_valid_tc_kimlik("10000000145"));
    }

    #[test]
    fn test_iban_known_good_and_mutated() {
        assert!(is_valid_iban(VALID_IBAN));
        assert!(is_valid_iban("tr33 0006 1005 1978 6457 8413 26"));

        // Flip each account digit once: mod 97 catches every single-digit error
        for position in 4..VALID_IBAN.len() {
            let mut bytes = VALID_IBAN.as_bytes().to_vec();
            bytes[position] = if bytes[position] == b'9' {
                b'0'
            } else {
                bytes[position] + 1
            };
            let mutated = String::from_utf8(bytes).unwrap();
            assert!(!is_valid_iban(&mutated), "{mutated} should be rejected");
        }
    }

    #[test]
    fn test_iban_format() {
        assert!(!is_valid_iban(""));
        assert!(!is_valid_iban("DE89370400440532013000"));
        assert!(!is_valid_iban("TR33000610051978645784132"));
        assert!(!is_valid_iban("TR3300061005197864578413260"));
        assert!(!is_valid_iban("TR33000610051978645784132X"));
    }

    #[test]
    fn test_iban_error_for_optional_field() {
        assert_eq!(iban_error(""), "");
        assert_eq!(iban_error("   "), "");
        assert_eq!(iban_error(VALID_IBAN), "");
        assert_eq!(iban_error("TR330006100519786457841327"), "Geçersiz IBAN");
        assert_eq!(
            iban_error("TR12"),
            "Geçerli bir IBAN girin (örn: TR00 0000 0000 0000 0000 0000 00)"
        );
    }

    #[test]
    fn test_phone_formats() {
        assert!(is_valid_phone("5321234567"));
        assert!(is_valid_phone("05321234567"));
        assert!(is_valid_phone("+905321234567"));
        assert!(is_valid_phone("905321234567"));
        assert!(is_valid_phone("(0532) 123-45-67"));
        assert!(is_valid_phone("+90 532 123 45 67"));

        assert!(!is_valid_phone("1234567890"));
        assert!(!is_valid_phone("053212345"));
        assert!(!is_valid_phone("02121234567"));
        assert!(!is_valid_phone("+445321234567"));
        assert!(!is_valid_phone("05321234567x"));
    }

    #[test]
    fn test_phone_empty_is_optional() {
        assert!(is_valid_phone(""));
        assert!(is_valid_phone("  "));
        assert_eq!(phone_error(""), "");
        assert_eq!(
            phone_error("123"),
            "Geçerli bir telefon numarası girin (örn: 5XX XXX XX XX)"
        );
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email(""));
        assert!(is_valid_email("uye@dernek.org.tr"));
        assert!(!is_valid_email("uye@dernek"));
        assert!(!is_valid_email("uye dernek@org.tr"));
        assert_eq!(email_error("x@"), "Geçerli bir email adresi girin");
        assert_eq!(email_error("a@b.co"), "");
    }

    #[test]
    fn test_amounts() {
        let max = Money::from_kurus(crate::MAX_AMOUNT_KURUS);

        assert_eq!(parse_amount("1.250,00", true, max), Ok(Some(Money::from_kurus(125_000))));
        assert_eq!(parse_amount("", false, max), Ok(None));
        assert_eq!(amount_error("", true, max), "Tutar zorunludur");
        assert_eq!(amount_error("-5", true, max), "Tutar negatif olamaz");
        assert_eq!(
            amount_error("abc", true, max),
            "Geçerli bir tutar girin (örn: 1.250,00)"
        );
        assert_eq!(
            amount_error("1.000.000.000", true, max),
            "Tutar çok büyük (en fazla ₺999.999.999,99)"
        );
        assert_eq!(amount_error("0", true, max), "");
    }

    #[test]
    fn test_required_error() {
        assert_eq!(required_error(Some("  "), "Ad Soyad"), "Ad Soyad zorunludur");
        assert_eq!(required_error(Some("Ali"), "Ad Soyad"), "");
    }

    #[test]
    fn test_validators_are_pure() {
        for _ in 0..3 {
            assert_eq!(tc_kimlik_error("10000000146"), "");
            assert!(is_valid_iban(VALID_IBAN));
        }
    }
}
