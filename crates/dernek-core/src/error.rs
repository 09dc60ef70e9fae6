//! # Error Types
//!
//! Domain-specific error types for dernek-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dernek-core errors (this file)                                        │
//! │  ├── CoreError        - Config, collation, column config failures      │
//! │  └── ValidationError  - Form input failures (shown next to the field)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → host app error → Frontend         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Message Language
//! `ValidationError` messages are displayed verbatim under form fields, so
//! they are written in Turkish. `CoreError` messages end up in logs and
//! developer tooling and stay in English.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Crate-level errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The collation locale could not be parsed or has no collation data.
    #[error("Collator unavailable for locale '{locale}': {reason}")]
    Collation { locale: String, reason: String },

    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read.
    #[error("Failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Config file is not valid TOML for `CoreConfig`.
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A column id is not defined for the page.
    ///
    /// ## When This Occurs
    /// - A stored preference references a column removed in a newer release
    /// - The front end sends a typo'd column id
    #[error("Unknown column '{column}' on page {page}")]
    UnknownColumn { page: String, column: String },

    /// A preset name is not defined for the page.
    #[error("Unknown preset '{preset}' on page {page}")]
    UnknownPreset { page: String, preset: String },

    /// Attempt to hide a column the page cannot work without.
    #[error("Column '{0}' is required and cannot be hidden")]
    RequiredColumn(String),

    /// Proposed column order is not a permutation of the page's columns.
    #[error("Column order must contain every column exactly once: {0}")]
    InvalidColumnOrder(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant renders to the message the form shows under the field.
/// Variants are ordered the way checks run, so callers can tell "wrong
/// length" apart from "bad checksum" and guide the user accordingly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} zorunludur")]
    Required { field: String },

    /// Field must contain digits only.
    #[error("{field} sadece rakamlardan oluşmalıdır")]
    NotNumeric { field: String },

    /// Field must have an exact number of digits.
    #[error("{field} {digits} haneli olmalıdır")]
    WrongLength { field: String, digits: usize },

    /// Field must not start with zero.
    #[error("{field} 0 ile başlayamaz")]
    LeadingZero { field: String },

    /// Check digits do not match.
    #[error("Geçersiz {field}")]
    ChecksumMismatch { field: String },

    /// Value does not match the accepted format.
    #[error("Geçerli bir {field} girin{}", example_suffix(.example))]
    InvalidFormat {
        field: String,
        example: Option<String>,
    },

    /// Value must not be negative.
    #[error("{field} negatif olamaz")]
    Negative { field: String },

    /// Value exceeds the allowed maximum.
    #[error("{field} çok büyük (en fazla {max})")]
    TooLarge { field: String, max: String },
}

fn example_suffix(example: &Option<String>) -> String {
    match example {
        Some(example) => format!(" (örn: {example})"),
        None => String::new(),
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
