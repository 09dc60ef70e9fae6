//! # dernek-core: Shared Table Logic for Dernek Yönetim
//!
//! Sorting, validation and column handling used by every list page of the
//! association management app. Pure functions over in-memory records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dernek Yönetim Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    List Pages (UI)                              │   │
//! │  │    Üyeler ──► Aidat Takip ──► Gelirler ──► Giderler            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ header click / form input              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dernek-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  sorting  │  │ collation │  │validation │  │  columns  │  │   │
//! │  │   │ SortValue │  │ Turkish   │  │ TC, IBAN  │  │ presets   │  │   │
//! │  │   │  Sorter   │  │ ICU4X     │  │ phone     │  │ reconcile │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │   types   │  │   money   │  │  format   │                 │   │
//! │  │   │ SortDesc. │  │   Money   │  │ display   │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO NETWORK • DETERMINISTIC                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Sort direction and descriptor (the header click cycle)
//! - [`sorting`] - Stable, null-last, type-aware record sorting
//! - [`collation`] - Turkish-aware string comparison
//! - [`validation`] - TC kimlik, IBAN, phone, e-mail and amount checks
//! - [`money`] - Amounts in kuruş (integer, no floating point)
//! - [`format`] - Display formatting for identifiers, dates and dues periods
//! - [`columns`] - Per-page column visibility, order and widths
//! - [`config`] - Collation and validation settings
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dernek_core::sorting::{sort_records, SortValue};
//! use dernek_core::SortDescriptor;
//!
//! let names = vec!["Zeynep", "ayse", "Ayşe"];
//! let sort = SortDescriptor::unsorted().activate("ad");
//!
//! let sorted = sort_records(names, &sort, |name, _| SortValue::from(*name));
//! assert_eq!(sorted, vec!["ayse", "Ayşe", "Zeynep"]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collation;
pub mod columns;
pub mod config;
pub mod error;
pub mod format;
pub mod money;
pub mod sorting;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use sorting::{SortValue, Sorter};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Collation locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "tr";

/// Largest amount accepted by amount validation, in kuruş.
///
/// 999.999.999,99 ₺, the widest value the amount columns display.
pub const MAX_AMOUNT_KURUS: i64 = 99_999_999_999;
