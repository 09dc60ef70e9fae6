//! # Collation
//!
//! Locale-aware string ordering for table sorting.
//!
//! ## Why Not `str::cmp`?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Byte order vs Turkish alphabet                                         │
//! │                                                                         │
//! │  Byte order:     "Zeynep" < "ayse" < "Ayşe"   (uppercase first, ş last)│
//! │  Turkish order:  "ayse" < "Ayşe" < "Zeynep"                            │
//! │                                                                         │
//! │  ASCII case fold maps İ → i̇ and I → i, which puts "Istanbul" next to   │
//! │  "istanbul". In Turkish, I pairs with ı and İ pairs with i.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Comparison uses ICU4X (`icu_collator`) CLDR collation tailored for the
//! configured locale. Collation data is compiled into the binary.

use std::cmp::Ordering;
use std::fmt;

use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::{locale, Locale};
use tracing::debug;

use crate::config::CollationSettings;
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Text Collator
// =============================================================================

/// Compares strings according to a locale's collation rules.
pub struct TextCollator {
    collator: Collator,
    locale: String,
}

fn options(case_sensitive: bool) -> CollatorOptions {
    let mut options = CollatorOptions::new();
    // Secondary strength ignores case but keeps accents (s ≠ ş)
    options.strength = Some(if case_sensitive {
        Strength::Tertiary
    } else {
        Strength::Secondary
    });
    options
}

impl TextCollator {
    /// Builds a collator for the given settings.
    ///
    /// ## Errors
    /// `CoreError::Collation` if the locale does not parse or no collation
    /// data exists for it.
    pub fn new(settings: &CollationSettings) -> CoreResult<Self> {
        let locale: Locale = settings
            .locale
            .parse()
            .map_err(|e| CoreError::Collation {
                locale: settings.locale.clone(),
                reason: format!("{e}"),
            })?;

        let collator = Collator::try_new(&locale.into(), options(settings.case_sensitive))
            .map_err(|e| CoreError::Collation {
                locale: settings.locale.clone(),
                reason: format!("{e}"),
            })?;

        debug!(locale = %settings.locale, case_sensitive = settings.case_sensitive, "Collator ready");

        Ok(TextCollator {
            collator,
            locale: settings.locale.clone(),
        })
    }

    /// Case-insensitive Turkish collator.
    pub fn turkish() -> Self {
        let collator = Collator::try_new(&locale!("tr").into(), options(false))
            .expect("compiled Turkish collation data should load");

        TextCollator {
            collator,
            locale: crate::DEFAULT_LOCALE.to_string(),
        }
    }

    /// Compares two strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }

    /// Locale the collator was built for.
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl fmt::Debug for TextCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextCollator")
            .field("locale", &self.locale)
            .finish()
    }
}

thread_local! {
    static TURKISH: TextCollator = TextCollator::turkish();
}

/// Compares two strings with the default case-insensitive Turkish collator.
///
/// The collator is built once per thread.
///
/// ## Example
/// ```rust
/// use std::cmp::Ordering;
/// use dernek_core::collation::compare_turkish;
///
/// assert_eq!(compare_turkish("ayse", "Ayşe"), Ordering::Less);
/// assert_eq!(compare_turkish("Ayşe", "Zeynep"), Ordering::Less);
/// ```
pub fn compare_turkish(a: &str, b: &str) -> Ordering {
    with_turkish(|collator| collator.compare(a, b))
}

/// Runs `f` with this thread's default Turkish collator.
pub fn with_turkish<R>(f: impl FnOnce(&TextCollator) -> R) -> R {
    TURKISH.with(f)
}

// =============================================================================
// Unit Tests
// =============================================================================
