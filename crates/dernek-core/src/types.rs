//! # Domain Types
//!
//! Sort state shared between the table components and the sorting module.
//!
//! ## Header Click Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sort Direction Cycle                                │
//! │                                                                         │
//! │        click            click             click                         │
//! │  NONE ───────► ASC ───────────► DESC ───────────► NONE                 │
//! │   ↕             ↑                ↓                 ↕                    │
//! │                                                                         │
//! │  Clicking a DIFFERENT column always starts that column at ASC.         │
//! │  The cycle state belongs to the active field, not to every column.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! `SortDescriptor` travels between the front end and Rust as
//! `{ "fieldId": "ad_soyad", "direction": "asc" | "desc" | null }`.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Sort Direction
// =============================================================================

/// Direction of an applied sort.
///
/// "No sort" is modelled as `Option::None` rather than a third variant, so a
/// `SortDirection` value always means the comparator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SortDirection {
    /// Smallest first; nulls still last.
    #[serde(rename = "asc")]
    Ascending,

    /// Largest first; nulls still last.
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Advances the header cycle: `None → Ascending → Descending → None`.
    ///
    /// ## Example
    /// ```rust
    /// use dernek_core::SortDirection;
    ///
    /// let first = SortDirection::next(None);
    /// assert_eq!(first, Some(SortDirection::Ascending));
    /// assert_eq!(SortDirection::next(first), Some(SortDirection::Descending));
    /// assert_eq!(SortDirection::next(Some(SortDirection::Descending)), None);
    /// ```
    pub const fn next(current: Option<SortDirection>) -> Option<SortDirection> {
        match current {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        }
    }

    /// Header glyph for a column's current state.
    pub const fn indicator(direction: Option<SortDirection>) -> &'static str {
        match direction {
            Some(SortDirection::Ascending) => "↑",
            Some(SortDirection::Descending) => "↓",
            None => "↕",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// Free-function form of [`SortDirection::next`] for header click handlers.
#[inline]
pub const fn next_direction(current: Option<SortDirection>) -> Option<SortDirection> {
    SortDirection::next(current)
}

// =============================================================================
// Sort Descriptor
// =============================================================================

/// Which field a table is sorted by, and how.
///
/// Owned by the table component's state and replaced on every header
/// click. Never cached in module-level state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SortDescriptor {
    /// Column id / record field being sorted.
    pub field_id: String,

    /// `None` means the table shows records in their original order.
    pub direction: Option<SortDirection>,
}

impl SortDescriptor {
    /// Descriptor with no sort applied.
    pub fn unsorted() -> Self {
        SortDescriptor::default()
    }

    /// Descriptor sorting `field_id` ascending.
    pub fn ascending(field_id: impl Into<String>) -> Self {
        SortDescriptor {
            field_id: field_id.into(),
            direction: Some(SortDirection::Ascending),
        }
    }

    /// Descriptor sorting `field_id` descending.
    pub fn descending(field_id: impl Into<String>) -> Self {
        SortDescriptor {
            field_id: field_id.into(),
            direction: Some(SortDirection::Descending),
        }
    }

    /// Returns true if the comparator should run at all.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.direction.is_some()
    }

    /// Direction shown on `column`'s header (`None` for inactive columns).
    pub fn direction_for(&self, column_id: &str) -> Option<SortDirection> {
        if self.field_id == column_id {
            self.direction
        } else {
            None
        }
    }

    /// Applies a header click on `column_id`.
    ///
    /// ## Rules
    /// - Same column: advance the direction cycle
    /// - Different column: start that column fresh at ascending
    ///
    /// ## Example
    /// ```rust
    /// use dernek_core::{SortDescriptor, SortDirection};
    ///
    /// let sort = SortDescriptor::unsorted().activate("ad_soyad");
    /// assert_eq!(sort.direction, Some(SortDirection::Ascending));
    ///
    /// let sort = sort.activate("ad_soyad");
    /// assert_eq!(sort.direction, Some(SortDirection::Descending));
    ///
    /// // Switching columns restarts at ascending
    /// let sort = sort.activate("kalan_borc");
    /// assert_eq!(sort.field_id, "kalan_borc");
    /// assert_eq!(sort.direction, Some(SortDirection::Ascending));
    /// ```
    pub fn activate(&self, column_id: &str) -> SortDescriptor {
        let current = self.direction_for(column_id);

        SortDescriptor {
            field_id: column_id.to_string(),
            direction: SortDirection::next(current),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
