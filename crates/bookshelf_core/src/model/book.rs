//! Book domain model.
//!
//! # Responsibility
//! - Define the catalog record echoed by every store operation.
//! - Define the insert payload and partial-update shapes.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `NewBook` carries no id; clients cannot pick identifiers.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a catalog record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BookId = i64;

/// One catalog entry as persisted and as returned by every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Positive, unique, immutable once assigned.
    pub id: BookId,
    /// Serialized as `name` to match the persisted column naming.
    #[serde(rename = "name")]
    pub title: String,
    pub author: String,
    /// Publication year; non-negative by collaborator contract.
    pub year: i64,
}

/// Insert payload for a book that does not exist yet.
///
/// The store computes the id at insert time, so this shape deliberately
/// has no id field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }
}

/// Partial update for an existing book.
///
/// Each `None` field means "keep the current value". The store resolves
/// the patch against the persisted row before writing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i64>,
}

impl BookPatch {
    /// Returns whether this patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none()
    }
}
