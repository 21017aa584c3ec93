//! Batch-operation vocabulary: indexed entries and partial-success reports.
//!
//! Batch inserts and deletes process their entries in ascending index order
//! (a stable sort, so same-index entries keep their input order) and
//! re-validate each index against the container's *current* length at the
//! moment it is processed. Sizes shift as the batch runs — an index that was
//! valid against the original length may no longer be by the time it is
//! reached, and vice versa. Invalid entries are skipped and reported, never
//! failing the batch; this is the deliberate counterpart to the hard
//! [`OutOfBounds`](crate::OutOfBounds) failures of single-item operations.

/// A value paired with the 1-based list index it targets (batch insert) or
/// was removed from (batch delete report).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedValue<T> {
    /// 1-based position in the list.
    pub index: usize,
    /// The payload.
    pub value: T,
}

impl<T> IndexedValue<T> {
    /// Creates an entry targeting `index`.
    #[inline]
    pub fn new(index: usize, value: T) -> Self {
        Self { index, value }
    }
}

/// Sorts batch entries ascending by index.
///
/// The sort is stable: entries sharing an index keep their relative input
/// order.
pub(crate) fn sort_by_index<T>(entries: &mut [IndexedValue<T>]) {
    entries.sort_by_key(|entry| entry.index);
}

/// Outcome of a batch insert: handles of the inserted nodes plus the
/// entries that were skipped (index outside `1..=len` when processed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInsert<Idx, T> {
    /// Handles of the inserted nodes, in processing order.
    pub inserted: Vec<Idx>,
    /// Entries rejected at processing time, with their values returned.
    pub skipped: Vec<IndexedValue<T>>,
}

impl<Idx, T> BatchInsert<Idx, T> {
    pub(crate) fn new() -> Self {
        Self {
            inserted: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Outcome of a batch delete: removed `(index, value)` pairs plus the
/// indices that were skipped.
///
/// The index recorded for each deleted value is the index *as processed*,
/// i.e. after earlier deletions in the same batch had already shifted and
/// shrunk the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchDelete<T> {
    /// Removed entries, in processing order.
    pub deleted: Vec<IndexedValue<T>>,
    /// Indices rejected at processing time (outside `1..=len`).
    pub skipped: Vec<usize>,
}

impl<T> BatchDelete<T> {
    pub(crate) fn new() -> Self {
        Self {
            deleted: Vec::new(),
            skipped: Vec::new(),
        }
    }
}
