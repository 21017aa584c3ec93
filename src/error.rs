//! Error types for single-item positional operations.
//!
//! Batch operations never fail: invalid entries are skipped and reported
//! back to the caller (see [`BatchInsert`](crate::BatchInsert) and
//! [`BatchDelete`](crate::BatchDelete)). Single-item operations fail
//! hard with the types here, leaving the structure unmodified. Preserving
//! that asymmetry is part of the API contract.

/// A positional operation received an index outside its valid range.
///
/// Indices are 1-based. Valid insertion indices are `1..=len + 1`; valid
/// deletion and lookup indices are `1..=len`. The structure is left
/// unmodified when this error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutOfBounds {
    /// The rejected index.
    pub index: usize,
    /// The container's length at the time of the call.
    pub len: usize,
}

impl core::fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "index {} out of bounds for length {}",
            self.index, self.len
        )
    }
}

impl std::error::Error for OutOfBounds {}

/// A tree operation received a handle whose node no longer exists.
///
/// Handles go stale when their node is removed (or reattached elsewhere and
/// then removed). The tree is left unmodified when this error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaleHandle;

impl core::fmt::Display for StaleHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "handle does not refer to a live node")
    }
}

impl std::error::Error for StaleHandle {}
