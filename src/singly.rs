//! Singly-linked list over an owned arena.
//!
//! Each node carries one forward link. The container tracks `head`, `tail`,
//! `len`, and an `initialized` flag. The flag is part of the observable
//! lifecycle: a container starts uninitialized, the first insertion (of any
//! kind) initializes it, and a deletion that empties it resets it to
//! uninitialized.
//!
//! Positional operations use 1-based indices. Valid insertion indices are
//! `1..=len + 1`; valid deletion/lookup indices are `1..=len`.
//!
//! # Example
//!
//! ```
//! use linkage::SinglyLinkedList;
//!
//! let mut list: SinglyLinkedList<&str> = SinglyLinkedList::new();
//!
//! list.insert_tail("a");
//! list.insert_tail("c");
//! list.insert_at("b", 2).unwrap();
//!
//! let values: Vec<_> = list.iter().copied().collect();
//! assert_eq!(values, vec!["a", "b", "c"]);
//!
//! assert_eq!(list.delete_head(), Some("a"));
//! assert_eq!(list.len(), 2);
//! ```

use crate::batch::{sort_by_index, BatchDelete, BatchInsert, IndexedValue};
use crate::{Arena, Index, OutOfBounds};

#[derive(Debug)]
struct Node<T, Idx> {
    data: T,
    next: Idx,
}

/// A singly-linked list that owns its nodes in an arena.
///
/// Insertions return the new node's arena index, a stable handle that stays
/// valid until that node is deleted. See the [module docs](self) for the
/// indexing and lifecycle rules.
#[derive(Debug)]
pub struct SinglyLinkedList<T, Idx: Index = u32> {
    arena: Arena<Node<T, Idx>, Idx>,
    head: Idx,
    tail: Idx,
    len: usize,
    initialized: bool,
}

impl<T, Idx: Index> SinglyLinkedList<T, Idx> {
    /// Creates an empty, uninitialized list.
    #[inline]
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            head: Idx::NONE,
            tail: Idx::NONE,
            len: 0,
            initialized: false,
        }
    }

    /// Creates an empty list with room for `capacity` nodes before the
    /// arena reallocates.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            head: Idx::NONE,
            tail: Idx::NONE,
            len: 0,
            initialized: false,
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the list has been initialized and not since
    /// emptied.
    ///
    /// Always equal to `!self.is_empty()`; exposed because the
    /// uninitialized/initialized lifecycle is part of the contract.
    #[inline]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the head node's handle, or `None` if empty.
    #[inline]
    pub fn head_index(&self) -> Option<Idx> {
        if self.head.is_none() {
            None
        } else {
            Some(self.head)
        }
    }

    /// Returns the tail node's handle, or `None` if empty.
    #[inline]
    pub fn tail_index(&self) -> Option<Idx> {
        if self.tail.is_none() {
            None
        } else {
            Some(self.tail)
        }
    }

    /// Returns a reference to the value behind a node handle.
    #[inline]
    pub fn get(&self, idx: Idx) -> Option<&T> {
        self.arena.get(idx).map(|node| &node.data)
    }

    /// Returns a mutable reference to the value behind a node handle.
    #[inline]
    pub fn get_mut(&mut self, idx: Idx) -> Option<&mut T> {
        self.arena.get_mut(idx).map(|node| &mut node.data)
    }

    /// Returns the handle of the node after `idx`.
    ///
    /// Returns `None` if `idx` is stale or is the tail.
    #[inline]
    pub fn next_index(&self, idx: Idx) -> Option<Idx> {
        let next = self.arena.get(idx)?.next;
        if next.is_none() {
            None
        } else {
            Some(next)
        }
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Initializes the list with a sole node.
    ///
    /// Any existing nodes are dropped first. After the call `head == tail`,
    /// `len == 1`, and the list is initialized.
    pub fn initialize(&mut self, value: T) -> Idx {
        if self.len > 0 {
            self.arena.clear();
        }

        let idx = self.arena.insert(Node {
            data: value,
            next: Idx::NONE,
        });
        self.head = idx;
        self.tail = idx;
        self.len = 1;
        self.initialized = true;
        idx
    }

    /// Appends a value at the tail, returning the new node's handle.
    ///
    /// Delegates to [`initialize`](Self::initialize) on an uninitialized
    /// list.
    pub fn insert_tail(&mut self, value: T) -> Idx {
        if !self.initialized {
            return self.initialize(value);
        }

        let idx = self.arena.insert(Node {
            data: value,
            next: Idx::NONE,
        });
        self.node_mut(self.tail).next = idx;
        self.tail = idx;
        self.len += 1;
        idx
    }

    /// Prepends a value at the head, returning the new node's handle.
    pub fn insert_head(&mut self, value: T) -> Idx {
        if !self.initialized {
            return self.initialize(value);
        }

        let idx = self.arena.insert(Node {
            data: value,
            next: self.head,
        });
        self.head = idx;
        self.len += 1;
        idx
    }

    /// Inserts a value at a 1-based position.
    ///
    /// Index `1` prepends, index `len + 1` appends, anything between
    /// splices mid-list.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] (list unmodified) if `index` is outside
    /// `1..=len + 1`.
    pub fn insert_at(&mut self, value: T, index: usize) -> Result<Idx, OutOfBounds> {
        if index == 0 || index > self.len + 1 {
            return Err(OutOfBounds {
                index,
                len: self.len,
            });
        }

        if index == 1 {
            return Ok(self.insert_head(value));
        }
        if index == self.len + 1 {
            return Ok(self.insert_tail(value));
        }

        Ok(self.splice_after(self.node_at_hops(index - 2), value))
    }

    /// Inserts several values in one call, reporting partial success.
    ///
    /// Entries are stable-sorted ascending by index before processing, so
    /// earlier insertions shift later target positions predictably. Each
    /// entry's index is validated against the *current* length when it is
    /// processed; entries outside `1..=len` are skipped (with their values
    /// handed back), never failing the batch. Note the upper bound: a batch
    /// entry targeting `len` appends at the tail. On an empty list every
    /// entry is skipped.
    pub fn insert_batch(&mut self, mut entries: Vec<IndexedValue<T>>) -> BatchInsert<Idx, T> {
        sort_by_index(&mut entries);

        let mut report = BatchInsert::new();
        for entry in entries {
            if entry.index == 0 || entry.index > self.len {
                report.skipped.push(entry);
                continue;
            }

            let idx = if entry.index == 1 {
                self.insert_head(entry.value)
            } else if entry.index == self.len {
                self.insert_tail(entry.value)
            } else {
                self.splice_after(self.node_at_hops(entry.index - 2), entry.value)
            };
            report.inserted.push(idx);
        }
        report
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Removes and returns the head value.
    ///
    /// Returns `None` on an empty list. Emptying the list resets it to
    /// uninitialized.
    pub fn delete_head(&mut self) -> Option<T> {
        if !self.initialized {
            return None;
        }

        let old_head = self.head;
        let node = self.arena.remove(old_head)?;
        self.head = node.next;
        self.len -= 1;

        if self.len == 0 {
            self.reset();
        }
        Some(node.data)
    }

    /// Removes and returns the tail value.
    ///
    /// O(n): a singly-linked list has no back-link, so the predecessor of
    /// the tail is found by walking from the head.
    pub fn delete_tail(&mut self) -> Option<T> {
        if !self.initialized {
            return None;
        }

        if self.len == 1 {
            let node = self.arena.remove(self.head)?;
            self.reset();
            return Some(node.data);
        }

        // Walk to the node whose `next` is the tail
        let before = self.node_at_hops(self.len - 2);
        let node = self.arena.remove(self.tail)?;
        self.node_mut(before).next = Idx::NONE;
        self.tail = before;
        self.len -= 1;
        Some(node.data)
    }

    /// Removes and returns the value at a 1-based position.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] (list unmodified) if `index` is outside
    /// `1..=len`.
    pub fn delete_at(&mut self, index: usize) -> Result<T, OutOfBounds> {
        if index == 0 || index > self.len {
            return Err(OutOfBounds {
                index,
                len: self.len,
            });
        }

        if index == 1 {
            return Ok(self.delete_head().expect("non-empty after bounds check"));
        }
        if index == self.len {
            return Ok(self.delete_tail().expect("non-empty after bounds check"));
        }

        Ok(self.unsplice_after(self.node_at_hops(index - 2)))
    }

    /// Removes several positions in one call, reporting partial success.
    ///
    /// Indices are sorted ascending and each is re-validated against the
    /// *current* length at the moment it is processed — the list shrinks as
    /// the batch runs, so original indices do not remain valid after
    /// earlier deletions in the same batch. Out-of-range indices are
    /// skipped, never failing the batch.
    pub fn delete_batch(&mut self, indices: &[usize]) -> BatchDelete<T> {
        let mut sorted = indices.to_vec();
        sorted.sort();

        let mut report = BatchDelete::new();
        for index in sorted {
            if index == 0 || index > self.len {
                report.skipped.push(index);
                continue;
            }

            let value = if index == 1 {
                self.delete_head().expect("non-empty after bounds check")
            } else if index == self.len {
                self.delete_tail().expect("non-empty after bounds check")
            } else {
                self.unsplice_after(self.node_at_hops(index - 2))
            };
            report.deleted.push(IndexedValue::new(index, value));
        }
        report
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Returns the value at a 1-based position.
    ///
    /// Returns `Ok(None)` on an uninitialized list, regardless of `index`
    /// (the lifecycle check comes first).
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if the list is non-empty and `index` is
    /// outside `1..=len`.
    pub fn get_at(&self, index: usize) -> Result<Option<&T>, OutOfBounds> {
        if !self.initialized {
            return Ok(None);
        }
        if index == 0 || index > self.len {
            return Err(OutOfBounds {
                index,
                len: self.len,
            });
        }

        Ok(Some(&self.node(self.node_at_hops(index - 1)).data))
    }

    /// Mutable variant of [`get_at`](Self::get_at).
    pub fn get_at_mut(&mut self, index: usize) -> Result<Option<&mut T>, OutOfBounds> {
        if !self.initialized {
            return Ok(None);
        }
        if index == 0 || index > self.len {
            return Err(OutOfBounds {
                index,
                len: self.len,
            });
        }

        let idx = self.node_at_hops(index - 1);
        Ok(Some(&mut self.node_mut(idx).data))
    }

    /// Returns an iterator over the values, head to tail.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, Idx> {
        Iter {
            arena: &self.arena,
            current: self.head,
            remaining: self.len,
        }
    }

    // ========================================================================
    // Clearing
    // ========================================================================

    /// Shallow clear: drops every node by releasing the arena in one step
    /// and resets the bookkeeping.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.reset();
    }

    /// Deep clear: walks the list nulling each node's forward link before
    /// releasing anything, then resets the bookkeeping.
    ///
    /// In the original reference-counted design this existed to break
    /// cycles explicitly; with arena ownership it degenerates to the same
    /// end state as [`clear`](Self::clear), but the operation is kept so no
    /// node ever holds a link while being dropped.
    pub fn clear_deep(&mut self) {
        let mut current = self.head;
        for _ in 0..self.len {
            let node = self.node_mut(current);
            let next = node.next;
            node.next = Idx::NONE;
            current = next;
        }
        self.arena.clear();
        self.reset();
    }

    // ========================================================================
    // Internal link plumbing
    // ========================================================================

    #[inline]
    fn node(&self, idx: Idx) -> &Node<T, Idx> {
        self.arena.get(idx).expect("list link points at live node")
    }

    #[inline]
    fn node_mut(&mut self, idx: Idx) -> &mut Node<T, Idx> {
        self.arena
            .get_mut(idx)
            .expect("list link points at live node")
    }

    /// Walks `hops` forward links from the head.
    ///
    /// Callers guarantee `hops < len`.
    fn node_at_hops(&self, hops: usize) -> Idx {
        debug_assert!(hops < self.len);
        let mut current = self.head;
        for _ in 0..hops {
            current = self.node(current).next;
        }
        debug_assert!(current.is_some());
        current
    }

    /// Splices a new node in after `after`. Not for tail appends.
    fn splice_after(&mut self, after: Idx, value: T) -> Idx {
        let next = self.node(after).next;
        let idx = self.arena.insert(Node { data: value, next });
        self.node_mut(after).next = idx;
        self.len += 1;
        idx
    }

    /// Unsplices and returns the interior node after `after`. Not for the
    /// tail.
    fn unsplice_after(&mut self, after: Idx) -> T {
        let target = self.node(after).next;
        let node = self
            .arena
            .remove(target)
            .expect("interior node is live");
        self.node_mut(after).next = node.next;
        self.len -= 1;
        node.data
    }

    #[inline]
    fn reset(&mut self) {
        self.head = Idx::NONE;
        self.tail = Idx::NONE;
        self.len = 0;
        self.initialized = false;
    }
}

impl<T, Idx: Index> Default for SinglyLinkedList<T, Idx> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over list values, head to tail.
pub struct Iter<'a, T, Idx: Index> {
    arena: &'a Arena<Node<T, Idx>, Idx>,
    current: Idx,
    remaining: usize,
}

impl<'a, T, Idx: Index> Iterator for Iter<'a, T, Idx> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let node = self
            .arena
            .get(self.current)
            .expect("list link points at live node");
        self.current = node.next;
        Some(&node.data)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, Idx: Index> ExactSizeIterator for Iter<'_, T, Idx> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(list: &SinglyLinkedList<u64>) -> Vec<u64> {
        list.iter().copied().collect()
    }

    #[test]
    fn new_is_uninitialized() {
        let list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        assert!(list.is_empty());
        assert!(!list.is_initialized());
        assert_eq!(list.len(), 0);
        assert!(list.head_index().is_none());
        assert!(list.tail_index().is_none());
    }

    #[test]
    fn initialize_creates_sole_node() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        let idx = list.initialize(1);

        assert!(list.is_initialized());
        assert_eq!(list.len(), 1);
        assert_eq!(list.head_index(), Some(idx));
        assert_eq!(list.tail_index(), Some(idx));
        assert_eq!(list.get(idx), Some(&1));
    }

    #[test]
    fn initialize_replaces_existing_contents() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        list.insert_tail(1);
        list.insert_tail(2);

        list.initialize(9);
        assert_eq!(list.len(), 1);
        assert_eq!(values(&list), vec![9]);
    }

    #[test]
    fn insert_tail_appends_in_order() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        list.insert_tail(1);
        list.insert_tail(2);
        list.insert_tail(3);

        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), vec![1, 2, 3]);
    }

    #[test]
    fn insert_head_prepends() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        list.insert_head(1);
        list.insert_head(2);
        list.insert_head(3);

        assert_eq!(values(&list), vec![3, 2, 1]);
    }

    #[test]
    fn first_insert_of_any_kind_initializes() {
        let mut by_head: SinglyLinkedList<u64> = SinglyLinkedList::new();
        by_head.insert_head(1);
        assert!(by_head.is_initialized());
        assert_eq!(by_head.head_index(), by_head.tail_index());

        let mut by_at: SinglyLinkedList<u64> = SinglyLinkedList::new();
        by_at.insert_at(1, 1).unwrap();
        assert!(by_at.is_initialized());
        assert_eq!(by_at.len(), 1);
    }

    #[test]
    fn insert_at_interior() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        list.insert_tail(1);
        list.insert_tail(3);

        list.insert_at(2, 2).unwrap();
        assert_eq!(values(&list), vec![1, 2, 3]);
    }

    #[test]
    fn insert_at_bounds() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        list.insert_tail(1);
        list.insert_tail(2);

        assert_eq!(
            list.insert_at(9, 0),
            Err(OutOfBounds { index: 0, len: 2 })
        );
        assert_eq!(
            list.insert_at(9, 4),
            Err(OutOfBounds { index: 4, len: 2 })
        );
        // Structure untouched on error
        assert_eq!(values(&list), vec![1, 2]);

        // len + 1 appends
        list.insert_at(3, 3).unwrap();
        assert_eq!(values(&list), vec![1, 2, 3]);
    }

    #[test]
    fn insert_batch_processes_ascending() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        for v in [10, 20, 30, 40] {
            list.insert_tail(v);
        }

        // Given out of order; processed as 1 then 3
        let report = list.insert_batch(vec![
            IndexedValue::new(3, 25),
            IndexedValue::new(1, 5),
        ]);

        assert_eq!(report.inserted.len(), 2);
        assert!(report.skipped.is_empty());
        // 5 prepended first, then 25 lands at position 3 of the shifted list
        assert_eq!(values(&list), vec![5, 10, 25, 20, 30, 40]);
    }

    #[test]
    fn insert_batch_skips_out_of_range() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        list.insert_tail(1);
        list.insert_tail(2);

        let report = list.insert_batch(vec![
            IndexedValue::new(0, 90),
            IndexedValue::new(2, 15),
            IndexedValue::new(9, 99),
        ]);

        assert_eq!(report.inserted.len(), 1);
        assert_eq!(report.skipped.len(), 2);
        // Index == len appends at the tail (preserved quirk)
        assert_eq!(values(&list), vec![1, 2, 15]);
    }

    #[test]
    fn insert_batch_on_empty_skips_everything() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        let report = list.insert_batch(vec![IndexedValue::new(1, 1)]);

        assert!(report.inserted.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert!(!list.is_initialized());
    }

    #[test]
    fn delete_head_advances() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        list.insert_tail(1);
        list.insert_tail(2);
        list.insert_tail(3);

        assert_eq!(list.delete_head(), Some(1));
        assert_eq!(list.len(), 2);
        assert_eq!(values(&list), vec![2, 3]);
    }

    #[test]
    fn delete_last_element_resets_lifecycle() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        list.insert_tail(1);

        assert_eq!(list.delete_head(), Some(1));
        assert!(!list.is_initialized());
        assert!(list.head_index().is_none());
        assert!(list.tail_index().is_none());
        assert_eq!(list.delete_head(), None);

        // Reusable after emptying
        list.insert_tail(2);
        assert!(list.is_initialized());
        assert_eq!(values(&list), vec![2]);
    }

    #[test]
    fn delete_tail_walks_from_head() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        list.insert_tail(1);
        list.insert_tail(2);
        list.insert_tail(3);

        assert_eq!(list.delete_tail(), Some(3));
        assert_eq!(values(&list), vec![1, 2]);
        assert_eq!(list.delete_tail(), Some(2));
        assert_eq!(list.delete_tail(), Some(1));
        assert_eq!(list.delete_tail(), None);
        assert!(!list.is_initialized());
    }

    #[test]
    fn delete_at_interior() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        for v in [1, 2, 3, 4] {
            list.insert_tail(v);
        }

        assert_eq!(list.delete_at(2), Ok(2));
        assert_eq!(values(&list), vec![1, 3, 4]);
    }

    #[test]
    fn delete_at_bounds() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        list.insert_tail(1);

        assert_eq!(list.delete_at(0), Err(OutOfBounds { index: 0, len: 1 }));
        assert_eq!(list.delete_at(2), Err(OutOfBounds { index: 2, len: 1 }));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn delete_batch_revalidates_against_shrinking_len() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        for v in [10, 20, 30, 40, 50] {
            list.insert_tail(v);
        }

        // The literal contract example: [1, 3, 6] on 5 elements
        let report = list.delete_batch(&[1, 3, 6]);

        assert_eq!(report.deleted.len(), 2);
        assert_eq!(report.skipped, vec![6]);
        assert_eq!(list.len(), 3);

        // Index 1 removed 10; index 3 then addressed the shifted list
        assert_eq!(report.deleted[0], IndexedValue::new(1, 10));
        assert_eq!(report.deleted[1], IndexedValue::new(3, 40));
        assert_eq!(values(&list), vec![20, 30, 50]);
    }

    #[test]
    fn get_at_round_trip() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        for v in 1..=5u64 {
            list.insert_tail(v * 10);
        }

        for i in 1..=5usize {
            assert_eq!(list.get_at(i), Ok(Some(&(i as u64 * 10))));
        }
    }

    #[test]
    fn get_at_lifecycle_before_bounds() {
        let list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        // Uninitialized wins over any bounds violation
        assert_eq!(list.get_at(99), Ok(None));

        let mut list = list;
        list.insert_tail(1);
        assert_eq!(list.get_at(2), Err(OutOfBounds { index: 2, len: 1 }));
    }

    #[test]
    fn get_at_mut() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        list.insert_tail(1);
        list.insert_tail(2);

        *list.get_at_mut(2).unwrap().unwrap() = 20;
        assert_eq!(values(&list), vec![1, 20]);
    }

    #[test]
    fn clears_are_equivalent_and_idempotent() {
        for deep in [false, true] {
            let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
            list.insert_tail(1);
            list.insert_tail(2);
            list.insert_tail(3);

            if deep {
                list.clear_deep();
            } else {
                list.clear();
            }
            assert!(list.is_empty());
            assert!(!list.is_initialized());
            assert!(list.head_index().is_none());
            assert!(list.tail_index().is_none());

            // Second clear is a no-op
            if deep {
                list.clear_deep();
            } else {
                list.clear();
            }
            assert!(list.is_empty());
        }
    }

    #[test]
    fn iter_matches_len() {
        let mut list: SinglyLinkedList<u64> = SinglyLinkedList::new();
        for v in 0..10 {
            list.insert_tail(v);
        }
        assert_eq!(list.iter().count(), list.len());
        assert_eq!(list.iter().len(), 10);
    }
}
