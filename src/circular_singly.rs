//! Circular singly-linked list over an owned arena.
//!
//! Same operation surface and lifecycle as
//! [`SinglyLinkedList`](crate::SinglyLinkedList), but the tail's forward
//! link closes the ring: `tail.next == head` whenever the list is
//! non-empty, and a sole node links to itself. Every public operation
//! leaves the ring closed.

use crate::batch::{sort_by_index, BatchDelete, BatchInsert, IndexedValue};
use crate::{Arena, Index, OutOfBounds};

#[derive(Debug)]
struct Node<T, Idx> {
    data: T,
    next: Idx,
}

/// A circular singly-linked list that owns its nodes in an arena.
///
/// Positional operations use 1-based indices; see the
/// [`SinglyLinkedList`](crate::SinglyLinkedList) docs for the shared
/// indexing and lifecycle rules. The ring invariant (`tail.next == head`,
/// self-link at size 1) holds after every public operation.
#[derive(Debug)]
pub struct CircularSinglyLinkedList<T, Idx: Index = u32> {
    arena: Arena<Node<T, Idx>, Idx>,
    head: Idx,
    tail: Idx,
    len: usize,
    initialized: bool,
}

impl<T, Idx: Index> CircularSinglyLinkedList<T, Idx> {
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

    /// Returns the handle of the node after `idx`, following the ring.
    ///
    /// The tail's successor is the head. Returns `None` only for a stale
    /// handle.
    #[inline]
    pub fn next_index(&self, idx: Idx) -> Option<Idx> {
        Some(self.arena.get(idx)?.next)
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Initializes the list with a sole node linked to itself.
    ///
    /// Any existing nodes are dropped first.
    pub fn initialize(&mut self, value: T) -> Idx {
        if self.len > 0 {
            self.arena.clear();
        }

        let idx = self.arena.insert(Node {
            data: value,
            next: Idx::NONE,
        });
        // Sole node closes the ring on itself
        self.node_mut(idx).next = idx;
        self.head = idx;
        self.tail = idx;
        self.len = 1;
        self.initialized = true;
        idx
    }

    /// Appends a value at the tail, returning the new node's handle.
    ///
    /// The new node's forward link points back at the head.
    pub fn insert_tail(&mut self, value: T) -> Idx {
        if !self.initialized {
            return self.initialize(value);
        }

        let idx = self.arena.insert(Node {
            data: value,
            next: self.head,
        });
        self.node_mut(self.tail).next = idx;
        self.tail = idx;
        self.len += 1;
        idx
    }

    /// Prepends a value at the head, returning the new node's handle.
    ///
    /// The tail's forward link is rewired to the new head.
    pub fn insert_head(&mut self, value: T) -> Idx {
        if !self.initialized {
            return self.initialize(value);
        }

        let idx = self.arena.insert(Node {
            data: value,
            next: self.head,
        });
        self.node_mut(self.tail).next = idx;
        self.head = idx;
        self.len += 1;
        idx
    }

    /// Inserts a value at a 1-based position.
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
    /// Same contract as
    /// [`SinglyLinkedList::insert_batch`](crate::SinglyLinkedList::insert_batch):
    /// stable-sorted ascending, each index validated against the current
    /// length (`1..=len`, where `len` appends at the tail), invalid entries
    /// skipped.
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

    /// Removes and returns the head value, keeping the ring closed.
    ///
    /// Returns `None` on an empty list. Emptying the list resets it to
    /// uninitialized; a sole remaining node is relinked to itself.
    pub fn delete_head(&mut self) -> Option<T> {
        if !self.initialized {
            return None;
        }

        if self.len == 1 {
            let node = self.arena.remove(self.head)?;
            self.reset();
            return Some(node.data);
        }

        let node = self.arena.remove(self.head)?;
        self.head = node.next;
        self.node_mut(self.tail).next = self.head;
        self.len -= 1;
        Some(node.data)
    }

    /// Removes and returns the tail value, keeping the ring closed.
    ///
    /// O(n): the predecessor of the tail is found by walking from the head.
    pub fn delete_tail(&mut self) -> Option<T> {
        if !self.initialized {
            return None;
        }

        if self.len == 1 {
            let node = self.arena.remove(self.head)?;
            self.reset();
            return Some(node.data);
        }

        let before = self.node_at_hops(self.len - 2);
        let node = self.arena.remove(self.tail)?;
        self.node_mut(before).next = self.head;
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
    /// Indices are sorted ascending and re-validated against the shrinking
    /// length as the batch runs; out-of-range indices are skipped.
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
    /// Returns `Ok(None)` on an uninitialized list, regardless of `index`.
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
    ///
    /// Yields exactly `len` values; the ring closure does not make it
    /// endless.
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

    /// Deep clear: walks the ring nulling each node's forward link before
    /// releasing anything, then resets the bookkeeping.
    ///
    /// Breaking the ring explicitly mattered in the original
    /// reference-counted design; here it guarantees no node holds a link
    /// while being dropped. End state is identical to
    /// [`clear`](Self::clear).
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
        self.arena.get(idx).expect("ring link points at live node")
    }

    #[inline]
    fn node_mut(&mut self, idx: Idx) -> &mut Node<T, Idx> {
        self.arena
            .get_mut(idx)
            .expect("ring link points at live node")
    }

    /// Walks `hops` forward links from the head. Callers guarantee
    /// `hops < len`.
    fn node_at_hops(&self, hops: usize) -> Idx {
        debug_assert!(hops < self.len);
        let mut current = self.head;
        for _ in 0..hops {
            current = self.node(current).next;
        }
        current
    }

    /// Splices a new node in after `after`. Not for head/tail positions.
    fn splice_after(&mut self, after: Idx, value: T) -> Idx {
        let next = self.node(after).next;
        let idx = self.arena.insert(Node { data: value, next });
        self.node_mut(after).next = idx;
        self.len += 1;
        idx
    }

    /// Unsplices and returns the interior node after `after`.
    fn unsplice_after(&mut self, after: Idx) -> T {
        let target = self.node(after).next;
        let node = self.arena.remove(target).expect("interior node is live");
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

impl<T, Idx: Index> Default for CircularSinglyLinkedList<T, Idx> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over list values, head to tail, bounded by the list length.
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
            .expect("ring link points at live node");
        self.current = node.next;
        Some(&node.data)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, Idx: Index> ExactSizeIterator for Iter<'_, T, Idx> {}
