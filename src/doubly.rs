//! Doubly-linked list over an owned arena.
//!
//! Every node carries a forward and a backward link, maintained
//! symmetrically by all operations. The back-link makes `delete_tail` O(1)
//! (no walk to the tail's predecessor, unlike the singly-linked variant)
//! and lets the batch operations resume from the last visited position
//! instead of re-walking from the head for every entry.
//!
//! Non-circular invariants: `head.prev` and `tail.next` are always the
//! sentinel. Lifecycle and 1-based indexing rules are shared with
//! [`SinglyLinkedList`](crate::SinglyLinkedList).

use crate::batch::{sort_by_index, BatchDelete, BatchInsert, IndexedValue};
use crate::{Arena, Index, OutOfBounds};

#[derive(Debug)]
struct Node<T, Idx> {
    data: T,
    prev: Idx,
    next: Idx,
}

/// Resumable walk position used by the batch operations.
///
/// Ascending batch entries never target a position before the last one
/// processed, so the walk can continue from here instead of the head.
/// Purely an internal optimization: observable results are identical to
/// walking from the head for every entry.
#[derive(Clone, Copy)]
struct Cursor<Idx> {
    /// 1-based position of `idx` in the current list.
    pos: usize,
    idx: Idx,
}

/// A doubly-linked list that owns its nodes in an arena.
#[derive(Debug)]
pub struct DoublyLinkedList<T, Idx: Index = u32> {
    arena: Arena<Node<T, Idx>, Idx>,
    head: Idx,
    tail: Idx,
    len: usize,
    initialized: bool,
}

impl<T, Idx: Index> DoublyLinkedList<T, Idx> {
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

    /// Returns the handle of the node before `idx`.
    ///
    /// Returns `None` if `idx` is stale or is the head.
    #[inline]
    pub fn prev_index(&self, idx: Idx) -> Option<Idx> {
        let prev = self.arena.get(idx)?.prev;
        if prev.is_none() {
            None
        } else {
            Some(prev)
        }
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Initializes the list with a sole node.
    ///
    /// Any existing nodes are dropped first.
    pub fn initialize(&mut self, value: T) -> Idx {
        if self.len > 0 {
            self.arena.clear();
        }

        let idx = self.arena.insert(Node {
            data: value,
            prev: Idx::NONE,
            next: Idx::NONE,
        });
        self.head = idx;
        self.tail = idx;
        self.len = 1;
        self.initialized = true;
        idx
    }

    /// Appends a value at the tail, returning the new node's handle.
    pub fn insert_tail(&mut self, value: T) -> Idx {
        if !self.initialized {
            return self.initialize(value);
        }

        let idx = self.arena.insert(Node {
            data: value,
            prev: self.tail,
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
            prev: Idx::NONE,
            next: self.head,
        });
        self.node_mut(self.head).prev = idx;
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
    /// [`SinglyLinkedList::insert_batch`](crate::SinglyLinkedList::insert_batch).
    /// Internally the ascending entries are serviced by a resumable cursor
    /// so each walk starts where the previous one ended.
    pub fn insert_batch(&mut self, mut entries: Vec<IndexedValue<T>>) -> BatchInsert<Idx, T> {
        sort_by_index(&mut entries);

        let mut report = BatchInsert::new();
        let mut cursor: Option<Cursor<Idx>> = None;

        for entry in entries {
            if entry.index == 0 || entry.index > self.len {
                report.skipped.push(entry);
                continue;
            }

            let idx = if entry.index == 1 {
                let idx = self.insert_head(entry.value);
                cursor = Some(Cursor { pos: 1, idx });
                idx
            } else if entry.index == self.len {
                let idx = self.insert_tail(entry.value);
                cursor = Some(Cursor { pos: self.len, idx });
                idx
            } else {
                // Splice after the node at position index - 1
                let after = self.resume_to(cursor, entry.index - 1);
                let idx = self.splice_after(after, entry.value);
                cursor = Some(Cursor {
                    pos: entry.index,
                    idx,
                });
                idx
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

        let node = self.arena.remove(self.head)?;
        self.head = node.next;
        self.len -= 1;

        if self.len == 0 {
            self.reset();
        } else {
            self.node_mut(self.head).prev = Idx::NONE;
        }
        Some(node.data)
    }

    /// Removes and returns the tail value.
    ///
    /// O(1): the tail's predecessor is one back-link away.
    pub fn delete_tail(&mut self) -> Option<T> {
        if !self.initialized {
            return None;
        }

        let node = self.arena.remove(self.tail)?;
        self.tail = node.prev;
        self.len -= 1;

        if self.len == 0 {
            self.reset();
        } else {
            self.node_mut(self.tail).next = Idx::NONE;
        }
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

        Ok(self.unlink(self.node_at_hops(index - 1)))
    }

    /// Removes several positions in one call, reporting partial success.
    ///
    /// Indices are sorted ascending and re-validated against the shrinking
    /// length as the batch runs; out-of-range indices are skipped. Walks
    /// resume from the last visited position (cursor) rather than the head.
    pub fn delete_batch(&mut self, indices: &[usize]) -> BatchDelete<T> {
        let mut sorted = indices.to_vec();
        sorted.sort();

        let mut report = BatchDelete::new();
        let mut cursor: Option<Cursor<Idx>> = None;

        for index in sorted {
            if index == 0 || index > self.len {
                report.skipped.push(index);
                continue;
            }

            let value = if index == 1 {
                cursor = None;
                self.delete_head().expect("non-empty after bounds check")
            } else if index == self.len {
                cursor = None;
                self.delete_tail().expect("non-empty after bounds check")
            } else {
                let target = self.resume_to(cursor, index);
                let prev = self.node(target).prev;
                let value = self.unlink(target);
                // The removed node's predecessor now sits at index - 1
                cursor = Some(Cursor {
                    pos: index - 1,
                    idx: prev,
                });
                value
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

    /// Deep clear: walks the list nulling both links of each node before
    /// releasing anything, then resets the bookkeeping.
    pub fn clear_deep(&mut self) {
        let mut current = self.head;
        for _ in 0..self.len {
            let node = self.node_mut(current);
            let next = node.next;
            node.next = Idx::NONE;
            node.prev = Idx::NONE;
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

    /// Returns the node at 1-based position `pos`, continuing from the
    /// cursor when it does not overshoot.
    fn resume_to(&self, cursor: Option<Cursor<Idx>>, pos: usize) -> Idx {
        match cursor {
            Some(c) if c.pos <= pos => {
                let mut current = c.idx;
                for _ in 0..pos - c.pos {
                    current = self.node(current).next;
                }
                current
            }
            _ => self.node_at_hops(pos - 1),
        }
    }

    /// Splices a new node in after `after`, fixing both directions.
    /// Not for tail appends.
    fn splice_after(&mut self, after: Idx, value: T) -> Idx {
        let next = self.node(after).next;
        debug_assert!(next.is_some());

        let idx = self.arena.insert(Node {
            data: value,
            prev: after,
            next,
        });
        self.node_mut(after).next = idx;
        self.node_mut(next).prev = idx;
        self.len += 1;
        idx
    }

    /// Unlinks and returns an interior node. Not for head or tail.
    fn unlink(&mut self, target: Idx) -> T {
        let node = self.arena.remove(target).expect("interior node is live");
        debug_assert!(node.prev.is_some() && node.next.is_some());

        self.node_mut(node.prev).next = node.next;
        self.node_mut(node.next).prev = node.prev;
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

impl<T, Idx: Index> Default for DoublyLinkedList<T, Idx> {
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
