//! Slot arena: the owning store behind every container.
//!
//! Nodes live in an [`Arena`] and reference each other by [`Index`] value.
//! The arena is the single owner of all payloads; links between nodes are
//! plain indices, so back-references (`prev`, `parent`) and ring closures
//! (`tail.next == head`) never form ownership cycles.
//!
//! Indices are stable: a slot's index stays valid until that slot is
//! removed. Removed slots are recycled LIFO through an intrusive free-list.

use crate::Index;

#[derive(Debug, Clone)]
enum Slot<T, Idx> {
    Occupied(T),
    /// Vacant slot holding the next free slot's index (free-list link).
    Vacant(Idx),
}

/// A growable slot arena with stable indices.
///
/// `insert` returns the slot's index; `get`/`get_mut`/`remove` address slots
/// by index. Removing a slot pushes it onto an internal free-list so the
/// next insert reuses it instead of growing the backing `Vec`.
///
/// # Example
///
/// ```
/// use linkage::Arena;
///
/// let mut arena: Arena<&str> = Arena::new();
/// let a = arena.insert("hello");
/// assert_eq!(arena.get(a), Some(&"hello"));
/// assert_eq!(arena.remove(a), Some("hello"));
/// assert_eq!(arena.get(a), None);
/// ```
#[derive(Debug, Clone)]
pub struct Arena<T, Idx: Index = u32> {
    slots: Vec<Slot<T, Idx>>,
    /// Head of the vacant-slot free-list.
    free: Idx,
    len: usize,
}

impl<T, Idx: Index> Arena<T, Idx> {
    /// Creates an empty arena.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Idx::NONE,
            len: 0,
        }
    }

    /// Creates an empty arena with room for `capacity` slots before
    /// reallocating.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Idx::NONE,
            len: 0,
        }
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots the arena can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Inserts a value, returning its stable index.
    ///
    /// Reuses the most recently freed slot if one exists; otherwise appends.
    ///
    /// # Panics
    ///
    /// Panics if the slot position would collide with `Idx::NONE`
    /// (e.g. the 256th slot of an `Arena<T, u8>`).
    pub fn insert(&mut self, value: T) -> Idx {
        self.len += 1;

        if self.free.is_some() {
            let idx = self.free;
            match self.slots[idx.as_usize()] {
                Slot::Vacant(next_free) => {
                    self.free = next_free;
                    self.slots[idx.as_usize()] = Slot::Occupied(value);
                    idx
                }
                Slot::Occupied(_) => unreachable!("free-list points at occupied slot"),
            }
        } else {
            let idx = Idx::from_usize(self.slots.len());
            assert!(idx.is_some(), "arena exhausted the index type");
            self.slots.push(Slot::Occupied(value));
            idx
        }
    }

    /// Removes and returns the value at `idx`, if that slot is occupied.
    pub fn remove(&mut self, idx: Idx) -> Option<T> {
        let slot = self.slots.get_mut(idx.as_usize())?;
        if matches!(slot, Slot::Vacant(_)) {
            return None;
        }

        let old = core::mem::replace(slot, Slot::Vacant(self.free));
        self.free = idx;
        self.len -= 1;

        match old {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant(_) => unreachable!(),
        }
    }

    /// Returns a reference to the value at `idx`, if that slot is occupied.
    #[inline]
    pub fn get(&self, idx: Idx) -> Option<&T> {
        match self.slots.get(idx.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value at `idx`, if occupied.
    #[inline]
    pub fn get_mut(&mut self, idx: Idx) -> Option<&mut T> {
        match self.slots.get_mut(idx.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if `idx` addresses an occupied slot.
    #[inline]
    pub fn contains(&self, idx: Idx) -> bool {
        matches!(self.slots.get(idx.as_usize()), Some(Slot::Occupied(_)))
    }

    /// Drops every value and resets the arena to empty.
    ///
    /// All previously issued indices become stale. Keeps the backing
    /// allocation for reuse.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = Idx::NONE;
        self.len = 0;
    }
}

impl<T, Idx: Index> Default for Arena<T, Idx> {
    fn default() -> Self {
        Self::new()
    }
}
