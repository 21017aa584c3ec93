//! Linked lists and n-ary trees backed by index arenas.
//!
//! Pointer-based structures in Rust run straight into ownership: a doubly
//! linked node is aimed at from two sides, and a circular list has no
//! unique owner at all. The usual answers (`Rc<RefCell<T>>`, raw pointers)
//! trade away either ergonomics or safety. This crate takes a third route:
//!
//! ```text
//! Arena<Node>          - owns every node in slot storage, stable handles
//! next/prev/children   - plain index values, NONE sentinel instead of null
//! ```
//!
//! A "pointer" is just an [`Index`] value into the container's own arena,
//! so back-links and ring closures are ordinary data. Removing a node
//! frees its slot for reuse; handles to removed nodes go stale and are
//! rejected by lookups rather than dangling.
//!
//! # Containers
//!
//! | Container | Links | Notes |
//! |-----------|-------|-------|
//! | [`SinglyLinkedList`] | `next` | tail walk on `delete_tail` |
//! | [`DoublyLinkedList`] | `next`, `prev` | O(1) `delete_tail` |
//! | [`CircularSinglyLinkedList`] | `next`, ring | `tail.next` is the head |
//! | [`CircularDoublyLinkedList`] | both, ring | closed in both directions |
//! | [`Tree`] | `parent`, `children` | n-ary, ordered child lists |
//!
//! Positional list operations take 1-based indices: position 1 is the
//! head, `len` the tail, and insertion accepts `len + 1` to append.
//! Out-of-range positions return [`OutOfBounds`] without touching the
//! list. Batch variants instead skip invalid entries and report what was
//! done; see [`BatchInsert`] and [`BatchDelete`].
//!
//! # Quick Start
//!
//! ```
//! use linkage::DoublyLinkedList;
//!
//! let mut list: DoublyLinkedList<u64> = DoublyLinkedList::new();
//!
//! list.insert_tail(1);
//! list.insert_tail(3);
//! list.insert_at(2, 2)?;
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(list.delete_at(2)?, 2);
//! # Ok::<(), linkage::OutOfBounds>(())
//! ```
//!
//! # Lifecycle
//!
//! Lists distinguish never-used from in-use: the first insertion
//! initializes the list and deleting the last element returns it to the
//! uninitialized state, observable through [`is_initialized`]. Positional
//! reads on an uninitialized list are `Ok(None)` rather than an error.
//!
//! [`is_initialized`]: SinglyLinkedList::is_initialized
//!
//! # Index Width
//!
//! Containers default to `u32` handles (4-byte links, 4 billion nodes)
//! but accept any [`Index`] type. `u16` halves link size for small
//! structures; `usize` removes the ceiling:
//!
//! ```
//! use linkage::SinglyLinkedList;
//!
//! let mut small: SinglyLinkedList<u8, u16> = SinglyLinkedList::new();
//! small.insert_tail(42);
//! ```
//!
//! The all-ones value of each index type is reserved as the `NONE`
//! sentinel, so a `u16`-indexed arena holds at most 65_535 nodes.

#![warn(missing_docs)]

mod arena;
mod batch;
mod circular_doubly;
mod circular_singly;
mod doubly;
mod error;
mod index;
mod singly;
mod tree;

pub use arena::Arena;
pub use batch::{BatchDelete, BatchInsert, IndexedValue};
pub use circular_doubly::CircularDoublyLinkedList;
pub use circular_singly::CircularSinglyLinkedList;
pub use doubly::DoublyLinkedList;
pub use error::{OutOfBounds, StaleHandle};
pub use index::Index;
pub use singly::SinglyLinkedList;
pub use tree::Tree;
