//! N-ary tree over an owned arena.
//!
//! Every tree has a root from construction onward; child lists are kept in
//! insertion order in a small inline vector. Handles are arena indices and
//! go stale when the node behind them is removed: operations taking a
//! parent handle report a stale one as an error, read-only accessors
//! return `None`.
//!
//! Child insertion takes `Option<T>`: `None` is an explicit no-op, any
//! `Some` value inserts, zero and empty payloads included.
//!
//! # Examples
//!
//! ```
//! use linkage::Tree;
//!
//! let mut tree: Tree<&str> = Tree::with_children("A", vec!["B", "C", "D"]);
//! let b = tree.children(tree.root()).unwrap()[0];
//! tree.add_children(b, vec![Some("E"), None, Some("F")]).unwrap();
//!
//! assert_eq!(tree.level_order(), vec![&"A", &"B", &"C", &"D", &"E", &"F"]);
//!
//! // Removing an interior node reattaches its children to its parent.
//! assert_eq!(tree.remove(&"B"), Some("B"));
//! let labels: Vec<_> = tree
//!     .children(tree.root())
//!     .unwrap()
//!     .iter()
//!     .map(|&c| *tree.get(c).unwrap())
//!     .collect();
//! assert_eq!(labels, vec!["C", "D", "E", "F"]);
//! ```

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::{Arena, Index, StaleHandle};

/// Inline capacity for child lists; wider nodes spill to the heap.
type Children<Idx> = SmallVec<[Idx; 4]>;

#[derive(Debug)]
struct Node<T, Idx: Index> {
    data: T,
    parent: Idx,
    children: Children<Idx>,
    is_root: bool,
    /// Set when the first child is attached, never cleared. Records that
    /// the node has been a parent at some point; use
    /// [`Tree::has_children`] for the current child count.
    is_parent: bool,
}

/// An n-ary tree that owns its nodes in an arena.
#[derive(Debug)]
pub struct Tree<T, Idx: Index = u32> {
    arena: Arena<Node<T, Idx>, Idx>,
    root: Idx,
}

impl<T, Idx: Index> Tree<T, Idx> {
    /// Creates a tree holding a sole root node.
    pub fn new(value: T) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node {
            data: value,
            parent: Idx::NONE,
            children: Children::new(),
            is_root: true,
            is_parent: false,
        });
        Self { arena, root }
    }

    /// Creates a tree with a root and one level of children beneath it.
    pub fn with_children(value: T, children: Vec<T>) -> Self {
        let mut tree = Self::new(value);
        for child in children {
            tree.attach(tree.root, child, None);
        }
        tree
    }

    /// Returns the root handle. Always live.
    #[inline]
    pub const fn root(&self) -> Idx {
        self.root
    }

    /// Returns the number of nodes in the tree. At least 1.
    #[inline]
    pub const fn len(&self) -> usize {
        self.arena.len()
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

    /// Returns a node's children in insertion order, or `None` for a stale
    /// handle.
    #[inline]
    pub fn children(&self, idx: Idx) -> Option<&[Idx]> {
        self.arena.get(idx).map(|node| node.children.as_slice())
    }

    /// Returns a node's parent handle.
    ///
    /// `None` for the root or a stale handle.
    #[inline]
    pub fn parent(&self, idx: Idx) -> Option<Idx> {
        let parent = self.arena.get(idx)?.parent;
        if parent.is_none() {
            None
        } else {
            Some(parent)
        }
    }

    /// Returns `true` if the handle refers to the live root.
    #[inline]
    pub fn is_root(&self, idx: Idx) -> bool {
        self.arena.get(idx).map(|node| node.is_root).unwrap_or(false)
    }

    /// Returns `true` if the node has ever had a child attached.
    ///
    /// This flag is one-way: detaching every child later does not clear
    /// it. See [`has_children`](Self::has_children) for the present tense.
    #[inline]
    pub fn is_parent(&self, idx: Idx) -> bool {
        self.arena
            .get(idx)
            .map(|node| node.is_parent)
            .unwrap_or(false)
    }

    /// Returns `true` if the node currently has at least one child.
    #[inline]
    pub fn has_children(&self, idx: Idx) -> bool {
        self.arena
            .get(idx)
            .map(|node| !node.children.is_empty())
            .unwrap_or(false)
    }

    /// Returns `true` if the node is live and currently childless.
    #[inline]
    pub fn is_leaf(&self, idx: Idx) -> bool {
        self.arena
            .get(idx)
            .map(|node| node.children.is_empty())
            .unwrap_or(false)
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Attaches a child under `parent`, returning the new handle.
    ///
    /// `None` as the value is an explicit no-op and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StaleHandle`] if `parent` does not refer to a live node.
    pub fn add_child(&mut self, parent: Idx, value: Option<T>) -> Result<Option<Idx>, StaleHandle> {
        if !self.arena.contains(parent) {
            return Err(StaleHandle);
        }
        Ok(value.map(|value| self.attach(parent, value, None)))
    }

    /// Attaches several children under `parent` in order, skipping `None`
    /// entries.
    ///
    /// Returns `Ok(None)` when every entry was `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StaleHandle`] if `parent` does not refer to a live node.
    pub fn add_children(
        &mut self,
        parent: Idx,
        values: Vec<Option<T>>,
    ) -> Result<Option<Vec<Idx>>, StaleHandle> {
        if !self.arena.contains(parent) {
            return Err(StaleHandle);
        }

        let inserted: Vec<Idx> = values
            .into_iter()
            .flatten()
            .map(|value| self.attach(parent, value, None))
            .collect();
        Ok(if inserted.is_empty() {
            None
        } else {
            Some(inserted)
        })
    }

    /// Attaches a child at a 0-based position among `parent`'s children.
    ///
    /// Valid positions are `0..=child_count`. An out-of-range position is
    /// a silent no-op (`Ok(None)`), as is a `None` value.
    ///
    /// # Errors
    ///
    /// Returns [`StaleHandle`] if `parent` does not refer to a live node.
    pub fn add_child_at(
        &mut self,
        parent: Idx,
        value: Option<T>,
        index: usize,
    ) -> Result<Option<Idx>, StaleHandle> {
        let node = self.arena.get(parent).ok_or(StaleHandle)?;
        if index > node.children.len() {
            return Ok(None);
        }
        Ok(value.map(|value| self.attach(parent, value, Some(index))))
    }

    /// Attaches several children starting at a 0-based position, skipping
    /// `None` entries.
    ///
    /// Inserted children end up consecutive from `index` in the order
    /// given. Out-of-range positions and all-`None` batches are silent
    /// no-ops (`Ok(None)`).
    ///
    /// # Errors
    ///
    /// Returns [`StaleHandle`] if `parent` does not refer to a live node.
    pub fn add_children_from(
        &mut self,
        parent: Idx,
        values: Vec<Option<T>>,
        index: usize,
    ) -> Result<Option<Vec<Idx>>, StaleHandle> {
        let node = self.arena.get(parent).ok_or(StaleHandle)?;
        if index > node.children.len() {
            return Ok(None);
        }

        let mut inserted = Vec::new();
        for value in values.into_iter().flatten() {
            let at = index + inserted.len();
            inserted.push(self.attach(parent, value, Some(at)));
        }
        Ok(if inserted.is_empty() {
            None
        } else {
            Some(inserted)
        })
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Visits every node depth-first, parent before children.
    ///
    /// Recursive; depth is bounded by the height of the tree.
    pub fn preorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len());
        self.preorder_visit(self.root, &mut out);
        out
    }

    /// Visits every node depth-first, children before parent.
    ///
    /// Recursive; depth is bounded by the height of the tree.
    pub fn postorder(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len());
        self.postorder_visit(self.root, &mut out);
        out
    }

    /// Visits every node breadth-first, shallower levels first, siblings
    /// in insertion order. Iterative over a FIFO queue.
    pub fn level_order(&self) -> Vec<&T> {
        self.level_order_visit(self.root)
    }

    /// [`preorder`](Self::preorder) from an arbitrary start node.
    ///
    /// Returns `None` for a stale handle.
    pub fn preorder_from(&self, node: Idx) -> Option<Vec<&T>> {
        if !self.arena.contains(node) {
            return None;
        }
        let mut out = Vec::new();
        self.preorder_visit(node, &mut out);
        Some(out)
    }

    /// [`postorder`](Self::postorder) from an arbitrary start node.
    ///
    /// Returns `None` for a stale handle.
    pub fn postorder_from(&self, node: Idx) -> Option<Vec<&T>> {
        if !self.arena.contains(node) {
            return None;
        }
        let mut out = Vec::new();
        self.postorder_visit(node, &mut out);
        Some(out)
    }

    /// [`level_order`](Self::level_order) from an arbitrary start node.
    ///
    /// Returns `None` for a stale handle.
    pub fn level_order_from(&self, node: Idx) -> Option<Vec<&T>> {
        if !self.arena.contains(node) {
            return None;
        }
        Some(self.level_order_visit(node))
    }

    // ========================================================================
    // Search and removal
    // ========================================================================

    /// Finds the first node whose value equals `target` in breadth-first
    /// order.
    pub fn find_bfs(&self, target: &T) -> Option<Idx>
    where
        T: PartialEq,
    {
        let mut queue = VecDeque::from([self.root]);
        while let Some(idx) = queue.pop_front() {
            let node = self.node(idx);
            if node.data == *target {
                return Some(idx);
            }
            queue.extend(node.children.iter().copied());
        }
        None
    }

    /// Finds the first node whose value equals `target` in preorder
    /// depth-first order.
    pub fn find_dfs(&self, target: &T) -> Option<Idx>
    where
        T: PartialEq,
    {
        self.find_dfs_visit(self.root, target)
    }

    /// Removes the first node (preorder) whose value equals `target` and
    /// returns its payload.
    ///
    /// The removed node's children are appended, in order, after its
    /// former parent's existing children and reparented there. The root
    /// cannot be removed; asking for it returns `None`, as does an absent
    /// value.
    ///
    /// The former parent's [`is_parent`](Self::is_parent) flag stays set
    /// even if the reattachment leaves it childless.
    pub fn remove(&mut self, target: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let idx = self.find_dfs(target)?;
        if idx == self.root {
            return None;
        }

        let node = self.arena.remove(idx).expect("found node is live");
        let parent = node.parent;

        let siblings = &mut self.node_mut(parent).children;
        let at = siblings
            .iter()
            .position(|&child| child == idx)
            .expect("removed node is among its parent's children");
        siblings.remove(at);
        siblings.extend(node.children.iter().copied());

        for &child in &node.children {
            self.node_mut(child).parent = parent;
        }
        Some(node.data)
    }

    /// Applies [`remove`](Self::remove) to each target in the order given.
    ///
    /// Order matters: removing an ancestor first reattaches its subtree,
    /// which changes what later searches see. Targets that are absent (or
    /// name the root) are skipped. Returns `None` when nothing was
    /// removed.
    pub fn remove_batch(&mut self, targets: &[T]) -> Option<Vec<T>>
    where
        T: PartialEq,
    {
        let removed: Vec<T> = targets
            .iter()
            .filter_map(|target| self.remove(target))
            .collect();
        if removed.is_empty() {
            None
        } else {
            Some(removed)
        }
    }

    // ========================================================================
    // Internal node plumbing
    // ========================================================================

    #[inline]
    fn node(&self, idx: Idx) -> &Node<T, Idx> {
        self.arena.get(idx).expect("tree link points at live node")
    }

    #[inline]
    fn node_mut(&mut self, idx: Idx) -> &mut Node<T, Idx> {
        self.arena
            .get_mut(idx)
            .expect("tree link points at live node")
    }

    /// Allocates a node under `parent`, at the end of the child list or at
    /// a validated 0-based position.
    fn attach(&mut self, parent: Idx, value: T, at: Option<usize>) -> Idx {
        let idx = self.arena.insert(Node {
            data: value,
            parent,
            children: Children::new(),
            is_root: false,
            is_parent: false,
        });

        let node = self.node_mut(parent);
        match at {
            Some(at) => node.children.insert(at, idx),
            None => node.children.push(idx),
        }
        node.is_parent = true;
        idx
    }

    fn preorder_visit<'a>(&'a self, idx: Idx, out: &mut Vec<&'a T>) {
        let node = self.node(idx);
        out.push(&node.data);
        for &child in &node.children {
            self.preorder_visit(child, out);
        }
    }

    fn postorder_visit<'a>(&'a self, idx: Idx, out: &mut Vec<&'a T>) {
        let node = self.node(idx);
        for &child in &node.children {
            self.postorder_visit(child, out);
        }
        out.push(&node.data);
    }

    fn level_order_visit(&self, start: Idx) -> Vec<&T> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(idx) = queue.pop_front() {
            let node = self.node(idx);
            out.push(&node.data);
            queue.extend(node.children.iter().copied());
        }
        out
    }

    fn find_dfs_visit(&self, idx: Idx, target: &T) -> Option<Idx>
    where
        T: PartialEq,
    {
        let node = self.node(idx);
        if node.data == *target {
            return Some(idx);
        }
        node.children
            .iter()
            .find_map(|&child| self.find_dfs_visit(child, target))
    }
}
