//! The hierarchy contract shared by implicit and explicit trees.
//!
//! A [`Hierarchy`] is a rooted tree addressed through opaque node handles,
//! with sons identified by their order under a parent. As with sequences,
//! one operation set covers both physical layouts: the implicit complete
//! tree packed into a contiguous buffer
//! ([`ImplicitHierarchy`](crate::ImplicitHierarchy)) and explicit
//! pointer-linked trees over a node pool
//! ([`MultiWayHierarchy`](crate::MultiWayHierarchy),
//! [`KWayHierarchy`](crate::KWayHierarchy),
//! [`BinaryExplicitHierarchy`](crate::BinaryExplicitHierarchy)).
//!
//! # Failure discipline
//!
//! Queries report absence with `None`/`0`/`false` and never panic.
//! Structural edits return `Result<_, Unsupported>`: the implicit layout
//! derives its shape from index arithmetic and cannot emplace or remove at
//! an arbitrary slot, so every edit on it is a recoverable [`Unsupported`]
//! rather than a crash. On a layout that *does* support an edit, naming a
//! dead parent or an out-of-range order is a contract violation and panics.

use std::collections::VecDeque;
use std::marker::PhantomData;

use thiserror::Error;

/// A structural edit was requested on a layout that cannot perform it.
///
/// Returned by every `emplace_*`/`change_*`/`remove_son` on implicit
/// hierarchies, whose shape is fixed by the complete-tree index mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("`{operation}` is not available on this hierarchy layout")]
pub struct Unsupported {
    /// Name of the rejected operation.
    pub operation: &'static str,
}

impl Unsupported {
    pub(crate) const fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

/// Rooted tree addressed through opaque node handles.
pub trait Hierarchy<T> {
    /// Node handle; cheap to copy, comparable by identity.
    type Node: Copy + Eq + core::fmt::Debug;

    /// Number of live nodes, including any detached subtrees still owned
    /// by the structure.
    fn size(&self) -> usize;

    /// Returns `true` if the hierarchy holds no nodes.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Handle of the root, or `None` when empty.
    fn root(&self) -> Option<Self::Node>;

    /// Parent of `node`, or `None` for the root or a stale handle.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Son of `node` at `order`, or `None` when the slot is empty or out
    /// of range.
    fn son(&self, node: Self::Node, order: usize) -> Option<Self::Node>;

    /// Number of present sons of `node` (0 for a stale handle).
    fn degree(&self, node: Self::Node) -> usize;

    /// Exclusive upper bound on son orders worth probing at `node`.
    ///
    /// Orders `0..son_slot_count(node)` cover every present son; slots
    /// within the range may still be empty on fixed-arity layouts.
    fn son_slot_count(&self, node: Self::Node) -> usize;

    /// Record at `node`, or `None` for a stale handle.
    fn get(&self, node: Self::Node) -> Option<&T>;

    /// Mutable record at `node`, or `None` for a stale handle.
    fn get_mut(&mut self, node: Self::Node) -> Option<&mut T>;

    /// Creates the root with `value` and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if a root already exists (on layouts that support the edit).
    fn emplace_root(&mut self, value: T) -> Result<Self::Node, Unsupported>;

    /// Attaches the detached subtree `new_root` as the root, returning the
    /// handle of the previous root's detached subtree, if any.
    fn change_root(&mut self, new_root: Self::Node) -> Result<Option<Self::Node>, Unsupported>;

    /// Creates a son of `parent` at `order` with `value`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale or `order` is invalid for the layout
    /// (on layouts that support the edit).
    fn emplace_son(
        &mut self,
        parent: Self::Node,
        order: usize,
        value: T,
    ) -> Result<Self::Node, Unsupported>;

    /// Attaches the detached subtree `new_son` under `parent` at `order`,
    /// returning the handle of the previously attached subtree, if any.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale or `order` is out of range (on layouts
    /// that support the edit).
    fn change_son(
        &mut self,
        parent: Self::Node,
        order: usize,
        new_son: Self::Node,
    ) -> Result<Option<Self::Node>, Unsupported>;

    /// Removes the son of `parent` at `order` together with its entire
    /// subtree.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale or no son exists at `order` (on layouts
    /// that support the edit).
    fn remove_son(&mut self, parent: Self::Node, order: usize) -> Result<(), Unsupported>;

    /// Removes every node.
    fn clear(&mut self);

    // ========================================================================
    // Provided queries
    // ========================================================================

    /// Depth of `node` below the root (root = 0), or `None` for a stale
    /// handle.
    fn level(&self, node: Self::Node) -> Option<usize> {
        self.get(node)?;
        let mut level = 0;
        let mut cursor = node;
        while let Some(parent) = self.parent(cursor) {
            level += 1;
            cursor = parent;
        }
        Some(level)
    }

    /// Returns `true` if `node` is the root.
    fn is_root(&self, node: Self::Node) -> bool {
        self.root() == Some(node)
    }

    /// Returns `true` if `node` is live and has no sons.
    fn is_leaf(&self, node: Self::Node) -> bool {
        self.get(node).is_some() && self.degree(node) == 0
    }

    /// Returns `true` if `node` is the son of its parent at `order`.
    fn is_nth_son(&self, node: Self::Node, order: usize) -> bool {
        self.parent(node)
            .and_then(|parent| self.son(parent, order))
            == Some(node)
    }

    /// Returns `true` if `node` has a son at `order`.
    fn has_nth_son(&self, node: Self::Node, order: usize) -> bool {
        self.son(node, order).is_some()
    }

    /// Number of nodes in the subtree rooted at `node` (0 for a stale
    /// handle).
    fn subtree_node_count(&self, node: Self::Node) -> usize {
        if self.get(node).is_none() {
            return 0;
        }
        let mut count = 0;
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            count += 1;
            for order in 0..self.son_slot_count(current) {
                if let Some(son) = self.son(current, order) {
                    stack.push(son);
                }
            }
        }
        count
    }

    /// Number of nodes reachable from the root; equals [`size`](Self::size)
    /// when no subtree is detached.
    fn node_count(&self) -> usize {
        match self.root() {
            Some(root) => self.subtree_node_count(root),
            None => 0,
        }
    }

    // ========================================================================
    // Provided traversal
    // ========================================================================

    /// Applies `op` to each record in pre-order (parent before sons).
    fn for_each_pre_order<F: FnMut(&T)>(&self, mut op: F) {
        let mut stack: Vec<Self::Node> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            op(self.get(node).expect("traversal node is live"));
            for order in (0..self.son_slot_count(node)).rev() {
                if let Some(son) = self.son(node, order) {
                    stack.push(son);
                }
            }
        }
    }

    /// Applies `op` to each record in post-order (sons before parent).
    fn for_each_post_order<F: FnMut(&T)>(&self, mut op: F) {
        let mut stack: Vec<(Self::Node, bool)> =
            self.root().into_iter().map(|root| (root, false)).collect();
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                op(self.get(node).expect("traversal node is live"));
            } else {
                stack.push((node, true));
                for order in (0..self.son_slot_count(node)).rev() {
                    if let Some(son) = self.son(node, order) {
                        stack.push((son, false));
                    }
                }
            }
        }
    }

    /// Applies `op` to each record level by level, left to right.
    fn for_each_level_order<F: FnMut(&T)>(&self, mut op: F) {
        let mut queue: VecDeque<Self::Node> = self.root().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            op(self.get(node).expect("traversal node is live"));
            for order in 0..self.son_slot_count(node) {
                if let Some(son) = self.son(node, order) {
                    queue.push_back(son);
                }
            }
        }
    }

    /// Lazy pre-order iterator over the records.
    fn pre_order(&self) -> PreOrderIter<'_, T, Self>
    where
        Self: Sized,
    {
        PreOrderIter {
            hierarchy: self,
            stack: self.root().into_iter().collect(),
            _payload: PhantomData,
        }
    }

    /// Lazy post-order iterator over the records.
    fn post_order(&self) -> PostOrderIter<'_, T, Self>
    where
        Self: Sized,
    {
        PostOrderIter {
            hierarchy: self,
            stack: self.root().into_iter().map(|root| (root, false)).collect(),
            _payload: PhantomData,
        }
    }

    /// Lazy level-order iterator over the records.
    fn level_order(&self) -> LevelOrderIter<'_, T, Self>
    where
        Self: Sized,
    {
        LevelOrderIter {
            hierarchy: self,
            queue: self.root().into_iter().collect(),
            _payload: PhantomData,
        }
    }

    /// Iterates over the records; pre-order.
    fn iter(&self) -> PreOrderIter<'_, T, Self>
    where
        Self: Sized,
    {
        self.pre_order()
    }
}

/// Rooted tree where every node has at most two sons.
///
/// Every method is provided in terms of the [`Hierarchy`] operations with
/// the left son at order 0 and the right son at order 1, so implementations
/// opt in with an empty `impl` block.
pub trait BinaryHierarchy<T>: Hierarchy<T> {
    /// Left son of `node`.
    fn left(&self, node: Self::Node) -> Option<Self::Node> {
        self.son(node, 0)
    }

    /// Right son of `node`.
    fn right(&self, node: Self::Node) -> Option<Self::Node> {
        self.son(node, 1)
    }

    /// Returns `true` if `node` has a left son.
    fn has_left(&self, node: Self::Node) -> bool {
        self.left(node).is_some()
    }

    /// Returns `true` if `node` has a right son.
    fn has_right(&self, node: Self::Node) -> bool {
        self.right(node).is_some()
    }

    /// Creates the left son of `node` with `value`.
    fn emplace_left(&mut self, node: Self::Node, value: T) -> Result<Self::Node, Unsupported> {
        self.emplace_son(node, 0, value)
    }

    /// Creates the right son of `node` with `value`.
    fn emplace_right(&mut self, node: Self::Node, value: T) -> Result<Self::Node, Unsupported> {
        self.emplace_son(node, 1, value)
    }

    /// Removes the left subtree of `node`.
    fn remove_left(&mut self, node: Self::Node) -> Result<(), Unsupported> {
        self.remove_son(node, 0)
    }

    /// Removes the right subtree of `node`.
    fn remove_right(&mut self, node: Self::Node) -> Result<(), Unsupported> {
        self.remove_son(node, 1)
    }

    /// Applies `op` to each record in-order (left subtree, node, right
    /// subtree).
    fn for_each_in_order<F: FnMut(&T)>(&self, mut op: F) {
        let mut stack = Vec::new();
        let mut cursor = self.root();
        loop {
            while let Some(node) = cursor {
                stack.push(node);
                cursor = self.left(node);
            }
            let Some(node) = stack.pop() else {
                return;
            };
            op(self.get(node).expect("traversal node is live"));
            cursor = self.right(node);
        }
    }

    /// Lazy in-order iterator over the records.
    fn in_order(&self) -> InOrderIter<'_, T, Self>
    where
        Self: Sized,
    {
        let mut iter = InOrderIter {
            hierarchy: self,
            stack: Vec::new(),
            _payload: PhantomData,
        };
        iter.push_left_spine(self.root());
        iter
    }
}

// ============================================================================
// Lazy traversal iterators
// ============================================================================

/// Pre-order iterator returned by [`Hierarchy::pre_order`].
pub struct PreOrderIter<'a, T, H: Hierarchy<T>> {
    hierarchy: &'a H,
    stack: Vec<H::Node>,
    _payload: PhantomData<fn() -> &'a T>,
}

impl<'a, T, H: Hierarchy<T>> Iterator for PreOrderIter<'a, T, H> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        for order in (0..self.hierarchy.son_slot_count(node)).rev() {
            if let Some(son) = self.hierarchy.son(node, order) {
                self.stack.push(son);
            }
        }
        self.hierarchy.get(node)
    }
}

/// Post-order iterator returned by [`Hierarchy::post_order`].
pub struct PostOrderIter<'a, T, H: Hierarchy<T>> {
    hierarchy: &'a H,
    stack: Vec<(H::Node, bool)>,
    _payload: PhantomData<fn() -> &'a T>,
}

impl<'a, T, H: Hierarchy<T>> Iterator for PostOrderIter<'a, T, H> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                return self.hierarchy.get(node);
            }
            self.stack.push((node, true));
            for order in (0..self.hierarchy.son_slot_count(node)).rev() {
                if let Some(son) = self.hierarchy.son(node, order) {
                    self.stack.push((son, false));
                }
            }
        }
        None
    }
}

/// Level-order iterator returned by [`Hierarchy::level_order`].
pub struct LevelOrderIter<'a, T, H: Hierarchy<T>> {
    hierarchy: &'a H,
    queue: VecDeque<H::Node>,
    _payload: PhantomData<fn() -> &'a T>,
}

impl<'a, T, H: Hierarchy<T>> Iterator for LevelOrderIter<'a, T, H> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.queue.pop_front()?;
        for order in 0..self.hierarchy.son_slot_count(node) {
            if let Some(son) = self.hierarchy.son(node, order) {
                self.queue.push_back(son);
            }
        }
        self.hierarchy.get(node)
    }
}

/// In-order iterator returned by [`BinaryHierarchy::in_order`].
pub struct InOrderIter<'a, T, H: BinaryHierarchy<T>> {
    hierarchy: &'a H,
    stack: Vec<H::Node>,
    _payload: PhantomData<fn() -> &'a T>,
}

impl<'a, T, H: BinaryHierarchy<T>> InOrderIter<'a, T, H> {
    fn push_left_spine(&mut self, mut cursor: Option<H::Node>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = self.hierarchy.left(node);
        }
    }
}

impl<'a, T, H: BinaryHierarchy<T>> Iterator for InOrderIter<'a, T, H> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.push_left_spine(self.hierarchy.right(node));
        self.hierarchy.get(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_reports_operation() {
        let err = Unsupported::new("emplace_son");
        assert_eq!(err.operation, "emplace_son");
        assert!(err.to_string().contains("emplace_son"));
    }
}
