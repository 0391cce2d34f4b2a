//! Implicit complete k-ary hierarchy packed into a contiguous buffer.
//!
//! No node stores any linkage. A node is its index: the parent of node `i`
//! is `(i - 1) / K` and son `j` of `i` is `K * i + j + 1`. The live nodes
//! are always the contiguous prefix `[0, len)`, so the tree is complete —
//! every level full except possibly the last, which fills left to right.
//!
//! The shape is a consequence of the arithmetic, which is why arbitrary
//! structural edits do not exist here: the only growth operations are
//! [`insert_last_leaf`](ImplicitHierarchy::insert_last_leaf) and
//! [`remove_last_leaf`](ImplicitHierarchy::remove_last_leaf), and every
//! `emplace_*`/`change_*`/`remove_son` returns [`Unsupported`].

use lattice_block::CompactBuffer;

use crate::{BinaryHierarchy, Hierarchy, Unsupported};

/// Complete k-ary tree stored as a contiguous index-addressed buffer.
///
/// # Example
///
/// ```
/// use lattice_collections::{Hierarchy, ImplicitHierarchy};
///
/// let mut tree: ImplicitHierarchy<u64, 3> = ImplicitHierarchy::new();
/// for value in 0..7 {
///     tree.insert_last_leaf(value);
/// }
/// assert_eq!(tree.root(), Some(0));
/// assert_eq!(tree.degree(0), 3);
/// assert_eq!(tree.son(0, 1), Some(2));
/// assert_eq!(tree.parent(5), Some(1));
///
/// // The layout is fixed; slot-level edits are a recoverable error.
/// assert!(tree.emplace_son(0, 1, 99).is_err());
/// ```
pub struct ImplicitHierarchy<T, const K: usize> {
    buffer: CompactBuffer<T>,
}

/// Implicit hierarchy specialized to two sons per node.
pub type BinaryImplicitHierarchy<T> = ImplicitHierarchy<T, 2>;

impl<T, const K: usize> ImplicitHierarchy<T, K> {
    /// Creates an empty hierarchy.
    ///
    /// # Panics
    ///
    /// Panics if `K` is zero.
    pub fn new() -> Self {
        assert!(K > 0, "hierarchy arity must be at least 1");
        Self {
            buffer: CompactBuffer::new(),
        }
    }

    /// Creates an empty hierarchy with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(K > 0, "hierarchy arity must be at least 1");
        Self {
            buffer: CompactBuffer::with_capacity(capacity),
        }
    }

    /// Appends `value` as the next leaf of the complete tree and returns
    /// its node index.
    pub fn insert_last_leaf(&mut self, value: T) -> usize {
        let index = self.buffer.len();
        self.buffer.push(value);
        index
    }

    /// Removes and returns the last leaf.
    ///
    /// # Panics
    ///
    /// Panics if the hierarchy is empty.
    pub fn remove_last_leaf(&mut self) -> T {
        assert!(!self.buffer.is_empty(), "remove leaf from empty hierarchy");
        self.buffer.release_at(self.buffer.len() - 1)
    }

    /// Index of the last leaf, or `None` when empty.
    pub fn last_leaf(&self) -> Option<usize> {
        self.buffer.len().checked_sub(1)
    }

    /// Records in index (level) order.
    pub fn as_slice(&self) -> &[T] {
        self.buffer.as_slice()
    }

    /// Copies the nodes of `other` into `self`.
    pub fn assign(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.buffer.assign(&other.buffer);
    }
}

impl<T, const K: usize> Hierarchy<T> for ImplicitHierarchy<T, K> {
    type Node = usize;

    fn size(&self) -> usize {
        self.buffer.len()
    }

    fn root(&self) -> Option<usize> {
        (!self.buffer.is_empty()).then_some(0)
    }

    fn parent(&self, node: usize) -> Option<usize> {
        if node == 0 || node >= self.buffer.len() {
            None
        } else {
            Some((node - 1) / K)
        }
    }

    fn son(&self, node: usize, order: usize) -> Option<usize> {
        if node >= self.buffer.len() || order >= K {
            return None;
        }
        let son = K * node + order + 1;
        (son < self.buffer.len()).then_some(son)
    }

    fn degree(&self, node: usize) -> usize {
        if node >= self.buffer.len() {
            return 0;
        }
        let first_son = K * node + 1;
        K.min(self.buffer.len().saturating_sub(first_son))
    }

    fn son_slot_count(&self, node: usize) -> usize {
        if node >= self.buffer.len() {
            0
        } else {
            K
        }
    }

    fn get(&self, node: usize) -> Option<&T> {
        self.buffer.get(node)
    }

    fn get_mut(&mut self, node: usize) -> Option<&mut T> {
        self.buffer.get_mut(node)
    }

    fn emplace_root(&mut self, _value: T) -> Result<usize, Unsupported> {
        Err(Unsupported::new("emplace_root"))
    }

    fn change_root(&mut self, _new_root: usize) -> Result<Option<usize>, Unsupported> {
        Err(Unsupported::new("change_root"))
    }

    fn emplace_son(&mut self, _parent: usize, _order: usize, _value: T) -> Result<usize, Unsupported> {
        Err(Unsupported::new("emplace_son"))
    }

    fn change_son(
        &mut self,
        _parent: usize,
        _order: usize,
        _new_son: usize,
    ) -> Result<Option<usize>, Unsupported> {
        Err(Unsupported::new("change_son"))
    }

    fn remove_son(&mut self, _parent: usize, _order: usize) -> Result<(), Unsupported> {
        Err(Unsupported::new("remove_son"))
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl<T> BinaryHierarchy<T> for BinaryImplicitHierarchy<T> {}

impl<T, const K: usize> Default for ImplicitHierarchy<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const K: usize> Clone for ImplicitHierarchy<T, K> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
        }
    }
}

impl<T: PartialEq, const K: usize> PartialEq for ImplicitHierarchy<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.buffer == other.buffer
    }
}

impl<T: Eq, const K: usize> Eq for ImplicitHierarchy<T, K> {}

impl<T: core::fmt::Debug, const K: usize> core::fmt::Debug for ImplicitHierarchy<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.buffer.iter()).finish()
    }
}

impl<T, const K: usize> Extend<T> for ImplicitHierarchy<T, K> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_last_leaf(value);
        }
    }
}

impl<T, const K: usize> FromIterator<T> for ImplicitHierarchy<T, K> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ternary(leaves: usize) -> ImplicitHierarchy<u64, 3> {
        (0..leaves as u64).collect()
    }

    #[test]
    fn empty_accessors_are_absent() {
        let tree: ImplicitHierarchy<u64, 3> = ImplicitHierarchy::new();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert!(tree.last_leaf().is_none());
        assert_eq!(tree.parent(0), None);
        assert_eq!(tree.son(0, 0), None);
        assert_eq!(tree.degree(0), 0);
        assert_eq!(tree.level(0), None);
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn index_arithmetic_matches_complete_tree() {
        let tree = ternary(13);
        assert_eq!(tree.parent(1), Some(0));
        assert_eq!(tree.parent(3), Some(0));
        assert_eq!(tree.parent(4), Some(1));
        assert_eq!(tree.parent(12), Some(3));
        assert_eq!(tree.son(0, 2), Some(3));
        assert_eq!(tree.son(1, 0), Some(4));
        assert_eq!(tree.son(3, 2), Some(12));
        assert_eq!(tree.son(3, 3), None);
        assert_eq!(tree.son(4, 0), None);
    }

    #[test]
    fn degree_follows_last_level_fill() {
        // Root degree as the ternary tree grows leaf by leaf.
        let expected_root_degree = [0, 1, 2, 3, 3, 3, 3, 3, 3];
        for leaves in 1..=9usize {
            let tree = ternary(leaves);
            assert_eq!(
                tree.degree(0),
                expected_root_degree[leaves - 1],
                "root degree at {leaves} nodes"
            );
            // Internal nodes on the boundary of the last level.
            let last = tree.last_leaf().unwrap();
            if last > 0 {
                let parent = tree.parent(last).unwrap();
                assert_eq!(tree.degree(parent), last - (3 * parent + 1) + 1);
            }
        }

        let nine = ternary(9);
        assert_eq!(nine.degree(0), 3);
        assert_eq!(nine.degree(4), 0);
        assert!(nine.is_leaf(4));
    }

    #[test]
    fn level_is_exact() {
        let tree: ImplicitHierarchy<u64, 2> = (0..15).collect();
        let expected = [0, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3];
        for node in 0..15 {
            assert_eq!(tree.level(node), Some(expected[node]), "level of {node}");
        }
        assert_eq!(tree.level(15), None);
    }

    #[test]
    fn every_edit_is_unsupported() {
        // Empty and occupied, two arities.
        let mut empty: ImplicitHierarchy<u64, 3> = ImplicitHierarchy::new();
        let mut full: ImplicitHierarchy<u64, 2> = (0..5).collect();

        assert!(empty.emplace_root(1).is_err());
        assert!(empty.change_root(0).is_err());
        assert!(empty.emplace_son(0, 0, 1).is_err());
        assert!(empty.change_son(0, 0, 1).is_err());
        assert!(empty.remove_son(0, 0).is_err());

        assert_eq!(
            full.emplace_root(9).unwrap_err().operation,
            "emplace_root"
        );
        assert_eq!(full.change_root(2).unwrap_err().operation, "change_root");
        assert_eq!(
            full.emplace_son(0, 1, 9).unwrap_err().operation,
            "emplace_son"
        );
        assert_eq!(
            full.change_son(0, 0, 3).unwrap_err().operation,
            "change_son"
        );
        assert_eq!(full.remove_son(0, 0).unwrap_err().operation, "remove_son");
        // Rejected edits leave the structure untouched.
        assert_eq!(full.size(), 5);
    }

    #[test]
    fn leaf_growth_and_shrink() {
        let mut tree: ImplicitHierarchy<u64, 3> = ImplicitHierarchy::new();
        assert_eq!(tree.insert_last_leaf(10), 0);
        assert_eq!(tree.insert_last_leaf(11), 1);
        assert_eq!(tree.insert_last_leaf(12), 2);
        assert_eq!(tree.last_leaf(), Some(2));

        assert_eq!(tree.remove_last_leaf(), 12);
        assert_eq!(tree.remove_last_leaf(), 11);
        assert_eq!(tree.remove_last_leaf(), 10);
        assert!(tree.root().is_none());
    }

    #[test]
    #[should_panic(expected = "empty hierarchy")]
    fn remove_leaf_from_empty_panics() {
        let mut tree: ImplicitHierarchy<u64, 3> = ImplicitHierarchy::new();
        tree.remove_last_leaf();
    }

    #[test]
    fn traversals_on_binary_fixture() {
        // Complete binary tree over 0..7: pre, in, post, level orders.
        let tree: BinaryImplicitHierarchy<u64> = (0..7).collect();
        let mut pre = Vec::new();
        tree.for_each_pre_order(|v| pre.push(*v));
        assert_eq!(pre, vec![0, 1, 3, 4, 2, 5, 6]);

        let mut post = Vec::new();
        tree.for_each_post_order(|v| post.push(*v));
        assert_eq!(post, vec![3, 4, 1, 5, 6, 2, 0]);

        let level: Vec<u64> = tree.level_order().copied().collect();
        assert_eq!(level, vec![0, 1, 2, 3, 4, 5, 6]);

        let mut in_order = Vec::new();
        tree.for_each_in_order(|v| in_order.push(*v));
        assert_eq!(in_order, vec![3, 1, 4, 0, 5, 2, 6]);
        let lazy: Vec<u64> = tree.in_order().copied().collect();
        assert_eq!(lazy, in_order);
    }

    #[test]
    fn binary_accessors() {
        let tree: BinaryImplicitHierarchy<u64> = (0..5).collect();
        assert_eq!(tree.left(0), Some(1));
        assert_eq!(tree.right(0), Some(2));
        assert_eq!(tree.left(1), Some(3));
        assert_eq!(tree.right(1), Some(4));
        assert!(!tree.has_left(2));
        assert!(tree.is_leaf(4));
        assert!(tree.is_nth_son(2, 1));
        assert!(!tree.is_nth_son(2, 0));
    }

    #[test]
    fn clone_and_equality() {
        let a: ImplicitHierarchy<u64, 3> = (0..7).collect();
        let mut b = a.clone();
        assert_eq!(a, b);
        b.remove_last_leaf();
        assert_ne!(a, b);
        b.insert_last_leaf(6);
        assert_eq!(a, b);
    }

    #[test]
    fn subtree_counts() {
        let tree: BinaryImplicitHierarchy<u64> = (0..7).collect();
        assert_eq!(tree.node_count(), 7);
        assert_eq!(tree.subtree_node_count(1), 3);
        assert_eq!(tree.subtree_node_count(3), 1);
        assert_eq!(tree.subtree_node_count(7), 0);
    }
}
