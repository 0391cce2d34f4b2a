//! Pointer-linked hierarchies over a node pool.
//!
//! Nodes live in a [`NodePool`] and carry a `parent` back-reference next to
//! their son linkage, so every edit keeps parent and child mutually
//! consistent. Three son layouts are provided:
//!
//! - [`MultiWayHierarchy`] — a variable-length son list per node, stored as
//!   an embedded [`ImplicitSequence`] of keys; son orders are dense.
//! - [`KWayHierarchy`] — `K` fixed son slots per node; a slot may be empty.
//! - [`BinaryExplicitHierarchy`] — two fixed slots; also implements
//!   [`BinaryHierarchy`].
//!
//! `change_root`/`change_son` detach rather than destroy: the displaced
//! subtree stays in the pool under its returned handle until it is either
//! re-attached or freed with `release`. Subtree release is iterative, so
//! degenerate trees thousands of levels deep tear down without exhausting
//! the call stack.

use crate::{
    BinaryHierarchy, Hierarchy, ImplicitSequence, NodeKey, NodePool, Sequence, Unsupported,
};

// ============================================================================
// Multi-way
// ============================================================================

struct MultiWayNode<T> {
    data: T,
    parent: NodeKey,
    sons: ImplicitSequence<NodeKey>,
}

/// Pointer-linked tree with a variable number of sons per node.
///
/// # Example
///
/// ```
/// use lattice_collections::{Hierarchy, MultiWayHierarchy};
///
/// let mut tree: MultiWayHierarchy<&str> = MultiWayHierarchy::new();
/// let root = tree.emplace_root("root").unwrap();
/// let a = tree.emplace_son(root, 0, "a").unwrap();
/// tree.emplace_son(root, 1, "b").unwrap();
/// tree.emplace_son(a, 0, "a0").unwrap();
///
/// assert_eq!(tree.degree(root), 2);
/// assert_eq!(tree.parent(a), Some(root));
/// tree.remove_son(root, 0).unwrap(); // drops "a" and "a0"
/// assert_eq!(tree.size(), 2);
/// ```
pub struct MultiWayHierarchy<T> {
    pool: NodePool<MultiWayNode<T>>,
    root: NodeKey,
}

impl<T> MultiWayHierarchy<T> {
    /// Creates an empty hierarchy.
    pub fn new() -> Self {
        Self {
            pool: NodePool::new(),
            root: NodeKey::NONE,
        }
    }

    fn node(&self, key: NodeKey) -> &MultiWayNode<T> {
        self.pool.get(key).expect("node is not live")
    }

    fn node_mut(&mut self, key: NodeKey) -> &mut MultiWayNode<T> {
        self.pool.get_mut(key).expect("node is not live")
    }

    /// Frees `node` and its entire subtree.
    ///
    /// `node` must be detached — the root, or a handle returned by
    /// [`change_root`](Hierarchy::change_root) /
    /// [`change_son`](Hierarchy::change_son).
    ///
    /// # Panics
    ///
    /// Panics if `node` is not live.
    pub fn release(&mut self, node: NodeKey) {
        let mut stack = vec![node];
        while let Some(key) = stack.pop() {
            let freed = self.pool.remove(key).expect("subtree node is live");
            stack.extend(freed.sons.iter().copied());
        }
        if node == self.root {
            self.root = NodeKey::NONE;
        }
    }

    /// Replaces this hierarchy's contents with a structural deep copy of
    /// `other`.
    pub fn assign(&mut self, other: &Self)
    where
        T: Clone,
    {
        *self = other.clone();
    }
}

impl<T> Hierarchy<T> for MultiWayHierarchy<T> {
    type Node = NodeKey;

    fn size(&self) -> usize {
        self.pool.len()
    }

    fn root(&self) -> Option<NodeKey> {
        self.root.is_some().then_some(self.root)
    }

    fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        let parent = self.pool.get(node)?.parent;
        parent.is_some().then_some(parent)
    }

    fn son(&self, node: NodeKey, order: usize) -> Option<NodeKey> {
        self.pool.get(node)?.sons.as_slice().get(order).copied()
    }

    fn degree(&self, node: NodeKey) -> usize {
        self.pool.get(node).map_or(0, |n| n.sons.len())
    }

    fn son_slot_count(&self, node: NodeKey) -> usize {
        self.degree(node)
    }

    fn get(&self, node: NodeKey) -> Option<&T> {
        self.pool.get(node).map(|n| &n.data)
    }

    fn get_mut(&mut self, node: NodeKey) -> Option<&mut T> {
        self.pool.get_mut(node).map(|n| &mut n.data)
    }

    fn emplace_root(&mut self, value: T) -> Result<NodeKey, Unsupported> {
        assert!(self.root.is_none(), "hierarchy already has a root");
        self.root = self.pool.insert(MultiWayNode {
            data: value,
            parent: NodeKey::NONE,
            sons: ImplicitSequence::new(),
        });
        Ok(self.root)
    }

    fn change_root(&mut self, new_root: NodeKey) -> Result<Option<NodeKey>, Unsupported> {
        assert!(
            self.node(new_root).parent.is_none(),
            "new root is still attached"
        );
        let old = self.root;
        self.root = new_root;
        Ok((old.is_some() && old != new_root).then_some(old))
    }

    fn emplace_son(
        &mut self,
        parent: NodeKey,
        order: usize,
        value: T,
    ) -> Result<NodeKey, Unsupported> {
        let degree = self.node(parent).sons.len();
        assert!(order <= degree, "son order {order} out of range");
        let son = self.pool.insert(MultiWayNode {
            data: value,
            parent,
            sons: ImplicitSequence::new(),
        });
        self.node_mut(parent).sons.insert_at(order, son);
        Ok(son)
    }

    fn change_son(
        &mut self,
        parent: NodeKey,
        order: usize,
        new_son: NodeKey,
    ) -> Result<Option<NodeKey>, Unsupported> {
        let degree = self.node(parent).sons.len();
        assert!(order < degree, "son order {order} out of range");
        if new_son.is_some() {
            assert!(
                self.node(new_son).parent.is_none(),
                "new son is still attached"
            );
        }

        let old = if new_son.is_some() {
            let slot = self
                .node_mut(parent)
                .sons
                .get_mut(order)
                .expect("order is in range");
            let old = core::mem::replace(slot, new_son);
            self.node_mut(new_son).parent = parent;
            old
        } else {
            // Detaching without a replacement closes the gap in the list.
            self.node_mut(parent).sons.remove_at(order)
        };
        self.node_mut(old).parent = NodeKey::NONE;
        Ok(Some(old))
    }

    fn remove_son(&mut self, parent: NodeKey, order: usize) -> Result<(), Unsupported> {
        let degree = self.node(parent).sons.len();
        assert!(order < degree, "son order {order} out of range");
        let son = self.node_mut(parent).sons.remove_at(order);
        self.node_mut(son).parent = NodeKey::NONE;
        self.release(son);
        Ok(())
    }

    fn clear(&mut self) {
        self.pool.clear();
        self.root = NodeKey::NONE;
    }
}

impl<T> Default for MultiWayHierarchy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for MultiWayHierarchy<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        let Some(src_root) = self.root() else {
            return copy;
        };
        let dst_root = copy.pool.insert(MultiWayNode {
            data: self.node(src_root).data.clone(),
            parent: NodeKey::NONE,
            sons: ImplicitSequence::new(),
        });
        copy.root = dst_root;

        let mut stack = vec![(src_root, dst_root)];
        while let Some((src, dst)) = stack.pop() {
            for order in 0..self.node(src).sons.len() {
                let src_son = *self.node(src).sons.get(order).expect("order is in range");
                let dst_son = copy.pool.insert(MultiWayNode {
                    data: self.node(src_son).data.clone(),
                    parent: dst,
                    sons: ImplicitSequence::new(),
                });
                copy.node_mut(dst).sons.insert_last(dst_son);
                stack.push((src_son, dst_son));
            }
        }
        copy
    }
}

impl<T: PartialEq> PartialEq for MultiWayHierarchy<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.root(), other.root()) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                let mut stack = vec![(a, b)];
                while let Some((left, right)) = stack.pop() {
                    let ln = self.node(left);
                    let rn = other.node(right);
                    if ln.data != rn.data || ln.sons.len() != rn.sons.len() {
                        return false;
                    }
                    stack.extend(
                        ln.sons
                            .iter()
                            .copied()
                            .zip(rn.sons.iter().copied()),
                    );
                }
                true
            }
            _ => false,
        }
    }
}

impl<T: Eq> Eq for MultiWayHierarchy<T> {}

impl<T: core::fmt::Debug> core::fmt::Debug for MultiWayHierarchy<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.pre_order()).finish()
    }
}

// ============================================================================
// K-way
// ============================================================================

struct KWayNode<T, const K: usize> {
    data: T,
    parent: NodeKey,
    sons: [NodeKey; K],
}

/// Pointer-linked tree with `K` fixed son slots per node.
///
/// Son orders address slots, not present sons: a node may have a son at
/// order 2 and none at order 0. Emplacing into an occupied slot panics;
/// [`change_son`](Hierarchy::change_son) swaps slot contents instead.
pub struct KWayHierarchy<T, const K: usize> {
    pool: NodePool<KWayNode<T, K>>,
    root: NodeKey,
}

impl<T, const K: usize> KWayHierarchy<T, K> {
    /// Creates an empty hierarchy.
    pub fn new() -> Self {
        Self {
            pool: NodePool::new(),
            root: NodeKey::NONE,
        }
    }

    fn node(&self, key: NodeKey) -> &KWayNode<T, K> {
        self.pool.get(key).expect("node is not live")
    }

    fn node_mut(&mut self, key: NodeKey) -> &mut KWayNode<T, K> {
        self.pool.get_mut(key).expect("node is not live")
    }

    fn fresh_node(&mut self, value: T, parent: NodeKey) -> NodeKey {
        self.pool.insert(KWayNode {
            data: value,
            parent,
            sons: [NodeKey::NONE; K],
        })
    }

    /// Frees `node` and its entire subtree.
    ///
    /// `node` must be detached — the root, or a handle returned by
    /// [`change_root`](Hierarchy::change_root) /
    /// [`change_son`](Hierarchy::change_son).
    ///
    /// # Panics
    ///
    /// Panics if `node` is not live.
    pub fn release(&mut self, node: NodeKey) {
        let mut stack = vec![node];
        while let Some(key) = stack.pop() {
            let freed = self.pool.remove(key).expect("subtree node is live");
            stack.extend(freed.sons.into_iter().filter(|son| son.is_some()));
        }
        if node == self.root {
            self.root = NodeKey::NONE;
        }
    }

    /// Replaces this hierarchy's contents with a structural deep copy of
    /// `other`.
    pub fn assign(&mut self, other: &Self)
    where
        T: Clone,
    {
        *self = other.clone();
    }
}

impl<T, const K: usize> Hierarchy<T> for KWayHierarchy<T, K> {
    type Node = NodeKey;

    fn size(&self) -> usize {
        self.pool.len()
    }

    fn root(&self) -> Option<NodeKey> {
        self.root.is_some().then_some(self.root)
    }

    fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        let parent = self.pool.get(node)?.parent;
        parent.is_some().then_some(parent)
    }

    fn son(&self, node: NodeKey, order: usize) -> Option<NodeKey> {
        let son = *self.pool.get(node)?.sons.get(order)?;
        son.is_some().then_some(son)
    }

    fn degree(&self, node: NodeKey) -> usize {
        self.pool
            .get(node)
            .map_or(0, |n| n.sons.iter().filter(|son| son.is_some()).count())
    }

    fn son_slot_count(&self, node: NodeKey) -> usize {
        if self.pool.get(node).is_some() {
            K
        } else {
            0
        }
    }

    fn get(&self, node: NodeKey) -> Option<&T> {
        self.pool.get(node).map(|n| &n.data)
    }

    fn get_mut(&mut self, node: NodeKey) -> Option<&mut T> {
        self.pool.get_mut(node).map(|n| &mut n.data)
    }

    fn emplace_root(&mut self, value: T) -> Result<NodeKey, Unsupported> {
        assert!(self.root.is_none(), "hierarchy already has a root");
        self.root = self.fresh_node(value, NodeKey::NONE);
        Ok(self.root)
    }

    fn change_root(&mut self, new_root: NodeKey) -> Result<Option<NodeKey>, Unsupported> {
        assert!(
            self.node(new_root).parent.is_none(),
            "new root is still attached"
        );
        let old = self.root;
        self.root = new_root;
        Ok((old.is_some() && old != new_root).then_some(old))
    }

    fn emplace_son(
        &mut self,
        parent: NodeKey,
        order: usize,
        value: T,
    ) -> Result<NodeKey, Unsupported> {
        assert!(order < K, "son order {order} out of range");
        assert!(
            self.node(parent).sons[order].is_none(),
            "son slot {order} is occupied"
        );
        let son = self.fresh_node(value, parent);
        self.node_mut(parent).sons[order] = son;
        Ok(son)
    }

    fn change_son(
        &mut self,
        parent: NodeKey,
        order: usize,
        new_son: NodeKey,
    ) -> Result<Option<NodeKey>, Unsupported> {
        assert!(order < K, "son order {order} out of range");
        if new_son.is_some() {
            assert!(
                self.node(new_son).parent.is_none(),
                "new son is still attached"
            );
        }
        let old = core::mem::replace(&mut self.node_mut(parent).sons[order], new_son);
        if new_son.is_some() {
            self.node_mut(new_son).parent = parent;
        }
        if old.is_some() {
            self.node_mut(old).parent = NodeKey::NONE;
        }
        Ok(old.is_some().then_some(old))
    }

    fn remove_son(&mut self, parent: NodeKey, order: usize) -> Result<(), Unsupported> {
        assert!(order < K, "son order {order} out of range");
        let son = self.node(parent).sons[order];
        assert!(son.is_some(), "no son at order {order}");
        self.node_mut(parent).sons[order] = NodeKey::NONE;
        self.node_mut(son).parent = NodeKey::NONE;
        self.release(son);
        Ok(())
    }

    fn clear(&mut self) {
        self.pool.clear();
        self.root = NodeKey::NONE;
    }
}

impl<T, const K: usize> Default for KWayHierarchy<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const K: usize> Clone for KWayHierarchy<T, K> {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        let Some(src_root) = self.root() else {
            return copy;
        };
        let dst_root = copy.fresh_node(self.node(src_root).data.clone(), NodeKey::NONE);
        copy.root = dst_root;

        let mut stack = vec![(src_root, dst_root)];
        while let Some((src, dst)) = stack.pop() {
            for order in 0..K {
                let src_son = self.node(src).sons[order];
                if src_son.is_none() {
                    continue;
                }
                let dst_son = copy.fresh_node(self.node(src_son).data.clone(), dst);
                copy.node_mut(dst).sons[order] = dst_son;
                stack.push((src_son, dst_son));
            }
        }
        copy
    }
}

impl<T: PartialEq, const K: usize> PartialEq for KWayHierarchy<T, K> {
    fn eq(&self, other: &Self) -> bool {
        match (self.root(), other.root()) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                let mut stack = vec![(a, b)];
                while let Some((left, right)) = stack.pop() {
                    let ln = self.node(left);
                    let rn = other.node(right);
                    if ln.data != rn.data {
                        return false;
                    }
                    for order in 0..K {
                        match (ln.sons[order].is_some(), rn.sons[order].is_some()) {
                            (true, true) => stack.push((ln.sons[order], rn.sons[order])),
                            (false, false) => {}
                            _ => return false,
                        }
                    }
                }
                true
            }
            _ => false,
        }
    }
}

impl<T: Eq, const K: usize> Eq for KWayHierarchy<T, K> {}

impl<T: core::fmt::Debug, const K: usize> core::fmt::Debug for KWayHierarchy<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.pre_order()).finish()
    }
}

// ============================================================================
// Binary
// ============================================================================

/// Pointer-linked binary tree; left son at order 0, right son at order 1.
///
/// A fixed two-slot [`KWayHierarchy`] with the [`BinaryHierarchy`] surface.
pub type BinaryExplicitHierarchy<T> = KWayHierarchy<T, 2>;

impl<T> BinaryHierarchy<T> for BinaryExplicitHierarchy<T> {}
