//! Explicit network: pool-allocated nodes with symmetric relations.
//!
//! Every node sits in a [`NodePool`] and carries its relation list as an
//! embedded [`ImplicitSequence`] of keys. A gate sequence lists every node,
//! so the whole structure is reachable even when the relation graph is
//! disconnected. Relations are symmetric: connecting `a` to `b` records the
//! key on both sides, and removing a node severs every relation it
//! participates in before the node is freed.

use crate::{ImplicitSequence, NodeKey, NodePool, Sequence};

struct NetNode<T> {
    data: T,
    relations: ImplicitSequence<NodeKey>,
}

/// Undirected graph of pool-allocated nodes with a gate over all of them.
///
/// # Example
///
/// ```
/// use lattice_collections::Network;
///
/// let mut net: Network<&str> = Network::new();
/// let a = net.insert("a");
/// let b = net.insert("b");
/// let c = net.insert("c");
/// net.connect(a, b);
/// net.connect(a, c);
///
/// assert_eq!(net.degree(a), 2);
/// assert!(net.relation_exists(b, a));
/// net.remove(b);
/// assert_eq!(net.degree(a), 1);
/// assert!(!net.relation_exists(a, b));
/// ```
pub struct Network<T> {
    pool: NodePool<NetNode<T>>,
    gate: ImplicitSequence<NodeKey>,
}

impl<T> Network<T> {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self {
            pool: NodePool::new(),
            gate: ImplicitSequence::new(),
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.pool.len()
    }

    /// Returns `true` if the network holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    fn node(&self, key: NodeKey) -> &NetNode<T> {
        self.pool.get(key).expect("node is not live")
    }

    fn node_mut(&mut self, key: NodeKey) -> &mut NetNode<T> {
        self.pool.get_mut(key).expect("node is not live")
    }

    /// Adds a node with `value`, registers it in the gate, and returns its
    /// handle.
    pub fn insert(&mut self, value: T) -> NodeKey {
        let key = self.pool.insert(NetNode {
            data: value,
            relations: ImplicitSequence::new(),
        });
        self.gate.insert_last(key);
        key
    }

    /// Removes `node`, severing all of its relations first, and returns
    /// its payload.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not live.
    pub fn remove(&mut self, node: NodeKey) -> T {
        let neighbors: Vec<NodeKey> = self.node(node).relations.iter().copied().collect();
        for neighbor in neighbors {
            if neighbor != node {
                self.sever(neighbor, node);
            }
        }
        let gate_index = self
            .gate
            .find(|key| *key == node)
            .expect("gate lists every node");
        self.gate.remove_at(gate_index);
        self.pool.remove(node).expect("node is live").data
    }

    /// Records a symmetric relation between `a` and `b`.
    ///
    /// Parallel relations are allowed; connecting a node to itself records
    /// a single self-relation.
    ///
    /// # Panics
    ///
    /// Panics if either node is not live.
    pub fn connect(&mut self, a: NodeKey, b: NodeKey) {
        self.node(b);
        self.node_mut(a).relations.insert_last(b);
        if a != b {
            self.node_mut(b).relations.insert_last(a);
        }
    }

    /// Removes one relation between `a` and `b` from both sides.
    ///
    /// # Panics
    ///
    /// Panics if either node is not live or no relation exists between
    /// them.
    pub fn disconnect(&mut self, a: NodeKey, b: NodeKey) {
        self.node(b);
        self.sever(a, b);
        if a != b {
            self.sever(b, a);
        }
    }

    /// Drops the first occurrence of `to` in the relation list of `from`.
    fn sever(&mut self, from: NodeKey, to: NodeKey) {
        let relations = &mut self.node_mut(from).relations;
        let index = relations
            .find(|key| *key == to)
            .unwrap_or_else(|| panic!("no relation between {from:?} and {to:?}"));
        relations.remove_at(index);
    }

    /// Returns `true` if at least one relation connects `a` and `b`.
    pub fn relation_exists(&self, a: NodeKey, b: NodeKey) -> bool {
        self.pool
            .get(a)
            .is_some_and(|node| node.relations.iter().any(|key| *key == b))
    }

    /// Number of relations at `node` (0 for a stale handle).
    pub fn degree(&self, node: NodeKey) -> usize {
        self.pool.get(node).map_or(0, |n| n.relations.len())
    }

    /// Total number of relations in the network.
    pub fn relation_count(&self) -> usize {
        let mut endpoints = 0;
        let mut self_relations = 0;
        for key in self.gate.iter() {
            for neighbor in self.node(*key).relations.iter() {
                endpoints += 1;
                if neighbor == key {
                    self_relations += 1;
                }
            }
        }
        // Every ordinary relation is listed at both endpoints.
        (endpoints - self_relations) / 2 + self_relations
    }

    /// Handle of the node at `order` in the gate, or `None` when out of
    /// range.
    pub fn node_from_gate(&self, order: usize) -> Option<NodeKey> {
        self.gate.as_slice().get(order).copied()
    }

    /// Handle of the `order`-th relation partner of `node`, or `None` when
    /// the node is stale or the order is out of range.
    pub fn node_from_node(&self, node: NodeKey, order: usize) -> Option<NodeKey> {
        self.pool
            .get(node)?
            .relations
            .as_slice()
            .get(order)
            .copied()
    }

    /// Record at `node`, or `None` for a stale handle.
    #[inline]
    pub fn get(&self, node: NodeKey) -> Option<&T> {
        self.pool.get(node).map(|n| &n.data)
    }

    /// Mutable record at `node`, or `None` for a stale handle.
    #[inline]
    pub fn get_mut(&mut self, node: NodeKey) -> Option<&mut T> {
        self.pool.get_mut(node).map(|n| &mut n.data)
    }

    /// Replaces this network's contents with a deep copy of `other`.
    pub fn assign(&mut self, other: &Self)
    where
        T: Clone,
    {
        *self = other.clone();
    }

    /// Removes every node and relation.
    pub fn clear(&mut self) {
        self.pool.clear();
        self.gate.clear();
    }

    /// Iterates over node handles in gate (insertion) order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.gate.iter().copied()
    }

    /// Iterates over records in gate (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.gate.iter().map(|key| &self.node(*key).data)
    }
}

impl<T> Default for Network<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Network<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        // Pool insertion order matches gate order, so handles carry over
        // only when the source pool has no reuse holes; remap explicitly.
        let mut remap: Vec<(NodeKey, NodeKey)> = Vec::with_capacity(self.size());
        for key in self.nodes() {
            let new_key = copy.insert(self.node(key).data.clone());
            remap.push((key, new_key));
        }
        let translate = |key: NodeKey| {
            remap
                .iter()
                .find(|(old, _)| *old == key)
                .map(|(_, new)| *new)
                .expect("relation target is in the gate")
        };
        for key in self.nodes() {
            let from = translate(key);
            for neighbor in self.node(key).relations.iter() {
                // Add each ordinary relation once, from its lower endpoint.
                if *neighbor == key || translate(*neighbor) > from {
                    // Self-relations are listed once and added once.
                    if *neighbor == key {
                        copy.connect(from, from);
                    } else {
                        copy.connect(from, translate(*neighbor));
                    }
                }
            }
        }
        copy
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Network<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
