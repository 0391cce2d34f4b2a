//! Node pool: a simple non-relocating allocator with stable handles.
//!
//! Every explicit structure (linked sequence, pointer-linked hierarchy,
//! network) owns exactly one pool and allocates its nodes from it. Handles
//! stay valid until the node is removed; freed slots are reused LIFO.

use crate::NodeKey;

enum Slot<T> {
    Occupied(T),
    Vacant(NodeKey),
}

/// Growable slab of individually allocated nodes.
///
/// # Example
///
/// ```
/// use lattice_collections::NodePool;
///
/// let mut pool: NodePool<u64> = NodePool::new();
/// let a = pool.insert(1);
/// let b = pool.insert(2);
/// assert_eq!(pool.remove(a), Some(1));
/// // Freed slot is reused by the next insert.
/// let c = pool.insert(3);
/// assert_eq!(c, a);
/// assert_eq!(pool.get(b), Some(&2));
/// ```
pub struct NodePool<T> {
    slots: Vec<Slot<T>>,
    free_head: NodeKey,
    len: usize,
}

impl<T> NodePool<T> {
    /// Creates an empty pool.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: NodeKey::NONE,
            len: 0,
        }
    }

    /// Creates a pool with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: NodeKey::NONE,
            len: 0,
        }
    }

    /// Returns the number of live nodes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the pool holds no nodes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocates a node and returns its stable handle.
    pub fn insert(&mut self, value: T) -> NodeKey {
        self.len += 1;
        if self.free_head.is_some() {
            let key = self.free_head;
            match self.slots[key.as_usize()] {
                Slot::Vacant(next_free) => self.free_head = next_free,
                Slot::Occupied(_) => unreachable!("free list points at occupied slot"),
            }
            self.slots[key.as_usize()] = Slot::Occupied(value);
            key
        } else {
            let key = NodeKey::from_usize(self.slots.len());
            self.slots.push(Slot::Occupied(value));
            key
        }
    }

    /// Frees the node at `key` and returns its payload, or `None` if the
    /// handle is stale or the sentinel.
    pub fn remove(&mut self, key: NodeKey) -> Option<T> {
        if key.is_none() || key.as_usize() >= self.slots.len() {
            return None;
        }
        let slot = &mut self.slots[key.as_usize()];
        if matches!(slot, Slot::Vacant(_)) {
            return None;
        }
        let old = core::mem::replace(slot, Slot::Vacant(self.free_head));
        self.free_head = key;
        self.len -= 1;
        match old {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant(_) => unreachable!(),
        }
    }

    /// Returns a reference to the node at `key`, if live.
    #[inline]
    pub fn get(&self, key: NodeKey) -> Option<&T> {
        match self.slots.get(key.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the node at `key`, if live.
    #[inline]
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut T> {
        match self.slots.get_mut(key.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Frees every node and resets the pool.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = NodeKey::NONE;
        self.len = 0;
    }
}

impl<T> Default for NodePool<T> {
    fn default() -> Self {
        Self::new()
    }
}
