//! Pool-allocated linked sequences.
//!
//! Nodes live in a [`NodePool`] and link to each other with [`NodeKey`]
//! handles. The singly-linked variant stores only `next` and answers every
//! backward question by linear scan from the head; the doubly-linked
//! variant maintains `previous` on every link/unlink for O(1) access in
//! both directions.

use crate::{NodeKey, NodePool, Sequence};

// ============================================================================
// Singly-linked
// ============================================================================

struct SinglyNode<T> {
    data: T,
    next: NodeKey,
}

/// Singly-linked sequence; positions are stable node keys.
///
/// A key remains valid until its own node is removed — unlike implicit
/// positions, unrelated inserts and removes do not invalidate it.
///
/// # Example
///
/// ```
/// use lattice_collections::{Sequence, SinglyLinkedSequence};
///
/// let mut seq: SinglyLinkedSequence<u64> = SinglyLinkedSequence::new();
/// let a = seq.insert_last(1);
/// seq.insert_last(3);
/// seq.insert_after(a, 2);
/// assert_eq!(seq.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
pub struct SinglyLinkedSequence<T> {
    pool: NodePool<SinglyNode<T>>,
    head: NodeKey,
    tail: NodeKey,
}

impl<T> SinglyLinkedSequence<T> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self {
            pool: NodePool::new(),
            head: NodeKey::NONE,
            tail: NodeKey::NONE,
        }
    }

    /// Iterates over the records in forward order.
    pub fn iter(&self) -> SinglyIter<'_, T> {
        SinglyIter {
            seq: self,
            cursor: self.head,
        }
    }

    /// Replaces this sequence's contents with a deep copy of `other`.
    pub fn assign(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.clear();
        for value in other.iter() {
            self.insert_last(value.clone());
        }
    }

    fn node(&self, key: NodeKey) -> &SinglyNode<T> {
        self.pool.get(key).expect("position is not live")
    }

    fn node_mut(&mut self, key: NodeKey) -> &mut SinglyNode<T> {
        self.pool.get_mut(key).expect("position is not live")
    }

    /// Key of the node whose `next` is `key`, or `NONE` for the head.
    fn scan_previous(&self, key: NodeKey) -> NodeKey {
        let mut cursor = self.head;
        while cursor.is_some() {
            if self.node(cursor).next == key {
                return cursor;
            }
            cursor = self.node(cursor).next;
        }
        NodeKey::NONE
    }

    /// Unlinks and frees `key`, given its predecessor (or `NONE` for head).
    fn unlink(&mut self, prev: NodeKey, key: NodeKey) -> T {
        let next = self.node(key).next;
        if prev.is_some() {
            self.node_mut(prev).next = next;
        } else {
            self.head = next;
        }
        if key == self.tail {
            self.tail = prev;
        }
        self.pool.remove(key).expect("unlinked node is live").data
    }
}

impl<T> Sequence<T> for SinglyLinkedSequence<T> {
    type Pos = NodeKey;

    fn len(&self) -> usize {
        self.pool.len()
    }

    fn first(&self) -> Option<NodeKey> {
        self.head.is_some().then_some(self.head)
    }

    fn last(&self) -> Option<NodeKey> {
        self.tail.is_some().then_some(self.tail)
    }

    fn position_at(&self, index: usize) -> Option<NodeKey> {
        let mut cursor = self.head;
        for _ in 0..index {
            cursor = self.pool.get(cursor)?.next;
        }
        cursor.is_some().then_some(cursor)
    }

    fn next(&self, pos: NodeKey) -> Option<NodeKey> {
        let next = self.pool.get(pos)?.next;
        next.is_some().then_some(next)
    }

    fn previous(&self, pos: NodeKey) -> Option<NodeKey> {
        self.pool.get(pos)?;
        let prev = self.scan_previous(pos);
        prev.is_some().then_some(prev)
    }

    fn index_of(&self, pos: NodeKey) -> Option<usize> {
        let mut cursor = self.head;
        let mut index = 0;
        while cursor.is_some() {
            if cursor == pos {
                return Some(index);
            }
            cursor = self.node(cursor).next;
            index += 1;
        }
        None
    }

    fn get(&self, pos: NodeKey) -> Option<&T> {
        self.pool.get(pos).map(|node| &node.data)
    }

    fn get_mut(&mut self, pos: NodeKey) -> Option<&mut T> {
        self.pool.get_mut(pos).map(|node| &mut node.data)
    }

    fn insert_first(&mut self, value: T) -> NodeKey {
        let key = self.pool.insert(SinglyNode {
            data: value,
            next: self.head,
        });
        if self.tail.is_none() {
            self.tail = key;
        }
        self.head = key;
        key
    }

    fn insert_last(&mut self, value: T) -> NodeKey {
        let key = self.pool.insert(SinglyNode {
            data: value,
            next: NodeKey::NONE,
        });
        if self.tail.is_some() {
            self.node_mut(self.tail).next = key;
        } else {
            self.head = key;
        }
        self.tail = key;
        key
    }

    fn insert_at(&mut self, index: usize, value: T) -> NodeKey {
        assert!(index <= self.len(), "insert index {index} out of range");
        if index == 0 {
            self.insert_first(value)
        } else {
            let prev = self.position_at(index - 1).expect("index is in range");
            self.insert_after(prev, value)
        }
    }

    fn insert_after(&mut self, pos: NodeKey, value: T) -> NodeKey {
        let next = self.node(pos).next;
        let key = self.pool.insert(SinglyNode { data: value, next });
        self.node_mut(pos).next = key;
        if pos == self.tail {
            self.tail = key;
        }
        key
    }

    fn insert_before(&mut self, pos: NodeKey, value: T) -> NodeKey {
        self.node(pos);
        if pos == self.head {
            self.insert_first(value)
        } else {
            let prev = self.scan_previous(pos);
            self.insert_after(prev, value)
        }
    }

    fn remove_first(&mut self) -> T {
        assert!(self.head.is_some(), "remove from empty sequence");
        self.unlink(NodeKey::NONE, self.head)
    }

    fn remove_last(&mut self) -> T {
        assert!(self.tail.is_some(), "remove from empty sequence");
        let prev = self.scan_previous(self.tail);
        self.unlink(prev, self.tail)
    }

    fn remove_at(&mut self, index: usize) -> T {
        let pos = self
            .position_at(index)
            .unwrap_or_else(|| panic!("remove index {index} out of range"));
        if pos == self.head {
            self.unlink(NodeKey::NONE, pos)
        } else {
            let prev = self.scan_previous(pos);
            self.unlink(prev, pos)
        }
    }

    fn remove_next(&mut self, pos: NodeKey) -> T {
        let next = self.node(pos).next;
        assert!(next.is_some(), "position has no successor");
        self.unlink(pos, next)
    }

    fn remove_previous(&mut self, pos: NodeKey) -> T {
        self.node(pos);
        let prev = self.scan_previous(pos);
        assert!(prev.is_some(), "position has no predecessor");
        let before_prev = self.scan_previous(prev);
        self.unlink(before_prev, prev)
    }

    fn clear(&mut self) {
        self.pool.clear();
        self.head = NodeKey::NONE;
        self.tail = NodeKey::NONE;
    }
}

impl<T> Default for SinglyLinkedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SinglyLinkedSequence<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        for value in self.iter() {
            copy.insert_last(value.clone());
        }
        copy
    }
}

impl<T: PartialEq> PartialEq for SinglyLinkedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SinglyLinkedSequence<T> {}

impl<T: core::fmt::Debug> core::fmt::Debug for SinglyLinkedSequence<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for SinglyLinkedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_last(value);
        }
    }
}

impl<T> FromIterator<T> for SinglyLinkedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

/// Forward iterator over a [`SinglyLinkedSequence`].
pub struct SinglyIter<'a, T> {
    seq: &'a SinglyLinkedSequence<T>,
    cursor: NodeKey,
}

impl<'a, T> Iterator for SinglyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.seq.pool.get(self.cursor)?;
        self.cursor = node.next;
        Some(&node.data)
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedSequence<T> {
    type Item = &'a T;
    type IntoIter = SinglyIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Doubly-linked
// ============================================================================

struct DoublyNode<T> {
    data: T,
    next: NodeKey,
    previous: NodeKey,
}

/// Doubly-linked sequence with O(1) neighbor access in both directions.
pub struct DoublyLinkedSequence<T> {
    pool: NodePool<DoublyNode<T>>,
    head: NodeKey,
    tail: NodeKey,
}

impl<T> DoublyLinkedSequence<T> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self {
            pool: NodePool::new(),
            head: NodeKey::NONE,
            tail: NodeKey::NONE,
        }
    }

    /// Iterates over the records in forward order.
    pub fn iter(&self) -> DoublyIter<'_, T> {
        DoublyIter {
            seq: self,
            cursor: self.head,
        }
    }

    /// Replaces this sequence's contents with a deep copy of `other`.
    pub fn assign(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.clear();
        for value in other.iter() {
            self.insert_last(value.clone());
        }
    }

    fn node(&self, key: NodeKey) -> &DoublyNode<T> {
        self.pool.get(key).expect("position is not live")
    }

    fn node_mut(&mut self, key: NodeKey) -> &mut DoublyNode<T> {
        self.pool.get_mut(key).expect("position is not live")
    }

    fn unlink(&mut self, key: NodeKey) -> T {
        let (prev, next) = {
            let node = self.node(key);
            (node.previous, node.next)
        };
        if prev.is_some() {
            self.node_mut(prev).next = next;
        } else {
            self.head = next;
        }
        if next.is_some() {
            self.node_mut(next).previous = prev;
        } else {
            self.tail = prev;
        }
        self.pool.remove(key).expect("unlinked node is live").data
    }
}

impl<T> Sequence<T> for DoublyLinkedSequence<T> {
    type Pos = NodeKey;

    fn len(&self) -> usize {
        self.pool.len()
    }

    fn first(&self) -> Option<NodeKey> {
        self.head.is_some().then_some(self.head)
    }

    fn last(&self) -> Option<NodeKey> {
        self.tail.is_some().then_some(self.tail)
    }

    fn position_at(&self, index: usize) -> Option<NodeKey> {
        let len = self.len();
        if index >= len {
            return None;
        }
        // Walk from the nearer end.
        if index <= len / 2 {
            let mut cursor = self.head;
            for _ in 0..index {
                cursor = self.node(cursor).next;
            }
            Some(cursor)
        } else {
            let mut cursor = self.tail;
            for _ in 0..(len - 1 - index) {
                cursor = self.node(cursor).previous;
            }
            Some(cursor)
        }
    }

    fn next(&self, pos: NodeKey) -> Option<NodeKey> {
        let next = self.pool.get(pos)?.next;
        next.is_some().then_some(next)
    }

    fn previous(&self, pos: NodeKey) -> Option<NodeKey> {
        let prev = self.pool.get(pos)?.previous;
        prev.is_some().then_some(prev)
    }

    fn index_of(&self, pos: NodeKey) -> Option<usize> {
        let mut cursor = self.head;
        let mut index = 0;
        while cursor.is_some() {
            if cursor == pos {
                return Some(index);
            }
            cursor = self.node(cursor).next;
            index += 1;
        }
        None
    }

    fn get(&self, pos: NodeKey) -> Option<&T> {
        self.pool.get(pos).map(|node| &node.data)
    }

    fn get_mut(&mut self, pos: NodeKey) -> Option<&mut T> {
        self.pool.get_mut(pos).map(|node| &mut node.data)
    }

    fn insert_first(&mut self, value: T) -> NodeKey {
        let key = self.pool.insert(DoublyNode {
            data: value,
            next: self.head,
            previous: NodeKey::NONE,
        });
        if self.head.is_some() {
            self.node_mut(self.head).previous = key;
        } else {
            self.tail = key;
        }
        self.head = key;
        key
    }

    fn insert_last(&mut self, value: T) -> NodeKey {
        let key = self.pool.insert(DoublyNode {
            data: value,
            next: NodeKey::NONE,
            previous: self.tail,
        });
        if self.tail.is_some() {
            self.node_mut(self.tail).next = key;
        } else {
            self.head = key;
        }
        self.tail = key;
        key
    }

    fn insert_at(&mut self, index: usize, value: T) -> NodeKey {
        assert!(index <= self.len(), "insert index {index} out of range");
        if index == self.len() {
            self.insert_last(value)
        } else {
            let pos = self.position_at(index).expect("index is in range");
            self.insert_before(pos, value)
        }
    }

    fn insert_after(&mut self, pos: NodeKey, value: T) -> NodeKey {
        let next = self.node(pos).next;
        let key = self.pool.insert(DoublyNode {
            data: value,
            next,
            previous: pos,
        });
        self.node_mut(pos).next = key;
        if next.is_some() {
            self.node_mut(next).previous = key;
        } else {
            self.tail = key;
        }
        key
    }

    fn insert_before(&mut self, pos: NodeKey, value: T) -> NodeKey {
        let prev = self.node(pos).previous;
        let key = self.pool.insert(DoublyNode {
            data: value,
            next: pos,
            previous: prev,
        });
        self.node_mut(pos).previous = key;
        if prev.is_some() {
            self.node_mut(prev).next = key;
        } else {
            self.head = key;
        }
        key
    }

    fn remove_first(&mut self) -> T {
        assert!(self.head.is_some(), "remove from empty sequence");
        self.unlink(self.head)
    }

    fn remove_last(&mut self) -> T {
        assert!(self.tail.is_some(), "remove from empty sequence");
        self.unlink(self.tail)
    }

    fn remove_at(&mut self, index: usize) -> T {
        let pos = self
            .position_at(index)
            .unwrap_or_else(|| panic!("remove index {index} out of range"));
        self.unlink(pos)
    }

    fn remove_next(&mut self, pos: NodeKey) -> T {
        let next = self.node(pos).next;
        assert!(next.is_some(), "position has no successor");
        self.unlink(next)
    }

    fn remove_previous(&mut self, pos: NodeKey) -> T {
        let prev = self.node(pos).previous;
        assert!(prev.is_some(), "position has no predecessor");
        self.unlink(prev)
    }

    fn clear(&mut self) {
        self.pool.clear();
        self.head = NodeKey::NONE;
        self.tail = NodeKey::NONE;
    }
}

impl<T> Default for DoublyLinkedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DoublyLinkedSequence<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        for value in self.iter() {
            copy.insert_last(value.clone());
        }
        copy
    }
}

impl<T: PartialEq> PartialEq for DoublyLinkedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DoublyLinkedSequence<T> {}

impl<T: core::fmt::Debug> core::fmt::Debug for DoublyLinkedSequence<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for DoublyLinkedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_last(value);
        }
    }
}

impl<T> FromIterator<T> for DoublyLinkedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

/// Forward iterator over a [`DoublyLinkedSequence`].
pub struct DoublyIter<'a, T> {
    seq: &'a DoublyLinkedSequence<T>,
    cursor: NodeKey,
}

impl<'a, T> Iterator for DoublyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.seq.pool.get(self.cursor)?;
        self.cursor = node.next;
        Some(&node.data)
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedSequence<T> {
    type Item = &'a T;
    type IntoIter = DoublyIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
