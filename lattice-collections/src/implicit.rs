//! Index-addressed sequences over a compact buffer.
//!
//! Adjacency is computed arithmetically: the record after index `i` is
//! `i + 1` (modulo length for the cyclic variant). All structural edits
//! delegate to the buffer's shifting insert/remove, so the live records
//! always form a dense prefix.

use crate::Sequence;
use lattice_block::CompactBuffer;

/// Sequence backed by one [`CompactBuffer`]; positions are plain indices.
///
/// Any structural mutation shifts records and therefore invalidates every
/// previously obtained position and reference.
///
/// # Example
///
/// ```
/// use lattice_collections::{ImplicitSequence, Sequence};
///
/// let mut seq: ImplicitSequence<u64> = ImplicitSequence::new();
/// seq.insert_last(1);
/// seq.insert_last(3);
/// seq.insert_at(1, 2);
/// assert_eq!(seq.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ImplicitSequence<T> {
    buffer: CompactBuffer<T>,
}

impl<T> ImplicitSequence<T> {
    /// Creates an empty sequence with the default initial capacity.
    pub fn new() -> Self {
        Self {
            buffer: CompactBuffer::new(),
        }
    }

    /// Creates an empty sequence with exactly `capacity` reserved slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: CompactBuffer::with_capacity(capacity),
        }
    }

    /// Number of reserved record slots.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Grows the reserved capacity to at least `capacity` slots.
    pub fn reserve(&mut self, capacity: usize) {
        if capacity > self.buffer.capacity() {
            self.buffer.change_capacity(capacity);
        }
    }

    /// Index of a record known by reference, or `None` when the reference
    /// does not point into this sequence.
    pub fn index_of_record(&self, record: &T) -> Option<usize> {
        self.buffer.index_of(record)
    }

    /// Views the records as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.buffer.as_slice()
    }

    /// Iterates over the records in forward order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.buffer.iter()
    }

    /// Replaces this sequence's contents with a deep copy of `other`.
    pub fn assign(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.buffer.assign(&other.buffer);
    }
}

impl<T> Sequence<T> for ImplicitSequence<T> {
    type Pos = usize;

    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn first(&self) -> Option<usize> {
        (!self.buffer.is_empty()).then_some(0)
    }

    fn last(&self) -> Option<usize> {
        self.buffer.len().checked_sub(1)
    }

    fn position_at(&self, index: usize) -> Option<usize> {
        (index < self.buffer.len()).then_some(index)
    }

    fn next(&self, pos: usize) -> Option<usize> {
        (pos + 1 < self.buffer.len()).then_some(pos + 1)
    }

    fn previous(&self, pos: usize) -> Option<usize> {
        (pos < self.buffer.len()).then(|| pos.checked_sub(1)).flatten()
    }

    fn index_of(&self, pos: usize) -> Option<usize> {
        self.position_at(pos)
    }

    fn get(&self, pos: usize) -> Option<&T> {
        self.buffer.get(pos)
    }

    fn get_mut(&mut self, pos: usize) -> Option<&mut T> {
        self.buffer.get_mut(pos)
    }

    fn insert_first(&mut self, value: T) -> usize {
        self.buffer.insert_at(0, value);
        0
    }

    fn insert_last(&mut self, value: T) -> usize {
        self.buffer.push(value);
        self.buffer.len() - 1
    }

    fn insert_at(&mut self, index: usize, value: T) -> usize {
        self.buffer.insert_at(index, value);
        index
    }

    fn insert_after(&mut self, pos: usize, value: T) -> usize {
        assert!(pos < self.buffer.len(), "position {pos} is not live");
        self.buffer.insert_at(pos + 1, value);
        pos + 1
    }

    fn insert_before(&mut self, pos: usize, value: T) -> usize {
        assert!(pos < self.buffer.len(), "position {pos} is not live");
        self.buffer.insert_at(pos, value);
        pos
    }

    fn remove_first(&mut self) -> T {
        assert!(!self.buffer.is_empty(), "remove from empty sequence");
        self.buffer.release_at(0)
    }

    fn remove_last(&mut self) -> T {
        assert!(!self.buffer.is_empty(), "remove from empty sequence");
        self.buffer.release_at(self.buffer.len() - 1)
    }

    fn remove_at(&mut self, index: usize) -> T {
        self.buffer.release_at(index)
    }

    fn remove_next(&mut self, pos: usize) -> T {
        let next = self.next(pos).expect("position has no successor");
        self.buffer.release_at(next)
    }

    fn remove_previous(&mut self, pos: usize) -> T {
        let prev = self.previous(pos).expect("position has no predecessor");
        self.buffer.release_at(prev)
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl<T> Default for ImplicitSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a ImplicitSequence<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for ImplicitSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_last(value);
        }
    }
}

impl<T> FromIterator<T> for ImplicitSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

// ============================================================================
// Cyclic variant
// ============================================================================

/// Implicit sequence whose neighbor arithmetic wraps modulo the length.
///
/// The successor of the last record is the first record and vice versa;
/// "first" and "last" remain index 0 and `len - 1`, which stay meaningful
/// because inserts and removes keep the records a dense prefix. Traversal
/// and search visit each record at most once despite the wrap-around.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CyclicImplicitSequence<T> {
    buffer: CompactBuffer<T>,
}

impl<T> CyclicImplicitSequence<T> {
    /// Creates an empty cyclic sequence.
    pub fn new() -> Self {
        Self {
            buffer: CompactBuffer::new(),
        }
    }

    /// Creates an empty cyclic sequence with `capacity` reserved slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: CompactBuffer::with_capacity(capacity),
        }
    }

    /// Iterates over the records once, starting at index 0.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.buffer.iter()
    }
}

impl<T> Sequence<T> for CyclicImplicitSequence<T> {
    type Pos = usize;

    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn first(&self) -> Option<usize> {
        (!self.buffer.is_empty()).then_some(0)
    }

    fn last(&self) -> Option<usize> {
        self.buffer.len().checked_sub(1)
    }

    fn position_at(&self, index: usize) -> Option<usize> {
        (index < self.buffer.len()).then_some(index)
    }

    fn next(&self, pos: usize) -> Option<usize> {
        let len = self.buffer.len();
        (pos < len).then(|| (pos + 1) % len)
    }

    fn previous(&self, pos: usize) -> Option<usize> {
        let len = self.buffer.len();
        (pos < len).then(|| (pos + len - 1) % len)
    }

    fn index_of(&self, pos: usize) -> Option<usize> {
        self.position_at(pos)
    }

    fn get(&self, pos: usize) -> Option<&T> {
        self.buffer.get(pos)
    }

    fn get_mut(&mut self, pos: usize) -> Option<&mut T> {
        self.buffer.get_mut(pos)
    }

    fn insert_first(&mut self, value: T) -> usize {
        self.buffer.insert_at(0, value);
        0
    }

    fn insert_last(&mut self, value: T) -> usize {
        self.buffer.push(value);
        self.buffer.len() - 1
    }

    fn insert_at(&mut self, index: usize, value: T) -> usize {
        self.buffer.insert_at(index, value);
        index
    }

    fn insert_after(&mut self, pos: usize, value: T) -> usize {
        assert!(pos < self.buffer.len(), "position {pos} is not live");
        self.buffer.insert_at(pos + 1, value);
        pos + 1
    }

    fn insert_before(&mut self, pos: usize, value: T) -> usize {
        assert!(pos < self.buffer.len(), "position {pos} is not live");
        self.buffer.insert_at(pos, value);
        pos
    }

    fn remove_first(&mut self) -> T {
        assert!(!self.buffer.is_empty(), "remove from empty sequence");
        self.buffer.release_at(0)
    }

    fn remove_last(&mut self) -> T {
        assert!(!self.buffer.is_empty(), "remove from empty sequence");
        self.buffer.release_at(self.buffer.len() - 1)
    }

    fn remove_at(&mut self, index: usize) -> T {
        self.buffer.release_at(index)
    }

    fn remove_next(&mut self, pos: usize) -> T {
        let next = self.next(pos).expect("position is not live");
        self.buffer.release_at(next)
    }

    fn remove_previous(&mut self, pos: usize) -> T {
        let prev = self.previous(pos).expect("position is not live");
        self.buffer.release_at(prev)
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }

    // The wrap-around would make the open-ended defaults spin forever, so
    // every traversal is bounded to one full revolution.

    fn for_each_from<F: FnMut(&T)>(&self, start: Option<usize>, mut op: F) {
        let mut cursor = start;
        for _ in 0..self.buffer.len() {
            match cursor {
                Some(pos) => {
                    op(self.get(pos).expect("traversal position is live"));
                    cursor = self.next(pos);
                }
                None => break,
            }
        }
    }

    fn for_each_back_from<F: FnMut(&T)>(&self, start: Option<usize>, mut op: F) {
        let mut cursor = start;
        for _ in 0..self.buffer.len() {
            match cursor {
                Some(pos) => {
                    op(self.get(pos).expect("traversal position is live"));
                    cursor = self.previous(pos);
                }
                None => break,
            }
        }
    }

    fn find<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<usize> {
        (0..self.buffer.len())
            .find(|&pos| predicate(self.buffer.get(pos).expect("position is in range")))
    }

    fn find_previous<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<usize> {
        let matched = self.find(&mut predicate)?;
        (matched > 0).then(|| matched - 1)
    }
}

impl<T> Default for CyclicImplicitSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a CyclicImplicitSequence<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for CyclicImplicitSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_last(value);
        }
    }
}

impl<T> FromIterator<T> for CyclicImplicitSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<S: Sequence<u64>>(seq: &S) -> Vec<u64> {
        let mut out = Vec::new();
        seq.for_each_forward(|v| out.push(*v));
        out
    }

    #[test]
    fn empty_accessors_are_absent() {
        let seq: ImplicitSequence<u64> = ImplicitSequence::new();
        assert!(seq.is_empty());
        assert!(seq.first().is_none());
        assert!(seq.last().is_none());
        assert!(seq.position_at(0).is_none());
        assert!(seq.get(0).is_none());
    }

    #[test]
    fn insert_positions_are_immediately_visible() {
        let mut seq: ImplicitSequence<u64> = ImplicitSequence::new();
        seq.insert_last(2);
        seq.insert_first(1);
        seq.insert_last(4);
        let pos = seq.position_at(1).unwrap();
        seq.insert_after(pos, 3);
        assert_eq!(collect(&seq), vec![1, 2, 3, 4]);

        let pos = seq.position_at(0).unwrap();
        seq.insert_before(pos, 0);
        assert_eq!(collect(&seq), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn insert_at_every_index_preserves_order() {
        for k in 0..=5 {
            let mut seq: ImplicitSequence<u64> = (0..5).collect();
            seq.insert_at(k, 99);
            let mut expected: Vec<u64> = (0..5).collect();
            expected.insert(k, 99);
            assert_eq!(collect(&seq), expected);
        }
    }

    #[test]
    fn remove_family() {
        let mut seq: ImplicitSequence<u64> = (0..6).collect();
        assert_eq!(seq.remove_first(), 0);
        assert_eq!(seq.remove_last(), 5);
        assert_eq!(seq.remove_at(1), 2);
        let pos = seq.position_at(0).unwrap();
        assert_eq!(seq.remove_next(pos), 3);
        let pos = seq.position_at(1).unwrap();
        assert_eq!(seq.remove_previous(pos), 1);
        assert_eq!(collect(&seq), vec![4]);
    }

    #[test]
    #[should_panic(expected = "no successor")]
    fn remove_next_of_last_panics() {
        let mut seq: ImplicitSequence<u64> = (0..3).collect();
        let last = seq.last().unwrap();
        seq.remove_next(last);
    }

    #[test]
    fn backward_traversal() {
        let seq: ImplicitSequence<u64> = (0..4).collect();
        let mut out = Vec::new();
        seq.for_each_backward(|v| out.push(*v));
        assert_eq!(out, vec![3, 2, 1, 0]);
    }

    #[test]
    fn find_and_find_previous() {
        let seq: ImplicitSequence<u64> = (0..6).collect();
        assert_eq!(seq.find(|v| *v == 4), Some(4));
        assert_eq!(seq.find(|v| *v == 9), None);
        assert_eq!(seq.find_previous(|v| *v == 4), Some(3));
        assert_eq!(seq.find_previous(|v| *v == 0), None);
        assert_eq!(seq.find_previous(|v| *v == 9), None);
    }

    #[test]
    fn index_of_record_translates() {
        let seq: ImplicitSequence<u64> = (0..4).collect();
        let record = seq.get(2).unwrap();
        assert_eq!(seq.index_of_record(record), Some(2));
        assert_eq!(seq.index_of_record(&7), None);
    }

    #[test]
    fn clone_isolation() {
        let mut a: ImplicitSequence<u64> = (0..4).collect();
        let b = a.clone();
        assert_eq!(a, b);
        a.remove_first();
        assert_ne!(a, b);
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn assign_round_trip() {
        let a: ImplicitSequence<u64> = (0..4).collect();
        let mut b = ImplicitSequence::new();
        b.insert_last(99);
        b.assign(&a);
        assert_eq!(a, b);
    }

    #[test]
    fn reserve_only_grows() {
        let mut seq: ImplicitSequence<u64> = ImplicitSequence::new();
        let cap = seq.capacity();
        seq.reserve(cap * 8);
        assert_eq!(seq.capacity(), cap * 8);
        seq.reserve(1);
        assert_eq!(seq.capacity(), cap * 8);
    }

    #[test]
    fn cyclic_neighbors_wrap() {
        let mut seq: CyclicImplicitSequence<u64> = CyclicImplicitSequence::new();
        for i in 0..3 {
            seq.insert_last(i);
        }
        assert_eq!(seq.next(2), Some(0));
        assert_eq!(seq.previous(0), Some(2));
        assert_eq!(seq.next(0), Some(1));
        assert_eq!(seq.previous(2), Some(1));
    }

    #[test]
    fn cyclic_traversal_is_bounded() {
        let mut seq: CyclicImplicitSequence<u64> = CyclicImplicitSequence::new();
        for i in 0..4 {
            seq.insert_last(i);
        }
        let mut out = Vec::new();
        seq.for_each_forward(|v| out.push(*v));
        assert_eq!(out, vec![0, 1, 2, 3]);

        // Starting mid-sequence wraps once around.
        out.clear();
        seq.for_each_from(Some(2), |v| out.push(*v));
        assert_eq!(out, vec![2, 3, 0, 1]);

        // A miss terminates despite the wrap-around.
        assert_eq!(seq.find(|v| *v == 9), None);
    }

    #[test]
    fn cyclic_empty_is_absent() {
        let seq: CyclicImplicitSequence<u64> = CyclicImplicitSequence::new();
        assert!(seq.first().is_none());
        assert!(seq.last().is_none());
        assert!(seq.next(0).is_none());
        assert!(seq.previous(0).is_none());
    }

    #[test]
    fn cyclic_single_record_is_its_own_neighbor() {
        let mut seq: CyclicImplicitSequence<u64> = CyclicImplicitSequence::new();
        seq.insert_last(7);
        assert_eq!(seq.next(0), Some(0));
        assert_eq!(seq.previous(0), Some(0));
    }
}
