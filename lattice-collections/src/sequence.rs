//! The sequence contract shared by implicit and explicit storage.
//!
//! A [`Sequence`] is an ordered collection addressed through opaque
//! positions. The same operation set is implemented over an index-addressed
//! contiguous buffer ([`ImplicitSequence`](crate::ImplicitSequence)) and
//! over pool-allocated linked nodes
//! ([`SinglyLinkedSequence`](crate::SinglyLinkedSequence),
//! [`DoublyLinkedSequence`](crate::DoublyLinkedSequence)); callers written
//! against the trait behave identically on either backing store.
//!
//! # Positions
//!
//! `Pos` is `usize` for implicit sequences (any structural mutation
//! invalidates previously obtained indices) and
//! [`NodeKey`](crate::NodeKey) for explicit ones (a key stays valid until
//! its own node is removed).
//!
//! # Failure discipline
//!
//! Queries report absence with `None` and never panic, even on an empty
//! sequence. Mutating operations whose target does not exist — removing
//! past the end, inserting at an out-of-range index — are contract
//! violations and panic; callers check existence through the query
//! operations first.

/// Ordered collection addressed through opaque positions.
pub trait Sequence<T> {
    /// Position handle; cheap to copy, comparable by identity.
    type Pos: Copy + Eq + core::fmt::Debug;

    /// Number of records in the sequence.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of the first record, or `None` when empty.
    fn first(&self) -> Option<Self::Pos>;

    /// Position of the last record, or `None` when empty.
    fn last(&self) -> Option<Self::Pos>;

    /// Position of the record at `index`, or `None` when out of range.
    fn position_at(&self, index: usize) -> Option<Self::Pos>;

    /// Position following `pos`, or `None` at the end.
    fn next(&self, pos: Self::Pos) -> Option<Self::Pos>;

    /// Position preceding `pos`, or `None` at the beginning.
    ///
    /// Singly-linked storage answers this by linear scan from the front.
    fn previous(&self, pos: Self::Pos) -> Option<Self::Pos>;

    /// Ordinal of `pos` within the sequence, or `None` for a stale position.
    fn index_of(&self, pos: Self::Pos) -> Option<usize>;

    /// Record at `pos`, or `None` for a stale position.
    fn get(&self, pos: Self::Pos) -> Option<&T>;

    /// Mutable record at `pos`, or `None` for a stale position.
    fn get_mut(&mut self, pos: Self::Pos) -> Option<&mut T>;

    /// Inserts `value` at the front and returns its position.
    fn insert_first(&mut self, value: T) -> Self::Pos;

    /// Inserts `value` at the back and returns its position.
    fn insert_last(&mut self, value: T) -> Self::Pos;

    /// Inserts `value` so it becomes the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    fn insert_at(&mut self, index: usize, value: T) -> Self::Pos;

    /// Inserts `value` directly after `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not live.
    fn insert_after(&mut self, pos: Self::Pos, value: T) -> Self::Pos;

    /// Inserts `value` directly before `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not live.
    fn insert_before(&mut self, pos: Self::Pos, value: T) -> Self::Pos;

    /// Removes and returns the first record.
    ///
    /// # Panics
    ///
    /// Panics if the sequence is empty.
    fn remove_first(&mut self) -> T;

    /// Removes and returns the last record.
    ///
    /// # Panics
    ///
    /// Panics if the sequence is empty.
    fn remove_last(&mut self) -> T;

    /// Removes and returns the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn remove_at(&mut self, index: usize) -> T;

    /// Removes and returns the successor of `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not live or has no successor.
    fn remove_next(&mut self, pos: Self::Pos) -> T;

    /// Removes and returns the predecessor of `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not live or has no predecessor.
    fn remove_previous(&mut self, pos: Self::Pos) -> T;

    /// Removes every record.
    fn clear(&mut self);

    /// Applies `op` to each record from `start` to the end.
    fn for_each_from<F: FnMut(&T)>(&self, start: Option<Self::Pos>, mut op: F) {
        let mut cursor = start;
        while let Some(pos) = cursor {
            op(self.get(pos).expect("traversal position is live"));
            cursor = self.next(pos);
        }
    }

    /// Applies `op` to each record in forward order.
    fn for_each_forward<F: FnMut(&T)>(&self, op: F) {
        self.for_each_from(self.first(), op);
    }

    /// Applies `op` to each record from `start` back to the beginning.
    fn for_each_back_from<F: FnMut(&T)>(&self, start: Option<Self::Pos>, mut op: F) {
        let mut cursor = start;
        while let Some(pos) = cursor {
            op(self.get(pos).expect("traversal position is live"));
            cursor = self.previous(pos);
        }
    }

    /// Applies `op` to each record in backward order.
    fn for_each_backward<F: FnMut(&T)>(&self, op: F) {
        self.for_each_back_from(self.last(), op);
    }

    /// Position of the first record matching `predicate`, in forward order.
    fn find<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<Self::Pos> {
        let mut cursor = self.first();
        while let Some(pos) = cursor {
            if predicate(self.get(pos)?) {
                return Some(pos);
            }
            cursor = self.next(pos);
        }
        None
    }

    /// Position of the record immediately preceding the first match.
    ///
    /// Returns `None` when the match is the first record or no record
    /// matches. This is the splice primitive for singly-linked storage,
    /// which cannot walk backward from a match.
    fn find_previous<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<Self::Pos> {
        let first = self.first()?;
        if predicate(self.get(first)?) {
            return None;
        }

        let mut prev = first;
        let mut cursor = self.next(first);
        while let Some(pos) = cursor {
            if predicate(self.get(pos)?) {
                return Some(prev);
            }
            prev = pos;
            cursor = self.next(pos);
        }
        None
    }
}
