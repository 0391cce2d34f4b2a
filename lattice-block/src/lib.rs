//! Growable compacting block buffer.
//!
//! [`CompactBuffer`] manages a contiguous allocation of fixed-layout records.
//! Live records always occupy the prefix `[0, len)`; insert and remove at an
//! arbitrary index shift the tail so the prefix stays dense. This is the
//! storage layer under every index-addressed ("implicit") structure in the
//! workspace: sequences address records purely by integer index, complete
//! k-ary hierarchies compute adjacency arithmetically over the same prefix.
//!
//! # Example
//!
//! ```
//! use lattice_block::CompactBuffer;
//!
//! let mut buf: CompactBuffer<u64> = CompactBuffer::new();
//! buf.push(1);
//! buf.push(3);
//! buf.insert_at(1, 2); // shifts 3 right
//! assert_eq!(buf.as_slice(), &[1, 2, 3]);
//!
//! assert_eq!(buf.release_at(0), 1);
//! assert_eq!(buf.as_slice(), &[2, 3]);
//! ```
//!
//! # Reference invalidation
//!
//! References obtained through [`get`](CompactBuffer::get),
//! [`get_mut`](CompactBuffer::get_mut) or the slice views are valid only
//! until the next structural mutation (insert, remove, clear, capacity
//! change) — the buffer relocates records as raw bytes.

use core::mem;
use core::ptr::{self, NonNull};
use std::alloc::{Layout, alloc, dealloc, handle_alloc_error, realloc};

/// A growable contiguous buffer whose live records form a dense prefix.
///
/// Capacity doubles when exhausted and shrinks only on explicit request
/// ([`change_capacity`](Self::change_capacity), [`shrink`](Self::shrink)).
/// Records are relocated as raw bytes on insert/remove, which is exactly
/// what a Rust move is, so any `T` (except zero-sized types) is supported.
pub struct CompactBuffer<T> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
}

impl<T> CompactBuffer<T> {
    /// Minimum capacity a non-empty allocation is ever sized to.
    pub const INIT_CAPACITY: usize = 4;

    /// Creates a buffer with the default initial capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::INIT_CAPACITY)
    }

    /// Creates a buffer with exactly `capacity` reserved slots.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            mem::size_of::<T>() > 0,
            "CompactBuffer does not support zero-sized records"
        );

        let ptr = if capacity == 0 {
            NonNull::dangling()
        } else {
            let layout = Layout::array::<T>(capacity).unwrap();
            let raw = unsafe { alloc(layout) };
            if raw.is_null() {
                handle_alloc_error(layout);
            }
            unsafe { NonNull::new_unchecked(raw as *mut T) }
        };

        Self {
            ptr,
            len: 0,
            cap: capacity,
        }
    }

    /// Returns the number of live records.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no records are live.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of reserved slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns a reference to the record at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            Some(unsafe { &*self.ptr.as_ptr().add(index) })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the record at `index`, or `None` if out
    /// of range.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            Some(unsafe { &mut *self.ptr.as_ptr().add(index) })
        } else {
            None
        }
    }

    /// Views the live prefix as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Views the live prefix as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Iterates over the live records in index order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Default-constructs a record at the end and returns it.
    ///
    /// Grows the buffer (doubling capacity) when full.
    #[inline]
    pub fn allocate(&mut self) -> &mut T
    where
        T: Default,
    {
        self.insert_at(self.len, T::default())
    }

    /// Default-constructs a record at `index`, shifting `[index, len)` right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[inline]
    pub fn allocate_at(&mut self, index: usize) -> &mut T
    where
        T: Default,
    {
        self.insert_at(index, T::default())
    }

    /// Appends `value` and returns a reference to it.
    #[inline]
    pub fn push(&mut self, value: T) -> &mut T {
        self.insert_at(self.len, value)
    }

    /// Inserts `value` at `index`, shifting `[index, len)` one slot right.
    ///
    /// The shift relocates records as raw bytes; previously obtained
    /// references into the buffer are invalidated.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_at(&mut self, index: usize, value: T) -> &mut T {
        assert!(index <= self.len, "insert index {index} out of range");

        if self.len == self.cap {
            let grown = if self.cap == 0 {
                Self::INIT_CAPACITY
            } else {
                self.cap * 2
            };
            self.change_capacity(grown);
        }

        unsafe {
            let base = self.ptr.as_ptr();
            if index < self.len {
                ptr::copy(base.add(index), base.add(index + 1), self.len - index);
            }
            base.add(index).write(value);
        }
        self.len += 1;

        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }

    /// Removes and returns the record at `index`, shifting `[index + 1, len)`
    /// one slot left. Capacity is never reduced.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn release_at(&mut self, index: usize) -> T {
        assert!(index < self.len, "release index {index} out of range");

        unsafe {
            let base = self.ptr.as_ptr();
            let value = base.add(index).read();
            ptr::copy(base.add(index + 1), base.add(index), self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Drops every record in `[index, len)` in ascending order and truncates
    /// the buffer to `index` records. Capacity is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn release_from(&mut self, index: usize) {
        assert!(index <= self.len, "truncate index {index} out of range");

        let old_len = self.len;
        // Records past `index` are dead even if a destructor panics.
        self.len = index;
        unsafe {
            let base = self.ptr.as_ptr();
            for i in index..old_len {
                ptr::drop_in_place(base.add(i));
            }
        }
    }

    /// Drops all live records. Capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.release_from(0);
    }

    /// Reallocates the storage to exactly `new_capacity` slots.
    ///
    /// If `new_capacity < len`, the excess live records are dropped first
    /// (ascending order), so a failed reallocation can never lose records it
    /// was meant to keep. The surviving prefix is preserved byte-for-byte.
    pub fn change_capacity(&mut self, new_capacity: usize) {
        if new_capacity == self.cap {
            return;
        }

        if new_capacity < self.len {
            self.release_from(new_capacity);
        }

        unsafe {
            let new_ptr = if new_capacity == 0 {
                if self.cap > 0 {
                    dealloc(
                        self.ptr.as_ptr() as *mut u8,
                        Layout::array::<T>(self.cap).unwrap(),
                    );
                }
                NonNull::dangling()
            } else if self.cap == 0 {
                let layout = Layout::array::<T>(new_capacity).unwrap();
                let raw = alloc(layout);
                if raw.is_null() {
                    handle_alloc_error(layout);
                }
                NonNull::new_unchecked(raw as *mut T)
            } else {
                let old_layout = Layout::array::<T>(self.cap).unwrap();
                let new_layout = Layout::array::<T>(new_capacity).unwrap();
                let raw = realloc(self.ptr.as_ptr() as *mut u8, old_layout, new_layout.size());
                if raw.is_null() {
                    handle_alloc_error(new_layout);
                }
                NonNull::new_unchecked(raw as *mut T)
            };
            self.ptr = new_ptr;
        }
        self.cap = new_capacity;
    }

    /// Compacts the allocation to `max(len, INIT_CAPACITY)` slots.
    pub fn shrink(&mut self) {
        self.change_capacity(self.len.max(Self::INIT_CAPACITY));
    }

    /// Replaces this buffer's contents with a deep copy of `other`,
    /// matching its capacity.
    pub fn assign(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.clear();
        self.change_capacity(other.cap);
        for record in other.iter() {
            self.push(record.clone());
        }
    }

    /// Returns the index of a record known by reference, or `None` when the
    /// reference does not point into this buffer's live prefix.
    pub fn index_of(&self, record: &T) -> Option<usize> {
        let base = self.ptr.as_ptr() as usize;
        let addr = record as *const T as usize;
        let end = base + self.len * mem::size_of::<T>();

        if addr >= base && addr < end {
            Some((addr - base) / mem::size_of::<T>())
        } else {
            None
        }
    }

    /// Exchanges the records at `i` and `j` in place.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.as_mut_slice().swap(i, j);
    }
}

impl<T> Default for CompactBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for CompactBuffer<T> {
    fn drop(&mut self) {
        self.release_from(0);
        if self.cap > 0 {
            unsafe {
                dealloc(
                    self.ptr.as_ptr() as *mut u8,
                    Layout::array::<T>(self.cap).unwrap(),
                );
            }
        }
    }
}

impl<T: Clone> Clone for CompactBuffer<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.cap);
        for record in self.iter() {
            copy.push(record.clone());
        }
        copy
    }
}

impl<T: PartialEq> PartialEq for CompactBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for CompactBuffer<T> {}

impl<T: core::fmt::Debug> core::fmt::Debug for CompactBuffer<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a, T> IntoIterator for &'a CompactBuffer<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for CompactBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

// Safety: CompactBuffer owns its allocation outright.
unsafe impl<T: Send> Send for CompactBuffer<T> {}
unsafe impl<T: Sync> Sync for CompactBuffer<T> {}
