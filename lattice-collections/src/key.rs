//! Node handles for pool-backed structures.
//!
//! Explicit (pointer-linked) structures store their linkage as [`NodeKey`]
//! values into a [`NodePool`](crate::NodePool) instead of owning pointers.
//! Parent and child may refer to each other freely — only the pool owns
//! nodes, so no reference cycle ever needs manual bookkeeping.

/// Stable handle to a node in a [`NodePool`](crate::NodePool).
///
/// `NodeKey::NONE` is the null link; every link field in a freshly created
/// node starts out as `NONE`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(u32);

impl NodeKey {
    /// Sentinel representing "no node".
    pub const NONE: Self = NodeKey(u32::MAX);

    #[inline]
    pub(crate) fn from_usize(val: usize) -> Self {
        debug_assert!(val < u32::MAX as usize);
        NodeKey(val as u32)
    }

    #[inline]
    pub(crate) fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if this is the sentinel value.
    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

impl core::fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_none() {
            write!(f, "NodeKey(NONE)")
        } else {
            write!(f, "NodeKey({})", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_round_trip() {
        assert!(NodeKey::NONE.is_none());
        assert!(!NodeKey::NONE.is_some());

        let key = NodeKey::from_usize(42);
        assert!(key.is_some());
        assert_eq!(key.as_usize(), 42);
    }
}
