//! Sequence, hierarchy, and network collections over two storage layouts.
//!
//! Every structure here comes in one of two physical shapes:
//!
//! - **Implicit** — records packed into a contiguous
//!   [`CompactBuffer`](lattice_block::CompactBuffer); neighborhood is index
//!   arithmetic, positions are indices, and structural mutation shifts the
//!   packed suffix.
//! - **Explicit** — records as individual nodes in a [`NodePool`], linked
//!   by stable [`NodeKey`] handles; neighborhood is stored linkage, and
//!   mutation rewires keys.
//!
//! The [`Sequence`] and [`Hierarchy`] traits make the two shapes
//! interchangeable behind one operation set. Where a layout genuinely
//! cannot perform an operation — slot-level edits on an implicit complete
//! tree — the gap surfaces as a recoverable [`Unsupported`] error instead
//! of a panic, so callers can probe capabilities at runtime.
//!
//! # Structures
//!
//! | abstraction | implicit | explicit |
//! |---|---|---|
//! | sequence | [`ImplicitSequence`], [`CyclicImplicitSequence`] | [`SinglyLinkedSequence`], [`DoublyLinkedSequence`] |
//! | hierarchy | [`ImplicitHierarchy`], [`BinaryImplicitHierarchy`] | [`MultiWayHierarchy`], [`KWayHierarchy`], [`BinaryExplicitHierarchy`] |
//! | network | — | [`Network`] |

mod explicit;
mod explicit_hierarchy;
mod hierarchy;
mod implicit;
mod implicit_hierarchy;
mod key;
mod network;
mod pool;
mod sequence;

pub use explicit::{DoublyIter, DoublyLinkedSequence, SinglyIter, SinglyLinkedSequence};
pub use explicit_hierarchy::{BinaryExplicitHierarchy, KWayHierarchy, MultiWayHierarchy};
pub use hierarchy::{
    BinaryHierarchy, Hierarchy, InOrderIter, LevelOrderIter, PostOrderIter, PreOrderIter,
    Unsupported,
};
pub use implicit::{CyclicImplicitSequence, ImplicitSequence};
pub use implicit_hierarchy::{BinaryImplicitHierarchy, ImplicitHierarchy};
pub use key::NodeKey;
pub use network::Network;
pub use pool::NodePool;
pub use sequence::Sequence;
