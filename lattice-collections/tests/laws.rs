//! Cross-variant laws: every implementation of a contract must agree on
//! the observable behavior, whatever its physical layout.

use lattice_collections::{
    BinaryImplicitHierarchy, CyclicImplicitSequence, DoublyLinkedSequence, Hierarchy,
    ImplicitHierarchy, ImplicitSequence, KWayHierarchy, MultiWayHierarchy, Sequence,
    SinglyLinkedSequence,
};

// ============================================================================
// Sequence laws
// ============================================================================

fn contents<S: Sequence<u64>>(seq: &S) -> Vec<u64> {
    let mut out = Vec::new();
    seq.for_each_forward(|v| out.push(*v));
    out
}

fn empty_sequence_law<S: Sequence<u64> + Default>() {
    let seq = S::default();
    assert_eq!(seq.len(), 0);
    assert!(seq.is_empty());
    assert!(seq.first().is_none());
    assert!(seq.last().is_none());
    assert!(seq.position_at(0).is_none());
    assert!(seq.find(|_| true).is_none());
    assert!(seq.find_previous(|_| true).is_none());
    assert_eq!(contents(&seq), Vec::<u64>::new());
}

fn insert_order_law<S: Sequence<u64> + Default>() {
    let mut seq = S::default();
    seq.insert_last(2);
    seq.insert_first(0);
    seq.insert_at(1, 1);
    let pos = seq.position_at(1).unwrap();
    seq.insert_after(pos, 9);
    let pos = seq.position_at(3).unwrap();
    seq.insert_before(pos, 8);
    assert_eq!(contents(&seq), vec![0, 1, 9, 8, 2]);
}

fn index_round_trip_law<S: Sequence<u64> + Default>() {
    let mut seq = S::default();
    for value in 0..6 {
        seq.insert_last(value);
    }
    for index in 0..6 {
        let pos = seq.position_at(index).unwrap();
        assert_eq!(seq.index_of(pos), Some(index));
        assert_eq!(seq.get(pos), Some(&(index as u64)));
    }
    assert!(seq.position_at(6).is_none());
}

fn remove_round_trip_law<S: Sequence<u64> + Default>() {
    for index in 0..5usize {
        let mut seq = S::default();
        for value in 0..5 {
            seq.insert_last(value);
        }
        assert_eq!(seq.remove_at(index), index as u64);
        let mut expected: Vec<u64> = (0..5).collect();
        expected.remove(index);
        assert_eq!(contents(&seq), expected);
    }
}

fn find_law<S: Sequence<u64> + Default>() {
    let mut seq = S::default();
    for value in [5, 3, 8, 3, 1] {
        seq.insert_last(value);
    }
    let pos = seq.find(|v| *v == 3).unwrap();
    assert_eq!(seq.index_of(pos), Some(1));
    let prev = seq.find_previous(|v| *v == 8).unwrap();
    assert_eq!(seq.get(prev), Some(&3));
    assert!(seq.find(|v| *v == 7).is_none());
    assert!(seq.find_previous(|v| *v == 5).is_none());
}

fn sequence_laws<S: Sequence<u64> + Default>() {
    empty_sequence_law::<S>();
    insert_order_law::<S>();
    index_round_trip_law::<S>();
    remove_round_trip_law::<S>();
    find_law::<S>();
}

/// Laws that only hold for non-cyclic sequences: traversal terminates at
/// the endpoints.
fn linear_boundary_law<S: Sequence<u64> + Default>() {
    let mut seq = S::default();
    for value in 0..3 {
        seq.insert_last(value);
    }
    assert!(seq.next(seq.last().unwrap()).is_none());
    assert!(seq.previous(seq.first().unwrap()).is_none());

    let mut back = Vec::new();
    seq.for_each_backward(|v| back.push(*v));
    assert_eq!(back, vec![2, 1, 0]);
}

#[test]
fn implicit_sequence_laws() {
    sequence_laws::<ImplicitSequence<u64>>();
    linear_boundary_law::<ImplicitSequence<u64>>();
}

#[test]
fn cyclic_sequence_laws() {
    sequence_laws::<CyclicImplicitSequence<u64>>();
}

#[test]
fn singly_linked_sequence_laws() {
    sequence_laws::<SinglyLinkedSequence<u64>>();
    linear_boundary_law::<SinglyLinkedSequence<u64>>();
}

#[test]
fn doubly_linked_sequence_laws() {
    sequence_laws::<DoublyLinkedSequence<u64>>();
    linear_boundary_law::<DoublyLinkedSequence<u64>>();
}

#[test]
fn all_variants_agree_on_contents() {
    let values = [7u64, 1, 4, 4, 0, 9];
    let implicit: ImplicitSequence<u64> = values.into_iter().collect();
    let cyclic: CyclicImplicitSequence<u64> = values.into_iter().collect();
    let singly: SinglyLinkedSequence<u64> = values.into_iter().collect();
    let doubly: DoublyLinkedSequence<u64> = values.into_iter().collect();

    assert_eq!(contents(&implicit), values.to_vec());
    assert_eq!(contents(&cyclic), values.to_vec());
    assert_eq!(contents(&singly), values.to_vec());
    assert_eq!(contents(&doubly), values.to_vec());
}

// ============================================================================
// Hierarchy laws
// ============================================================================

/// Seven-node fixture with mixed degrees:
///
/// ```text
///         0
///       /   \
///      1     2
///    / | \    \
///   3  4  5    6
/// ```
fn multiway_fixture() -> MultiWayHierarchy<u64> {
    let mut tree = MultiWayHierarchy::new();
    let n0 = tree.emplace_root(0).unwrap();
    let n1 = tree.emplace_son(n0, 0, 1).unwrap();
    let n2 = tree.emplace_son(n0, 1, 2).unwrap();
    tree.emplace_son(n1, 0, 3).unwrap();
    tree.emplace_son(n1, 1, 4).unwrap();
    tree.emplace_son(n1, 2, 5).unwrap();
    tree.emplace_son(n2, 0, 6).unwrap();
    tree
}

/// The same shape in fixed three-slot nodes.
fn kway_fixture() -> KWayHierarchy<u64, 3> {
    let mut tree: KWayHierarchy<u64, 3> = KWayHierarchy::new();
    let n0 = tree.emplace_root(0).unwrap();
    let n1 = tree.emplace_son(n0, 0, 1).unwrap();
    let n2 = tree.emplace_son(n0, 1, 2).unwrap();
    tree.emplace_son(n1, 0, 3).unwrap();
    tree.emplace_son(n1, 1, 4).unwrap();
    tree.emplace_son(n1, 2, 5).unwrap();
    tree.emplace_son(n2, 0, 6).unwrap();
    tree
}

fn traversal_literals<H: Hierarchy<u64>>(tree: &H) {
    let mut pre = Vec::new();
    tree.for_each_pre_order(|v| pre.push(*v));
    assert_eq!(pre, vec![0, 1, 3, 4, 5, 2, 6]);

    let mut post = Vec::new();
    tree.for_each_post_order(|v| post.push(*v));
    assert_eq!(post, vec![3, 4, 5, 1, 6, 2, 0]);

    let mut level = Vec::new();
    tree.for_each_level_order(|v| level.push(*v));
    assert_eq!(level, vec![0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn fixture_traversals_agree_across_encodings() {
    traversal_literals(&multiway_fixture());
    traversal_literals(&kway_fixture());
}

#[test]
fn lazy_and_eager_traversals_agree() {
    let tree = multiway_fixture();
    let lazy_pre: Vec<u64> = tree.pre_order().copied().collect();
    let lazy_post: Vec<u64> = tree.post_order().copied().collect();
    let lazy_level: Vec<u64> = tree.level_order().copied().collect();
    assert_eq!(lazy_pre, vec![0, 1, 3, 4, 5, 2, 6]);
    assert_eq!(lazy_post, vec![3, 4, 5, 1, 6, 2, 0]);
    assert_eq!(lazy_level, vec![0, 1, 2, 3, 4, 5, 6]);
}

fn empty_hierarchy_law<H: Hierarchy<u64> + Default>() {
    let tree = H::default();
    assert_eq!(tree.size(), 0);
    assert!(tree.is_empty());
    assert!(tree.root().is_none());
    assert_eq!(tree.node_count(), 0);
    let mut visited = 0;
    tree.for_each_level_order(|_| visited += 1);
    assert_eq!(visited, 0);
}

#[test]
fn empty_hierarchy_accessors_across_variants() {
    empty_hierarchy_law::<ImplicitHierarchy<u64, 3>>();
    empty_hierarchy_law::<BinaryImplicitHierarchy<u64>>();
    empty_hierarchy_law::<MultiWayHierarchy<u64>>();
    empty_hierarchy_law::<KWayHierarchy<u64, 4>>();
}

fn edits_rejected_law<H: Hierarchy<u64>>(tree: &mut H, node: H::Node) {
    let before = tree.size();
    assert!(tree.emplace_root(1).is_err());
    assert!(tree.change_root(node).is_err());
    assert!(tree.emplace_son(node, 0, 1).is_err());
    assert!(tree.change_son(node, 0, node).is_err());
    assert!(tree.remove_son(node, 0).is_err());
    assert_eq!(tree.size(), before);
}

#[test]
fn implicit_hierarchy_rejects_every_edit() {
    // Empty and occupied, several arities.
    edits_rejected_law(&mut ImplicitHierarchy::<u64, 1>::new(), 0);
    edits_rejected_law(&mut ImplicitHierarchy::<u64, 3>::new(), 0);
    edits_rejected_law(&mut (0..4).collect::<BinaryImplicitHierarchy<u64>>(), 0);
    edits_rejected_law(&mut (0..9).collect::<ImplicitHierarchy<u64, 3>>(), 2);
    edits_rejected_law(&mut (0..9).collect::<ImplicitHierarchy<u64, 5>>(), 8);
}

#[test]
fn level_agrees_across_encodings() {
    let multiway = multiway_fixture();
    let kway = kway_fixture();
    let implicit: ImplicitHierarchy<u64, 3> = (0..7).collect();

    // Node carrying value 4 sits at level 2 in every encoding.
    let find_by_value = |tree: &MultiWayHierarchy<u64>| {
        let root = tree.root().unwrap();
        tree.son(tree.son(root, 0).unwrap(), 1).unwrap()
    };
    assert_eq!(multiway.level(find_by_value(&multiway)), Some(2));

    let kroot = kway.root().unwrap();
    let kn4 = kway.son(kway.son(kroot, 0).unwrap(), 1).unwrap();
    assert_eq!(kway.level(kn4), Some(2));

    assert_eq!(implicit.level(4), Some(2));
}
