//! Node layout: a leaf holds entries directly, an internal node holds child
//! nodes. This mirrors the source's `RTreeNode::{Leaf, Parent}` split, but
//! pushed one level further: a leaf's children are `Entry<T>` values rather
//! than arbitrary `T`, since an entry here is the node-shaped carrier of a
//! payload, not the payload itself (see `DESIGN.md`).

use crate::envelope::Envelope;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A leaf-level carrier of a single stored payload.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry<T> {
    pub envelope: Envelope,
    pub payload: T,
}

impl<T> Entry<T> {
    pub fn new(payload: T, envelope: Envelope) -> Self {
        Entry { envelope, payload }
    }
}

/// A node of the tree: either a leaf holding entries, or an internal node
/// holding further nodes.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node<T> {
    Leaf(LeafNode<T>),
    Internal(InternalNode<T>),
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeafNode<T> {
    pub envelope: Envelope,
    pub entries: Vec<Entry<T>>,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InternalNode<T> {
    pub envelope: Envelope,
    pub height: usize,
    pub children: Vec<Node<T>>,
}

impl<T> Node<T> {
    /// A fresh, empty leaf of height 1 - the shape of a brand new root.
    pub fn new_empty_leaf(max_entries: usize) -> Self {
        Node::Leaf(LeafNode {
            envelope: Envelope::empty(),
            entries: Vec::with_capacity(max_entries + 1),
        })
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            Node::Leaf(leaf) => leaf.envelope,
            Node::Internal(internal) => internal.envelope,
        }
    }

    pub fn set_envelope(&mut self, envelope: Envelope) {
        match self {
            Node::Leaf(leaf) => leaf.envelope = envelope,
            Node::Internal(internal) => internal.envelope = envelope,
        }
    }

    /// 1 for a leaf; `max(child.height) + 1` for an internal node.
    pub fn height(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Internal(internal) => internal.height,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Number of direct children (entries for a leaf, nodes for an internal node).
    pub fn len(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.entries.len(),
            Node::Internal(internal) => internal.children.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recomputes `envelope` from this node's immediate children.
    pub fn refresh_envelope(&mut self) {
        let envelope = match self {
            Node::Leaf(leaf) => envelope_for_entries(&leaf.entries),
            Node::Internal(internal) => envelope_for_children(&internal.children),
        };
        self.set_envelope(envelope);
    }

    pub fn as_internal(&self) -> &InternalNode<T> {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("expected an internal node, found a leaf"),
        }
    }

    pub fn as_internal_mut(&mut self) -> &mut InternalNode<T> {
        match self {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("expected an internal node, found a leaf"),
        }
    }

    pub fn as_leaf_mut(&mut self) -> &mut LeafNode<T> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("expected a leaf node, found an internal node"),
        }
    }
}

impl<T> InternalNode<T> {
    pub fn new(children: Vec<Node<T>>) -> Self {
        let height = children.first().map(Node::height).unwrap_or(0) + 1;
        let envelope = envelope_for_children(&children);
        InternalNode {
            envelope,
            height,
            children,
        }
    }
}

pub fn envelope_for_entries<T>(entries: &[Entry<T>]) -> Envelope {
    let mut result = Envelope::empty();
    for entry in entries {
        result.extend(&entry.envelope);
    }
    result
}

pub fn envelope_for_children<T>(children: &[Node<T>]) -> Envelope {
    let mut result = Envelope::empty();
    for child in children {
        result.extend(&child.envelope());
    }
    result
}

/// Walks the whole subtree asserting invariants 1-4 from the data model.
/// Only used by tests and the opt-in `debug` feature, mirroring the
/// source's own debug-only `sanity_check`.
#[cfg(any(test, feature = "debug"))]
pub fn sanity_check<T>(node: &Node<T>, min_entries: usize, max_entries: usize, is_root: bool) {
    if !is_root {
        assert!(
            node.len() >= min_entries,
            "non-root node underflowed: {} < {}",
            node.len(),
            min_entries
        );
    }
    assert!(
        node.len() <= max_entries,
        "node overflowed: {} > {}",
        node.len(),
        max_entries
    );
    match node {
        Node::Leaf(leaf) => {
            assert_eq!(leaf.envelope, envelope_for_entries(&leaf.entries));
        }
        Node::Internal(internal) => {
            assert_eq!(internal.envelope, envelope_for_children(&internal.children));
            for child in &internal.children {
                assert_eq!(
                    child.height() + 1,
                    internal.height,
                    "child height does not agree with parent height"
                );
                sanity_check(child, min_entries, max_entries, false);
            }
        }
    }
}
