//! R*-style insertion and split: subtree choice minimizes area enlargement,
//! split axis/index choice minimizes margin then overlap. Grounded on the
//! source's `choose_subtree`/`split`/`get_split_axis`, trimmed of the
//! forced-reinsertion step the source's R*-insert normally performs - this
//! core always splits on overflow (see `DESIGN.md`).

use crate::envelope::Envelope;
use crate::node::{envelope_for_children, envelope_for_entries, Entry, InternalNode, LeafNode, Node};
use crate::params::Params;

/// Something that can be inserted at a given level: either a leaf-level
/// entry, or a whole subtree being merged in by bulk loading.
pub enum Item<T> {
    Entry(Entry<T>),
    Subtree(Node<T>),
}

impl<T> Item<T> {
    pub fn envelope(&self) -> Envelope {
        match self {
            Item::Entry(entry) => entry.envelope,
            Item::Subtree(node) => node.envelope(),
        }
    }
}

trait HasEnvelope {
    fn envelope(&self) -> Envelope;
}

impl<T> HasEnvelope for Entry<T> {
    fn envelope(&self) -> Envelope {
        self.envelope
    }
}

impl<T> HasEnvelope for Node<T> {
    fn envelope(&self) -> Envelope {
        Node::envelope(self)
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn sort_by_axis<X: HasEnvelope>(children: &mut [X], axis: Axis) {
    match axis {
        Axis::X => children.sort_by_key(|c| c.envelope().x1()),
        Axis::Y => children.sort_by_key(|c| c.envelope().y1()),
    }
}

fn envelope_union<X: HasEnvelope>(items: &[X]) -> Envelope {
    let mut result = Envelope::empty();
    for item in items {
        result.extend(&item.envelope());
    }
    result
}

/// Sum of left/right margins over every candidate distribution along the
/// current (already-sorted) order of `children`.
fn all_dist_margin<X: HasEnvelope>(children: &[X], min_entries: usize) -> i64 {
    let m = children.len();
    let mut left = envelope_union(&children[0..min_entries]);
    let mut right = envelope_union(&children[m - min_entries..m]);
    let mut margin = left.margin() + right.margin();
    for child in &children[min_entries..m - min_entries] {
        left.extend(&child.envelope());
        margin += left.margin();
    }
    for child in children[min_entries..m - min_entries].iter().rev() {
        right.extend(&child.envelope());
        margin += right.margin();
    }
    margin
}

/// Picks the split axis, leaving `children` sorted by that axis's lower bound.
fn choose_split_axis<X: HasEnvelope>(children: &mut [X], min_entries: usize) {
    sort_by_axis(children, Axis::X);
    let margin_x = all_dist_margin(children, min_entries);
    sort_by_axis(children, Axis::Y);
    let margin_y = all_dist_margin(children, min_entries);
    if margin_x <= margin_y {
        sort_by_axis(children, Axis::X);
    }
    // else: already sorted by Y from the last `all_dist_margin` call.
}

/// Picks the split index minimizing overlap, tie-broken by combined area and
/// by earliest index.
fn choose_split_index<X: HasEnvelope>(children: &[X], min_entries: usize) -> usize {
    let m = children.len();
    let mut best_index = min_entries;
    let mut best_overlap = i64::MAX;
    let mut best_area = i64::MAX;
    for i in min_entries..=m - min_entries {
        let bbox1 = envelope_union(&children[0..i]);
        let bbox2 = envelope_union(&children[i..m]);
        let overlap = bbox1.intersection_area(&bbox2);
        let area = bbox1.area() + bbox2.area();
        if overlap < best_overlap || (overlap == best_overlap && area < best_area) {
            best_overlap = overlap;
            best_area = area;
            best_index = i;
        }
    }
    best_index
}

/// Splits an overflowing node in place, returning the new sibling. The
/// sibling inherits `height`/leaf-ness from the original.
fn split<T>(node: &mut Node<T>, params: &Params) -> Node<T> {
    let min_entries = params.min_entries();
    match node {
        Node::Leaf(LeafNode { entries, envelope }) => {
            choose_split_axis(entries, min_entries);
            let index = choose_split_index(entries, min_entries);
            let sibling_entries = entries.split_off(index);
            *envelope = envelope_for_entries(entries);
            let mut sibling = Node::Leaf(LeafNode {
                envelope: Envelope::empty(),
                entries: sibling_entries,
            });
            sibling.refresh_envelope();
            sibling
        }
        Node::Internal(InternalNode {
            children, envelope, ..
        }) => {
            choose_split_axis(children, min_entries);
            let index = choose_split_index(children, min_entries);
            let sibling_children = children.split_off(index);
            *envelope = envelope_for_children(children);
            Node::Internal(InternalNode::new(sibling_children))
        }
    }
}

fn resolve_overflow<T>(node: &mut Node<T>, params: &Params) -> Option<Node<T>> {
    if node.len() > params.max_entries() {
        Some(split(node, params))
    } else {
        None
    }
}

/// Picks the child minimizing area enlargement, tie-broken by smallest
/// current area.
fn choose_subtree<T>(internal: &InternalNode<T>, insertion_envelope: &Envelope) -> usize {
    let mut best_index = 0;
    let mut best_enlargement = i64::MAX;
    let mut best_area = i64::MAX;
    for (index, child) in internal.children.iter().enumerate() {
        let child_envelope = child.envelope();
        let enlargement = child_envelope.enlargement(insertion_envelope);
        let area = child_envelope.area();
        if enlargement < best_enlargement || (enlargement == best_enlargement && area < best_area) {
            best_enlargement = enlargement;
            best_area = area;
            best_index = index;
        }
    }
    best_index
}

/// Inserts `item` `target_level` internal hops below `node`, splitting on
/// overflow as it unwinds. Returns the new sibling if `node` itself split.
///
/// `target_level == 0` means `item` belongs directly inside `node`: an
/// `Item::Entry` requires `node` to be a leaf, an `Item::Subtree` requires
/// `node` to be internal one level above the subtree's height.
pub fn insert_item<T>(node: &mut Node<T>, params: &Params, item: Item<T>, target_level: usize) -> Option<Node<T>> {
    let item_envelope = item.envelope();
    if target_level == 0 {
        match item {
            Item::Entry(entry) => {
                let leaf = node.as_leaf_mut();
                leaf.entries.push(entry);
                leaf.envelope.extend(&item_envelope);
            }
            Item::Subtree(subtree) => {
                let internal = node.as_internal_mut();
                internal.children.push(subtree);
                internal.envelope.extend(&item_envelope);
            }
        }
        resolve_overflow(node, params)
    } else {
        let internal = node.as_internal_mut();
        internal.envelope.extend(&item_envelope);
        let child_index = choose_subtree(internal, &item_envelope);
        let split_sibling = insert_item(&mut internal.children[child_index], params, item, target_level - 1);
        if let Some(sibling) = split_sibling {
            internal.envelope.extend(&sibling.envelope());
            internal.children.push(sibling);
            resolve_overflow(node, params)
        } else {
            None
        }
    }
}
