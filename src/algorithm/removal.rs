//! Iterative removal with envelope-directed descent, and condense.
//!
//! The descent/ascent walk uses a single index path from the root to the
//! current node in place of the source's separate ancestor-node stack and
//! sibling-index stack: each path element already doubles as "the child
//! index chosen at this level", so advancing to the next sibling is just
//! incrementing the path's last element, and ascending is popping it.

use crate::envelope::Envelope;
use crate::node::Node;

fn navigate<'a, T>(root: &'a Node<T>, path: &[usize]) -> &'a Node<T> {
    let mut node = root;
    for &index in path {
        node = &node.as_internal().children[index];
    }
    node
}

fn navigate_mut<'a, T>(root: &'a mut Node<T>, path: &[usize]) -> &'a mut Node<T> {
    let mut node = root;
    for &index in path {
        node = &mut node.as_internal_mut().children[index];
    }
    node
}

fn find_entry<T: PartialEq>(node: &Node<T>, payload: &T) -> Option<usize> {
    match node {
        Node::Leaf(leaf) => leaf.entries.iter().position(|entry| &entry.payload == payload),
        Node::Internal(_) => None,
    }
}

/// Removes the entry equal (by `PartialEq`) to `payload`, descending only
/// into subtrees whose envelope contains `envelope`. Returns whether
/// anything was removed; a missing payload is a silent no-op.
pub fn remove<T: PartialEq>(root: &mut Node<T>, payload: &T, envelope: &Envelope, max_entries: usize) -> bool {
    let mut path: Vec<usize> = Vec::new();
    let mut going_up = false;

    loop {
        let current = navigate(root, &path);

        if let Some(entry_index) = find_entry(current, payload) {
            navigate_mut(root, &path).as_leaf_mut().entries.remove(entry_index);
            condense(root, &path, max_entries);
            return true;
        }

        if !going_up && !current.is_leaf() && current.envelope().contains(envelope) {
            path.push(0);
            going_up = false;
            continue;
        }

        if path.is_empty() {
            return false;
        }

        let last = path.len() - 1;
        path[last] += 1;
        let sibling_count = navigate(root, &path[..last]).len();
        if path[last] < sibling_count {
            going_up = false;
        } else {
            path.pop();
            going_up = true;
        }
    }
}

/// Prunes empty nodes and refreshes envelopes from the deepest node in
/// `path` (inclusive) up to the root.
fn condense<T>(root: &mut Node<T>, path: &[usize], max_entries: usize) {
    for depth in (0..=path.len()).rev() {
        let prefix = &path[..depth];
        if navigate(root, prefix).is_empty() {
            if prefix.is_empty() {
                *navigate_mut(root, prefix) = Node::new_empty_leaf(max_entries);
            } else {
                let child_index = prefix[prefix.len() - 1];
                let parent = navigate_mut(root, &prefix[..prefix.len() - 1]).as_internal_mut();
                parent.children.remove(child_index);
            }
        } else {
            navigate_mut(root, prefix).refresh_envelope();
        }
    }
}

#[cfg(test)]
mod test {
    use super::remove;
    use crate::algorithm::rstar::{insert_item, Item};
    use crate::envelope::Envelope;
    use crate::node::{Entry, Node};
    use crate::params::Params;

    #[test]
    fn removes_present_payload_and_ignores_absent_one() {
        let params = Params::new(4);
        let mut root = Node::new_empty_leaf(params.max_entries());
        for x in 0..10i64 {
            let entry = Entry::new(x, Envelope::new(x, 0, x + 1, 1));
            let split = insert_item(&mut root, &params, Item::Entry(entry), root.height() - 1);
            if let Some(sibling) = split {
                root = Node::Internal(crate::node::InternalNode::new(vec![root, sibling]));
            }
        }
        assert!(remove(&mut root, &3, &Envelope::new(3, 0, 4, 1), params.max_entries()));
        assert!(!remove(&mut root, &3, &Envelope::new(3, 0, 4, 1), params.max_entries()));
        assert!(remove(&mut root, &9, &Envelope::new(9, 0, 10, 1), params.max_entries()));
    }

    #[test]
    fn removing_everything_collapses_to_empty_leaf() {
        let params = Params::new(4);
        let mut root = Node::new_empty_leaf(params.max_entries());
        for x in 0..20i64 {
            let entry = Entry::new(x, Envelope::new(x, 0, x + 1, 1));
            let split = insert_item(&mut root, &params, Item::Entry(entry), root.height() - 1);
            if let Some(sibling) = split {
                root = Node::Internal(crate::node::InternalNode::new(vec![root, sibling]));
            }
        }
        for x in 0..20i64 {
            assert!(remove(&mut root, &x, &Envelope::new(x, 0, x + 1, 1), params.max_entries()));
        }
        assert!(root.is_leaf());
        assert!(root.is_empty());
        assert_eq!(root.envelope(), Envelope::empty());
    }

    #[test]
    fn duplicate_envelopes_remove_by_payload_identity() {
        let params = Params::new(4);
        let mut root = Node::new_empty_leaf(params.max_entries());
        let envelope = Envelope::new(0, 0, 1, 1);
        for payload in ["first", "second"] {
            let entry = Entry::new(payload, envelope);
            let split = insert_item(&mut root, &params, Item::Entry(entry), root.height() - 1);
            assert!(split.is_none());
        }
        assert!(remove(&mut root, &"first", &envelope, params.max_entries()));
        assert!(!remove(&mut root, &"first", &envelope, params.max_entries()));
        assert!(remove(&mut root, &"second", &envelope, params.max_entries()));
    }
}
