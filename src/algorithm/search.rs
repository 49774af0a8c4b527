//! Iterative range search, stack-based to bound call depth regardless of
//! tree height (see the source's `SelectionIterator`).

use crate::envelope::Envelope;
use crate::node::Node;

/// Returns every payload whose entry envelope intersects `window`.
pub fn search<'a, T>(root: &'a Node<T>, window: &Envelope) -> Vec<&'a T> {
    let mut result = Vec::new();
    if !root.envelope().intersects(window) {
        return result;
    }
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node {
            Node::Leaf(leaf) => {
                for entry in &leaf.entries {
                    if window.intersects(&entry.envelope) {
                        result.push(&entry.payload);
                    }
                }
            }
            Node::Internal(internal) => {
                for child in &internal.children {
                    let child_envelope = child.envelope();
                    if !child_envelope.intersects(window) {
                        continue;
                    }
                    if window.contains(&child_envelope) {
                        collect_all(child, &mut result);
                    } else {
                        stack.push(child);
                    }
                }
            }
        }
    }
    result
}

/// Collects every payload below `node`, without further intersection tests.
pub(crate) fn collect_all<'a, T>(node: &'a Node<T>, out: &mut Vec<&'a T>) {
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        match node {
            Node::Leaf(leaf) => out.extend(leaf.entries.iter().map(|e| &e.payload)),
            Node::Internal(internal) => stack.extend(internal.children.iter()),
        }
    }
}
