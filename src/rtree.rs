//! The public tree type. Grounded on the source's `RTree<T, Params>`, with
//! the const-generic `Params` type parameter replaced by a runtime
//! [`Params`] value per [`Params::new`].

use std::mem;

use crate::algorithm::{bulk_load, removal, rstar, search};
use crate::envelope::Envelope;
use crate::node::{Entry, InternalNode, Node};
use crate::params::{Params, DEFAULT_MAX_ENTRIES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An in-memory R*-tree index over axis-aligned integer rectangles.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RTree<T> {
    root: Node<T>,
    params: Params,
    size: usize,
}

impl<T> RTree<T> {
    /// Creates an empty tree with the given fanout. `max_entries` below
    /// [`crate::params::MIN_MAX_ENTRIES`] is silently clamped up.
    pub fn new(max_entries: usize) -> Self {
        let params = Params::new(max_entries);
        RTree {
            root: Node::new_empty_leaf(params.max_entries()),
            params,
            size: 0,
        }
    }

    /// The number of stored entries.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The tree's current height: 1 for a tree whose root is a leaf.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Drops every entry, keeping the tree's `max_entries`.
    pub fn clear(&mut self) {
        self.root = Node::new_empty_leaf(self.params.max_entries());
        self.size = 0;
    }

    /// Inserts a single entry via R*-style subtree choice, splitting on
    /// overflow.
    pub fn insert(&mut self, payload: T, envelope: Envelope) {
        let entry = Entry::new(payload, envelope);
        let target_level = self.root.height() - 1;
        let sibling = rstar::insert_item(&mut self.root, &self.params, rstar::Item::Entry(entry), target_level);
        if let Some(sibling) = sibling {
            let old_root = mem::replace(&mut self.root, Node::new_empty_leaf(self.params.max_entries()));
            self.root = Node::Internal(InternalNode::new(vec![old_root, sibling]));
        }
        self.size += 1;
    }

    /// Bulk loads `items`, packing them with OMT bulk loading and merging
    /// the result into whatever is already in the tree. Falls back to
    /// sequential [`insert`](Self::insert) below `min_entries` items, where
    /// packing has no benefit.
    pub fn load(&mut self, items: Vec<(T, Envelope)>) {
        if items.is_empty() {
            return;
        }
        let added = items.len();
        if added < self.params.min_entries() {
            for (payload, envelope) in items {
                self.insert(payload, envelope);
            }
            return;
        }
        let entries = items
            .into_iter()
            .map(|(payload, envelope)| Entry::new(payload, envelope))
            .collect();
        let built = bulk_load::build(entries, &self.params);
        let old_root = mem::replace(&mut self.root, Node::new_empty_leaf(self.params.max_entries()));
        self.root = bulk_load::merge(old_root, built, &self.params);
        self.size += added;
    }

    /// Every payload whose envelope intersects `window`.
    pub fn search(&self, window: &Envelope) -> Vec<&T> {
        search::search(&self.root, window)
    }

    /// Every stored payload, in tree order.
    pub fn all(&self) -> Vec<&T> {
        let mut result = Vec::with_capacity(self.size);
        search::collect_all(&self.root, &mut result);
        result
    }

    /// Removes the entry equal to `payload` reachable through `envelope`,
    /// condensing the tree afterward. A missing payload is a no-op
    /// returning `false`.
    pub fn remove(&mut self, payload: &T, envelope: &Envelope) -> bool
    where
        T: PartialEq,
    {
        let removed = removal::remove(&mut self.root, payload, envelope, self.params.max_entries());
        if removed {
            self.size -= 1;
        }
        removed
    }
}

impl<T> Default for RTree<T> {
    fn default() -> Self {
        RTree::new(DEFAULT_MAX_ENTRIES)
    }
}

#[cfg(any(test, feature = "debug"))]
impl<T> RTree<T> {
    /// Asserts the data-model invariants hold for the whole tree.
    pub fn sanity_check(&self) {
        crate::node::sanity_check(&self.root, self.params.min_entries(), self.params.max_entries(), true);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utilities::{random_entries, seeded_rng};

    #[test]
    fn insert_then_search_finds_exact_matches() {
        let mut tree = RTree::new(4);
        tree.insert("a", Envelope::new(0, 0, 1, 1));
        tree.insert("b", Envelope::new(5, 5, 6, 6));
        tree.sanity_check();

        let found = tree.search(&Envelope::new(0, 0, 2, 2));
        assert_eq!(found, vec![&"a"]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn load_then_bulk_search_matches_sequential_insert() {
        let mut rng = seeded_rng();
        let items = random_entries(&mut rng, 500, 1000);

        let mut bulk = RTree::new(8);
        bulk.load(items.clone());
        bulk.sanity_check();

        let mut sequential = RTree::new(8);
        for (payload, envelope) in items {
            sequential.insert(payload, envelope);
        }

        let mut bulk_all: Vec<_> = bulk.all().into_iter().cloned().collect();
        let mut sequential_all: Vec<_> = sequential.all().into_iter().cloned().collect();
        bulk_all.sort();
        sequential_all.sort();
        assert_eq!(bulk_all, sequential_all);
    }

    #[test]
    fn remove_then_search_no_longer_finds_it() {
        let mut tree = RTree::new(4);
        for i in 0..30i64 {
            tree.insert(i, Envelope::new(i, 0, i + 1, 1));
        }
        tree.sanity_check();

        assert!(tree.remove(&15, &Envelope::new(15, 0, 16, 1)));
        tree.sanity_check();
        assert_eq!(tree.len(), 29);
        assert!(tree.search(&Envelope::new(15, 0, 16, 1)).is_empty());
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut tree = RTree::new(4);
        tree.insert(1, Envelope::new(0, 0, 1, 1));
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.all().is_empty());
    }

    #[test]
    fn small_load_falls_back_to_sequential_insert() {
        let mut tree = RTree::new(16);
        tree.load(vec![(1, Envelope::new(0, 0, 1, 1)), (2, Envelope::new(1, 1, 2, 2))]);
        tree.sanity_check();
        assert_eq!(tree.len(), 2);
    }
}
