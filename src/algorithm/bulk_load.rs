//! OMT (overlap-minimizing top-down) bulk load, and merging a freshly built
//! subtree into an existing tree. Grounded on the source's
//! `bulk_load_sequential`/`cluster_group_iterator` stripe-then-tile
//! partitioning, adapted to a single recursive builder in the style of
//! well-known OMT implementations: height and the balanced fanout `M` are
//! computed once, at the top call, then threaded down.

use crate::algorithm::rstar::{insert_item, Item};
use crate::envelope::Envelope;
use crate::node::{Entry, InternalNode, Node};
use crate::params::Params;

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn sort_entries_by_axis<T>(entries: &mut [Entry<T>], axis: Axis) {
    match axis {
        Axis::X => entries.sort_by_key(|e| e.envelope.x1()),
        Axis::Y => entries.sort_by_key(|e| e.envelope.y1()),
    }
}

fn div_ceil(numerator: usize, denominator: usize) -> usize {
    (numerator + denominator - 1) / denominator
}

fn isqrt_round(value: usize) -> usize {
    ((value as f64).sqrt().round() as usize).max(1)
}

/// Splits `n` into exactly `groups` parts whose sizes differ by at most
/// one, instead of fixed-size groups with a short last part - the latter
/// can leave a final group under `min_entries` once `n` doesn't divide
/// evenly, which a fixed remainder chunk does not protect against.
fn balanced_parts(n: usize, groups: usize) -> Vec<usize> {
    let groups = groups.max(1);
    let base = n / groups;
    let remainder = n % groups;
    (0..groups).map(|i| if i < remainder { base + 1 } else { base }).collect()
}

/// Splits `n` into `weights.len()` parts proportional to `weights`,
/// summing to exactly `n`. Used to size stripes by how many tiles each one
/// will hold, so a stripe carrying one extra tile also gets a
/// proportionally larger item share instead of an arbitrary one.
fn proportional_parts(n: usize, weights: &[usize]) -> Vec<usize> {
    let total_weight: usize = weights.iter().sum::<usize>().max(1);
    let mut sizes = Vec::with_capacity(weights.len());
    let mut allocated = 0;
    let mut weight_sum = 0;
    for (i, weight) in weights.iter().enumerate() {
        weight_sum += weight;
        let target = if i + 1 == weights.len() { n } else { (n * weight_sum) / total_weight };
        sizes.push(target - allocated);
        allocated = target;
    }
    sizes
}

/// Distributes `m` cells across a near-square grid of stripes: `d1`
/// stripes, `d2 = m / d1` cells each, with the first `m % d1` stripes
/// getting one extra. `d1 * d2 + (m % d1)` equals `m` exactly regardless
/// of how `d1` is chosen, so the stripe cell counts always sum to `m` -
/// unlike sizing the stripe count and the tiles-per-stripe count by
/// independent `ceil`s, which can overshoot `m` whenever `sqrt(m)` isn't a
/// whole number.
fn stripe_cell_counts(m: usize) -> Vec<usize> {
    let d1 = isqrt_round(m).min(m.max(1));
    let d2 = m / d1;
    let remainder = m % d1;
    (0..d1).map(|i| d2 + if i < remainder { 1 } else { 0 }).collect()
}

fn make_leaf<T>(entries: Vec<Entry<T>>) -> Node<T> {
    let mut leaf = Node::Leaf(crate::node::LeafNode {
        envelope: Envelope::empty(),
        entries,
    });
    leaf.refresh_envelope();
    leaf
}

/// Builds a packed subtree from `items`. `items.len()` is assumed to be at
/// least `params.min_entries()`; the caller falls back to sequential
/// insertion below that threshold.
pub fn build<T>(items: Vec<Entry<T>>, params: &Params) -> Node<T> {
    build_recursive(items, None, 1, params)
}

fn build_recursive<T>(mut items: Vec<Entry<T>>, height: Option<usize>, level: usize, params: &Params) -> Node<T> {
    let n = items.len();
    let max_entries = params.max_entries();
    if n <= max_entries {
        return make_leaf(items);
    }

    let (height, m) = match height {
        Some(h) => (h, max_entries),
        None => {
            let h = ((n as f64).ln() / (max_entries as f64).ln()).ceil().max(1.0) as usize;
            let balanced = div_ceil(n, max_entries.pow((h.saturating_sub(1)) as u32)).max(1);
            sort_entries_by_axis(&mut items, Axis::X);
            (h, balanced)
        }
    };

    let cell_counts = stripe_cell_counts(m);
    let stripe_sizes = proportional_parts(n, &cell_counts);

    let mut children = Vec::new();
    let mut remaining = items;
    for (stripe_size, cells) in stripe_sizes.into_iter().zip(cell_counts.into_iter()) {
        let rest = remaining.split_off(stripe_size);
        let mut stripe = remaining;
        remaining = rest;

        sort_entries_by_axis(&mut stripe, if level % 2 == 1 { Axis::Y } else { Axis::X });

        let stripe_len = stripe.len();
        let mut stripe_remaining = stripe;
        for tile_size in balanced_parts(stripe_len, cells) {
            let rest2 = stripe_remaining.split_off(tile_size);
            let tile = stripe_remaining;
            stripe_remaining = rest2;
            children.push(build_recursive(tile, Some(height.saturating_sub(1)), level + 1, params));
        }
    }
    Node::Internal(InternalNode::new(children))
}

/// Merges a freshly built subtree into an existing tree, per the height
/// relationship between the two roots.
pub fn merge<T>(existing: Node<T>, built: Node<T>, params: &Params) -> Node<T> {
    if existing.is_empty() {
        return built;
    }

    let existing_height = existing.height();
    let built_height = built.height();
    if existing_height == built_height {
        return Node::Internal(InternalNode::new(vec![existing, built]));
    }

    let (mut large, small) = if existing_height > built_height {
        (existing, built)
    } else {
        (built, existing)
    };
    let target_level = large.height() - small.height() - 1;
    let sibling = insert_item(&mut large, params, Item::Subtree(small), target_level);
    match sibling {
        Some(sibling) => Node::Internal(InternalNode::new(vec![large, sibling])),
        None => large,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::sanity_check;

    fn entry(x: i64, y: i64) -> Entry<(i64, i64)> {
        Entry::new((x, y), Envelope::new(x, y, x + 1, y + 1))
    }

    #[test]
    fn packs_a_grid_into_a_balanced_tree() {
        let params = Params::new(8);
        let mut items = Vec::new();
        for x in 0..20i64 {
            for y in 0..20i64 {
                items.push(entry(x, y));
            }
        }
        let count = items.len();
        let root = build(items, &params);
        sanity_check(&root, params.min_entries(), params.max_entries(), true);

        let found = crate::algorithm::search::search(&root, &Envelope::new(0, 0, 20, 20));
        assert_eq!(found.len(), count);
    }

    #[test]
    fn small_batch_builds_a_single_leaf() {
        let params = Params::new(8);
        let items = vec![entry(0, 0), entry(1, 1)];
        let root = build(items, &params);
        assert!(root.is_leaf());
        assert_eq!(root.len(), 2);
    }

    #[test]
    fn merge_into_empty_tree_adopts_the_built_subtree() {
        let params = Params::new(4);
        let empty = Node::new_empty_leaf(params.max_entries());
        let built = build(vec![entry(0, 0), entry(1, 1), entry(2, 2)], &params);
        let merged = merge(empty, built, &params);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn merge_of_equal_height_roots_creates_a_new_root() {
        let params = Params::new(4);
        let a = build(vec![entry(0, 0), entry(1, 1)], &params);
        let b = build(vec![entry(10, 10), entry(11, 11)], &params);
        let merged = merge(a, b, &params);
        assert!(!merged.is_leaf());
        assert_eq!(merged.len(), 2);
        sanity_check(&merged, params.min_entries(), params.max_entries(), true);
    }
}
