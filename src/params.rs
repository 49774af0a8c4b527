//! Tree-shape parameters: fanout bounds derived from a single runtime
//! `max_entries` knob, the way the source's own `Params` type derives
//! `min_size`/`max_size` from constructor arguments rather than compile-time
//! constants.

/// The default fanout used by [`crate::RTree::new`].
pub const DEFAULT_MAX_ENTRIES: usize = 9;

/// The smallest fanout the tree will honor; smaller requests are clamped up.
pub const MIN_MAX_ENTRIES: usize = 4;

/// Derived child-count bounds for a tree.
///
/// `min_entries` is never larger than half of `max_entries` (rounded up),
/// which guarantees a split always produces two halves that individually
/// satisfy the minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Params {
    max_entries: usize,
    min_entries: usize,
}

impl Params {
    /// Builds the params for a tree, clamping `max_entries` up to
    /// [`MIN_MAX_ENTRIES`] rather than rejecting it.
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(MIN_MAX_ENTRIES);
        let min_entries = (2usize).max(div_ceil(max_entries * 2, 5));
        debug_assert!(min_entries <= (max_entries + 1) / 2);
        Params {
            max_entries,
            min_entries,
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn min_entries(&self) -> usize {
        self.min_entries
    }
}

impl Default for Params {
    fn default() -> Self {
        Params::new(DEFAULT_MAX_ENTRIES)
    }
}

/// `ceil(num / 5 * 2)`, computed without floating point: `(2 * num).div_ceil(5)`.
fn div_ceil(numerator: usize, denominator: usize) -> usize {
    (numerator + denominator - 1) / denominator
}
