//! Seeded random test fixtures, in the style of the source's own
//! `testutils` module - deterministic across runs, not exposed outside
//! `#[cfg(test)]`.

#![cfg(test)]

use crate::envelope::Envelope;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// An `StdRng` seeded the same way on every run, so failing tests are
/// reproducible without printing the seed.
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x5EED_u64)
}

/// A random unit-size envelope inside `[0, bound)` on both axes.
pub fn random_envelope(rng: &mut StdRng, bound: i64) -> Envelope {
    let x1 = rng.random_range(0..bound.max(1));
    let y1 = rng.random_range(0..bound.max(1));
    Envelope::new(x1, y1, x1 + 1, y1 + 1)
}

/// `count` random unit-size envelopes paired with their index as payload.
pub fn random_entries(rng: &mut StdRng, count: usize, bound: i64) -> Vec<(usize, Envelope)> {
    (0..count).map(|i| (i, random_envelope(rng, bound))).collect()
}
