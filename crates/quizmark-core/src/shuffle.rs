//! Fisher–Yates option shuffling.
//!
//! Upstream pages shuffle answer options before rendering so the correct one
//! isn't always in the same slot. The shuffle lives here, outside the
//! evaluator, because evaluation itself must stay deterministic and pure.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Unbiased in-place Fisher–Yates shuffle driven by the supplied RNG.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffle with a fresh thread-local RNG.
pub fn shuffle<T>(items: &mut [T]) {
    fisher_yates(items, &mut rand::thread_rng());
}

/// Deterministic shuffle for a fixed seed.
///
/// Used when the same learner must see the same option order across page
/// reloads (seed derived from the question id upstream).
pub fn shuffle_seeded<T>(items: &mut [T], seed: u64) {
    fisher_yates(items, &mut StdRng::seed_from_u64(seed));
}
