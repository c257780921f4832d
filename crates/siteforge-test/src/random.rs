//! Seeded random distance matrices.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use siteforge_core::DistanceMatrix;

/// Generates an `n`×`n` matrix with entries in `0..=max_cost`.
///
/// The same `seed` always yields the same matrix. The matrix is generally
/// not symmetric and its diagonal is not forced to zero.
pub fn random_matrix(n: usize, max_cost: i64, seed: u64) -> DistanceMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data: Vec<i64> = (0..n * n).map(|_| rng.random_range(0..=max_cost)).collect();
    DistanceMatrix::from_flat(n, data).expect("generated entries are non-negative")
}
