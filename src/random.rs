//! Seedable random sources.
//!
//! Every stochastic routine in this crate takes its generator as an
//! argument; nothing draws from process-wide state except
//! [`rng_from_seed`] when no seed is configured.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a seed.
///
/// The same seed always yields the same sequence of draws.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed, falling back to OS entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
