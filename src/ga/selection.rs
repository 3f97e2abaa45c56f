//! Truncation selection.
//!
//! The ranked population is cut after its best `k` individuals. Those
//! survivors pass unchanged into the next generation (elitism) and also form
//! the breeding pool, from which parents are drawn uniformly with
//! replacement. There is no selection pressure beyond the cut.
//!
//! # References
//!
//! - Mühlenbein & Schlierkamp-Voosen (1993), "Predictive Models for the
//!   Breeder Genetic Algorithm"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

/// Returns the best `k` individuals of an already ranked population.
///
/// `k` larger than the population keeps everyone.
pub fn truncate<I>(ranked: &[I], k: usize) -> &[I] {
    &ranked[..k.min(ranked.len())]
}

/// Draws one parent uniformly from the breeding pool.
///
/// # Panics
/// Panics if `pool` is empty.
pub fn pick_parent<'a, I, R: Rng>(pool: &'a [I], rng: &mut R) -> &'a I {
    assert!(!pool.is_empty(), "cannot select from empty breeding pool");
    &pool[rng.random_range(0..pool.len())]
}
