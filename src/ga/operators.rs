//! Genetic operators for group-label chromosomes.
//!
//! A chromosome is a `&[usize]` of 1-based group labels, one per task. Any
//! label vector is a valid solution, so unlike permutation encodings the
//! operators need no repair step.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: splice two parents at one cut, O(n)
//!
//! # Mutation Operators
//!
//! - [`replacement_mutation`]: redraw each gene with probability `rate`, O(n)
//! - [`swap_mutation`]: exchange two distinct positions with probability `rate`, O(1)
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

use rand::Rng;

/// Draws `len` labels independently and uniformly from `1..=groups`.
pub fn random_labels<R: Rng>(len: usize, groups: usize, rng: &mut R) -> Vec<usize> {
    (0..len).map(|_| rng.random_range(1..=groups)).collect()
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover.
///
/// Picks a cut uniformly in `[1, n-1]`; child A takes parent1's genes before
/// the cut and parent2's from the cut onward, child B the complement.
/// Parents shorter than 2 genes are returned unchanged.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn single_point_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let cut = rng.random_range(1..n);

    let mut child1 = Vec::with_capacity(n);
    child1.extend_from_slice(&parent1[..cut]);
    child1.extend_from_slice(&parent2[cut..]);

    let mut child2 = Vec::with_capacity(n);
    child2.extend_from_slice(&parent2[..cut]);
    child2.extend_from_slice(&parent1[cut..]);

    (child1, child2)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Gene replacement: each gene is independently redrawn from `1..=groups`
/// with probability `rate`.
pub fn replacement_mutation<R: Rng>(labels: &mut [usize], groups: usize, rate: f64, rng: &mut R) {
    for gene in labels.iter_mut() {
        if rng.random_bool(rate) {
            *gene = rng.random_range(1..=groups);
        }
    }
}

/// Swap mutation: with probability `rate`, exchange two distinct positions.
///
/// The probability is drawn once per chromosome. No-op below 2 genes.
pub fn swap_mutation<R: Rng>(labels: &mut [usize], rate: f64, rng: &mut R) {
    let n = labels.len();
    if n < 2 || !rng.random_bool(rate) {
        return;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    labels.swap(i, j);
}

// ============================================================================
// Tests
// ============================================================================
