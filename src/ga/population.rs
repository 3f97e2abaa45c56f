//! Population management: creation, scoring, ranking and regeneration.

use rand::rngs::StdRng;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::selection::pick_parent;
use super::types::{GaProblem, Individual};
use crate::random::create_rng;

/// Creates `size` random individuals.
pub fn initialize<P: GaProblem, R: Rng>(problem: &P, size: usize, rng: &mut R) -> Vec<P::Individual> {
    (0..size).map(|_| problem.create_individual(rng)).collect()
}

/// Scores every individual in place.
///
/// Each slot is written by exactly one worker, so the parallel path needs no
/// locking and gives the same result as the sequential one.
pub fn evaluate<P: GaProblem>(problem: &P, population: &mut [P::Individual], parallel: bool) {
    let score = |ind: &mut P::Individual| {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    };

    #[cfg(feature = "parallel")]
    {
        if parallel {
            population.par_iter_mut().for_each(score);
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    population.iter_mut().for_each(score);
}

/// Sorts by fitness ascending (best first). Stable: equal fitness keeps the
/// current relative order.
pub fn rank<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| {
        a.fitness()
            .partial_cmp(&b.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Builds the next population: `survivors` unchanged, followed by bred
/// children until exactly `target` individuals.
///
/// Children come in pairs (crossover, then mutation of both at
/// `mutation_rate`). When one slot is left the second child of the last pair
/// is discarded.
///
/// One seed per pair is drawn from `rng` up front and each pair is bred from
/// its own generator, so the result depends only on `rng`'s state, not on
/// whether breeding runs in parallel.
///
/// # Panics
/// Panics if children are needed but `survivors` is empty.
pub fn regenerate<P: GaProblem>(
    problem: &P,
    survivors: &[P::Individual],
    target: usize,
    mutation_rate: f64,
    rng: &mut StdRng,
    parallel: bool,
) -> Vec<P::Individual> {
    let mut next: Vec<P::Individual> = Vec::with_capacity(target.max(survivors.len()));
    next.extend_from_slice(survivors);

    let missing = target.saturating_sub(next.len());
    if missing == 0 {
        return next;
    }

    let seeds: Vec<u64> = (0..missing.div_ceil(2)).map(|_| rng.random()).collect();

    let breed = |seed: u64| {
        let mut rng = create_rng(seed);
        let p1 = pick_parent(survivors, &mut rng);
        let p2 = pick_parent(survivors, &mut rng);
        let (mut c1, mut c2) = problem.crossover(p1, p2, &mut rng);
        problem.mutate(&mut c1, mutation_rate, &mut rng);
        problem.mutate(&mut c2, mutation_rate, &mut rng);
        [c1, c2]
    };

    #[cfg(feature = "parallel")]
    let children: Vec<[P::Individual; 2]> = if parallel {
        seeds.par_iter().map(|&s| breed(s)).collect()
    } else {
        seeds.iter().map(|&s| breed(s)).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let children: Vec<[P::Individual; 2]> = {
        let _ = parallel;
        seeds.iter().map(|&s| breed(s)).collect()
    };

    next.extend(children.into_iter().flatten().take(missing));
    next
}
