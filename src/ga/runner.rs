//! Generational loop execution.
//!
//! [`Evolution`] is the loop as an explicit state machine:
//!
//! ```text
//! Initializing ──▶ Evaluating ──▶ Evolving ──▶ Evaluating ──▶ … ──▶ Terminated
//! ```
//!
//! Evaluating ranks the population and updates the best-so-far record;
//! Evolving applies truncation, crossover and mutation. The run always spends
//! the whole generation budget. [`GaRunner`] drives the machine to the end.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::{debug, info};

use super::config::GaConfig;
use super::population::{evaluate, initialize, rank, regenerate};
use super::selection::truncate;
use super::types::{Fitness, GaProblem, Individual};
use crate::error::{BalanceError, BalanceResult};
use crate::random::rng_from_seed;

/// Phase of an [`Evolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The random initial population has not been built yet.
    Initializing,
    /// The current population is waiting to be scored and ranked.
    Evaluating,
    /// The ranked population is waiting to be bred into the next one.
    Evolving,
    /// The generation budget is spent.
    Terminated,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Number of completed evolution steps.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best-so-far fitness after each evaluation (initial population first).
    pub fitness_history: Vec<f64>,
}

/// One optimization run, advanced phase by phase with [`step`](Self::step).
pub struct Evolution<'a, P: GaProblem> {
    problem: &'a P,
    config: &'a GaConfig,
    rng: StdRng,
    phase: Phase,
    population: Vec<P::Individual>,
    /// Leading individuals whose fitness is already known (the survivors).
    scored: usize,
    best: Option<P::Individual>,
    generation: usize,
    history: Vec<f64>,
}

impl<'a, P: GaProblem> Evolution<'a, P> {
    /// Validates `config` and prepares a run in [`Phase::Initializing`].
    pub fn new(problem: &'a P, config: &'a GaConfig) -> BalanceResult<Self> {
        config.validate()?;
        Ok(Self {
            problem,
            config,
            rng: rng_from_seed(config.seed),
            phase: Phase::Initializing,
            population: Vec::new(),
            scored: 0,
            best: None,
            generation: 0,
            history: Vec::new(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of completed evolution steps.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current population; ranked best-first after each evaluation.
    pub fn population(&self) -> &[P::Individual] {
        &self.population
    }

    /// Best individual seen so far, once the first evaluation has run.
    pub fn best(&self) -> Option<&P::Individual> {
        self.best.as_ref()
    }

    /// Best-so-far fitness after each evaluation.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Advances one phase and returns the new one.
    pub fn step(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Initializing => {
                self.population = initialize(self.problem, self.config.pool_size, &mut self.rng);
                self.scored = 0;
                Phase::Evaluating
            }
            Phase::Evaluating => {
                self.evaluate_generation();
                if self.generation >= self.config.generations {
                    Phase::Terminated
                } else {
                    Phase::Evolving
                }
            }
            Phase::Evolving => {
                self.evolve();
                self.generation += 1;
                Phase::Evaluating
            }
            Phase::Terminated => Phase::Terminated,
        };
        self.phase
    }

    fn evaluate_generation(&mut self) {
        evaluate(
            self.problem,
            &mut self.population[self.scored..],
            self.config.parallel,
        );
        self.scored = self.population.len();
        rank(&mut self.population);

        if let Some(current) = self.population.first() {
            let improved = match &self.best {
                Some(best) => current.fitness() < best.fitness(),
                None => true,
            };
            if improved {
                self.best = Some(current.clone());
            }
        }

        if let Some(best) = &self.best {
            self.history.push(best.fitness().to_f64());
            self.problem.on_generation(self.generation, best.fitness());
        }
    }

    fn evolve(&mut self) {
        let survivors = truncate(&self.population, self.config.breeding_pool_size());
        let next = regenerate(
            self.problem,
            survivors,
            self.config.pool_size,
            self.config.mutation_rate,
            &mut self.rng,
            self.config.parallel,
        );
        self.scored = survivors.len();
        self.population = next;
    }

    /// Consumes the run. `None` if nothing has been evaluated yet.
    pub fn into_result(self, cancelled: bool) -> Option<GaResult<P::Individual>> {
        let best = self.best?;
        Some(GaResult {
            best_fitness: best.fitness(),
            best,
            generations: self.generation,
            cancelled,
            fitness_history: self.history,
        })
    }
}

/// Executes the GA generational loop.
///
/// # Usage
///
/// ```
/// use u_balance::ga::{BalanceProblem, GaConfig, GaRunner};
/// use u_balance::task::TaskSet;
///
/// let tasks = TaskSet::from_pairs([("A", 3.0), ("B", 3.0), ("C", 2.0), ("D", 4.0)]).unwrap();
/// let problem = BalanceProblem::new(&tasks, 2).unwrap();
/// let config = GaConfig::default()
///     .with_generations(40)
///     .with_pool_size(50)
///     .with_num_selected(10)
///     .with_seed(42);
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert!(result.best_fitness <= 1.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> BalanceResult<GaResult<P::Individual>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is checked at every generation boundary. When it is set the
    /// run stops and the result is marked `cancelled`.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> BalanceResult<GaResult<P::Individual>> {
        let mut evolution = Evolution::new(problem, config)?;
        debug!(
            pool_size = config.pool_size,
            generations = config.generations,
            num_selected = config.breeding_pool_size(),
            seed = ?config.seed,
            "starting genetic optimization"
        );

        let mut cancelled = false;
        loop {
            match evolution.phase() {
                Phase::Terminated => break,
                Phase::Evolving => {
                    if let Some(ref flag) = cancel {
                        if flag.load(Ordering::Relaxed) {
                            cancelled = true;
                            break;
                        }
                    }
                }
                Phase::Initializing | Phase::Evaluating => {}
            }
            evolution.step();
        }

        let result = evolution.into_result(cancelled).ok_or_else(|| {
            BalanceError::InvalidConfiguration("run produced no population".into())
        })?;
        info!(
            generations = result.generations,
            best_variance = result.best_fitness.to_f64(),
            cancelled,
            "genetic optimization finished"
        );
        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::problem::BalanceProblem;
    use crate::task::TaskSet;

    fn tasks(ws: &[f64]) -> TaskSet {
        TaskSet::from_pairs(ws.iter().enumerate().map(|(i, &w)| (format!("t{i}"), w))).unwrap()
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_generations(40)
            .with_pool_size(50)
            .with_num_selected(8)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_equal_tasks_reach_zero_variance() {
        let t = tasks(&[10.0, 10.0, 10.0, 10.0]);
        let problem = BalanceProblem::new(&t, 2).unwrap();
        let config = GaConfig::default()
            .with_generations(50)
            .with_pool_size(100)
            .with_seed(42);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.best_fitness, 0.0);
        assert_eq!(result.generations, 50);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_phase_sequence() {
        let t = tasks(&[1.0, 2.0, 3.0]);
        let problem = BalanceProblem::new(&t, 2).unwrap();
        let config = config().with_generations(2);
        let mut evo = Evolution::new(&problem, &config).unwrap();

        assert_eq!(evo.phase(), Phase::Initializing);
        assert!(evo.best().is_none());
        assert_eq!(evo.step(), Phase::Evaluating);
        assert_eq!(evo.population().len(), 50);
        assert_eq!(evo.step(), Phase::Evolving);
        assert!(evo.best().is_some());
        assert_eq!(evo.step(), Phase::Evaluating);
        assert_eq!(evo.generation(), 1);
        assert_eq!(evo.step(), Phase::Evolving);
        assert_eq!(evo.step(), Phase::Evaluating);
        assert_eq!(evo.step(), Phase::Terminated);
        assert_eq!(evo.step(), Phase::Terminated);
        assert_eq!(evo.generation(), 2);
        assert_eq!(evo.history().len(), 3);
    }

    #[test]
    fn test_population_ranked_after_evaluation() {
        let t = tasks(&[5.0, 3.0, 8.0, 1.0, 2.0]);
        let problem = BalanceProblem::new(&t, 3).unwrap();
        let config = config();
        let mut evo = Evolution::new(&problem, &config).unwrap();
        evo.step();
        evo.step();
        let fits: Vec<f64> = evo.population().iter().map(|c| c.fitness()).collect();
        assert!(fits.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(evo.best().map(|b| b.fitness()), Some(fits[0]));
    }

    #[test]
    fn test_best_so_far_non_increasing() {
        let t = tasks(&[9.0, 4.0, 7.0, 3.0, 3.0, 8.0, 1.0, 6.0, 2.0, 5.0]);
        let problem = BalanceProblem::new(&t, 3).unwrap();
        let result = GaRunner::run(&problem, &config()).unwrap();

        assert_eq!(result.fitness_history.len(), 41);
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best-so-far should never get worse: {} > {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(result.fitness_history.last().copied(), Some(result.best_fitness));
    }

    #[test]
    fn test_zero_generations() {
        let t = tasks(&[1.0, 2.0, 3.0, 4.0]);
        let problem = BalanceProblem::new(&t, 2).unwrap();
        let result = GaRunner::run(&problem, &config().with_generations(0)).unwrap();
        assert_eq!(result.generations, 0);
        assert_eq!(result.fitness_history.len(), 1);
        assert_eq!(result.best.labels().len(), 4);
    }

    #[test]
    fn test_pool_size_one() {
        let t = tasks(&[1.0, 2.0, 3.0, 4.0]);
        let problem = BalanceProblem::new(&t, 2).unwrap();
        let config = config().with_pool_size(1).with_num_selected(1);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.best.labels().len(), 4);
        assert!(result.best.labels().iter().all(|&l| (1..=2).contains(&l)));
    }

    #[test]
    fn test_num_selected_above_pool_size() {
        let t = tasks(&[2.0, 2.0, 1.0, 1.0]);
        let problem = BalanceProblem::new(&t, 2).unwrap();
        let config = config().with_pool_size(6).with_num_selected(100);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.generations, 40);
    }

    #[test]
    fn test_reproducible_with_seed() {
        let t = tasks(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
        let problem = BalanceProblem::new(&t, 3).unwrap();
        let a = GaRunner::run(&problem, &config()).unwrap();
        let b = GaRunner::run(&problem, &config().with_parallel(true)).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_invalid_config() {
        let t = tasks(&[1.0]);
        let problem = BalanceProblem::new(&t, 2).unwrap();
        assert!(GaRunner::run(&problem, &config().with_num_selected(0)).is_err());
        assert!(Evolution::new(&problem, &config().with_mutation_rate(2.0)).is_err());
    }

    #[test]
    fn test_zero_groups_rejected_before_run() {
        let t = tasks(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            BalanceProblem::new(&t, 0).and_then(|p| GaRunner::run(&p, &config()).map(|r| r.best)),
            Err(BalanceError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_mutation_rate_comes_from_config() {
        let t = tasks(&[4.0, 1.0, 3.0, 5.0, 2.0, 6.0, 7.0, 2.0]);
        let problem = BalanceProblem::new(&t, 3).unwrap();
        let still = config().with_seed(1).with_mutation_rate(0.0);
        let wild = config().with_seed(1).with_mutation_rate(1.0);

        let mut a = Evolution::new(&problem, &still).unwrap();
        let mut b = Evolution::new(&problem, &wild).unwrap();
        for _ in 0..3 {
            a.step();
            b.step();
        }
        assert_eq!(a.phase(), Phase::Evaluating);
        assert_eq!(&a.population()[..8], &b.population()[..8]);
        assert_ne!(a.population(), b.population());
    }

    #[test]
    fn test_cancellation() {
        let t = tasks(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let problem = BalanceProblem::new(&t, 2).unwrap();
        let config = config().with_generations(1_000_000);

        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_clone = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            cancel_clone.store(true, Ordering::Relaxed);
        });

        let result = GaRunner::run_with_cancel(&problem, &config, Some(cancel)).unwrap();
        assert!(result.cancelled, "expected cancelled result");
        assert!(result.generations < 1_000_000, "should have stopped early");
    }
}
