//! Workload-balancing GA problem.
//!
//! Binds the generic engine to the balancing objective: a [`Chromosome`] is
//! one group label per task and its fitness is the variance of the group
//! loads. [`GeneticPartitioner`] wraps the whole run behind the
//! [`Partitioner`] interface.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use super::config::GaConfig;
use super::operators::{random_labels, replacement_mutation, single_point_crossover, swap_mutation};
use super::runner::GaRunner;
use super::types::{Fitness, GaProblem, Individual};
use crate::error::{check_groups, BalanceError, BalanceResult};
use crate::fitness::evaluate_workloads;
use crate::partition::{Assignment, Partition, Partitioner};
use crate::task::TaskSet;

/// Candidate assignment: 1-based group labels plus the cached variance.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    labels: Vec<usize>,
    variance: f64,
}

impl Chromosome {
    /// An unevaluated chromosome.
    pub fn new(labels: Vec<usize>) -> Self {
        Self {
            labels,
            variance: f64::worst(),
        }
    }

    /// A chromosome with a known variance.
    pub fn scored(labels: Vec<usize>, variance: f64) -> Self {
        Self { labels, variance }
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn into_labels(self) -> Vec<usize> {
        self.labels
    }
}

impl Individual for Chromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.variance
    }

    fn set_fitness(&mut self, f: f64) {
        self.variance = f;
    }
}

/// Balances `workloads` across `groups` groups.
#[derive(Debug, Clone)]
pub struct BalanceProblem {
    workloads: Vec<f64>,
    groups: usize,
}

impl BalanceProblem {
    /// Creates the problem.
    ///
    /// # Errors
    /// [`BalanceError::InvalidConfiguration`] if `groups` is 0.
    pub fn new(tasks: &TaskSet, groups: usize) -> BalanceResult<Self> {
        check_groups(groups)?;
        Ok(Self {
            workloads: tasks.workloads(),
            groups,
        })
    }

    pub fn groups(&self) -> usize {
        self.groups
    }

    pub fn task_count(&self) -> usize {
        self.workloads.len()
    }
}

impl GaProblem for BalanceProblem {
    type Individual = Chromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        Chromosome::new(random_labels(self.workloads.len(), self.groups, rng))
    }

    fn evaluate(&self, ind: &Chromosome) -> f64 {
        evaluate_workloads(&ind.labels, &self.workloads, self.groups)
    }

    fn crossover<R: Rng>(
        &self,
        p1: &Chromosome,
        p2: &Chromosome,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        let (a, b) = single_point_crossover(&p1.labels, &p2.labels, rng);
        (Chromosome::new(a), Chromosome::new(b))
    }

    fn mutate<R: Rng>(&self, ind: &mut Chromosome, rate: f64, rng: &mut R) {
        replacement_mutation(&mut ind.labels, self.groups, rate, rng);
        swap_mutation(&mut ind.labels, rate, rng);
    }

    fn on_generation(&self, generation: usize, best: f64) {
        trace!(generation, best_variance = best, "generation evaluated");
    }
}

/// Stochastic strategy: runs the GA and returns its best-so-far assignment.
#[derive(Debug, Clone, Default)]
pub struct GeneticPartitioner {
    config: GaConfig,
}

impl GeneticPartitioner {
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Like [`Partitioner::partition`], but aborts with
    /// [`BalanceError::Cancelled`] once `cancel` is set.
    pub fn partition_with_cancel(
        &self,
        tasks: &TaskSet,
        groups: usize,
        cancel: Arc<AtomicBool>,
    ) -> BalanceResult<Partition> {
        let (assignment, _) = self.solve(tasks, groups, Some(cancel))?;
        Ok(Partition::from_assignment(tasks, groups, assignment))
    }

    /// Validates, runs and unwraps the result into `(assignment, variance)`.
    pub(crate) fn solve(
        &self,
        tasks: &TaskSet,
        groups: usize,
        cancel: Option<Arc<AtomicBool>>,
    ) -> BalanceResult<(Assignment, f64)> {
        let problem = BalanceProblem::new(tasks, groups)?;
        self.config.validate()?;

        if tasks.is_empty() {
            return Ok((Assignment::default(), 0.0));
        }

        let result = GaRunner::run_with_cancel(&problem, &self.config, cancel)?;
        if result.cancelled {
            return Err(BalanceError::Cancelled);
        }
        Ok((Assignment::new(result.best.into_labels()), result.best_fitness))
    }
}

impl Partitioner for GeneticPartitioner {
    fn name(&self) -> &str {
        "genetic"
    }

    fn partition(&self, tasks: &TaskSet, groups: usize) -> BalanceResult<Partition> {
        let (assignment, _) = self.solve(tasks, groups, None)?;
        Ok(Partition::from_assignment(tasks, groups, assignment))
    }
}
