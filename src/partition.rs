//! Assignments, partitions and the strategy abstraction.
//!
//! [`Partitioner`] is the common capability of both strategies. Callers pick
//! a strategy with the [`Strategy`] enum, or call the two entry points
//! [`partition_greedy`] and [`partition_genetic`] directly.

use crate::error::BalanceResult;
use crate::fitness;
use crate::ga::{GaConfig, GeneticPartitioner};
use crate::greedy::{lpt_assignment, GreedyPartitioner};
use crate::task::TaskSet;

/// One 1-based group label per task, in task order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    labels: Vec<usize>,
}

impl Assignment {
    /// Wraps a label vector. Labels are expected in `1..=groups`.
    pub fn new(labels: Vec<usize>) -> Self {
        Self { labels }
    }

    /// Group labels in task order.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Label of task `index`.
    pub fn label(&self, index: usize) -> Option<usize> {
        self.labels.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Consumes the assignment, returning the raw labels.
    pub fn into_labels(self) -> Vec<usize> {
        self.labels
    }
}

impl From<Vec<usize>> for Assignment {
    fn from(labels: Vec<usize>) -> Self {
        Self::new(labels)
    }
}

/// An assignment together with its group loads and variance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partition {
    assignment: Assignment,
    groups: usize,
    loads: Vec<f64>,
    variance: f64,
}

impl Partition {
    /// Scores `assignment` against `tasks`.
    pub fn from_assignment(tasks: &TaskSet, groups: usize, assignment: Assignment) -> Self {
        let loads = fitness::group_loads(assignment.labels(), tasks, groups);
        let variance = fitness::evaluate(assignment.labels(), tasks, groups);
        Self {
            assignment,
            groups,
            loads,
            variance,
        }
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }

    /// Number of groups, including any that received no task.
    pub fn groups(&self) -> usize {
        self.groups
    }

    /// Workload sum per group; index `g` is label `g + 1`.
    pub fn loads(&self) -> &[f64] {
        &self.loads
    }

    /// Population variance of [`loads`](Self::loads).
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Difference between the heaviest and lightest group.
    pub fn spread(&self) -> f64 {
        if self.loads.is_empty() {
            return 0.0;
        }
        let max = self.loads.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = self.loads.iter().copied().fold(f64::INFINITY, f64::min);
        max - min
    }

    /// Task indices of each group, in task order.
    pub fn members(&self) -> Vec<Vec<usize>> {
        let mut members = vec![Vec::new(); self.groups];
        for (idx, &label) in self.assignment.labels().iter().enumerate() {
            members[label - 1].push(idx);
        }
        members
    }
}

/// A strategy that splits a task set into `groups` balanced groups.
pub trait Partitioner {
    /// Short strategy name for logs and reports.
    fn name(&self) -> &str;

    /// Assigns every task to a group in `1..=groups`.
    fn partition(&self, tasks: &TaskSet, groups: usize) -> BalanceResult<Partition>;
}

/// Strategy selector.
///
/// # Examples
///
/// ```
/// use u_balance::ga::GaConfig;
/// use u_balance::partition::{Partitioner, Strategy};
/// use u_balance::task::TaskSet;
///
/// let tasks = TaskSet::from_pairs([("A", 4.0), ("B", 3.0), ("C", 1.0)]).unwrap();
/// let greedy = Strategy::Greedy.partition(&tasks, 2).unwrap();
/// assert_eq!(greedy.loads(), &[4.0, 4.0]);
///
/// let config = GaConfig::default()
///     .with_generations(20)
///     .with_pool_size(30)
///     .with_num_selected(5)
///     .with_seed(1);
/// let genetic = Strategy::Genetic(config).partition(&tasks, 2).unwrap();
/// assert_eq!(genetic.assignment().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Longest-processing-time-first heuristic.
    Greedy,
    /// Variance-minimizing genetic optimizer.
    Genetic(GaConfig),
}

impl Partitioner for Strategy {
    fn name(&self) -> &str {
        match self {
            Strategy::Greedy => GreedyPartitioner.name(),
            Strategy::Genetic(_) => "genetic",
        }
    }

    fn partition(&self, tasks: &TaskSet, groups: usize) -> BalanceResult<Partition> {
        match self {
            Strategy::Greedy => GreedyPartitioner.partition(tasks, groups),
            Strategy::Genetic(config) => GeneticPartitioner::new(config.clone()).partition(tasks, groups),
        }
    }
}

/// Greedy entry point.
pub fn partition_greedy(tasks: &TaskSet, groups: usize) -> BalanceResult<Assignment> {
    lpt_assignment(tasks, groups)
}

/// Genetic entry point: the best assignment found and its variance.
pub fn partition_genetic(
    tasks: &TaskSet,
    groups: usize,
    config: &GaConfig,
) -> BalanceResult<(Assignment, f64)> {
    GeneticPartitioner::new(config.clone()).solve(tasks, groups, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BalanceError;

    fn four_equal() -> TaskSet {
        TaskSet::from_pairs([("A", 10.0), ("B", 10.0), ("C", 10.0), ("D", 10.0)]).unwrap()
    }

    #[test]
    fn test_partition_members_and_spread() {
        let tasks = TaskSet::from_pairs([("A", 1.0), ("B", 2.0), ("C", 4.0)]).unwrap();
        let p = Partition::from_assignment(&tasks, 3, Assignment::new(vec![2, 2, 1]));
        assert_eq!(p.members(), vec![vec![2], vec![0, 1], vec![]]);
        assert_eq!(p.loads(), &[4.0, 3.0, 0.0]);
        assert_eq!(p.spread(), 4.0);
        assert_eq!(p.groups(), 3);
    }

    #[test]
    fn test_partition_greedy_entry_point() {
        let a = partition_greedy(&four_equal(), 2).unwrap();
        let p = Partition::from_assignment(&four_equal(), 2, a);
        assert_eq!(p.loads(), &[20.0, 20.0]);
        assert_eq!(p.variance(), 0.0);
    }

    #[test]
    fn test_partition_genetic_converges_on_equal_tasks() {
        let config = GaConfig::default()
            .with_generations(50)
            .with_pool_size(100)
            .with_seed(42);
        let (a, variance) = partition_genetic(&four_equal(), 2, &config).unwrap();
        assert_eq!(a.len(), 4);
        assert_eq!(variance, 0.0);
        assert_eq!(fitness::evaluate(a.labels(), &four_equal(), 2), variance);
    }

    #[test]
    fn test_single_task_three_groups_both_strategies() {
        let tasks = TaskSet::from_pairs([("A", 5.0)]).unwrap();
        let expected = fitness::variance(&[5.0, 0.0, 0.0]);

        let greedy = Strategy::Greedy.partition(&tasks, 3).unwrap();
        assert_eq!(greedy.assignment().len(), 1);
        assert_eq!(greedy.variance(), expected);

        let config = GaConfig::default()
            .with_generations(5)
            .with_pool_size(10)
            .with_num_selected(3)
            .with_seed(9);
        let (a, variance) = partition_genetic(&tasks, 3, &config).unwrap();
        assert_eq!(a.len(), 1);
        let label = a.label(0).unwrap();
        assert!((1..=3).contains(&label));
        assert!((variance - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_groups_rejected() {
        assert!(matches!(
            partition_greedy(&four_equal(), 0),
            Err(BalanceError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            partition_genetic(&four_equal(), 0, &GaConfig::default()),
            Err(BalanceError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::Greedy.name(), "greedy-lpt");
        assert_eq!(Strategy::Genetic(GaConfig::default()).name(), "genetic");
    }
}
