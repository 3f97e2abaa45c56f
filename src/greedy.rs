//! Longest-processing-time-first (LPT) greedy partitioning.
//!
//! Tasks are taken in descending workload order and each one goes to the
//! group with the smallest running total. Fully deterministic: the sort is
//! stable (equal workloads keep input order) and ties between groups go to
//! the lowest group index.
//!
//! # Complexity
//! O(T log T + T·N)
//!
//! # References
//!
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies"

use tracing::debug;

use crate::error::{check_groups, BalanceResult};
use crate::partition::{Assignment, Partition, Partitioner};
use crate::task::TaskSet;

/// Computes the LPT assignment.
///
/// # Errors
/// [`BalanceError::InvalidConfiguration`](crate::BalanceError::InvalidConfiguration)
/// if `groups` is 0.
pub fn lpt_assignment(tasks: &TaskSet, groups: usize) -> BalanceResult<Assignment> {
    check_groups(groups)?;
    let workloads = tasks.workloads();

    let mut order: Vec<usize> = (0..workloads.len()).collect();
    order.sort_by(|&a, &b| workloads[b].total_cmp(&workloads[a]));

    let mut totals = vec![0.0_f64; groups];
    let mut labels = vec![0usize; workloads.len()];

    for idx in order {
        let mut lightest = 0;
        for g in 1..groups {
            if totals[g] < totals[lightest] {
                lightest = g;
            }
        }
        labels[idx] = lightest + 1;
        totals[lightest] += workloads[idx];
    }

    Ok(Assignment::new(labels))
}

/// Deterministic baseline strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyPartitioner;

impl Partitioner for GreedyPartitioner {
    fn name(&self) -> &str {
        "greedy-lpt"
    }

    fn partition(&self, tasks: &TaskSet, groups: usize) -> BalanceResult<Partition> {
        let assignment = lpt_assignment(tasks, groups)?;
        let partition = Partition::from_assignment(tasks, groups, assignment);
        debug!(
            tasks = tasks.len(),
            groups,
            variance = partition.variance(),
            "greedy partition computed"
        );
        Ok(partition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BalanceError;

    fn tasks(ws: &[f64]) -> TaskSet {
        TaskSet::from_pairs(ws.iter().enumerate().map(|(i, &w)| (format!("t{i}"), w))).unwrap()
    }

    #[test]
    fn test_equal_tasks_two_groups() {
        let t = tasks(&[10.0, 10.0, 10.0, 10.0]);
        let p = GreedyPartitioner.partition(&t, 2).unwrap();
        assert_eq!(p.loads(), &[20.0, 20.0]);
        assert_eq!(p.variance(), 0.0);
        assert_eq!(p.assignment().labels(), &[1, 2, 1, 2]);
    }

    #[test]
    fn test_largest_first() {
        // Sorted: 7(idx1) -> g1, 5(idx3) -> g2, 4(idx2) -> g2 (5<7), 2(idx0) -> g1 (7<9)
        let t = tasks(&[2.0, 7.0, 4.0, 5.0]);
        let a = lpt_assignment(&t, 2).unwrap();
        assert_eq!(a.labels(), &[1, 1, 2, 2]);
    }

    #[test]
    fn test_ties_keep_input_order_and_lowest_group() {
        let t = tasks(&[3.0, 3.0, 3.0]);
        let a = lpt_assignment(&t, 3).unwrap();
        assert_eq!(a.labels(), &[1, 2, 3]);
    }

    #[test]
    fn test_more_groups_than_tasks() {
        let t = tasks(&[5.0]);
        let p = GreedyPartitioner.partition(&t, 3).unwrap();
        assert_eq!(p.assignment().labels(), &[1]);
        assert_eq!(p.loads(), &[5.0, 0.0, 0.0]);
        assert!((p.variance() - 50.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let t = tasks(&[8.0, 1.0, 6.0, 6.0, 3.0, 2.5, 9.0, 0.0]);
        let a = lpt_assignment(&t, 3).unwrap();
        for _ in 0..10 {
            assert_eq!(lpt_assignment(&t, 3).unwrap(), a);
        }
    }

    #[test]
    fn test_empty_tasks() {
        let t = tasks(&[]);
        let p = GreedyPartitioner.partition(&t, 4).unwrap();
        assert!(p.assignment().is_empty());
        assert_eq!(p.variance(), 0.0);
    }

    #[test]
    fn test_zero_groups_rejected() {
        let t = tasks(&[1.0]);
        assert!(matches!(
            GreedyPartitioner.partition(&t, 0),
            Err(BalanceError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            lpt_assignment(&t, 0),
            Err(BalanceError::InvalidConfiguration(_))
        ));
    }
}
