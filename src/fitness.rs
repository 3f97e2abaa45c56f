//! Workload-variance fitness model.
//!
//! Both strategies are judged by the **population variance** of the per-group
//! workload sums (mean of squared deviations, dividing by the group count).
//! Zero is ideal. With a single group the variance is defined as 0.
//!
//! Labels are 1-based: label `g` denotes group index `g - 1`.

use crate::task::TaskSet;

/// Per-group workload sums for an assignment.
///
/// Groups that receive no task keep a sum of 0.
///
/// # Complexity
/// O(T + N)
pub fn group_loads(labels: &[usize], tasks: &TaskSet, groups: usize) -> Vec<f64> {
    debug_assert_eq!(labels.len(), tasks.len(), "one label per task");
    let mut loads = vec![0.0; groups];
    for (&label, task) in labels.iter().zip(tasks.iter()) {
        loads[label - 1] += task.workload;
    }
    loads
}

/// Same as [`group_loads`] over a raw workload slice.
pub fn workload_loads(labels: &[usize], workloads: &[f64], groups: usize) -> Vec<f64> {
    debug_assert_eq!(labels.len(), workloads.len(), "one label per task");
    let mut loads = vec![0.0; groups];
    for (&label, &w) in labels.iter().zip(workloads) {
        loads[label - 1] += w;
    }
    loads
}

/// Population variance of `values` (divides by `values.len()`).
///
/// Returns 0 for an empty slice. Saturates to infinity when the values are
/// large enough for their sum to overflow `f64`.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean.is_infinite() {
        return f64::INFINITY;
    }
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

/// Fitness of an assignment: variance of its group loads.
///
/// # Examples
///
/// ```
/// use u_balance::fitness::evaluate;
/// use u_balance::task::TaskSet;
///
/// let tasks = TaskSet::from_pairs([("A", 10.0), ("B", 10.0), ("C", 10.0), ("D", 10.0)]).unwrap();
/// assert_eq!(evaluate(&[1, 2, 1, 2], &tasks, 2), 0.0);
/// assert_eq!(evaluate(&[1, 1, 1, 2], &tasks, 2), 100.0);
/// ```
pub fn evaluate(labels: &[usize], tasks: &TaskSet, groups: usize) -> f64 {
    if groups <= 1 {
        return 0.0;
    }
    variance(&group_loads(labels, tasks, groups))
}

/// Same as [`evaluate`] over a raw workload slice.
///
/// Uses identical arithmetic, so both functions agree bit-for-bit.
pub fn evaluate_workloads(labels: &[usize], workloads: &[f64], groups: usize) -> f64 {
    if groups <= 1 {
        return 0.0;
    }
    variance(&workload_loads(labels, workloads, groups))
}
