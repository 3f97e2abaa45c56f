//! Weighted tasks.
//!
//! A [`TaskSet`] is the validated input of both partitioning strategies:
//! an ordered list of `(id, workload)` pairs where every workload is finite
//! and non-negative. Input order is kept for reporting only; the algorithms
//! do not depend on it except for tie-breaking in the greedy strategy.

use tracing::warn;

use crate::error::{BalanceError, BalanceResult};

/// A unit of work with an identifier and a non-negative weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    /// Caller-facing identifier (e.g. the row's task name).
    pub id: String,
    /// Workload weight.
    pub workload: f64,
}

impl Task {
    /// Creates a task.
    pub fn new(id: impl Into<String>, workload: f64) -> Self {
        Self {
            id: id.into(),
            workload,
        }
    }

    fn is_valid(&self) -> bool {
        self.workload.is_finite() && self.workload >= 0.0
    }
}

/// Validated, ordered collection of tasks.
///
/// # Examples
///
/// ```
/// use u_balance::task::{Task, TaskSet};
///
/// let tasks = TaskSet::new(vec![Task::new("A", 3.0), Task::new("B", 1.5)]).unwrap();
/// assert_eq!(tasks.len(), 2);
/// assert!((tasks.total_workload() - 4.5).abs() < 1e-12);
///
/// assert!(TaskSet::new(vec![Task::new("C", -1.0)]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    /// Builds a task set, rejecting the first negative or non-finite workload.
    pub fn new(tasks: Vec<Task>) -> BalanceResult<Self> {
        if let Some(bad) = tasks.iter().find(|t| !t.is_valid()) {
            return Err(BalanceError::InvalidWorkload {
                id: bad.id.clone(),
                workload: bad.workload,
            });
        }
        Ok(Self { tasks })
    }

    /// Builds a task set from `(id, workload)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> BalanceResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(id, workload)| Task::new(id, workload))
                .collect(),
        )
    }

    /// Builds a task set, dropping rows whose workload is unusable.
    ///
    /// Returns the set together with the number of dropped rows.
    pub fn from_lossy(tasks: Vec<Task>) -> (Self, usize) {
        let total = tasks.len();
        let kept: Vec<Task> = tasks
            .into_iter()
            .filter(|t| {
                if t.is_valid() {
                    true
                } else {
                    warn!(task = %t.id, workload = t.workload, "dropping task with invalid workload");
                    false
                }
            })
            .collect();
        let dropped = total - kept.len();
        (Self { tasks: kept }, dropped)
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the set holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in input order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Task at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Iterates over the tasks in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Workloads in input order.
    pub fn workloads(&self) -> Vec<f64> {
        self.tasks.iter().map(|t| t.workload).collect()
    }

    /// Sum of all workloads.
    pub fn total_workload(&self) -> f64 {
        self.tasks.iter().map(|t| t.workload).sum()
    }
}

impl<'a> IntoIterator for &'a TaskSet {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
