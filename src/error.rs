//! Error types.

use thiserror::Error;

/// Errors reported by the partitioning entry points.
///
/// All of them are raised synchronously, before any population is
/// allocated. An empty task list and a single group are not errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BalanceError {
    /// A parameter is outside its accepted range (group count, pool size,
    /// breeding pool size, mutation rate).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A task carries a negative or non-finite workload.
    #[error("invalid workload for task {id}: {workload}")]
    InvalidWorkload { id: String, workload: f64 },

    /// The run was aborted at a generation boundary.
    #[error("optimization cancelled")]
    Cancelled,
}

pub type BalanceResult<T> = Result<T, BalanceError>;

/// Rejects a group count of zero.
pub(crate) fn check_groups(groups: usize) -> BalanceResult<()> {
    if groups == 0 {
        return Err(BalanceError::InvalidConfiguration(
            "group count must be at least 1".into(),
        ));
    }
    Ok(())
}
