//! Balanced workload partitioning.
//!
//! Splits a set of weighted tasks among N groups so that the per-group
//! workload sums are as equal as possible. Two interchangeable strategies
//! share one fitness model, the population variance of the group sums:
//!
//! - **Greedy (LPT)**: deterministic longest-processing-time-first heuristic.
//!   See [`greedy`].
//! - **Genetic Algorithm (GA)**: truncation selection, single-point
//!   crossover, gene-replacement and swap mutation over a fixed generation
//!   budget, with best-so-far tracking. See [`ga`].
//!
//! # Example
//!
//! ```
//! use u_balance::ga::GaConfig;
//! use u_balance::partition::{partition_genetic, partition_greedy};
//! use u_balance::task::TaskSet;
//!
//! let tasks = TaskSet::from_pairs([("A", 10.0), ("B", 10.0), ("C", 10.0), ("D", 10.0)]).unwrap();
//!
//! let greedy = partition_greedy(&tasks, 2).unwrap();
//! assert_eq!(greedy.labels(), &[1, 2, 1, 2]);
//!
//! let config = GaConfig::default().with_generations(50).with_pool_size(100).with_seed(42);
//! let (assignment, variance) = partition_genetic(&tasks, 2, &config).unwrap();
//! assert_eq!(assignment.len(), 4);
//! assert_eq!(variance, 0.0);
//! ```
//!
//! # Architecture
//!
//! The crate performs no I/O. Reading task rows from spreadsheets, checking
//! required columns and rendering results belong to the caller, which hands
//! over a validated [`task::TaskSet`] and a group count.

pub mod error;
pub mod fitness;
pub mod ga;
pub mod greedy;
pub mod partition;
pub mod random;
pub mod task;

pub use error::{BalanceError, BalanceResult};
pub use partition::{partition_genetic, partition_greedy, Assignment, Partition, Partitioner, Strategy};
pub use task::{Task, TaskSet};
