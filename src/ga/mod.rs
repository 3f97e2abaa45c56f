//! Genetic optimizer for workload balancing.
//!
//! The generational machinery is generic over [`GaProblem`]; the balancing
//! objective itself lives in [`BalanceProblem`]. One generation is:
//! evaluate and rank → keep the best `num_selected` (truncation, elitism) →
//! breed children by single-point crossover, gene-replacement mutation and
//! swap mutation until the pool is full again.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with associated fitness type
//! - [`GaProblem`]: Problem definition: initialization, evaluation, operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (generations, pool size, truncation, mutation)
//! - [`Evolution`]: The generational loop as a steppable state machine
//! - [`GaRunner`]: Drives an [`Evolution`] to completion
//! - [`GeneticPartitioner`]: The GA behind the [`Partitioner`](crate::partition::Partitioner) interface
//!
//! # Submodules
//!
//! - [`operators`]: Label-vector crossover and mutation
//! - [`population`]: Initialization, scoring, ranking and regeneration
//! - [`selection`]: Truncation selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
pub mod population;
mod problem;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use problem::{BalanceProblem, Chromosome, GeneticPartitioner};
pub use runner::{Evolution, GaResult, GaRunner, Phase};
pub use types::{Fitness, GaProblem, Individual};
