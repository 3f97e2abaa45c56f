//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use crate::error::{BalanceError, BalanceResult};

/// Configuration for the genetic optimizer.
///
/// # Defaults
///
/// ```
/// use u_balance::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.generations, 500);
/// assert_eq!(config.pool_size, 1000);
/// assert_eq!(config.num_selected, 50);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_balance::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_pool_size(200)
///     .with_num_selected(20)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of evolution steps. The run always uses the full budget.
    ///
    /// With 0 the initial random population is evaluated and its best
    /// chromosome returned.
    pub generations: usize,

    /// Number of chromosomes in every population.
    pub pool_size: usize,

    /// Number of top-ranked chromosomes kept as survivors and breeding pool.
    ///
    /// Values above `pool_size` are clamped: the whole population breeds.
    pub num_selected: usize,

    /// Per-gene replacement probability, also the per-chromosome swap
    /// probability (0.0–1.0).
    pub mutation_rate: f64,

    /// Whether to evaluate and breed in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Results are identical
    /// either way for a fixed seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            generations: 500,
            pool_size: 1000,
            num_selected: 50,
            mutation_rate: 0.1,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the population size.
    pub fn with_pool_size(mut self, n: usize) -> Self {
        self.pool_size = n;
        self
    }

    /// Sets the truncation size.
    pub fn with_num_selected(mut self, n: usize) -> Self {
        self.num_selected = n;
        self
    }

    /// Sets the mutation rate. Out-of-range values are rejected by
    /// [`validate`](Self::validate), not clamped.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Enables or disables parallel evaluation and breeding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick answers: 100 generations over 200 chromosomes.
    pub fn fast() -> Self {
        Self {
            generations: 100,
            pool_size: 200,
            num_selected: 20,
            ..Self::default()
        }
    }

    /// Preset for large task sets: 1000 generations over 2000 chromosomes.
    pub fn quality() -> Self {
        Self {
            generations: 1000,
            pool_size: 2000,
            num_selected: 100,
            ..Self::default()
        }
    }

    /// Picks a budget from the number of tasks.
    ///
    /// - `task_count < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ task_count < 500` → [`default()`](Self::default)
    /// - `task_count ≥ 500` → [`quality()`](Self::quality)
    pub fn auto_select(task_count: usize) -> Self {
        if task_count < 50 {
            Self::fast()
        } else if task_count < 500 {
            Self::default()
        } else {
            Self::quality()
        }
    }

    /// Size of the breeding pool actually used: `num_selected` clamped to
    /// `pool_size`.
    pub fn breeding_pool_size(&self) -> usize {
        self.num_selected.min(self.pool_size)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> BalanceResult<()> {
        if self.pool_size < 1 {
            return Err(invalid("pool_size must be at least 1"));
        }
        if self.num_selected < 1 {
            return Err(invalid("num_selected must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate must be within [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> BalanceError {
    BalanceError::InvalidConfiguration(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.generations, 500);
        assert_eq!(config.pool_size, 1000);
        assert_eq!(config.num_selected, 50);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_generations(1000)
            .with_pool_size(200)
            .with_num_selected(10)
            .with_mutation_rate(0.05)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.generations, 1000);
        assert_eq!(config.pool_size, 200);
        assert_eq!(config.num_selected, 10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
        assert!(GaConfig::default().with_generations(0).validate().is_ok());
        assert!(GaConfig::default()
            .with_pool_size(1)
            .with_num_selected(1)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_pool_size() {
        let config = GaConfig::default().with_pool_size(0);
        assert!(matches!(
            config.validate(),
            Err(BalanceError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_num_selected() {
        let config = GaConfig::default().with_num_selected(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_mutation_rate() {
        assert!(GaConfig::default().with_mutation_rate(-0.1).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(1.5).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(f64::NAN).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(0.0).validate().is_ok());
        assert!(GaConfig::default().with_mutation_rate(1.0).validate().is_ok());
    }

    #[test]
    fn test_breeding_pool_clamped() {
        let config = GaConfig::default().with_pool_size(10).with_num_selected(50);
        assert!(config.validate().is_ok());
        assert_eq!(config.breeding_pool_size(), 10);
        assert_eq!(GaConfig::default().breeding_pool_size(), 50);
    }

    // ---- Presets ----

    #[test]
    fn test_presets_valid() {
        for config in [GaConfig::fast(), GaConfig::default(), GaConfig::quality()] {
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_preset_chainable() {
        let config = GaConfig::fast().with_pool_size(75).with_seed(42);
        assert_eq!(config.pool_size, 75);
        assert_eq!(config.generations, 100);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_auto_select_boundaries() {
        assert_eq!(GaConfig::auto_select(49), GaConfig::fast());
        assert_eq!(GaConfig::auto_select(50), GaConfig::default());
        assert_eq!(GaConfig::auto_select(499), GaConfig::default());
        assert_eq!(GaConfig::auto_select(500), GaConfig::quality());
    }
}
