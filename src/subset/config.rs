//! Run configuration for topic-subset searches.

use crate::correlation::Correlation;
use crate::ga::Nsga2Config;
use crate::target::Target;

/// What to do when a subset's correlation is undefined (zero variance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DegeneratePolicy {
    /// Fail the whole run with [`Error::DegenerateCorrelation`](crate::Error::DegenerateCorrelation).
    #[default]
    Abort,

    /// Substitute [`Target::worst_correlation`] and log a warning.
    Penalize,
}

/// How the topic/cardinality distribution is tallied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistributionMode {
    /// Every solution increments `(topic, cardinality)` for **every** topic,
    /// whether or not it selects that topic. Each topic row therefore holds
    /// the cardinality histogram of the final population. This is the
    /// historical tally and the default.
    #[default]
    AllTopics,

    /// Each solution increments `(topic, cardinality)` only for the topics
    /// it selects, giving per-topic selection frequencies.
    SelectedTopics,
}

/// Configuration for [`SubsetRunner`](super::SubsetRunner).
///
/// # Defaults
///
/// ```
/// use bestsub::subset::SubsetConfig;
/// use bestsub::{Correlation, Target};
///
/// let config = SubsetConfig::default();
/// assert_eq!(config.correlation, Correlation::Pearson);
/// assert_eq!(config.target, Target::Best);
/// assert_eq!(config.max_evaluations, 10_000);
/// assert!(config.population_size.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use bestsub::subset::SubsetConfig;
/// use bestsub::{Correlation, Target};
///
/// let config = SubsetConfig::default()
///     .with_correlation(Correlation::Kendall)
///     .with_target(Target::Worst)
///     .with_max_evaluations(50_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubsetConfig {
    /// Correlation between reduced and full-topic MAP.
    pub correlation: Correlation,

    /// Whether to look for best- or worst-correlating subsets.
    pub target: Target,

    /// Fitness-evaluation budget for the evolutionary search.
    pub max_evaluations: usize,

    /// Population size. `None` uses the number of systems in the dataset.
    pub population_size: Option<usize>,

    /// Probability of recombining a pair of parents (0.0–1.0).
    pub crossover_probability: f64,

    /// Expected number of bit flips per offspring.
    ///
    /// Each topic bit flips with probability `mutation_rate / topics`.
    pub mutation_rate: f64,

    /// Distribution tally applied to the final population.
    pub distribution: DistributionMode,

    /// Handling of undefined correlations.
    pub degenerate: DegeneratePolicy,

    /// Whether to evaluate offspring in parallel using rayon (`parallel`
    /// feature).
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SubsetConfig {
    fn default() -> Self {
        Self {
            correlation: Correlation::Pearson,
            target: Target::Best,
            max_evaluations: 10_000,
            population_size: None,
            crossover_probability: 0.9,
            mutation_rate: 1.0,
            distribution: DistributionMode::AllTopics,
            degenerate: DegeneratePolicy::Abort,
            parallel: true,
            seed: None,
        }
    }
}

impl SubsetConfig {
    /// Builds a configuration from method names, falling back to Pearson and
    /// Best for unknown names.
    pub fn from_names(correlation: &str, target: &str, max_evaluations: usize) -> Self {
        Self::default()
            .with_correlation(Correlation::from_name(correlation))
            .with_target(Target::from_name(target))
            .with_max_evaluations(max_evaluations)
    }

    pub fn with_correlation(mut self, correlation: Correlation) -> Self {
        self.correlation = correlation;
        self
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Sets the evaluation budget.
    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    /// Overrides the population size (defaults to the number of systems).
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = Some(n);
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the expected number of flips per offspring.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.max(0.0);
        self
    }

    pub fn with_distribution(mut self, mode: DistributionMode) -> Self {
        self.distribution = mode;
        self
    }

    pub fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_evaluations == 0 {
            return Err("max_evaluations must be at least 1".into());
        }
        if self.population_size.is_some_and(|n| n < 2) {
            return Err("population_size must be at least 2".into());
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return Err("crossover_probability must be within [0, 1]".into());
        }
        if !self.mutation_rate.is_finite() || self.mutation_rate < 0.0 {
            return Err("mutation_rate must be a non-negative number".into());
        }
        Ok(())
    }

    /// Engine configuration for a dataset with `number_of_systems` rows.
    pub fn engine_config(&self, number_of_systems: usize) -> Nsga2Config {
        let mut config = Nsga2Config::default()
            .with_population_size(self.population_size.unwrap_or(number_of_systems))
            .with_max_evaluations(self.max_evaluations)
            .with_parallel(self.parallel);
        config.seed = self.seed;
        config
    }
}
