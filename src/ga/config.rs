//! NSGA-II configuration.
//!
//! [`Nsga2Config`] holds all parameters that control the evolutionary loop.

/// Configuration for the NSGA-II engine.
///
/// # Defaults
///
/// ```
/// use bestsub::ga::Nsga2Config;
///
/// let config = Nsga2Config::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_evaluations, 10_000);
/// assert_eq!(config.tournament_size, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use bestsub::ga::Nsga2Config;
///
/// let config = Nsga2Config::default()
///     .with_population_size(40)
///     .with_max_evaluations(2_000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsga2Config {
    /// Number of individuals kept by environmental selection.
    pub population_size: usize,

    /// Budget of fitness evaluations, initial population included.
    ///
    /// The run stops once this many evaluations have been spent. The last
    /// offspring batch is shortened so the budget is never overshot, except
    /// that the initial population is always evaluated in full.
    pub max_evaluations: usize,

    /// Number of contestants per parent-selection tournament.
    pub tournament_size: usize,

    /// Whether to evaluate offspring in parallel using rayon.
    ///
    /// Ignored unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_evaluations: 10_000,
            tournament_size: 2,
            parallel: true,
            seed: None,
        }
    }
}

impl Nsga2Config {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the evaluation budget.
    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
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
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_evaluations == 0 {
            return Err("max_evaluations must be at least 1".into());
        }
        if self.tournament_size == 0 {
            return Err("tournament_size must be at least 1".into());
        }
        Ok(())
    }
}
