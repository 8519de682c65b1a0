//! Entry points for topic-subset runs.
//!
//! [`SubsetRunner::solve`] runs the evolutionary search and post-processes
//! its population; [`SubsetRunner::sample`] runs the random baseline.

use super::baseline::{sample_baseline, BaselineResult};
use super::config::SubsetConfig;
use super::postprocess::{restore_objectives, TopicCardinalityDistribution};
use super::problem::SubsetProblem;
use super::types::{EvaluationObserver, TopicSubset};
use crate::correlation::Correlation;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::ga::{Crowded, Nsga2Runner};
use crate::random::rng_from;
use crate::target::Target;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of an evolutionary run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveOutcome {
    pub correlation: Correlation,
    pub target: Target,

    /// Final population with restored `[correlation, cardinality]` objectives.
    pub population: Vec<TopicSubset>,

    /// Rank and crowding of each member at the last selection, aligned with
    /// `population`.
    pub annotations: Vec<Crowded>,

    pub distribution: TopicCardinalityDistribution,
    pub generations: usize,
    pub evaluations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Wall-clock time spent in the search loop.
    pub computing_time: Duration,
}

impl SolveOutcome {
    /// Members with Pareto rank 0, in population order.
    pub fn pareto_front(&self) -> Vec<&TopicSubset> {
        self.population
            .iter()
            .zip(&self.annotations)
            .filter(|(_, a)| a.rank == 0)
            .map(|(s, _)| s)
            .collect()
    }
}

/// Runs topic-subset searches against a dataset.
///
/// # Usage
///
/// ```
/// use bestsub::dataset::Dataset;
/// use bestsub::subset::{SubsetConfig, SubsetRunner};
///
/// let ds = Dataset::new(
///     vec!["a".into(), "b".into(), "c".into()],
///     vec!["t1".into(), "t2".into(), "t3".into()],
///     vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.2, 0.5], vec![0.9, 0.6, 0.7]],
/// ).unwrap();
///
/// let config = SubsetConfig::default().with_max_evaluations(60).with_seed(1);
/// let outcome = SubsetRunner::solve(&ds, &config).unwrap();
/// assert_eq!(outcome.population.len(), 3);
/// ```
pub struct SubsetRunner;

impl SubsetRunner {
    /// Runs the evolutionary search.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] for an invalid configuration.
    /// - [`Error::DegenerateCorrelation`] under the default abort policy.
    pub fn solve(dataset: &Dataset, config: &SubsetConfig) -> Result<SolveOutcome> {
        Self::solve_with(dataset, config, None, None)
    }

    /// Runs the evolutionary search with an optional observer and
    /// cancellation token (checked once per generation).
    pub fn solve_with(
        dataset: &Dataset,
        config: &SubsetConfig,
        observer: Option<Arc<dyn EvaluationObserver>>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveOutcome> {
        config.validate().map_err(Error::Configuration)?;

        let mut problem = SubsetProblem::new(dataset, config);
        if let Some(observer) = observer {
            problem = problem.with_observer(observer);
        }
        let engine = config.engine_config(dataset.number_of_systems());

        log::info!(
            "starting {} / {} search: {} systems, {} topics, population {}, budget {}",
            config.correlation,
            config.target,
            dataset.number_of_systems(),
            dataset.number_of_topics(),
            engine.population_size,
            engine.max_evaluations
        );

        let started = Instant::now();
        let result = Nsga2Runner::run_with_cancel(&problem, &engine, cancel)?;
        let computing_time = started.elapsed();

        let mut population = result.population;
        restore_objectives(&mut population, config.target);
        let distribution = TopicCardinalityDistribution::build(
            &population,
            dataset.topic_labels(),
            config.distribution,
        );

        log::info!(
            "search finished: {} generations, {} evaluations in {:.3}s",
            result.generations,
            result.evaluations,
            computing_time.as_secs_f64()
        );

        Ok(SolveOutcome {
            correlation: config.correlation,
            target: config.target,
            population,
            annotations: result.annotations,
            distribution,
            generations: result.generations,
            evaluations: result.evaluations,
            cancelled: result.cancelled,
            computing_time,
        })
    }

    /// Runs the random-sampling baseline: one subset per cardinality.
    ///
    /// Only the correlation method, degenerate policy (with the target's
    /// worst correlation as substitute) and seed of `config` are used.
    pub fn sample(dataset: &Dataset, config: &SubsetConfig) -> Result<BaselineResult> {
        Self::sample_with(dataset, config, None)
    }

    /// Baseline run with an optional observer.
    pub fn sample_with(
        dataset: &Dataset,
        config: &SubsetConfig,
        observer: Option<Arc<dyn EvaluationObserver>>,
    ) -> Result<BaselineResult> {
        let mut problem = SubsetProblem::new(dataset, config);
        if let Some(observer) = observer {
            problem = problem.with_observer(observer);
        }
        let mut rng = rng_from(config.seed);

        log::info!(
            "sampling {} baseline over {} topics",
            config.correlation,
            dataset.number_of_topics()
        );
        sample_baseline(&problem, &mut rng)
    }
}
