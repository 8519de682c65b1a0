//! The topic-subset optimization problem.

use super::config::{DegeneratePolicy, SubsetConfig};
use super::types::{bit_string, EvaluationObserver, TopicSubset};
use crate::correlation::Correlation;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::ga::operators::{bit_flip_mutation, cardinality, pruning_crossover, random_mask};
use crate::ga::{Nsga2Problem, Objectives};
use crate::target::Target;
use rand::Rng;
use std::sync::Arc;

/// Fitness of a topic subset: how well the systems ranked by MAP on the
/// subset agree with the ranking on all topics, traded against the subset's
/// size.
///
/// Evaluation computes each system's mean AP over the selected topics,
/// correlates that vector with the full-topic MAP, and shapes
/// `(correlation, cardinality)` into minimized objectives via the
/// configured [`Target`].
pub struct SubsetProblem<'a> {
    dataset: &'a Dataset,
    correlation: Correlation,
    target: Target,
    crossover_probability: f64,
    mutation_rate: f64,
    degenerate: DegeneratePolicy,
    observer: Option<Arc<dyn EvaluationObserver>>,
}

impl<'a> SubsetProblem<'a> {
    pub fn new(dataset: &'a Dataset, config: &SubsetConfig) -> Self {
        Self {
            dataset,
            correlation: config.correlation,
            target: config.target,
            crossover_probability: config.crossover_probability,
            mutation_rate: config.mutation_rate,
            degenerate: config.degenerate,
            observer: None,
        }
    }

    /// Attaches a progress observer.
    pub fn with_observer(mut self, observer: Arc<dyn EvaluationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn dataset(&self) -> &Dataset {
        self.dataset
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Correlation between the subset's MAP vector and the full-topic MAP,
    /// after applying the degenerate-correlation policy.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for an empty or wrongly-sized mask, and
    /// [`Error::DegenerateCorrelation`] under [`DegeneratePolicy::Abort`].
    pub fn correlation_of(&self, mask: &[bool]) -> Result<f64> {
        let reduced = self.dataset.reduced_map(mask)?;
        match self.correlation.correlate(&reduced, self.dataset.map()) {
            Ok(r) => Ok(r),
            Err(err @ Error::DegenerateCorrelation { .. }) => match self.degenerate {
                DegeneratePolicy::Abort => Err(err),
                DegeneratePolicy::Penalize => {
                    let worst = self.target.worst_correlation();
                    log::warn!("{err} for subset {}, scoring it {worst}", bit_string(mask));
                    Ok(worst)
                }
            },
            Err(err) => Err(err),
        }
    }

    pub(crate) fn notify_evaluation(&self, mask: &[bool], cardinality: usize, correlation: f64) {
        log::debug!(
            "evaluated subset {} (cardinality {cardinality}): correlation {correlation}",
            bit_string(mask)
        );
        if let Some(observer) = &self.observer {
            observer.on_evaluation(mask, cardinality, correlation);
        }
    }
}

impl Nsga2Problem for SubsetProblem<'_> {
    type Individual = TopicSubset;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> TopicSubset {
        TopicSubset::new(random_mask(self.dataset.number_of_topics(), rng))
    }

    fn evaluate(&self, individual: &TopicSubset) -> Result<Objectives> {
        let mask = individual.selected();
        let k = cardinality(mask);
        if k == 0 {
            return Err(Error::InvalidInput(
                "cannot evaluate a subset without topics".into(),
            ));
        }
        let correlation = self.correlation_of(mask)?;
        self.notify_evaluation(mask, k, correlation);
        Ok(self.target.shape(correlation, k))
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &TopicSubset,
        parent2: &TopicSubset,
        rng: &mut R,
    ) -> (TopicSubset, TopicSubset) {
        let (a, b) = pruning_crossover(
            parent1.selected(),
            parent2.selected(),
            self.crossover_probability,
            rng,
        );
        (TopicSubset::new(a), TopicSubset::new(b))
    }

    fn mutate<R: Rng>(&self, individual: &mut TopicSubset, rng: &mut R) {
        bit_flip_mutation(individual.selected_mut(), self.mutation_rate, rng);
    }

    fn on_generation(&self, generation: usize, evaluations: usize) {
        log::debug!("generation {generation} done, {evaluations} evaluations");
        if let Some(observer) = &self.observer {
            observer.on_generation(generation, evaluations);
        }
    }
}
