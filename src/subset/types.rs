//! Candidate topic subsets and the progress-observer hook.

use crate::ga::operators::cardinality;
use crate::ga::{Individual, Objectives, UNEVALUATED};

/// A candidate subset of topics: one bit per topic plus its objectives.
///
/// While a search is running the objectives are in the minimized form
/// produced by [`Target::shape`](crate::target::Target::shape). Results
/// returned by [`SubsetRunner`](super::SubsetRunner) carry restored
/// objectives: `[correlation, cardinality]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopicSubset {
    selected: Vec<bool>,
    objectives: Objectives,
}

impl TopicSubset {
    /// Wraps a topic mask. Objectives start as unevaluated.
    pub fn new(selected: Vec<bool>) -> Self {
        Self {
            selected,
            objectives: UNEVALUATED,
        }
    }

    /// Topic mask, aligned with the dataset's topic labels.
    pub fn selected(&self) -> &[bool] {
        &self.selected
    }

    pub(crate) fn selected_mut(&mut self) -> &mut [bool] {
        &mut self.selected
    }

    /// Number of selected topics.
    pub fn cardinality(&self) -> usize {
        cardinality(&self.selected)
    }

    /// Indices of the selected topics, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter(|(_, &on)| on)
            .map(|(i, _)| i)
            .collect()
    }

    /// Mask rendered as a `0`/`1` string, e.g. `"0110"`.
    pub fn bit_string(&self) -> String {
        bit_string(&self.selected)
    }

    /// Restored correlation (objective 0 after post-processing).
    pub fn correlation(&self) -> f64 {
        self.objectives[0]
    }
}

impl Individual for TopicSubset {
    fn objectives(&self) -> Objectives {
        self.objectives
    }

    fn set_objectives(&mut self, objectives: Objectives) {
        self.objectives = objectives;
    }
}

pub(crate) fn bit_string(mask: &[bool]) -> String {
    mask.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Receives progress events from a search or a baseline sampling run.
///
/// Purely observational: implementations must not influence the run, and
/// results are identical with or without an observer. Methods may be
/// called concurrently from rayon workers.
pub trait EvaluationObserver: Send + Sync {
    /// Called once per evaluated subset with its raw correlation.
    fn on_evaluation(&self, _mask: &[bool], _cardinality: usize, _correlation: f64) {}

    /// Called after each completed generation.
    fn on_generation(&self, _generation: usize, _evaluations: usize) {}
}
