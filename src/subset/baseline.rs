//! Random-sampling baseline.
//!
//! Draws one uniformly random subset for every cardinality `1..=topics` and
//! records its correlation. No search is involved; the resulting curve is a
//! reference point for the evolutionary results.

use super::problem::SubsetProblem;
use super::types::bit_string;
use crate::error::Result;
use crate::ga::operators::random_subset;
use rand::Rng;

/// One baseline sample.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineEntry {
    pub cardinality: usize,
    pub selected: Vec<bool>,
    pub correlation: f64,
}

impl BaselineEntry {
    pub fn bit_string(&self) -> String {
        bit_string(&self.selected)
    }
}

/// Baseline samples ordered by cardinality, starting at 1.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineResult {
    pub entries: Vec<BaselineEntry>,
}

impl BaselineResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cardinalities(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.cardinality).collect()
    }

    pub fn correlations(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.correlation).collect()
    }
}

/// Samples one subset per cardinality and correlates it.
///
/// Uses the problem's correlation method and degenerate-correlation policy.
pub fn sample_baseline<R: Rng>(problem: &SubsetProblem<'_>, rng: &mut R) -> Result<BaselineResult> {
    let n = problem.dataset().number_of_topics();
    let mut entries = Vec::with_capacity(n);

    for k in 1..=n {
        let selected = random_subset(n, k, rng);
        let correlation = problem.correlation_of(&selected)?;
        problem.notify_evaluation(&selected, k, correlation);
        entries.push(BaselineEntry {
            cardinality: k,
            selected,
            correlation,
        });
    }

    Ok(BaselineResult { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::ga::operators::cardinality;
    use crate::random::create_rng;
    use crate::subset::SubsetConfig;

    fn dataset(topics: usize) -> Dataset {
        let systems = 4;
        let rows = (0..systems)
            .map(|s| {
                (0..topics)
                    .map(|t| 0.05 + 0.2 * s as f64 + 0.01 * ((s * 7 + t * 3) % 5) as f64)
                    .collect()
            })
            .collect();
        Dataset::new(
            (0..systems).map(|s| format!("s{s}")).collect(),
            (0..topics).map(|t| format!("t{t}")).collect(),
            rows,
        )
        .unwrap()
    }

    #[test]
    fn test_one_entry_per_cardinality() {
        let ds = dataset(5);
        let problem = SubsetProblem::new(&ds, &SubsetConfig::default());
        let mut rng = create_rng(42);
        let result = sample_baseline(&problem, &mut rng).unwrap();

        assert_eq!(result.len(), 5);
        assert_eq!(result.cardinalities(), vec![1, 2, 3, 4, 5]);
        for entry in &result.entries {
            assert_eq!(entry.selected.len(), 5);
            assert_eq!(cardinality(&entry.selected), entry.cardinality);
            assert!((-1.0..=1.0).contains(&entry.correlation));
        }
    }

    #[test]
    fn test_full_cardinality_matches_full_map() {
        let ds = dataset(6);
        let problem = SubsetProblem::new(&ds, &SubsetConfig::default());
        let mut rng = create_rng(1);
        let result = sample_baseline(&problem, &mut rng).unwrap();
        let last = result.entries.last().unwrap();
        assert_eq!(last.bit_string(), "111111");
        assert!((last.correlation - 1.0).abs() < 1e-12);
    }
}
