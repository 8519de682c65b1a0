//! Post-processing of a finished search.
//!
//! - [`restore_objectives`] undoes the target's sign convention so that
//!   objective 0 is a true correlation and objective 1 a true cardinality.
//! - [`TopicCardinalityDistribution`] tallies the final population per
//!   `(topic, cardinality)`.

use super::config::DistributionMode;
use super::types::TopicSubset;
use crate::ga::Individual;
use crate::target::Target;

/// Restores `[correlation, cardinality]` on every member, in place.
pub fn restore_objectives(population: &mut [TopicSubset], target: Target) {
    for subset in population.iter_mut() {
        let restored = target.restore(subset.objectives());
        subset.set_objectives(restored);
    }
}

/// Occurrence counts indexed by topic and cardinality.
///
/// Counts live in a dense `topics × (topics + 1)` table; labels are only
/// attached when reading the table back.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopicCardinalityDistribution {
    topic_labels: Vec<String>,
    mode: DistributionMode,
    counts: Vec<u32>,
}

impl TopicCardinalityDistribution {
    /// Tallies `population` according to `mode`.
    ///
    /// # Panics
    /// Panics if a subset's mask length differs from `topic_labels.len()`.
    pub fn build(population: &[TopicSubset], topic_labels: &[String], mode: DistributionMode) -> Self {
        let n = topic_labels.len();
        let width = n + 1;
        let mut counts = vec![0u32; n * width];

        for subset in population {
            let mask = subset.selected();
            assert_eq!(mask.len(), n, "subset mask does not match topic count");
            let k = subset.cardinality();
            for (topic, &on) in mask.iter().enumerate() {
                if on || mode == DistributionMode::AllTopics {
                    counts[topic * width + k] += 1;
                }
            }
        }

        Self {
            topic_labels: topic_labels.to_vec(),
            mode,
            counts,
        }
    }

    pub fn mode(&self) -> DistributionMode {
        self.mode
    }

    pub fn topic_labels(&self) -> &[String] {
        &self.topic_labels
    }

    /// Counts for one topic, indexed by cardinality `0..=topics`.
    ///
    /// # Panics
    ///
    /// Panics if `topic` is not below the number of topics. Use
    /// [`count`](Self::count) for a checked lookup.
    pub fn row(&self, topic: usize) -> &[u32] {
        let width = self.topic_labels.len() + 1;
        &self.counts[topic * width..(topic + 1) * width]
    }

    /// Count at `(topic, cardinality)`; zero when out of range.
    pub fn count(&self, topic: usize, cardinality: usize) -> u32 {
        if topic >= self.topic_labels.len() || cardinality > self.topic_labels.len() {
            return 0;
        }
        self.row(topic)[cardinality]
    }

    /// Count looked up by topic label. `None` for an unknown label.
    pub fn count_for(&self, label: &str, cardinality: usize) -> Option<u32> {
        let topic = self.topic_labels.iter().position(|l| l == label)?;
        Some(self.count(topic, cardinality))
    }

    /// Non-zero cells as `(topic label, cardinality, count)`, topics in
    /// dataset order and cardinalities ascending.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, u32)> + '_ {
        self.topic_labels.iter().enumerate().flat_map(move |(t, label)| {
            self.row(t)
                .iter()
                .enumerate()
                .filter(|(_, &c)| c > 0)
                .map(move |(k, &c)| (label.as_str(), k, c))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subset(mask: &[bool], objectives: [f64; 2]) -> TopicSubset {
        let mut s = TopicSubset::new(mask.to_vec());
        s.set_objectives(objectives);
        s
    }

    fn labels() -> Vec<String> {
        vec!["a".into(), "b".into(), "c".into()]
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_range_panics() {
        let pop = vec![subset(&[true, false, false], [0.5, 1.0])];
        let dist = TopicCardinalityDistribution::build(&pop, &labels(), DistributionMode::AllTopics);
        assert_eq!(dist.count(3, 1), 0);
        let _ = dist.row(3);
    }

    #[test]
    fn test_restore_best() {
        let mut pop = vec![subset(&[true, false, true], Target::Best.shape(0.42, 2))];
        restore_objectives(&mut pop, Target::Best);
        assert_eq!(pop[0].objectives(), [0.42, 2.0]);
        assert_eq!(pop[0].correlation(), 0.42);
    }

    #[test]
    fn test_restore_worst() {
        let mut pop = vec![subset(&[true, true, true], Target::Worst.shape(-0.3, 3))];
        restore_objectives(&mut pop, Target::Worst);
        assert_eq!(pop[0].objectives(), [-0.3, 3.0]);
    }

    #[test]
    fn test_all_topics_mode_replicates_cardinality_histogram() {
        let pop = vec![
            subset(&[true, false, false], [0.1, 1.0]),
            subset(&[false, true, true], [0.5, 2.0]),
            subset(&[true, true, false], [0.6, 2.0]),
        ];
        let dist = TopicCardinalityDistribution::build(&pop, &labels(), DistributionMode::AllTopics);
        for t in 0..3 {
            assert_eq!(dist.row(t), &[0, 1, 2, 0]);
        }
        assert_eq!(dist.count_for("c", 1), Some(1));
        assert_eq!(dist.count_for("z", 1), None);
    }

    #[test]
    fn test_selected_topics_mode_counts_membership() {
        let pop = vec![
            subset(&[true, false, false], [0.1, 1.0]),
            subset(&[false, true, true], [0.5, 2.0]),
            subset(&[true, true, false], [0.6, 2.0]),
        ];
        let dist =
            TopicCardinalityDistribution::build(&pop, &labels(), DistributionMode::SelectedTopics);
        assert_eq!(dist.row(0), &[0, 1, 1, 0]);
        assert_eq!(dist.row(1), &[0, 0, 2, 0]);
        assert_eq!(dist.row(2), &[0, 0, 1, 0]);
        assert_eq!(dist.count(2, 9), 0);
    }

    #[test]
    fn test_iter_skips_zero_cells() {
        let pop = vec![subset(&[false, true, false], [0.1, 1.0])];
        let dist =
            TopicCardinalityDistribution::build(&pop, &labels(), DistributionMode::SelectedTopics);
        let cells: Vec<_> = dist.iter().collect();
        assert_eq!(cells, vec![("b", 1, 1)]);
    }
}
