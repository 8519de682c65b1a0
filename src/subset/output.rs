//! Plain-text writers for run results.
//!
//! Each writer emits comma-separated lines into any [`Write`] sink:
//!
//! - [`write_functions`]: `correlation,cardinality` per solution
//! - [`write_variables`]: topic mask as a `0`/`1` string per solution
//! - [`write_distribution`]: `topic,cardinality,count` per non-zero cell
//! - [`write_baseline`]: `cardinality,correlation,mask` per sample

use super::baseline::BaselineResult;
use super::postprocess::TopicCardinalityDistribution;
use super::types::TopicSubset;
use crate::error::Result;
use crate::ga::Individual;
use std::io::Write;

pub fn write_functions<W: Write>(mut out: W, population: &[TopicSubset]) -> Result<()> {
    for subset in population {
        let [correlation, cardinality] = subset.objectives();
        writeln!(out, "{correlation},{cardinality}")?;
    }
    Ok(())
}

pub fn write_variables<W: Write>(mut out: W, population: &[TopicSubset]) -> Result<()> {
    for subset in population {
        writeln!(out, "{}", subset.bit_string())?;
    }
    Ok(())
}

pub fn write_distribution<W: Write>(
    mut out: W,
    distribution: &TopicCardinalityDistribution,
) -> Result<()> {
    writeln!(out, "topic,cardinality,count")?;
    for (topic, cardinality, count) in distribution.iter() {
        writeln!(out, "{topic},{cardinality},{count}")?;
    }
    Ok(())
}

pub fn write_baseline<W: Write>(mut out: W, baseline: &BaselineResult) -> Result<()> {
    writeln!(out, "cardinality,correlation,topics")?;
    for entry in &baseline.entries {
        writeln!(
            out,
            "{},{},{}",
            entry.cardinality,
            entry.correlation,
            entry.bit_string()
        )?;
    }
    Ok(())
}
