//! Topic-subset selection for IR test collections.
//!
//! Searches the power set of a collection's topics for subsets whose
//! system ranking (by MAP over the subset) correlates best, or worst, with
//! the ranking over all topics, while keeping the subset small (or large).
//! The search is the NSGA-II engine from [`crate::ga`]; a random-sampling
//! baseline is provided for comparison.
//!
//! # Key Types
//!
//! - [`SubsetConfig`]: Correlation method, target, budget, operator rates
//! - [`SubsetProblem`]: Fitness evaluation for a topic mask
//! - [`SubsetRunner`]: `solve` (evolutionary) and `sample` (baseline) entry points
//! - [`SolveOutcome`]: Restored population plus [`TopicCardinalityDistribution`]
//! - [`BaselineResult`]: One random subset per cardinality
//!
//! # References
//!
//! - Guiver, Mizzaro & Robertson (2009), "A Few Good Topics: Experiments in
//!   Topic Set Reduction for Retrieval Evaluation", *ACM TOIS* 27(4)
//! - Roitero, Soprano & Mizzaro (2018), "Effectiveness evaluation with a
//!   subset of topics: A practical approach", *SIGIR*

mod baseline;
mod config;
pub mod output;
mod postprocess;
mod problem;
mod runner;
mod types;

pub use baseline::{sample_baseline, BaselineEntry, BaselineResult};
pub use config::{DegeneratePolicy, DistributionMode, SubsetConfig};
pub use postprocess::{restore_objectives, TopicCardinalityDistribution};
pub use problem::SubsetProblem;
pub use runner::{SolveOutcome, SubsetRunner};
pub use types::{EvaluationObserver, TopicSubset};
