//! Topic-subset search for information-retrieval evaluation.
//!
//! Given a systems × topics average-precision matrix, finds subsets of
//! topics whose system ranking correlates best (or worst) with the ranking
//! on all topics, trading correlation against subset size. The output is a
//! Pareto-approximate population rather than a single answer.
//!
//! - **Dataset**: AP matrix, labels, and full-topic MAP
//! - **Correlation / Target**: Pearson or Kendall τ-b; Best or Worst subsets
//! - **NSGA-II (`ga`)**: Generic bi-objective evolutionary engine with
//!   bit-vector operators
//! - **Subset search (`subset`)**: The topic-subset problem, post-processing,
//!   distribution tally, random baseline, and result writers
//!
//! # Example
//!
//! ```
//! use bestsub::{Dataset, SubsetConfig, SubsetRunner, Target};
//!
//! let csv = ",t1,t2,t3,t4\n\
//!            a,0.10,0.05,0.20,0.30\n\
//!            b,0.35,0.40,0.25,0.45\n\
//!            c,0.60,0.42,0.90,0.50\n";
//! let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
//!
//! let config = SubsetConfig::default()
//!     .with_target(Target::Best)
//!     .with_max_evaluations(100)
//!     .with_seed(42);
//! let outcome = SubsetRunner::solve(&dataset, &config).unwrap();
//!
//! for subset in outcome.pareto_front() {
//!     assert!(subset.cardinality() >= 1);
//!     assert!((-1.0..=1.0).contains(&subset.correlation()));
//! }
//! ```

pub mod correlation;
pub mod dataset;
pub mod error;
pub mod ga;
pub mod random;
pub mod subset;
pub mod target;

pub use correlation::Correlation;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use subset::{SolveOutcome, SubsetConfig, SubsetRunner};
pub use target::Target;
