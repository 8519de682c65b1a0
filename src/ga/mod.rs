//! Multi-objective evolutionary engine (NSGA-II).
//!
//! A generic, domain-agnostic NSGA-II built on trait-based abstractions.
//! Users define their problem by implementing [`Nsga2Problem`], which
//! specifies how to create, evaluate, crossover, and mutate individuals.
//! All objectives are minimized.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution carrying its objective vector
//! - [`Nsga2Problem`]: Problem definition: initialization, evaluation, and operators
//!
//! # Key Types
//!
//! - [`Nsga2Config`]: Algorithm parameters (population size, evaluation budget)
//! - [`Nsga2Runner`]: Executes the evolutionary loop
//! - [`Nsga2Result`]: Final population with rank/crowding annotations
//!
//! # Submodules
//!
//! - [`operators`]: Bit-vector crossover, mutation, and repair operators
//! - [`multi_objective`]: Dominance, non-dominated sorting, crowding distance,
//!   environmental selection
//!
//! # References
//!
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod multi_objective;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::Nsga2Config;
pub use multi_objective::Crowded;
pub use runner::{Nsga2Result, Nsga2Runner};
pub use selection::tournament;
pub use types::{Individual, Nsga2Problem, Objectives, NUM_OBJECTIVES, UNEVALUATED};
