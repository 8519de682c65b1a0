//! Core trait definitions for the NSGA-II engine.
//!
//! The two central traits, [`Individual`] and [`Nsga2Problem`], define the
//! contract between the generic engine and domain-specific problem
//! implementations.

use crate::error::Result;
use rand::Rng;

/// Number of objectives handled by the engine.
pub const NUM_OBJECTIVES: usize = 2;

/// Objective vector. Every component is **minimized**.
pub type Objectives = [f64; NUM_OBJECTIVES];

/// Objective vector carried by individuals that have not been evaluated yet.
pub const UNEVALUATED: Objectives = [f64::INFINITY; NUM_OBJECTIVES];

/// A candidate solution in the population.
///
/// Individuals own their objective values. The engine calls
/// [`Nsga2Problem::evaluate`] and stores the result via
/// [`set_objectives`](Individual::set_objectives).
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct MySolution {
///     genes: Vec<bool>,
///     objectives: [f64; 2],
/// }
///
/// impl Individual for MySolution {
///     fn objectives(&self) -> [f64; 2] { self.objectives }
///     fn set_objectives(&mut self, o: [f64; 2]) { self.objectives = o; }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// Returns the current objective vector.
    fn objectives(&self) -> Objectives;

    /// Sets the objective vector. Called by the engine after evaluation.
    fn set_objectives(&mut self, objectives: Objectives);
}

/// Defines a bi-objective optimization problem.
///
/// Covers:
///
/// 1. **Initialization**: How to create random individuals
/// 2. **Evaluation**: How to compute the objective vector
/// 3. **Crossover**: How to recombine two parents into two children
/// 4. **Mutation**: How to perturb an individual
///
/// # Thread Safety
///
/// `Nsga2Problem` must be `Send + Sync` because the runner may evaluate
/// offspring in parallel using rayon.
pub trait Nsga2Problem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random, valid individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual.
    ///
    /// An error aborts the whole run: a single corrupted objective vector
    /// would otherwise leak into ranking and crowding.
    fn evaluate(&self, individual: &Self::Individual) -> Result<Objectives>;

    /// Recombines two parents into two children.
    ///
    /// The default implementation clones both parents.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        _rng: &mut R,
    ) -> (Self::Individual, Self::Individual) {
        (parent1.clone(), parent2.clone())
    }

    /// Mutates an individual in place. The default is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Called after each environmental selection.
    ///
    /// Purely observational; the default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _evaluations: usize) {}
}
