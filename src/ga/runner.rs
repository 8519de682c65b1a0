//! NSGA-II evolutionary loop execution.
//!
//! [`Nsga2Runner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → (tournament → crossover → mutation →
//! evaluation → environmental selection)* until the evaluation budget is
//! spent.

use super::config::Nsga2Config;
use super::multi_objective::{environmental_selection, Crowded};
use super::selection::tournament;
use super::types::{Individual, Nsga2Problem, Objectives};
use crate::error::{Error, Result};
use crate::random::rng_from;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of an NSGA-II run.
#[derive(Debug, Clone)]
pub struct Nsga2Result<I: Individual> {
    /// Final environmentally-selected population.
    pub population: Vec<I>,

    /// Rank and crowding annotation, aligned with `population`.
    pub annotations: Vec<Crowded>,

    /// Number of generations executed after initialization.
    pub generations: usize,

    /// Number of fitness evaluations spent.
    pub evaluations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

impl<I: Individual> Nsga2Result<I> {
    /// Members of the final population with Pareto rank 0.
    pub fn pareto_front(&self) -> Vec<&I> {
        self.population
            .iter()
            .zip(&self.annotations)
            .filter(|(_, a)| a.rank == 0)
            .map(|(ind, _)| ind)
            .collect()
    }
}

/// Executes the NSGA-II loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = Nsga2Config::default().with_seed(42);
/// let result = Nsga2Runner::run(&problem, &config)?;
/// println!("front size: {}", result.pareto_front().len());
/// ```
pub struct Nsga2Runner;

impl Nsga2Runner {
    /// Runs the optimization until the evaluation budget is exhausted.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] if `config` fails validation.
    /// - Any error returned by [`Nsga2Problem::evaluate`], which aborts the run.
    pub fn run<P: Nsga2Problem>(problem: &P, config: &Nsga2Config) -> Result<Nsga2Result<P::Individual>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the optimization with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the loop stops
    /// before starting the next generation and returns the current
    /// population.
    pub fn run_with_cancel<P: Nsga2Problem>(
        problem: &P,
        config: &Nsga2Config,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Nsga2Result<P::Individual>> {
        config.validate().map_err(Error::Configuration)?;

        let mut rng = rng_from(config.seed);
        let n = config.population_size;

        // 1. Initialize and evaluate
        let mut population: Vec<P::Individual> =
            (0..n).map(|_| problem.create_individual(&mut rng)).collect();
        evaluate_population(problem, &mut population, config.parallel)?;
        let mut evaluations = n;

        // 2. Rank the initial population so tournaments have annotations
        let (mut population, mut annotations) = survive(population, n);

        let mut generations = 0usize;
        let mut cancelled = false;

        // 3. Evolutionary loop
        while evaluations < config.max_evaluations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let batch = (config.max_evaluations - evaluations).min(n);
            let mut offspring: Vec<P::Individual> = Vec::with_capacity(batch + 1);
            while offspring.len() < batch {
                let p1 = tournament(&annotations, config.tournament_size, &mut rng);
                let p2 = tournament(&annotations, config.tournament_size, &mut rng);

                let (c1, c2) = problem.crossover(&population[p1], &population[p2], &mut rng);
                for mut child in [c1, c2] {
                    if offspring.len() >= batch {
                        break;
                    }
                    problem.mutate(&mut child, &mut rng);
                    offspring.push(child);
                }
            }

            evaluate_population(problem, &mut offspring, config.parallel)?;
            evaluations += offspring.len();

            population.extend(offspring);
            (population, annotations) = survive(population, n);
            generations += 1;

            problem.on_generation(generations, evaluations);
        }

        Ok(Nsga2Result {
            population,
            annotations,
            generations,
            evaluations,
            cancelled,
        })
    }
}

/// Evaluate all individuals, stopping at the first error.
fn evaluate_population<P: Nsga2Problem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) -> Result<()> {
    let evaluate_one = |ind: &mut P::Individual| -> Result<()> {
        let objectives = problem.evaluate(ind)?;
        ind.set_objectives(objectives);
        Ok(())
    };

    #[cfg(feature = "parallel")]
    {
        if parallel {
            return population.par_iter_mut().try_for_each(evaluate_one);
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    population.iter_mut().try_for_each(evaluate_one)
}

/// Environmental selection of `size` survivors, moving them out of `pool`.
fn survive<I: Individual>(pool: Vec<I>, size: usize) -> (Vec<I>, Vec<Crowded>) {
    let objectives: Vec<Objectives> = pool.iter().map(|ind| ind.objectives()).collect();
    let (survivors, annotations) = environmental_selection(&objectives, size);

    let mut slots: Vec<Option<I>> = pool.into_iter().map(Some).collect();
    let population = survivors
        .iter()
        .filter_map(|&i| slots[i].take())
        .collect();
    (population, annotations)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::multi_objective::dominates;
    use crate::ga::operators::{bit_flip_mutation, pruning_crossover, random_mask};
    use rand::Rng;

    // ---- Leading ones vs. total ones ----
    //
    // f0 = -(leading ones), f1 = ones. The front is the masks 1..10 with
    // k leading ones followed by zeros.

    #[derive(Clone, Debug)]
    struct Bits {
        bits: Vec<bool>,
        objectives: Objectives,
    }

    impl Individual for Bits {
        fn objectives(&self) -> Objectives {
            self.objectives
        }
        fn set_objectives(&mut self, o: Objectives) {
            self.objectives = o;
        }
    }

    struct CountingProblem {
        n: usize,
    }

    impl Nsga2Problem for CountingProblem {
        type Individual = Bits;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Bits {
            Bits {
                bits: random_mask(self.n, rng),
                objectives: crate::ga::UNEVALUATED,
            }
        }

        fn evaluate(&self, ind: &Bits) -> Result<Objectives> {
            let ones = ind.bits.iter().filter(|&&b| b).count() as f64;
            let lead = ind.bits.iter().take_while(|&&b| b).count() as f64;
            Ok([-lead, ones])
        }

        fn crossover<R: Rng>(&self, p1: &Bits, p2: &Bits, rng: &mut R) -> (Bits, Bits) {
            let (a, b) = pruning_crossover(&p1.bits, &p2.bits, 0.9, rng);
            (
                Bits { bits: a, objectives: crate::ga::UNEVALUATED },
                Bits { bits: b, objectives: crate::ga::UNEVALUATED },
            )
        }

        fn mutate<R: Rng>(&self, ind: &mut Bits, rng: &mut R) {
            bit_flip_mutation(&mut ind.bits, 1.0, rng);
        }
    }

    struct FailingProblem;

    impl Nsga2Problem for FailingProblem {
        type Individual = Bits;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Bits {
            Bits {
                bits: random_mask(4, rng),
                objectives: crate::ga::UNEVALUATED,
            }
        }

        fn evaluate(&self, _ind: &Bits) -> Result<Objectives> {
            Err(Error::InvalidInput("boom".into()))
        }
    }

    fn config(pop: usize, evals: usize) -> Nsga2Config {
        Nsga2Config::default()
            .with_population_size(pop)
            .with_max_evaluations(evals)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_population_size_and_budget() {
        let problem = CountingProblem { n: 12 };
        let result = Nsga2Runner::run(&problem, &config(10, 205)).unwrap();
        assert_eq!(result.population.len(), 10);
        assert_eq!(result.annotations.len(), 10);
        assert_eq!(result.evaluations, 205);
        // 10 initial + 19 full batches + one batch of 5
        assert_eq!(result.generations, 20);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_budget_below_population_evaluates_initial_only() {
        let problem = CountingProblem { n: 6 };
        let result = Nsga2Runner::run(&problem, &config(8, 3)).unwrap();
        assert_eq!(result.population.len(), 8);
        assert_eq!(result.evaluations, 8);
        assert_eq!(result.generations, 0);
    }

    #[test]
    fn test_front_members_are_mutually_non_dominated() {
        let problem = CountingProblem { n: 10 };
        let result = Nsga2Runner::run(&problem, &config(20, 2000)).unwrap();
        let front = result.pareto_front();
        assert!(!front.is_empty());
        for a in &front {
            for b in &front {
                assert!(!dominates(&a.objectives, &b.objectives));
            }
        }
        // Nothing in the population dominates a front member.
        for a in &front {
            for b in &result.population {
                assert!(!dominates(&b.objectives, &a.objectives));
            }
        }
    }

    #[test]
    fn test_search_improves_on_initial_population() {
        let problem = CountingProblem { n: 10 };
        let result = Nsga2Runner::run(&problem, &config(20, 4000)).unwrap();
        // Random masks rarely start with more than two leading ones.
        let best_lead = result
            .population
            .iter()
            .map(|i| i.objectives[0])
            .fold(f64::INFINITY, f64::min);
        assert!(best_lead <= -5.0, "best lead {best_lead}");
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let problem = CountingProblem { n: 10 };
        let a = Nsga2Runner::run(&problem, &config(12, 600)).unwrap();
        let b = Nsga2Runner::run(&problem, &config(12, 600)).unwrap();
        let bits_a: Vec<_> = a.population.iter().map(|i| i.bits.clone()).collect();
        let bits_b: Vec<_> = b.population.iter().map(|i| i.bits.clone()).collect();
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let problem = CountingProblem { n: 10 };
        let seq = Nsga2Runner::run(&problem, &config(12, 600)).unwrap();
        let par = Nsga2Runner::run(&problem, &config(12, 600).with_parallel(true)).unwrap();
        let bits = |r: &Nsga2Result<Bits>| -> Vec<Vec<bool>> {
            r.population.iter().map(|i| i.bits.clone()).collect()
        };
        assert_eq!(bits(&seq), bits(&par));
    }

    #[test]
    fn test_parallel_flag_evaluates_everyone() {
        // Holds with or without the `parallel` feature.
        let problem = CountingProblem { n: 8 };
        let mut population: Vec<Bits> = (0..16)
            .map(|i| Bits {
                bits: (0..8).map(|b| (i >> (b % 4)) & 1 == 1).collect(),
                objectives: crate::ga::UNEVALUATED,
            })
            .collect();
        evaluate_population(&problem, &mut population, true).unwrap();
        assert!(population
            .iter()
            .all(|ind| ind.objectives() != crate::ga::UNEVALUATED));
    }

    #[test]
    fn test_evaluation_error_aborts() {
        let err = Nsga2Runner::run(&FailingProblem, &config(4, 100)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let problem = CountingProblem { n: 4 };
        let err = Nsga2Runner::run(&problem, &config(1, 100)).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_cancellation_before_first_generation() {
        let problem = CountingProblem { n: 8 };
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            Nsga2Runner::run_with_cancel(&problem, &config(6, 10_000), Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.evaluations, 6);
        assert_eq!(result.population.len(), 6);
    }
}
