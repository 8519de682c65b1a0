//! Pareto ranking utilities (NSGA-II).
//!
//! # Algorithms
//!
//! - [`dominates`]: Pareto dominance under minimization
//! - [`non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`]: Crowding distance assignment for diversity preservation
//! - [`environmental_selection`]: Front-by-front survivor selection with
//!   crowding-based truncation of the last admitted front
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use std::cmp::Ordering;

/// Rank and crowding annotation for one member of a ranked population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crowded {
    /// Pareto rank (0 = non-dominated).
    pub rank: usize,

    /// Crowding distance within the member's front.
    pub distance: f64,
}

impl Crowded {
    /// Crowded-comparison order: lower rank first, then larger distance.
    ///
    /// `Ordering::Less` means `self` is preferred over `other`.
    pub fn crowded_cmp(&self, other: &Crowded) -> Ordering {
        self.rank.cmp(&other.rank).then_with(|| {
            other
                .distance
                .partial_cmp(&self.distance)
                .unwrap_or(Ordering::Equal)
        })
    }
}

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Returns `true` if `a` Pareto-dominates `b` (all objectives minimized).
///
/// `a` dominates `b` iff it is no worse in every objective and strictly
/// better in at least one. Equal vectors do not dominate each other.
///
/// ```
/// use bestsub::ga::multi_objective::dominates;
///
/// assert!(dominates(&[0.1, 2.0], &[0.2, 2.0]));
/// assert!(!dominates(&[0.1, 2.0], &[0.1, 2.0]));
/// ```
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (&va, &vb) in a.iter().zip(b) {
        if va > vb {
            return false;
        }
        if va < vb {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Fast non-dominated sorting.
///
/// Assigns a Pareto rank to each solution based on dominance relationships.
/// All objectives are **minimized**: lower values are better.
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of solutions
///
/// # Panics
///
/// Panics if `objectives` is empty.
///
/// # Example
///
/// ```
/// use bestsub::ga::multi_objective::non_dominated_sort;
///
/// let objectives = vec![
///     [-0.9, 5.0], // A
///     [-0.7, 3.0], // B
///     [-0.4, 1.0], // C
///     [-0.6, 4.0], // D: dominated by B
/// ];
///
/// let result = non_dominated_sort(&objectives);
///
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// assert_eq!(result.fronts[1], vec![3]);
/// ```
pub fn non_dominated_sort<O: AsRef<[f64]>>(objectives: &[O]) -> NondominatedSortResult {
    let n = objectives.len();
    assert!(n > 0, "objectives must not be empty");

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (objectives[i].as_ref(), objectives[j].as_ref());
            if dominates(a, b) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if dominates(b, a) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut fronts = Vec::new();
    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len() + 1;
                    next.push(j);
                }
            }
        }
        fronts.push(current);
        current = next;
    }

    NondominatedSortResult { ranks, fronts }
}

/// Crowding distance assignment for diversity preservation.
///
/// Higher distance means the solution is more isolated in objective space.
/// For each objective the solutions are sorted, the two boundary solutions
/// receive `f64::INFINITY`, and every interior solution accumulates the gap
/// between its neighbours normalized by the objective's range.
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use bestsub::ga::multi_objective::crowding_distance;
///
/// let distances = crowding_distance(&[[1.0, 5.0], [3.0, 3.0], [5.0, 1.0]]);
///
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// assert!((distances[1] - 2.0).abs() < 1e-12);
/// ```
pub fn crowding_distance<O: AsRef<[f64]>>(objectives: &[O]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].as_ref().len();
    let value = |i: usize, k: usize| objectives[i].as_ref()[k];
    let mut distances = vec![0.0f64; n];
    let mut order: Vec<usize> = (0..n).collect();

    for k in 0..m {
        order.sort_by(|&a, &b| {
            value(a, k)
                .partial_cmp(&value(b, k))
                .unwrap_or(Ordering::Equal)
        });

        distances[order[0]] = f64::INFINITY;
        distances[order[n - 1]] = f64::INFINITY;

        let range = value(order[n - 1], k) - value(order[0], k);
        if range > 0.0 {
            for w in order.windows(3) {
                distances[w[1]] += (value(w[2], k) - value(w[0], k)) / range;
            }
        }
    }

    distances
}

/// Selects `target_size` survivors from a pool.
///
/// Whole fronts are admitted in rank order while they fit; the first front
/// that does not fit is truncated by descending crowding distance.
///
/// Returns the indices of the survivors (in admission order) together with
/// their rank/crowding annotation. When `target_size` is at least the pool
/// size every member survives.
///
/// # Panics
///
/// Panics if `objectives` is empty.
pub fn environmental_selection<O: AsRef<[f64]>>(
    objectives: &[O],
    target_size: usize,
) -> (Vec<usize>, Vec<Crowded>) {
    let sorted = non_dominated_sort(objectives);
    let mut survivors = Vec::with_capacity(target_size);
    let mut annotations = Vec::with_capacity(target_size);

    for (rank, front) in sorted.fronts.iter().enumerate() {
        let remaining = target_size - survivors.len();
        if remaining == 0 {
            break;
        }

        let front_objectives: Vec<&[f64]> = front.iter().map(|&i| objectives[i].as_ref()).collect();
        let distances = crowding_distance(&front_objectives);
        let mut members: Vec<(usize, f64)> = front.iter().copied().zip(distances).collect();

        if members.len() > remaining {
            members.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
            members.truncate(remaining);
        }

        for (index, distance) in members {
            survivors.push(index);
            annotations.push(Crowded { rank, distance });
        }
    }

    (survivors, annotations)
}

// ============================================================================
// Tests
// ============================================================================
