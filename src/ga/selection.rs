//! Parent selection for NSGA-II.
//!
//! Parents are chosen by tournament under the crowded-comparison order:
//! lower Pareto rank wins, ties go to the larger crowding distance, and a
//! full tie is settled by a fair coin.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Deb et al. (2002), crowded-comparison operator

use super::multi_objective::Crowded;
use rand::Rng;
use std::cmp::Ordering;

/// Tournament selection over a ranked population.
///
/// Draws `k` contestants uniformly at random (with replacement) and returns
/// the index of the winner. `k = 2` is the classic binary tournament.
///
/// # Panics
/// Panics if `annotations` is empty.
pub fn tournament<R: Rng>(annotations: &[Crowded], k: usize, rng: &mut R) -> usize {
    assert!(
        !annotations.is_empty(),
        "cannot select from empty population"
    );

    let n = annotations.len();
    let mut best = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let challenger = rng.random_range(0..n);
        match annotations[challenger].crowded_cmp(&annotations[best]) {
            Ordering::Less => best = challenger,
            Ordering::Equal if rng.random_bool(0.5) => best = challenger,
            _ => {}
        }
    }
    best
}
