//! Bit-vector genetic operators for subset encodings.
//!
//! A chromosome is a `[bool]` mask over `n` items; `true` means the item is
//! part of the subset. Every operator here preserves the non-empty
//! invariant: its output always selects at least one item.
//!
//! # Initialization
//!
//! - [`random_mask`]: independent fair coin per bit, then repaired
//! - [`random_subset`]: exactly `k` distinct items by rejection sampling
//!
//! # Crossover
//!
//! - [`single_point_crossover`]: swap tails after a uniform cut point
//! - [`pruning_crossover`]: probabilistic single-point crossover followed
//!   by an unconditional repair of both children
//!
//! # Mutation
//!
//! - [`bit_flip_mutation`]: per-bit flips with probability `rate / n`
//!
//! # References
//!
//! - Bäck, Fogel & Michalewicz (1997), *Handbook of Evolutionary Computation*, C3.2–C3.3

use rand::Rng;

// ============================================================================
// Repair
// ============================================================================

/// Forces exactly one uniformly chosen bit to `true` if the mask is empty.
///
/// Returns `true` when a repair happened. Empty slices are left alone.
pub fn repair_nonempty<R: Rng>(mask: &mut [bool], rng: &mut R) -> bool {
    if mask.is_empty() || mask.iter().any(|&b| b) {
        return false;
    }
    let i = rng.random_range(0..mask.len());
    mask[i] = true;
    true
}

/// Number of `true` bits.
pub fn cardinality(mask: &[bool]) -> usize {
    mask.iter().filter(|&&b| b).count()
}

// ============================================================================
// Initialization
// ============================================================================

/// Uniformly random mask (each bit `true` with probability 0.5), repaired
/// to be non-empty.
pub fn random_mask<R: Rng>(n: usize, rng: &mut R) -> Vec<bool> {
    let mut mask: Vec<bool> = (0..n).map(|_| rng.random_bool(0.5)).collect();
    repair_nonempty(&mut mask, rng);
    mask
}

/// Mask selecting exactly `k` distinct items out of `n`, uniformly.
///
/// Items are drawn uniformly and redrawn when already chosen.
///
/// # Panics
/// Panics if `k > n`.
pub fn random_subset<R: Rng>(n: usize, k: usize, rng: &mut R) -> Vec<bool> {
    assert!(k <= n, "cannot choose {k} distinct items out of {n}");
    let mut mask = vec![false; n];
    let mut chosen = 0;
    while chosen < k {
        let i = rng.random_range(0..n);
        if !mask[i] {
            mask[i] = true;
            chosen += 1;
        }
    }
    mask
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover.
///
/// Picks a cut point `c` in `1..n` and exchanges the tails `[c, n)`.
/// Masks shorter than two bits are returned unchanged.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn single_point_crossover<R: Rng>(
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();
    if n >= 2 {
        let cut = rng.random_range(1..n);
        child1[cut..].copy_from_slice(&parent2[cut..]);
        child2[cut..].copy_from_slice(&parent1[cut..]);
    }
    (child1, child2)
}

/// Crossover with repair.
///
/// With probability `probability` the parents are recombined by
/// [`single_point_crossover`]; otherwise they are copied. Both children are
/// then repaired with [`repair_nonempty`] regardless of which branch ran.
///
/// # Panics
/// Panics if parents have different lengths.
///
/// # Example
///
/// ```
/// use bestsub::ga::operators::pruning_crossover;
/// use bestsub::random::create_rng;
///
/// let mut rng = create_rng(3);
/// let (c1, c2) = pruning_crossover(&[true, false, false], &[false, false, false], 1.0, &mut rng);
/// assert!(c1.iter().any(|&b| b));
/// assert!(c2.iter().any(|&b| b));
/// ```
pub fn pruning_crossover<R: Rng>(
    parent1: &[bool],
    parent2: &[bool],
    probability: f64,
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    let (mut child1, mut child2) = if rng.random_bool(probability.clamp(0.0, 1.0)) {
        single_point_crossover(parent1, parent2, rng)
    } else {
        (parent1.to_vec(), parent2.to_vec())
    };
    repair_nonempty(&mut child1, rng);
    repair_nonempty(&mut child2, rng);
    (child1, child2)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Bit-flip mutation.
///
/// Each bit flips independently with probability `min(rate / n, 1)`, so
/// `rate` is the expected number of flips per chromosome. The result is
/// repaired with [`repair_nonempty`].
pub fn bit_flip_mutation<R: Rng>(mask: &mut [bool], rate: f64, rng: &mut R) {
    let n = mask.len();
    if n == 0 {
        return;
    }
    let p = (rate / n as f64).clamp(0.0, 1.0);
    for bit in mask.iter_mut() {
        if rng.random_bool(p) {
            *bit = !*bit;
        }
    }
    repair_nonempty(mask, rng);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_repair_sets_exactly_one_bit() {
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let mut mask = vec![false; 6];
            assert!(repair_nonempty(&mut mask, &mut rng));
            assert_eq!(cardinality(&mask), 1);
        }
    }

    #[test]
    fn test_repair_leaves_nonempty_alone() {
        let mut rng = create_rng(42);
        let mut mask = vec![false, true, false];
        assert!(!repair_nonempty(&mut mask, &mut rng));
        assert_eq!(mask, vec![false, true, false]);
    }

    #[test]
    fn test_random_subset_sizes() {
        let mut rng = create_rng(42);
        for k in 0..=8 {
            let mask = random_subset(8, k, &mut rng);
            assert_eq!(mask.len(), 8);
            assert_eq!(cardinality(&mask), k);
        }
    }

    #[test]
    fn test_single_point_preserves_column_multiset() {
        let mut rng = create_rng(9);
        let p1 = vec![true, true, true, true, true];
        let p2 = vec![false, false, false, false, false];
        for _ in 0..50 {
            let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng);
            for i in 0..5 {
                assert_ne!(c1[i], c2[i]);
            }
            // Cut is never at 0, so the head always comes from the own parent.
            assert!(c1[0]);
            assert!(!c2[0]);
            assert!(!c1[4]);
        }
    }

    #[test]
    fn test_crossover_probability_zero_copies_parents() {
        let mut rng = create_rng(1);
        let p1 = vec![true, false, true, false];
        let p2 = vec![false, true, false, true];
        let (c1, c2) = pruning_crossover(&p1, &p2, 0.0, &mut rng);
        assert_eq!(c1, p1);
        assert_eq!(c2, p2);
    }

    #[test]
    fn test_crossover_repairs_even_without_recombination() {
        let mut rng = create_rng(1);
        let empty = vec![false; 4];
        let (c1, c2) = pruning_crossover(&empty, &empty, 0.0, &mut rng);
        assert_eq!(cardinality(&c1), 1);
        assert_eq!(cardinality(&c2), 1);
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let mut rng = create_rng(5);
        let mut mask = vec![true, false, true];
        bit_flip_mutation(&mut mask, 0.0, &mut rng);
        assert_eq!(mask, vec![true, false, true]);
    }

    #[test]
    fn test_mutation_rate_n_flips_everything() {
        let mut rng = create_rng(5);
        let mut mask = vec![true, false, true, false];
        bit_flip_mutation(&mut mask, 4.0, &mut rng);
        assert_eq!(mask, vec![false, true, false, true]);
    }

    #[test]
    fn test_mutation_expected_flips() {
        let mut rng = create_rng(42);
        let n = 50;
        let trials = 2000;
        let mut flips = 0usize;
        for _ in 0..trials {
            let mut mask = vec![true; n];
            bit_flip_mutation(&mut mask, 1.0, &mut rng);
            flips += n - cardinality(&mask);
        }
        let mean = flips as f64 / trials as f64;
        assert!((mean - 1.0).abs() < 0.15, "mean flips {mean}");
    }

    proptest! {
        #[test]
        fn prop_random_mask_nonempty(n in 1usize..64, seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let mask = random_mask(n, &mut rng);
            prop_assert_eq!(mask.len(), n);
            prop_assert!(cardinality(&mask) >= 1);
        }

        #[test]
        fn prop_crossover_children_nonempty(
            p1 in proptest::collection::vec(any::<bool>(), 1..40),
            seed in any::<u64>(),
            probability in 0.0f64..1.0,
        ) {
            let mut rng = create_rng(seed);
            let p2: Vec<bool> = p1.iter().map(|b| !b).collect();
            let (c1, c2) = pruning_crossover(&p1, &p2, probability, &mut rng);
            prop_assert!(cardinality(&c1) >= 1);
            prop_assert!(cardinality(&c2) >= 1);
            prop_assert_eq!(c1.len(), p1.len());
        }

        #[test]
        fn prop_mutation_keeps_nonempty(
            mask in proptest::collection::vec(any::<bool>(), 1..40),
            rate in 0.0f64..10.0,
            seed in any::<u64>(),
        ) {
            let mut mask = mask;
            let mut rng = create_rng(seed);
            let n = mask.len();
            bit_flip_mutation(&mut mask, rate, &mut rng);
            prop_assert_eq!(mask.len(), n);
            prop_assert!(cardinality(&mask) >= 1);
        }
    }
}
