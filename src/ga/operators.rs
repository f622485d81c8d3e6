//! Crossover and mutation operators for integer-vector chromosomes.
//!
//! Operators never modify their inputs: crossover returns two new children,
//! mutation returns a mutated copy.
//!
//! # Crossover Operators
//!
//! - [`one_point_crossover`]: split both parents at one cut point and exchange tails
//! - [`uniform_crossover`]: independent coin flip per gene position
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: exchange two distinct positions
//! - [`inversion_mutation`]: reverse the segment `[i, j)` between two distinct positions
//! - [`random_reset_mutation`]: overwrite one position with a random value in range
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*

use crate::error::GaError;
use crate::instance::Gene;
use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

// ============================================================================
// Strategy tags
// ============================================================================

/// Crossover strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Crossover {
    /// Single cut point in `[1, len - 1]`.
    #[default]
    OnePoint,
    /// Per-gene coin flip deciding which parent feeds which child.
    Uniform,
}

impl Crossover {
    /// Recombines two parents into two children of the same length.
    pub fn apply<R: Rng>(
        &self,
        parent1: &[Gene],
        parent2: &[Gene],
        rng: &mut R,
    ) -> Result<(Vec<Gene>, Vec<Gene>), GaError> {
        match self {
            Crossover::OnePoint => one_point_crossover(parent1, parent2, rng),
            Crossover::Uniform => uniform_crossover(parent1, parent2, rng),
        }
    }

    /// Configuration name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Crossover::OnePoint => "one_point",
            Crossover::Uniform => "uniform",
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Crossover {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_point" => Ok(Crossover::OnePoint),
            "uniform" => Ok(Crossover::Uniform),
            other => Err(GaError::UnknownOperator {
                kind: "crossover",
                name: other.to_string(),
            }),
        }
    }
}

/// Mutation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Mutation {
    /// Exchange two distinct positions.
    #[default]
    Swap,
    /// Reverse a segment between two distinct positions.
    Inversion,
    /// Replace one gene with a uniform value from the gene range.
    RandomReset,
}

impl Mutation {
    /// Returns a mutated copy of `chromosome`.
    ///
    /// `genes` bounds the values drawn by [`Mutation::RandomReset`]; the
    /// other strategies ignore it.
    pub fn apply<R: Rng>(
        &self,
        chromosome: &[Gene],
        genes: &RangeInclusive<Gene>,
        rng: &mut R,
    ) -> Result<Vec<Gene>, GaError> {
        match self {
            Mutation::Swap => swap_mutation(chromosome, rng),
            Mutation::Inversion => inversion_mutation(chromosome, rng),
            Mutation::RandomReset => random_reset_mutation(chromosome, genes, rng),
        }
    }

    /// Minimum chromosome length this strategy accepts.
    pub fn min_length(&self) -> usize {
        match self {
            Mutation::Swap | Mutation::Inversion => 2,
            Mutation::RandomReset => 1,
        }
    }

    /// Configuration name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::Swap => "swap",
            Mutation::Inversion => "inversion",
            Mutation::RandomReset => "random_reset",
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mutation {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "swap" => Ok(Mutation::Swap),
            "inversion" => Ok(Mutation::Inversion),
            "random_reset" => Ok(Mutation::RandomReset),
            other => Err(GaError::UnknownOperator {
                kind: "mutation",
                name: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// One-point crossover.
///
/// Picks `cut` uniformly in `[1, len - 1]` and returns
/// `p1[..cut] ++ p2[cut..]` and `p2[..cut] ++ p1[cut..]`.
/// Single-gene parents have no valid cut and are returned as copies.
///
/// # Complexity
/// O(n)
pub fn one_point_crossover<R: Rng>(
    parent1: &[Gene],
    parent2: &[Gene],
    rng: &mut R,
) -> Result<(Vec<Gene>, Vec<Gene>), GaError> {
    check_same_length(parent1, parent2)?;
    let n = parent1.len();
    if n < 2 {
        return Ok((parent1.to_vec(), parent2.to_vec()));
    }

    let cut = rng.random_range(1..n);

    let mut child1 = Vec::with_capacity(n);
    child1.extend_from_slice(&parent1[..cut]);
    child1.extend_from_slice(&parent2[cut..]);

    let mut child2 = Vec::with_capacity(n);
    child2.extend_from_slice(&parent2[..cut]);
    child2.extend_from_slice(&parent1[cut..]);

    Ok((child1, child2))
}

/// Uniform crossover.
///
/// Flips an independent fair coin at every position: heads keeps the
/// parents' genes in place, tails sends parent1's gene to child2 and
/// parent2's gene to child1.
///
/// # Complexity
/// O(n)
pub fn uniform_crossover<R: Rng>(
    parent1: &[Gene],
    parent2: &[Gene],
    rng: &mut R,
) -> Result<(Vec<Gene>, Vec<Gene>), GaError> {
    check_same_length(parent1, parent2)?;
    let n = parent1.len();

    let mut child1 = Vec::with_capacity(n);
    let mut child2 = Vec::with_capacity(n);
    for (&g1, &g2) in parent1.iter().zip(parent2) {
        if rng.random_bool(0.5) {
            child1.push(g1);
            child2.push(g2);
        } else {
            child1.push(g2);
            child2.push(g1);
        }
    }

    Ok((child1, child2))
}

fn check_same_length(parent1: &[Gene], parent2: &[Gene]) -> Result<(), GaError> {
    if parent1.len() != parent2.len() {
        return Err(GaError::LengthMismatch {
            expected: parent1.len(),
            actual: parent2.len(),
        });
    }
    Ok(())
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: exchange two distinct random positions.
///
/// # Complexity
/// O(n) for the copy, O(1) for the move
pub fn swap_mutation<R: Rng>(chromosome: &[Gene], rng: &mut R) -> Result<Vec<Gene>, GaError> {
    let (i, j) = distinct_pair(chromosome.len(), rng)?;
    let mut child = chromosome.to_vec();
    child.swap(i, j);
    Ok(child)
}

/// Inversion mutation: pick distinct `i < j` and reverse `[i, j)`.
///
/// The upper position is exclusive, so adjacent picks leave the
/// chromosome unchanged.
///
/// # Complexity
/// O(n)
pub fn inversion_mutation<R: Rng>(
    chromosome: &[Gene],
    rng: &mut R,
) -> Result<Vec<Gene>, GaError> {
    let (a, b) = distinct_pair(chromosome.len(), rng)?;
    let (i, j) = if a < b { (a, b) } else { (b, a) };
    let mut child = chromosome.to_vec();
    child[i..j].reverse();
    Ok(child)
}

/// Random-reset mutation: replace one random gene with a value drawn
/// uniformly from `genes`.
///
/// # Complexity
/// O(n) for the copy, O(1) for the move
pub fn random_reset_mutation<R: Rng>(
    chromosome: &[Gene],
    genes: &RangeInclusive<Gene>,
    rng: &mut R,
) -> Result<Vec<Gene>, GaError> {
    if chromosome.is_empty() {
        return Err(GaError::ChromosomeTooShort { len: 0, min: 1 });
    }
    if genes.is_empty() {
        return Err(GaError::InvalidGeneRange {
            min: *genes.start(),
            max: *genes.end(),
        });
    }
    let mut child = chromosome.to_vec();
    let i = rng.random_range(0..child.len());
    child[i] = rng.random_range(genes.clone());
    Ok(child)
}

// ============================================================================
// Helpers
// ============================================================================

/// Draws two distinct indices in `0..n`, uniformly over ordered pairs.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> Result<(usize, usize), GaError> {
    if n < 2 {
        return Err(GaError::ChromosomeTooShort { len: n, min: 2 });
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    Ok((i, j))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn sorted(v: &[Gene]) -> Vec<Gene> {
        let mut v = v.to_vec();
        v.sort_unstable();
        v
    }

    // ---- One-point crossover ----

    #[test]
    fn test_one_point_children_are_prefix_suffix_splices() {
        let mut rng = create_rng(42);
        let p1 = vec![1, 2, 3, 4, 5];
        let p2 = vec![10, 20, 30, 40, 50];

        for _ in 0..100 {
            let (c1, c2) = one_point_crossover(&p1, &p2, &mut rng).unwrap();
            assert_eq!(c1.len(), 5);
            assert_eq!(c2.len(), 5);

            // Find the cut: first index where c1 takes from p2.
            let cut = (0..5).find(|&i| c1[i] == p2[i]).expect("cut exists");
            assert!((1..5).contains(&cut), "cut {cut} out of range");
            assert_eq!(&c1[..cut], &p1[..cut]);
            assert_eq!(&c1[cut..], &p2[cut..]);
            assert_eq!(&c2[..cut], &p2[..cut]);
            assert_eq!(&c2[cut..], &p1[cut..]);
        }
    }

    #[test]
    fn test_one_point_single_gene() {
        let mut rng = create_rng(42);
        let (c1, c2) = one_point_crossover(&[7], &[9], &mut rng).unwrap();
        assert_eq!(c1, vec![7]);
        assert_eq!(c2, vec![9]);
    }

    #[test]
    fn test_one_point_length_mismatch() {
        let mut rng = create_rng(42);
        let err = one_point_crossover(&[1, 2, 3], &[1, 2], &mut rng).unwrap_err();
        assert_eq!(
            err,
            GaError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    // ---- Uniform crossover ----

    #[test]
    fn test_uniform_children_are_complementary_per_position() {
        let mut rng = create_rng(7);
        let p1 = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let p2 = vec![-1, -2, -3, -4, -5, -6, -7, -8];

        for _ in 0..50 {
            let (c1, c2) = uniform_crossover(&p1, &p2, &mut rng).unwrap();
            for i in 0..p1.len() {
                let kept = c1[i] == p1[i] && c2[i] == p2[i];
                let swapped = c1[i] == p2[i] && c2[i] == p1[i];
                assert!(kept || swapped, "position {i}: {c1:?} / {c2:?}");
            }
        }
    }

    #[test]
    fn test_uniform_mixes_parents() {
        let mut rng = create_rng(11);
        let p1 = vec![0; 32];
        let p2 = vec![1; 32];
        let (c1, _) = uniform_crossover(&p1, &p2, &mut rng).unwrap();
        assert!(c1.contains(&0) && c1.contains(&1));
    }

    #[test]
    fn test_uniform_length_mismatch() {
        let mut rng = create_rng(42);
        assert!(uniform_crossover(&[1], &[1, 2], &mut rng).is_err());
    }

    #[test]
    fn test_identical_parents_yield_identical_children() {
        let mut rng = create_rng(42);
        let p = vec![4, 4, 1, 9, 0];
        for op in [Crossover::OnePoint, Crossover::Uniform] {
            let (c1, c2) = op.apply(&p, &p, &mut rng).unwrap();
            assert_eq!(c1, p);
            assert_eq!(c2, p);
        }
    }

    // ---- Swap mutation ----

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = create_rng(42);
        let chrom: Vec<Gene> = (0..10).collect();
        for _ in 0..100 {
            let child = swap_mutation(&chrom, &mut rng).unwrap();
            let diffs = chrom.iter().zip(&child).filter(|(a, b)| a != b).count();
            assert_eq!(diffs, 2);
            assert_eq!(sorted(&child), chrom);
        }
    }

    #[test]
    fn test_swap_leaves_input_untouched() {
        let mut rng = create_rng(42);
        let chrom = vec![1, 2, 3];
        let _ = swap_mutation(&chrom, &mut rng).unwrap();
        assert_eq!(chrom, vec![1, 2, 3]);
    }

    #[test]
    fn test_swap_too_short() {
        let mut rng = create_rng(42);
        assert_eq!(
            swap_mutation(&[1], &mut rng),
            Err(GaError::ChromosomeTooShort { len: 1, min: 2 })
        );
    }

    // ---- Inversion mutation ----

    #[test]
    fn test_inversion_preserves_multiset() {
        let mut rng = create_rng(42);
        let chrom = vec![5, 3, 3, 8, 1, 0, 2];
        for _ in 0..100 {
            let child = inversion_mutation(&chrom, &mut rng).unwrap();
            assert_eq!(sorted(&child), sorted(&chrom));
        }
    }

    #[test]
    fn test_inversion_reverses_a_contiguous_segment() {
        let mut rng = create_rng(3);
        let chrom: Vec<Gene> = (0..8).collect();
        let mut changed = false;
        for _ in 0..100 {
            let child = inversion_mutation(&chrom, &mut rng).unwrap();
            let first = (0..8).find(|&k| child[k] != chrom[k]);
            let last = (0..8).rev().find(|&k| child[k] != chrom[k]);
            if let (Some(i), Some(j)) = (first, last) {
                changed = true;
                let mut expected = chrom.clone();
                expected[i..=j].reverse();
                assert_eq!(child, expected);
            }
        }
        assert!(changed, "inversion should change the chromosome eventually");
    }

    #[test]
    fn test_inversion_too_short() {
        let mut rng = create_rng(42);
        assert!(inversion_mutation(&[], &mut rng).is_err());
    }

    // ---- Random-reset mutation ----

    #[test]
    fn test_random_reset_changes_at_most_one_position() {
        let mut rng = create_rng(42);
        let chrom = vec![100, 100, 100, 100];
        for _ in 0..100 {
            let child = random_reset_mutation(&chrom, &(0..=9), &mut rng).unwrap();
            let diffs: Vec<usize> = (0..4).filter(|&i| child[i] != chrom[i]).collect();
            assert_eq!(diffs.len(), 1, "exactly one gene leaves 100");
            assert!((0..=9).contains(&child[diffs[0]]));
        }
    }

    #[test]
    fn test_random_reset_single_value_range() {
        let mut rng = create_rng(42);
        let child = random_reset_mutation(&[3, 3], &(0..=0), &mut rng).unwrap();
        assert_eq!(child.iter().filter(|&&g| g == 0).count(), 1);
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn test_random_reset_rejects_empty_range() {
        let mut rng = create_rng(42);
        assert_eq!(
            random_reset_mutation(&[1], &(5..=2), &mut rng),
            Err(GaError::InvalidGeneRange { min: 5, max: 2 })
        );
    }

    // ---- Strategy tags ----

    #[test]
    fn test_names_round_trip() {
        for op in [Crossover::OnePoint, Crossover::Uniform] {
            assert_eq!(op.name().parse::<Crossover>().unwrap(), op);
        }
        for op in [Mutation::Swap, Mutation::Inversion, Mutation::RandomReset] {
            assert_eq!(op.to_string().parse::<Mutation>().unwrap(), op);
        }
        assert!(matches!(
            "two_point".parse::<Crossover>(),
            Err(GaError::UnknownOperator { kind: "crossover", .. })
        ));
    }

    #[test]
    fn test_distinct_pair() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (i, j) = distinct_pair(3, &mut rng).unwrap();
            assert_ne!(i, j);
            assert!(i < 3 && j < 3);
        }
    }
}
