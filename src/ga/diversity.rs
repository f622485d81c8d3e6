//! Sampled population diversity.
//!
//! Full pairwise Hamming distance is O(n²); the engine only needs a trend
//! indicator for reporting, so a bounded window of pairs is sampled instead.

use super::types::Individual;
use crate::instance::Gene;

/// Number of leading individuals used as comparison anchors.
const ANCHORS: usize = 20;

/// Maximum number of following individuals each anchor is compared against.
const WINDOW: usize = 10;

/// Fraction of positions at which two chromosomes differ.
///
/// Compares up to the shorter length and normalizes by the first
/// chromosome's length. Returns 0 for empty chromosomes.
pub fn hamming_fraction(a: &[Gene], b: &[Gene]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let diff = a.iter().zip(b).filter(|(x, y)| x != y).count();
    diff as f64 / a.len() as f64
}

/// Mean normalized Hamming distance over a sample of pairs.
///
/// Each of the first `min(20, n)` individuals is compared with the next
/// `min(10, n - 1)` individuals (stopping at the end of the population).
/// Returns 0 when fewer than two individuals exist.
pub fn diversity(population: &[Individual]) -> f64 {
    let n = population.len();
    if n < 2 {
        return 0.0;
    }

    let window = WINDOW.min(n - 1);
    let mut total = 0.0;
    let mut pairs = 0usize;

    for i in 0..ANCHORS.min(n) {
        let end = (i + window).min(n - 1);
        for j in (i + 1)..=end {
            total += hamming_fraction(population[i].chromosome(), population[j].chromosome());
            pairs += 1;
        }
    }

    if pairs == 0 {
        0.0
    } else {
        total / pairs as f64
    }
}
