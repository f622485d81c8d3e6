//! Fitness evaluation.
//!
//! Cost is the sum of absolute differences between a chromosome and the
//! instance's target vector; fitness is `1 / (1 + cost)`, so it lies in
//! `(0, 1]` and reaches 1 only at cost 0.

use super::types::Individual;
use crate::error::GaError;
use crate::instance::{Gene, Instance};

/// Computes `Σ |chromosome[i] - data[i]|`.
///
/// Fails with [`GaError::CostOverflow`] when the total exceeds `u64::MAX`.
pub fn compute_cost(chromosome: &[Gene], instance: &Instance) -> Result<u64, GaError> {
    if chromosome.len() != instance.size() {
        return Err(GaError::LengthMismatch {
            expected: instance.size(),
            actual: chromosome.len(),
        });
    }
    chromosome
        .iter()
        .zip(instance.data())
        .try_fold(0u64, |acc, (&g, &d)| acc.checked_add(g.abs_diff(d)))
        .ok_or(GaError::CostOverflow)
}

/// Maps a cost to fitness: `1 / (1 + cost)`.
pub fn fitness_from_cost(cost: u64) -> f64 {
    1.0 / (1.0 + cost as f64)
}

/// Evaluates `individual` against `instance`, storing cost and fitness.
///
/// Returns the fitness.
pub fn evaluate(individual: &mut Individual, instance: &Instance) -> Result<f64, GaError> {
    let cost = compute_cost(individual.chromosome(), instance)?;
    let fitness = fitness_from_cost(cost);
    individual.set_evaluation(cost, fitness);
    Ok(fitness)
}

/// Evaluates a batch of individuals.
///
/// Uses rayon when the `parallel` feature is enabled and `parallel` is set.
/// Evaluation is pure, so the outcome does not depend on the mode.
pub fn evaluate_all(
    population: &mut [Individual],
    instance: &Instance,
    parallel: bool,
) -> Result<(), GaError> {
    if parallel {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            return population
                .par_iter_mut()
                .try_for_each(|ind| evaluate(ind, instance).map(|_| ()));
        }
    }

    for ind in population.iter_mut() {
        evaluate(ind, instance)?;
    }
    Ok(())
}
