//! Candidate solution representation.
//!
//! An [`Individual`] owns its chromosome and, once evaluated, the cost and
//! fitness derived from it. Evaluation happens exactly once, right after the
//! chromosome is built; nothing in the engine mutates an evaluated individual.

use super::fitness;
use crate::error::GaError;
use crate::instance::{Gene, Instance};

/// A candidate solution in the GA population.
///
/// ```
/// use u_evolve::{ga::Individual, Instance};
///
/// let instance = Instance::new(vec![1, 2, 3]).unwrap();
/// let ind = Individual::evaluated(vec![1, 2, 5], &instance).unwrap();
/// assert_eq!(ind.cost(), Some(2));
/// assert_eq!(ind.fitness(), Some(1.0 / 3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    chromosome: Vec<Gene>,
    cost: Option<u64>,
    fitness: Option<f64>,
}

impl Individual {
    /// Creates an unevaluated individual.
    pub fn new(chromosome: Vec<Gene>) -> Self {
        Self {
            chromosome,
            cost: None,
            fitness: None,
        }
    }

    /// Creates an individual and evaluates it against `instance`.
    pub fn evaluated(chromosome: Vec<Gene>, instance: &Instance) -> Result<Self, GaError> {
        let mut ind = Self::new(chromosome);
        fitness::evaluate(&mut ind, instance)?;
        Ok(ind)
    }

    /// The gene sequence.
    pub fn chromosome(&self) -> &[Gene] {
        &self.chromosome
    }

    /// Consumes the individual, returning its chromosome.
    pub fn into_chromosome(self) -> Vec<Gene> {
        self.chromosome
    }

    /// Sum of absolute deviations from the target, if evaluated.
    pub fn cost(&self) -> Option<u64> {
        self.cost
    }

    /// `1 / (1 + cost)`, if evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Whether cost and fitness have been computed.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Fitness, or [`GaError::Unevaluated`].
    pub fn try_fitness(&self) -> Result<f64, GaError> {
        self.fitness.ok_or(GaError::Unevaluated)
    }

    /// Cost, or [`GaError::Unevaluated`].
    pub fn try_cost(&self) -> Result<u64, GaError> {
        self.cost.ok_or(GaError::Unevaluated)
    }

    pub(crate) fn set_evaluation(&mut self, cost: u64, fitness: f64) {
        self.cost = Some(cost);
        self.fitness = Some(fitness);
    }
}

/// Returns the index of the maximum-fitness individual.
///
/// Ties keep the first encountered.
pub(crate) fn best_index(population: &[Individual]) -> Result<usize, GaError> {
    if population.is_empty() {
        return Err(GaError::EmptyPopulation);
    }
    let mut best_idx = 0;
    let mut best_fit = population[0].try_fitness()?;
    for (i, ind) in population.iter().enumerate().skip(1) {
        let f = ind.try_fitness()?;
        if f > best_fit {
            best_fit = f;
            best_idx = i;
        }
    }
    Ok(best_idx)
}
