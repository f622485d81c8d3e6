//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::{Crossover, Mutation};
use super::selection::Selection;
use crate::error::GaError;

/// Consecutive non-improving generations after which a run stops.
///
/// The run ends once the stagnation counter *exceeds* this value. This is a
/// fixed property of the algorithm, not a tunable.
pub const STAGNATION_LIMIT: usize = 200;

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, operator choice, operator rates, the
/// generation cap, and parallelism.
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::{Crossover, GaConfig, Mutation, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_crossover(Crossover::Uniform)
///     .with_mutation(Mutation::Inversion)
///     .with_selection(Selection::Tournament(5))
///     .with_mutation_rate(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, both parents are copied unchanged.
    pub crossover_rate: f64,

    /// Probability of mutating each offspring independently (0.0–1.0).
    pub mutation_rate: f64,

    /// Crossover strategy.
    pub crossover: Crossover,

    /// Mutation strategy.
    pub mutation: Mutation,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Whether to evaluate offspring in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            selection: Selection::default(),
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate. Out-of-range values fail [`validate`](Self::validate).
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate. Out-of-range values fail [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, op: Crossover) -> Self {
        self.crossover = op;
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation(mut self, op: Mutation) -> Self {
        self.mutation = op;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the tournament size.
    ///
    /// Keeps a population-wide tournament population-wide; any other
    /// strategy becomes `Tournament(k)`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        let selection = match self.selection {
            Selection::TournamentPopulation(_) => Selection::TournamentPopulation(k),
            _ => Selection::Tournament(k),
        };
        self.with_selection(selection)
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 {
            return Err(GaError::InvalidPopulationSize(self.population_size));
        }
        if self.max_generations == 0 {
            return Err(GaError::InvalidMaxGenerations);
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        self.selection.validate()
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), GaError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GaError::InvalidRate { name, value })
    }
}
