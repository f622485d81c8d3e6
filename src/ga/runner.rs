//! GA evolutionary loop execution.
//!
//! [`GaEngine`] owns the population state and drives the generational loop:
//! initialization → selection → crossover → mutation → evaluation →
//! elitism → statistics → repeat, until the generation cap or stagnation.
//! [`GaRunner`] wraps it for one-shot and repeated runs.

use super::config::{GaConfig, STAGNATION_LIMIT};
use super::diversity::diversity;
use super::fitness::evaluate_all;
use super::summary::RunSummary;
use super::types::{best_index, Individual};
use crate::error::GaError;
use crate::instance::{Gene, Instance};
use crate::random::rng_from_option;
use rand::rngs::StdRng;
use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TerminationReason {
    /// `max_generations` generations were executed.
    MaxGenerations,
    /// The incumbent did not improve for more than [`STAGNATION_LIMIT`] generations.
    Stagnation,
    /// The cancellation flag was raised between generations.
    Cancelled,
}

/// Lifecycle of a [`GaEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, no population yet.
    Created,
    /// Generation 0 exists.
    Initialized,
    /// Inside [`GaEngine::run`].
    Running,
    /// The run finished.
    Terminated(TerminationReason),
}

/// Statistics of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation number (0 = initial population).
    pub generation: usize,
    /// Fitness of the incumbent best after this generation.
    pub best_fitness: f64,
    /// Mean fitness of this generation's population.
    pub avg_fitness: f64,
    /// Cost of the incumbent best after this generation.
    pub best_cost: u64,
    /// Sampled diversity of this generation's population.
    pub diversity: f64,
    /// Whether a strictly better individual was found in this generation.
    pub improved: bool,
}

/// Per-generation statistics, indexed by generation number from 0.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History {
    /// Incumbent best fitness.
    pub best_fitness: Vec<f64>,
    /// Population mean fitness.
    pub avg_fitness: Vec<f64>,
    /// Incumbent best cost.
    pub best_cost: Vec<u64>,
    /// Sampled population diversity.
    pub diversity: Vec<f64>,
}

impl History {
    fn push(&mut self, stats: &GenerationStats) {
        self.best_fitness.push(stats.best_fitness);
        self.avg_fitness.push(stats.avg_fitness);
        self.best_cost.push(stats.best_cost);
        self.diversity.push(stats.diversity);
    }

    fn clear(&mut self) {
        self.best_fitness.clear();
        self.avg_fitness.clear();
        self.best_cost.clear();
        self.diversity.clear();
    }

    /// Number of recorded generations, including generation 0.
    pub fn len(&self) -> usize {
        self.best_cost.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.best_cost.is_empty()
    }
}

/// Result of a GA optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// The best individual found during the entire run.
    pub best: Individual,

    /// Cost of `best`.
    pub best_cost: u64,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Wall-clock time of the run, initialization included.
    pub elapsed: Duration,

    /// Number of generations executed (generation 0 not counted).
    pub generations: usize,

    /// Why the run stopped.
    pub termination: TerminationReason,

    /// Statistics for generations `0..=generations`.
    pub history: History,
}

impl RunResult {
    /// Chromosome of the best individual.
    pub fn best_chromosome(&self) -> &[Gene] {
        self.best.chromosome()
    }

    /// Whether the run stopped on stagnation.
    pub fn stagnated(&self) -> bool {
        self.termination == TerminationReason::Stagnation
    }
}

/// Stateful generational GA over an [`Instance`].
///
/// ```
/// use u_evolve::{ga::{GaConfig, GaEngine}, Instance};
///
/// let instance: Instance = "3\n2 0 1".parse().unwrap();
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(50)
///     .with_seed(7);
/// let mut engine = GaEngine::new(&instance, config).unwrap();
/// let result = engine.run().unwrap();
/// assert_eq!(result.history.len(), result.generations + 1);
/// ```
#[derive(Debug)]
pub struct GaEngine<'a> {
    instance: &'a Instance,
    config: GaConfig,
    rng: StdRng,
    genes: RangeInclusive<Gene>,
    population: Vec<Individual>,
    best: Option<Individual>,
    generation: usize,
    stagnation: usize,
    history: History,
    state: EngineState,
}

impl<'a> GaEngine<'a> {
    /// Creates an engine after validating `config` against `instance`.
    pub fn new(instance: &'a Instance, config: GaConfig) -> Result<Self, GaError> {
        config.validate()?;

        let min_len = config.mutation.min_length();
        if config.mutation_rate > 0.0 && instance.size() < min_len {
            return Err(GaError::ChromosomeTooShort {
                len: instance.size(),
                min: min_len,
            });
        }

        Ok(Self {
            instance,
            rng: rng_from_option(config.seed),
            genes: 0..=instance.max_value(),
            population: Vec::with_capacity(config.population_size),
            best: None,
            generation: 0,
            stagnation: 0,
            history: History::default(),
            state: EngineState::Created,
            config,
        })
    }

    /// Builds and evaluates generation 0 and records its statistics.
    ///
    /// Calling it again restarts the run from a fresh population.
    pub fn initialize(&mut self) -> Result<(), GaError> {
        let size = self.instance.size();
        let mut population: Vec<Individual> = (0..self.config.population_size)
            .map(|_| {
                let chromosome = (0..size)
                    .map(|_| self.rng.random_range(self.genes.clone()))
                    .collect();
                Individual::new(chromosome)
            })
            .collect();
        evaluate_all(&mut population, self.instance, self.config.parallel)?;

        let best = population[best_index(&population)?].clone();
        self.population = population;
        self.generation = 0;
        self.stagnation = 0;
        self.history.clear();

        let stats = self.generation_stats(&best, false)?;
        self.history.push(&stats);
        self.best = Some(best);
        self.state = EngineState::Initialized;

        debug!(
            best_cost = stats.best_cost,
            diversity = stats.diversity,
            "initial population evaluated"
        );
        Ok(())
    }

    /// Runs one generation and returns its statistics.
    pub fn step(&mut self) -> Result<GenerationStats, GaError> {
        let best = self.best.as_ref().ok_or(GaError::NotInitialized)?;
        let pop_size = self.config.population_size;
        let selection = self.config.selection;

        // The elite takes one slot; offspring come in pairs.
        let offspring_needed = pop_size - 1;
        let mut offspring: Vec<Individual> = Vec::with_capacity(offspring_needed + 1);

        let pool = if selection.uses_pool() {
            Some(selection.select_pool(&self.population, &mut self.rng)?)
        } else {
            None
        };
        let mut cursor = 0usize;

        while offspring.len() < offspring_needed {
            let (parent1, parent2) = match &pool {
                Some(pool) => {
                    let pair = (pool[cursor % pool.len()], pool[(cursor + 1) % pool.len()]);
                    cursor += 2;
                    pair
                }
                None => (
                    selection.select(&self.population, &mut self.rng)?,
                    selection.select(&self.population, &mut self.rng)?,
                ),
            };

            let (mut child1, mut child2) = if self.rng.random_bool(self.config.crossover_rate) {
                self.config.crossover.apply(
                    parent1.chromosome(),
                    parent2.chromosome(),
                    &mut self.rng,
                )?
            } else {
                (parent1.chromosome().to_vec(), parent2.chromosome().to_vec())
            };

            if self.rng.random_bool(self.config.mutation_rate) {
                child1 = self.config.mutation.apply(&child1, &self.genes, &mut self.rng)?;
            }
            if self.rng.random_bool(self.config.mutation_rate) {
                child2 = self.config.mutation.apply(&child2, &self.genes, &mut self.rng)?;
            }

            offspring.push(Individual::new(child1));
            offspring.push(Individual::new(child2));
        }

        offspring.truncate(offspring_needed);
        evaluate_all(&mut offspring, self.instance, self.config.parallel)?;

        let mut next_gen = Vec::with_capacity(pop_size);
        next_gen.push(best.clone());
        next_gen.extend(offspring);
        drop(pool);

        // Strict improvement only: ties keep the incumbent.
        let gen_best = &next_gen[best_index(&next_gen)?];
        let improved = gen_best.try_fitness()? > best.try_fitness()?;
        let new_best = if improved {
            self.stagnation = 0;
            Some(gen_best.clone())
        } else {
            self.stagnation += 1;
            None
        };

        self.population = next_gen;
        if let Some(new_best) = new_best {
            debug!(
                generation = self.generation + 1,
                best_cost = new_best.cost(),
                "incumbent improved"
            );
            self.best = Some(new_best);
        }
        self.generation += 1;

        let best = self.best.as_ref().ok_or(GaError::NotInitialized)?;
        let stats = self.generation_stats(best, improved)?;
        self.history.push(&stats);

        trace!(
            generation = stats.generation,
            best_cost = stats.best_cost,
            avg_fitness = stats.avg_fitness,
            diversity = stats.diversity,
            stagnation = self.stagnation,
            "generation complete"
        );
        Ok(stats)
    }

    /// Runs to termination and returns the result.
    pub fn run(&mut self) -> Result<RunResult, GaError> {
        self.run_with_cancel(None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// The flag is checked between generations; a raised flag stops the run
    /// with [`TerminationReason::Cancelled`] and the best solution so far.
    pub fn run_with_cancel(
        &mut self,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult, GaError> {
        let start = Instant::now();
        info!(
            population_size = self.config.population_size,
            max_generations = self.config.max_generations,
            crossover = %self.config.crossover,
            mutation = %self.config.mutation,
            selection = %self.config.selection,
            genes = self.instance.size(),
            "starting GA run"
        );

        if self.best.is_none() {
            self.initialize()?;
        }
        self.state = EngineState::Running;

        let termination = loop {
            if self.generation >= self.config.max_generations {
                break TerminationReason::MaxGenerations;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break TerminationReason::Cancelled;
                }
            }

            self.step()?;

            if self.stagnation > STAGNATION_LIMIT {
                break TerminationReason::Stagnation;
            }
        };

        self.state = EngineState::Terminated(termination);
        let elapsed = start.elapsed();
        let best = self.best.clone().ok_or(GaError::NotInitialized)?;

        info!(
            ?termination,
            generations = self.generation,
            best_cost = best.cost(),
            ?elapsed,
            "GA run finished"
        );

        Ok(RunResult {
            best_cost: best.try_cost()?,
            best_fitness: best.try_fitness()?,
            best,
            elapsed,
            generations: self.generation,
            termination,
            history: self.history.clone(),
        })
    }

    fn generation_stats(
        &self,
        best: &Individual,
        improved: bool,
    ) -> Result<GenerationStats, GaError> {
        let mut sum = 0.0;
        for ind in &self.population {
            sum += ind.try_fitness()?;
        }
        Ok(GenerationStats {
            generation: self.generation,
            best_fitness: best.try_fitness()?,
            avg_fitness: sum / self.population.len() as f64,
            best_cost: best.try_cost()?,
            diversity: diversity(&self.population),
            improved,
        })
    }

    /// Current population.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Best individual found so far.
    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    /// Number of generations executed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Consecutive generations without strict improvement.
    pub fn stagnation(&self) -> usize {
        self.stagnation
    }

    /// Statistics recorded so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The configuration in use.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Inclusive range genes are drawn from.
    pub fn gene_range(&self) -> &RangeInclusive<Gene> {
        &self.genes
    }
}

/// Executes GA runs without keeping the engine around.
///
/// # Usage
///
/// ```ignore
/// let instance: Instance = text.parse()?;
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&instance, &config)?;
/// println!("Best cost: {}", result.best_cost);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    pub fn run(instance: &Instance, config: &GaConfig) -> Result<RunResult, GaError> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    pub fn run_with_cancel(
        instance: &Instance,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult, GaError> {
        GaEngine::new(instance, config.clone())?.run_with_cancel(cancel)
    }

    /// Performs `runs` independent runs and aggregates them.
    ///
    /// When `config.seed` is set, run `i` uses `seed + i`.
    pub fn run_repeated(
        instance: &Instance,
        config: &GaConfig,
        runs: usize,
    ) -> Result<RunSummary, GaError> {
        if runs == 0 {
            return Err(GaError::InvalidRunCount);
        }
        let mut results = Vec::with_capacity(runs);
        for i in 0..runs {
            let mut run_config = config.clone();
            run_config.seed = config.seed.map(|s| s.wrapping_add(i as u64));
            let result = Self::run(instance, &run_config)?;
            debug!(
                run = i + 1,
                best_cost = result.best_cost,
                generations = result.generations,
                "repeated run finished"
            );
            results.push(result);
        }
        RunSummary::from_results(&results)
    }
}

// ============================================================================
// Tests
// ============================================================================
