//! Genetic Algorithm engine for integer-vector assignment problems.
//!
//! A candidate solution is a fixed-length vector of integers scored by its
//! total absolute deviation from an [`Instance`](crate::Instance) target.
//! The engine evolves a population with interchangeable selection,
//! crossover, and mutation strategies, keeps the best individual alive
//! through elitism, and stops on a generation cap or after a long run of
//! non-improving generations.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, operators)
//! - [`GaEngine`]: Stateful loop with `initialize` / `step` / `run`
//! - [`GaRunner`]: One-shot and repeated runs
//! - [`RunResult`]: Best solution, timing, and per-generation history
//! - [`RunSummary`]: Statistics across repeated runs
//!
//! # Submodules
//!
//! - [`operators`]: One-point and uniform crossover; swap, inversion, and random-reset mutation
//! - [`selection`]: Tournament, population-wide tournament, and roulette selection
//! - [`fitness`]: Cost and fitness evaluation
//! - [`diversity`]: Sampled Hamming-distance diversity
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod diversity;
pub mod fitness;
pub mod operators;
mod runner;
pub mod selection;
mod summary;
mod types;

pub use config::{GaConfig, STAGNATION_LIMIT};
pub use operators::{Crossover, Mutation};
pub use runner::{
    EngineState, GaEngine, GaRunner, GenerationStats, History, RunResult, TerminationReason,
};
pub use selection::Selection;
pub use summary::RunSummary;
pub use types::Individual;
