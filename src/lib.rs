//! Generational genetic algorithm for fixed-length integer assignment problems.
//!
//! A problem [`Instance`] is a target vector; a candidate solution is an
//! integer vector of the same length whose cost is its total absolute
//! deviation from the target. The [`ga`] module evolves a population of such
//! vectors toward cost 0.
//!
//! ```
//! use u_evolve::{ga::{GaConfig, GaRunner}, Instance};
//!
//! let instance: Instance = "4\n0 0 0 0".parse().unwrap();
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_max_generations(200)
//!     .with_seed(1);
//! let result = GaRunner::run(&instance, &config).unwrap();
//! assert_eq!(result.best_cost, 0);
//! ```
//!
//! # Architecture
//!
//! This crate sits at Layer 2 (Algorithms) in the U-Engine ecosystem. It
//! never touches files or the terminal: instance loading, batch reporting,
//! and plotting consume [`ga::RunResult`] from the outside.

pub mod error;
pub mod ga;
pub mod instance;
pub mod random;

pub use error::GaError;
pub use instance::{Gene, Instance};
