//! Error types for the evolutionary engine.
//!
//! A single [`GaError`] enum covers configuration failures, invariant
//! violations raised by the operators, and invalid input passed to the
//! operators directly.

use thiserror::Error;

/// Errors produced by the GA engine and its operators.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GaError {
    /// Population size must be at least 1.
    #[error("population_size must be at least 1, got {0}")]
    InvalidPopulationSize(usize),

    /// A probability parameter lies outside `[0, 1]`.
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    /// Generation cap must be at least 1.
    #[error("max_generations must be at least 1")]
    InvalidMaxGenerations,

    /// Tournament size must be at least 1.
    #[error("tournament size must be at least 1")]
    InvalidTournamentSize,

    /// An operator name did not match any known strategy.
    #[error("unknown {kind} operator: {name:?}")]
    UnknownOperator { kind: &'static str, name: String },

    /// Chromosome and instance (or two parents) differ in length.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// An individual without fitness was selected or compared.
    #[error("individual has not been evaluated")]
    Unevaluated,

    /// Chromosome has fewer genes than the operator needs.
    #[error("chromosome of length {len} is too short, need at least {min} genes")]
    ChromosomeTooShort { len: usize, min: usize },

    /// Random-reset bounds are empty (`min > max`).
    #[error("empty gene range [{min}, {max}]")]
    InvalidGeneRange { min: i64, max: i64 },

    /// Selection was asked to draw from an empty population.
    #[error("cannot select from empty population")]
    EmptyPopulation,

    /// `step` was called before `initialize`.
    #[error("engine has not been initialized")]
    NotInitialized,

    /// Roulette selection received a negative (or NaN) fitness.
    #[error("fitness at index {index} is negative ({value}); roulette requires non-negative weights")]
    NegativeFitness { index: usize, value: f64 },

    /// Instance text could not be parsed.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// Total deviation of a chromosome does not fit in a `u64`.
    #[error("cost overflow: total deviation exceeds u64::MAX")]
    CostOverflow,

    /// Repeated runs were requested with a run count of 0.
    #[error("runs must be at least 1")]
    InvalidRunCount,
}

impl GaError {
    /// Returns `true` for errors raised while validating construction parameters.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GaError::InvalidPopulationSize(_)
                | GaError::InvalidRate { .. }
                | GaError::InvalidMaxGenerations
                | GaError::InvalidTournamentSize
                | GaError::UnknownOperator { .. }
                | GaError::InvalidRunCount
        )
    }

    /// Returns `true` for errors that indicate a caller bug rather than bad input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            GaError::LengthMismatch { .. }
                | GaError::Unevaluated
                | GaError::ChromosomeTooShort { .. }
                | GaError::InvalidGeneRange { .. }
                | GaError::EmptyPopulation
                | GaError::NotInitialized
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(GaError::InvalidMaxGenerations.is_configuration());
        assert!(!GaError::InvalidMaxGenerations.is_invariant_violation());
        assert!(GaError::Unevaluated.is_invariant_violation());
        let neg = GaError::NegativeFitness {
            index: 0,
            value: -1.0,
        };
        assert!(!neg.is_configuration());
        assert!(!neg.is_invariant_violation());
        assert!(GaError::InvalidRunCount.is_configuration());
        assert!(!GaError::CostOverflow.is_configuration());
        assert!(!GaError::CostOverflow.is_invariant_violation());
    }

    #[test]
    fn test_display() {
        let err = GaError::LengthMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "length mismatch: expected 4, got 3");
    }
}
