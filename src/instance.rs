//! Problem instance: a target vector every chromosome is compared against.

use crate::error::GaError;
use std::str::FromStr;

/// Gene / target value type.
pub type Gene = i64;

/// Immutable problem description.
///
/// Created once by the caller and shared read-only by every evaluation
/// during a run.
///
/// # Text format
///
/// ```text
/// 4
/// 3 0 7 2
/// ```
///
/// ```
/// use u_evolve::Instance;
///
/// let instance: Instance = "4\n3 0 7 2\n".parse().unwrap();
/// assert_eq!(instance.size(), 4);
/// assert_eq!(instance.max_value(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    data: Vec<Gene>,
}

impl Instance {
    /// Creates an instance from its target vector.
    ///
    /// Fails if `data` is empty.
    pub fn new(data: Vec<Gene>) -> Result<Self, GaError> {
        if data.is_empty() {
            return Err(GaError::InvalidInstance("size must be at least 1".into()));
        }
        Ok(Self { data })
    }

    /// Number of genes per chromosome.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Target vector.
    pub fn data(&self) -> &[Gene] {
        &self.data
    }

    /// Largest target value, floored at 0.
    ///
    /// Upper bound of the gene range used by initialization and random-reset.
    pub fn max_value(&self) -> Gene {
        self.data.iter().copied().max().unwrap_or(0).max(0)
    }
}

impl FromStr for Instance {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(str::trim).filter(|l| !l.is_empty());

        let size: usize = lines
            .next()
            .ok_or_else(|| GaError::InvalidInstance("missing size line".into()))?
            .parse()
            .map_err(|e| GaError::InvalidInstance(format!("bad size: {e}")))?;

        let data = match lines.next() {
            Some(line) => line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<Gene>()
                        .map_err(|e| GaError::InvalidInstance(format!("bad value {tok:?}: {e}")))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        if lines.next().is_some() {
            return Err(GaError::InvalidInstance("unexpected trailing content".into()));
        }
        if data.len() != size {
            return Err(GaError::InvalidInstance(format!(
                "declared size {size} but found {} values",
                data.len()
            )));
        }

        Self::new(data)
    }
}
