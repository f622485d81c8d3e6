//! Aggregate statistics over repeated runs.

use super::runner::RunResult;
use crate::error::GaError;

/// Summary of several independent runs of one configuration on one instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Number of runs aggregated.
    pub runs: usize,
    /// Mean best cost.
    pub avg_cost: f64,
    /// Sample standard deviation of best cost (0 for a single run).
    pub std_cost: f64,
    /// Lowest best cost.
    pub min_cost: u64,
    /// Highest best cost.
    pub max_cost: u64,
    /// Mean wall-clock time in seconds.
    pub avg_time_secs: f64,
    /// Mean number of generations executed.
    pub avg_generations: f64,
    /// Best cost of every run, in run order.
    pub costs: Vec<u64>,
    /// Wall-clock seconds of every run, in run order.
    pub times_secs: Vec<f64>,
}

impl RunSummary {
    /// Aggregates run results. Fails with [`GaError::InvalidRunCount`] when
    /// `results` is empty.
    pub fn from_results(results: &[RunResult]) -> Result<Self, GaError> {
        if results.is_empty() {
            return Err(GaError::InvalidRunCount);
        }

        let costs: Vec<u64> = results.iter().map(|r| r.best_cost).collect();
        let times_secs: Vec<f64> = results.iter().map(|r| r.elapsed.as_secs_f64()).collect();
        let generations: Vec<f64> = results.iter().map(|r| r.generations as f64).collect();
        let cost_values: Vec<f64> = costs.iter().map(|&c| c as f64).collect();

        Ok(Self {
            runs: results.len(),
            avg_cost: mean(&cost_values),
            std_cost: sample_std(&cost_values),
            min_cost: costs.iter().copied().min().unwrap_or(0),
            max_cost: costs.iter().copied().max().unwrap_or(0),
            avg_time_secs: mean(&times_secs),
            avg_generations: mean(&generations),
            costs,
            times_secs,
        })
    }

    /// Relative gap of the mean cost to a known optimum, in percent.
    ///
    /// `None` when `optimum` is 0, where the ratio is undefined.
    pub fn gap_to_optimum(&self, optimum: u64) -> Option<f64> {
        if optimum == 0 {
            return None;
        }
        let opt = optimum as f64;
        Some((self.avg_cost - opt) / opt * 100.0)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}
