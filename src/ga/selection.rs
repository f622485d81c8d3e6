//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover. All strategies read fitness only (higher is better) and return
//! parents by reference; the population is never copied or modified.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Individual;
use crate::error::GaError;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Roulette wheel (fitness-proportionate)
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Selection {
    /// Tournament selection: draw `k` individuals with replacement, keep the fittest.
    ///
    /// Higher `k` = stronger selection pressure; `k = 1` is uniform random choice.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Population-wide tournament: one call fills a whole mating pool of
    /// `population.len()` independent `Tournament(k)` winners, and parents
    /// are consumed from that pool in order.
    ///
    /// # Complexity
    /// O(n·k) per generation
    TournamentPopulation(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Requires non-negative fitness.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects one parent from the population.
    ///
    /// [`Selection::TournamentPopulation`] draws a single tournament winner
    /// here; use [`Selection::select_pool`] to draw the whole pool at once.
    pub fn select<'a, R: Rng>(
        &self,
        population: &'a [Individual],
        rng: &mut R,
    ) -> Result<&'a Individual, GaError> {
        let idx = match self {
            Selection::Tournament(k) | Selection::TournamentPopulation(k) => {
                tournament(population, *k, rng)?
            }
            Selection::Roulette => roulette(population, rng)?,
        };
        Ok(&population[idx])
    }

    /// Selects `population.len()` parents in one call.
    pub fn select_pool<'a, R: Rng>(
        &self,
        population: &'a [Individual],
        rng: &mut R,
    ) -> Result<Vec<&'a Individual>, GaError> {
        match self {
            Selection::Tournament(k) | Selection::TournamentPopulation(k) => {
                tournament_population(population, *k, rng)
            }
            Selection::Roulette => roulette_many(population, population.len(), rng),
        }
    }

    /// Tournament size, if this is a tournament strategy.
    pub fn tournament_size(&self) -> Option<usize> {
        match self {
            Selection::Tournament(k) | Selection::TournamentPopulation(k) => Some(*k),
            Selection::Roulette => None,
        }
    }

    /// Whether parents come from a pre-drawn mating pool.
    pub fn uses_pool(&self) -> bool {
        matches!(self, Selection::TournamentPopulation(_))
    }

    /// Configuration name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Selection::Tournament(_) => "tournament",
            Selection::TournamentPopulation(_) => "tournament_population",
            Selection::Roulette => "roulette",
        }
    }

    pub(crate) fn validate(&self) -> Result<(), GaError> {
        match self.tournament_size() {
            Some(0) => Err(GaError::InvalidTournamentSize),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a strategy name. Tournament variants get the default size 3;
/// override with [`GaConfig::with_tournament_size`](super::GaConfig::with_tournament_size).
impl FromStr for Selection {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tournament" => Ok(Selection::Tournament(3)),
            "tournament_population" => Ok(Selection::TournamentPopulation(3)),
            "roulette" => Ok(Selection::Roulette),
            other => Err(GaError::UnknownOperator {
                kind: "selection",
                name: other.to_string(),
            }),
        }
    }
}

/// Tournament selection: pick k random individuals with replacement, return
/// the index of the fittest. Ties keep the first drawn.
pub fn tournament<R: Rng>(
    population: &[Individual],
    k: usize,
    rng: &mut R,
) -> Result<usize, GaError> {
    if k == 0 {
        return Err(GaError::InvalidTournamentSize);
    }
    let n = population.len();
    if n == 0 {
        return Err(GaError::EmptyPopulation);
    }

    let mut best_idx = rng.random_range(0..n);
    let mut best_fit = population[best_idx].try_fitness()?;
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        let fit = population[idx].try_fitness()?;
        if fit > best_fit {
            best_idx = idx;
            best_fit = fit;
        }
    }
    Ok(best_idx)
}

/// Runs [`tournament`] `population.len()` times, producing a full
/// replacement pool.
pub fn tournament_population<'a, R: Rng>(
    population: &'a [Individual],
    k: usize,
    rng: &mut R,
) -> Result<Vec<&'a Individual>, GaError> {
    if population.is_empty() {
        return Err(GaError::EmptyPopulation);
    }
    (0..population.len())
        .map(|_| tournament(population, k, rng).map(|i| &population[i]))
        .collect()
}

/// Roulette wheel selection.
///
/// Draws a threshold uniformly in `[0, Σfitness)` and returns the index of
/// the first individual whose cumulative fitness reaches it.
pub fn roulette<R: Rng>(population: &[Individual], rng: &mut R) -> Result<usize, GaError> {
    let weights = roulette_weights(population)?;
    let n = weights.len();

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Ok(rng.random_range(0..n));
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative >= threshold {
            return Ok(i);
        }
    }

    Ok(n - 1) // floating-point fallback
}

/// Draws `num_parents` individuals with replacement, each with probability
/// proportional to its fitness.
pub fn roulette_many<'a, R: Rng>(
    population: &'a [Individual],
    num_parents: usize,
    rng: &mut R,
) -> Result<Vec<&'a Individual>, GaError> {
    let weights = roulette_weights(population)?;

    match WeightedIndex::new(&weights) {
        Ok(dist) => Ok((0..num_parents)
            .map(|_| &population[dist.sample(rng)])
            .collect()),
        // All weights zero: every individual is equally (un)fit.
        Err(_) => Ok((0..num_parents)
            .map(|_| &population[rng.random_range(0..population.len())])
            .collect()),
    }
}

/// Collects fitness values, rejecting unevaluated individuals and negative
/// or NaN fitness.
fn roulette_weights(population: &[Individual]) -> Result<Vec<f64>, GaError> {
    if population.is_empty() {
        return Err(GaError::EmptyPopulation);
    }
    population
        .iter()
        .enumerate()
        .map(|(index, ind)| {
            let value = ind.try_fitness()?;
            if value >= 0.0 {
                Ok(value)
            } else {
                Err(GaError::NegativeFitness { index, value })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;
    use crate::random::create_rng;

    /// Individuals with the given costs against an all-zero single-gene target.
    fn make_population(costs: &[i64]) -> Vec<Individual> {
        let inst = Instance::new(vec![0]).unwrap();
        costs
            .iter()
            .map(|&c| Individual::evaluated(vec![c], &inst).unwrap())
            .collect()
    }

    fn index_of(pop: &[Individual], ind: &Individual) -> usize {
        pop.iter()
            .position(|p| std::ptr::eq(p, ind))
            .expect("selected individual must come from the population")
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10, 5, 1, 8]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            let sel = Selection::Tournament(4).select(&pop, &mut rng).unwrap();
            counts[index_of(&pop, sel)] += 1;
        }
        // Index 2 (cost 1) is selected unless all four draws miss it: 1 - (3/4)^4 ≈ 68%
        let best_count = counts[2];
        assert!(
            best_count > 6000,
            "expected best to be selected >60% of the time, got {best_count}/{n}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10, 5, 1, 8]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            let idx = tournament(&pop, 1, &mut rng).unwrap();
            counts[idx] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[100, 50, 0, 80]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            let idx = roulette(&pop, &mut rng).unwrap();
            counts[idx] += 1;
        }
        // Fitness 1.0 vs ~0.0099: index 2 dominates
        assert!(
            counts[2] > counts[0] * 10,
            "best should dominate: {counts:?}"
        );
    }

    #[test]
    fn test_roulette_rejects_negative_fitness() {
        let mut pop = make_population(&[1, 2, 3]);
        pop[1].set_evaluation(0, -0.5);
        let mut rng = create_rng(42);

        assert_eq!(
            roulette(&pop, &mut rng),
            Err(GaError::NegativeFitness {
                index: 1,
                value: -0.5
            })
        );
        assert!(roulette_many(&pop, 2, &mut rng).is_err());
    }

    #[test]
    fn test_roulette_rejects_nan_fitness() {
        let mut pop = make_population(&[1, 2]);
        pop[0].set_evaluation(0, f64::NAN);
        let mut rng = create_rng(42);
        assert!(matches!(
            roulette(&pop, &mut rng),
            Err(GaError::NegativeFitness { index: 0, .. })
        ));
    }

    #[test]
    fn test_roulette_all_zero_falls_back_to_uniform() {
        let mut pop = make_population(&[1, 2, 3]);
        for ind in &mut pop {
            ind.set_evaluation(0, 0.0);
        }
        let mut rng = create_rng(42);
        assert!(roulette(&pop, &mut rng).is_ok());
        assert_eq!(roulette_many(&pop, 5, &mut rng).unwrap().len(), 5);
    }

    #[test]
    fn test_roulette_many_count_and_bias() {
        let pop = make_population(&[0, 1000]);
        let mut rng = create_rng(42);

        let parents = roulette_many(&pop, 1000, &mut rng).unwrap();
        assert_eq!(parents.len(), 1000);
        let best = parents
            .iter()
            .filter(|p| std::ptr::eq(**p, &pop[0]))
            .count();
        assert!(best > 950, "expected heavy bias toward cost 0, got {best}");
    }

    #[test]
    fn test_tournament_population_fills_pool() {
        let pop = make_population(&[4, 3, 2, 1, 0]);
        let mut rng = create_rng(42);

        let pool = tournament_population(&pop, 3, &mut rng).unwrap();
        assert_eq!(pool.len(), pop.len());
        for ind in &pool {
            index_of(&pop, ind);
        }

        let pool = Selection::TournamentPopulation(2)
            .select_pool(&pop, &mut rng)
            .unwrap();
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5]);
        let mut rng = create_rng(42);

        for sel in [
            Selection::Tournament(1),
            Selection::Tournament(3),
            Selection::TournamentPopulation(2),
            Selection::Roulette,
        ] {
            let chosen = sel.select(&pop, &mut rng).unwrap();
            assert!(std::ptr::eq(chosen, &pop[0]));
        }
    }

    #[test]
    fn test_equal_fitness() {
        let pop = make_population(&[5, 5, 5, 5]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            let idx = tournament(&pop, 2, &mut rng).unwrap();
            counts[idx] += 1;
        }
        for &c in &counts {
            assert!(
                c > 1500,
                "expected roughly uniform with equal fitness, got {counts:?}"
            );
        }
    }

    #[test]
    fn test_unevaluated_population_rejected() {
        let pop = vec![Individual::new(vec![1]), Individual::new(vec![2])];
        let mut rng = create_rng(42);
        assert_eq!(tournament(&pop, 2, &mut rng), Err(GaError::Unevaluated));
        assert_eq!(roulette(&pop, &mut rng), Err(GaError::Unevaluated));
    }

    #[test]
    fn test_empty_population() {
        let pop: Vec<Individual> = vec![];
        let mut rng = create_rng(42);
        assert_eq!(
            Selection::Tournament(3).select(&pop, &mut rng),
            Err(GaError::EmptyPopulation)
        );
        assert_eq!(roulette(&pop, &mut rng), Err(GaError::EmptyPopulation));
    }

    #[test]
    fn test_zero_tournament_size() {
        let pop = make_population(&[1]);
        let mut rng = create_rng(42);
        assert_eq!(tournament(&pop, 0, &mut rng), Err(GaError::InvalidTournamentSize));
        assert!(Selection::Tournament(0).validate().is_err());
        assert!(Selection::Roulette.validate().is_ok());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("tournament".parse::<Selection>().unwrap(), Selection::Tournament(3));
        assert_eq!("roulette".parse::<Selection>().unwrap(), Selection::Roulette);
        assert_eq!(
            "tournament_population".parse::<Selection>().unwrap(),
            Selection::TournamentPopulation(3)
        );
        assert!("rank".parse::<Selection>().is_err());
    }
}
