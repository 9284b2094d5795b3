//! Solver configuration and the seam between the planner and search engines.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::groups::DecisionGroup;
use crate::ranking::{Preference, RankingWeights};
use crate::solution::Assignment;

/// Parameters shared by every [`ScenarioSolver`].
///
/// # Examples
/// ```
/// use tripweave_core::{Preference, SolverConfig};
///
/// let config = SolverConfig {
///     preference: Preference::Price,
///     ..SolverConfig::default()
/// };
/// assert_eq!(config.population_size, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generations to evolve.
    pub generations: usize,
    /// Seed for the random number generator.
    pub seed: u64,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
    /// Most solutions returned per scenario and overall.
    pub max_solutions: usize,
    /// Ranking applied to the final front.
    pub preference: Preference,
    /// Weights used by [`Preference::Best`].
    pub weights: RankingWeights,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 40,
            seed: 42,
            mutation_rate: 0.1,
            max_solutions: 3,
            preference: Preference::Best,
            weights: RankingWeights::default(),
        }
    }
}

/// Problems with a [`SolverConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverConfigError {
    /// The population would be empty.
    #[error("population size must be at least 1")]
    ZeroPopulation,
    /// No solutions could ever be returned.
    #[error("max solutions must be at least 1")]
    ZeroMaxSolutions,
    /// The mutation rate is not a probability.
    #[error("mutation rate {0} is outside [0, 1]")]
    InvalidMutationRate(f64),
    /// A ranking weight is negative or not finite.
    #[error("ranking weights must be finite and non-negative")]
    InvalidWeights,
}

impl SolverConfig {
    /// Check that the configuration can drive a search.
    ///
    /// # Errors
    ///
    /// Returns the first [`SolverConfigError`] found.
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        if self.population_size == 0 {
            return Err(SolverConfigError::ZeroPopulation);
        }
        if self.max_solutions == 0 {
            return Err(SolverConfigError::ZeroMaxSolutions);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SolverConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if !self.weights.is_valid() {
            return Err(SolverConfigError::InvalidWeights);
        }
        Ok(())
    }
}

/// Search one scenario's decision groups for good assignments.
///
/// Implementations receive only non-empty groups and must return the
/// non-dominated assignments ranked by `config.preference` and truncated to
/// `config.max_solutions`. Each returned assignment holds exactly one choice
/// per group. Solvers must be `Send + Sync` so scenarios can be searched
/// from several threads.
pub trait ScenarioSolver: Send + Sync {
    /// Solve one scenario.
    fn solve(&self, groups: &[DecisionGroup<'_>], config: &SolverConfig) -> Vec<Assignment>;
}
