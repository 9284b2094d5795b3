//! `Nsga2Solver`: the [`ScenarioSolver`] backed by the NSGA-II loop.

use tripweave_core::{
    Assignment, DecisionGroup, ScenarioSolver, SolverConfig, rank_assignments,
};

use crate::search::{Nsga2Search, first_front};

/// Multi-objective evolutionary solver minimising cost and flight time.
///
/// The solver is stateless; every call seeds its own generator from
/// [`SolverConfig::seed`], so identical inputs always yield identical
/// output and scenarios can be solved in any order.
///
/// # Examples
/// ```
/// use tripweave_core::{CandidateIndex, ScenarioBuilder, ScenarioSolver, SolverConfig};
/// use tripweave_core::{assemble_groups, test_support};
/// use tripweave_solver_nsga2::Nsga2Solver;
///
/// let offers = test_support::sample_offers();
/// let index = CandidateIndex::build(&offers);
/// let scenarios = ScenarioBuilder::default().build(&test_support::sample_request());
/// let groups = assemble_groups(&scenarios[0], &index).unwrap();
///
/// let front = Nsga2Solver::new().solve(&groups, &SolverConfig::default());
/// assert!(!front.is_empty() && front.len() <= 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Nsga2Solver;

impl Nsga2Solver {
    /// Construct the solver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run the evolutionary loop and return the final population unranked.
    ///
    /// Returns an empty population when `config` is invalid or a group has
    /// no options.
    #[must_use]
    pub fn evolve(&self, groups: &[DecisionGroup<'_>], config: &SolverConfig) -> Vec<Assignment> {
        if let Err(err) = config.validate() {
            log::warn!("refusing to evolve with invalid configuration: {err}");
            return Vec::new();
        }
        if groups.iter().any(DecisionGroup::is_empty) {
            log::warn!("refusing to evolve with an empty decision group");
            return Vec::new();
        }
        Nsga2Search::new(groups, config).run()
    }
}

impl ScenarioSolver for Nsga2Solver {
    fn solve(&self, groups: &[DecisionGroup<'_>], config: &SolverConfig) -> Vec<Assignment> {
        let mut front = first_front(self.evolve(groups, config));
        let front_size = front.len();
        rank_assignments(&mut front, config.preference, config.weights);
        front.truncate(config.max_solutions);
        log::debug!(
            "nsga2: {} groups, front of {front_size}, returning {}",
            groups.len(),
            front.len()
        );
        front
    }
}
