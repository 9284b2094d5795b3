//! End-to-end search: scenarios, groups, solving, deduplication and
//! diagnostics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::SearchContext;
use crate::diagnostics::{ScenarioDiagnostic, diagnose_missing};
use crate::groups::assemble_groups;
use crate::index::CandidateIndex;
use crate::offer::OfferSet;
use crate::scenario::{Scenario, ScenarioBuilder, ScenarioConfig};
use crate::solution::{Selections, Solution};
use crate::solver::{ScenarioSolver, SolverConfig, SolverConfigError};
use crate::trip::{TripRequest, TripRequestValidationError};

/// Reason attached to [`SolverStatus::NoSolution`].
pub const NO_SOLUTION_REASON: &str = "missing flights, hotels or cars for a complete itinerary";

/// Whether a search produced anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SolverStatus {
    /// At least one solution was found.
    Ok,
    /// Nothing could be solved.
    NoSolution {
        /// Human-readable summary.
        reason: String,
        /// Scenarios lacking offers and what each one lacks.
        missing: Vec<ScenarioDiagnostic>,
    },
}

/// Everything a search reports back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Every generated scenario, feasible or not.
    pub scenarios: Vec<Scenario>,
    /// Ranked, de-duplicated solutions.
    pub solutions: Vec<Solution>,
    /// Summary status with diagnostics when empty.
    #[serde(flatten)]
    pub status: SolverStatus,
}

/// Errors returned by [`TripPlanner::plan`] and [`TripPlanner::preview`].
///
/// Running out of offers is not an error; it is reported through
/// [`SolverStatus::NoSolution`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The trip request is malformed.
    #[error("invalid trip request: {0}")]
    InvalidRequest(#[from] TripRequestValidationError),
    /// The solver configuration is unusable.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(#[from] SolverConfigError),
    /// The search was cancelled before finishing.
    #[error("search cancelled")]
    Cancelled,
}

/// Drives a [`ScenarioSolver`] over every scenario of a trip.
#[derive(Debug, Clone)]
pub struct TripPlanner<S> {
    solver: S,
    builder: ScenarioBuilder,
    config: SolverConfig,
}

impl<S> TripPlanner<S>
where
    S: ScenarioSolver,
{
    /// Create a planner with default scenario and solver settings.
    #[must_use]
    pub fn new(solver: S) -> Self {
        Self::with_config(solver, ScenarioConfig::default(), SolverConfig::default())
    }

    /// Create a planner with explicit settings.
    #[must_use]
    pub const fn with_config(
        solver: S,
        scenario_config: ScenarioConfig,
        solver_config: SolverConfig,
    ) -> Self {
        Self {
            solver,
            builder: ScenarioBuilder::new(scenario_config),
            config: solver_config,
        }
    }

    /// The solver settings in use.
    #[must_use]
    pub const fn solver_config(&self) -> &SolverConfig {
        &self.config
    }

    /// The scenario settings in use.
    #[must_use]
    pub const fn scenario_config(&self) -> &ScenarioConfig {
        self.builder.config()
    }

    /// Build the scenarios for `request` without searching offers.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidRequest`] when the request fails
    /// validation.
    pub fn preview(&self, request: &TripRequest) -> Result<Vec<Scenario>, PlanError> {
        request.validate()?;
        Ok(self.builder.build(request))
    }

    /// Search `offers` for the best itineraries covering `request`.
    ///
    /// Feasible scenarios are solved in order. Scenarios lacking offers are
    /// skipped, solutions whose selections repeat an earlier one are
    /// dropped, and processing stops once `max_solutions` are collected.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidRequest`] or [`PlanError::InvalidConfig`]
    /// for bad input and [`PlanError::Cancelled`] when the context's token
    /// is cancelled before the search completes.
    pub fn plan(
        &self,
        request: &TripRequest,
        offers: &OfferSet,
        ctx: &mut SearchContext<'_>,
    ) -> Result<SearchOutcome, PlanError> {
        request.validate()?;
        self.config.validate()?;

        let scenarios = self.builder.build(request);
        let feasible = scenarios.iter().filter(|s| s.is_feasible).count();
        ctx.note(format!(
            "generated {} scenarios, {feasible} feasible",
            scenarios.len()
        ));

        let index = CandidateIndex::build(offers);
        let cap = self.config.max_solutions;
        let mut solutions: Vec<Solution> = Vec::new();

        for scenario in &scenarios {
            if ctx.is_cancelled() {
                ctx.note("search cancelled");
                return Err(PlanError::Cancelled);
            }
            if solutions.len() >= cap {
                ctx.note(format!("reached {cap} solutions; skipping remaining scenarios"));
                break;
            }
            let order = scenario.order.join(" > ");
            if !scenario.is_feasible {
                ctx.note(format!(
                    "skipping {order}: overruns trip end by {} days",
                    scenario.overrun_days
                ));
                continue;
            }

            let groups = match assemble_groups(scenario, &index) {
                Ok(groups) => groups,
                Err(missing) => {
                    ctx.note(format!("skipping {order}: {missing}"));
                    continue;
                }
            };

            let mut added = 0_usize;
            for assignment in self.solver.solve(&groups, &self.config) {
                let selections = Selections::from_choices(&groups, &assignment.choices);
                if solutions.iter().any(|known| known.selections == selections) {
                    continue;
                }
                solutions.push(Solution {
                    scenario_order: scenario.order.clone(),
                    objectives: assignment.objectives,
                    selections,
                });
                added += 1;
                if solutions.len() >= cap {
                    break;
                }
            }
            ctx.note(format!("{order}: {added} new solutions"));
        }

        let status = if solutions.is_empty() {
            let missing = diagnose_missing(&scenarios, &index);
            ctx.note(format!(
                "no solution found; {} scenarios lack offers",
                missing.len()
            ));
            SolverStatus::NoSolution {
                reason: NO_SOLUTION_REASON.to_owned(),
                missing,
            }
        } else {
            SolverStatus::Ok
        };

        Ok(SearchOutcome {
            scenarios,
            solutions,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{CancellationToken, MemoryLog, NullLog};
    use crate::groups::DecisionGroup;
    use crate::solution::Assignment;
    use crate::test_support::{sample_offers, sample_request};
    use rstest::{fixture, rstest};

    /// Returns the assignment picking the first option of every group,
    /// followed by one picking the last.
    struct EdgeSolver;

    impl ScenarioSolver for EdgeSolver {
        fn solve(&self, groups: &[DecisionGroup<'_>], config: &SolverConfig) -> Vec<Assignment> {
            let first = vec![0; groups.len()];
            let last = groups.iter().map(|g| g.len().saturating_sub(1)).collect();
            let mut out = vec![
                Assignment::evaluate(groups, first),
                Assignment::evaluate(groups, last),
            ];
            out.truncate(config.max_solutions);
            out
        }
    }

    #[fixture]
    fn planner() -> TripPlanner<EdgeSolver> {
        TripPlanner::new(EdgeSolver)
    }

    #[rstest]
    fn solves_supplied_scenarios_only(planner: TripPlanner<EdgeSolver>) {
        let offers = sample_offers();
        let mut log = MemoryLog::new();
        let mut ctx = SearchContext::new(CancellationToken::new(), &mut log);

        let outcome = planner
            .plan(&sample_request(), &offers, &mut ctx)
            .expect("plan");
        assert_eq!(outcome.status, SolverStatus::Ok);
        assert_eq!(outcome.scenarios.len(), 2);
        assert_eq!(outcome.solutions.len(), 2);
        assert!(
            outcome
                .solutions
                .iter()
                .all(|s| s.scenario_order == ["MIA", "ORL", "NYC"])
        );
        assert!(log.entries().iter().any(|e| e.starts_with("skipping MIA > NYC > ORL")));
    }

    #[rstest]
    fn duplicate_selections_are_dropped() {
        let mut offers = sample_offers();
        // A single option everywhere makes both edge assignments coincide.
        offers.flights.dedup_by(|a, b| a.leg == b.leg);
        offers.cars.clear();
        offers.hotels.dedup_by(|a, b| a.city == b.city && a.checkin == b.checkin);
        let planner = TripPlanner::new(EdgeSolver);
        let mut sink = NullLog;
        let mut ctx = SearchContext::new(CancellationToken::new(), &mut sink);

        let outcome = planner
            .plan(&sample_request(), &offers, &mut ctx)
            .expect("plan");
        assert_eq!(outcome.solutions.len(), 1);
    }

    #[rstest]
    fn global_cap_limits_solutions() {
        let config = SolverConfig {
            max_solutions: 1,
            ..SolverConfig::default()
        };
        let planner = TripPlanner::with_config(EdgeSolver, ScenarioConfig::default(), config);
        let offers = sample_offers();
        let mut sink = NullLog;
        let mut ctx = SearchContext::new(CancellationToken::new(), &mut sink);

        let outcome = planner
            .plan(&sample_request(), &offers, &mut ctx)
            .expect("plan");
        assert_eq!(outcome.solutions.len(), 1);
    }

    #[rstest]
    fn empty_offers_yield_diagnostics(planner: TripPlanner<EdgeSolver>) {
        let mut sink = NullLog;
        let mut ctx = SearchContext::new(CancellationToken::new(), &mut sink);

        let outcome = planner
            .plan(&sample_request(), &OfferSet::default(), &mut ctx)
            .expect("plan");
        assert!(outcome.solutions.is_empty());
        let SolverStatus::NoSolution { reason, missing } = outcome.status else {
            panic!("expected no_solution");
        };
        assert_eq!(reason, NO_SOLUTION_REASON);
        assert_eq!(missing.len(), 2);
    }

    #[rstest]
    fn cancelled_token_stops_the_search(planner: TripPlanner<EdgeSolver>) {
        let token = CancellationToken::new();
        token.cancel();
        let mut log = MemoryLog::new();
        let mut ctx = SearchContext::new(token, &mut log);

        let err = planner
            .plan(&sample_request(), &sample_offers(), &mut ctx)
            .expect_err("cancelled");
        assert_eq!(err, PlanError::Cancelled);
        assert_eq!(log.entries().last().map(String::as_str), Some("search cancelled"));
    }

    #[rstest]
    fn invalid_inputs_are_rejected(planner: TripPlanner<EdgeSolver>) {
        let mut request = sample_request();
        request.stops.clear();
        let mut sink = NullLog;
        let mut ctx = SearchContext::new(CancellationToken::new(), &mut sink);

        let request_err = planner
            .plan(&request, &sample_offers(), &mut ctx)
            .expect_err("no stops");
        assert_eq!(request_err, PlanError::InvalidRequest(TripRequestValidationError::NoStops));

        let zero = TripPlanner::with_config(
            EdgeSolver,
            ScenarioConfig::default(),
            SolverConfig {
                population_size: 0,
                ..SolverConfig::default()
            },
        );
        let config_err = zero
            .plan(&sample_request(), &sample_offers(), &mut ctx)
            .expect_err("bad config");
        assert_eq!(config_err, PlanError::InvalidConfig(SolverConfigError::ZeroPopulation));
    }

    #[rstest]
    fn outcome_serialises_status_inline(planner: TripPlanner<EdgeSolver>) {
        let mut sink = NullLog;
        let mut ctx = SearchContext::new(CancellationToken::new(), &mut sink);
        let outcome = planner
            .plan(&sample_request(), &OfferSet::default(), &mut ctx)
            .expect("plan");

        let json = serde_json::to_value(&outcome).expect("json");
        assert_eq!(json["status"], "no_solution");
        assert_eq!(json["reason"], NO_SOLUTION_REASON);
        assert!(json["missing"].is_array());
    }
}
