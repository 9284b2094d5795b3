//! Facade crate for the Tripweave trip planner.
//!
//! This crate re-exports the core domain types and planning pipeline, and
//! exposes the evolutionary solver behind the `solver-nsga2` feature.
//!
//! # Examples
//! ```
//! # #[cfg(feature = "solver-nsga2")]
//! # {
//! use tripweave::{Nsga2Solver, Stop, TripAnchors, TripPlanner, TripRequest};
//! use chrono::NaiveDate;
//!
//! let date = |d| NaiveDate::from_ymd_opt(2025, 6, d);
//! # let (Some(start), Some(end)) = (date(1), date(12)) else { return };
//! let request = TripRequest {
//!     trip: TripAnchors {
//!         start_location: "GYN".to_owned(),
//!         start_date: start,
//!         end_location: "GYN".to_owned(),
//!         end_date: end,
//!     },
//!     stops: vec![Stop::flexible("MIA", 3), Stop::flexible("ORL", 2)],
//! };
//! let planner = TripPlanner::new(Nsga2Solver::new());
//! let scenarios = planner.preview(&request).unwrap_or_default();
//! assert_eq!(scenarios.len(), 2);
//! # }
//! ```

#![forbid(unsafe_code)]

pub use tripweave_core::{
    Assignment, CancellationToken, CarOffer, DecisionGroup, FlightLeg, FlightOffer, GroupSlot,
    HotelOffer, Leg, MemoryLog, MissingHotel, MissingLeg, MissingOffers, NO_SOLUTION_REASON,
    NullLog, Objectives, OfferQueries, OfferRef, OfferSet, ParsePreferenceError, PlanError,
    Preference, RankingWeights, RentalBlock, Scenario, ScenarioBuilder, ScenarioConfig,
    ScenarioDiagnostic, ScenarioSolver, SearchContext, SearchLog, SearchOutcome, Selections,
    Solution, SolverConfig, SolverConfigError, SolverStatus, Stay, StayKind, Stop,
    StopConstraint, TripAnchors, TripPlanner, TripRequest, TripRequestValidationError,
    rank_solutions,
};

#[cfg(feature = "test-support")]
pub use tripweave_core::test_support;

#[cfg(feature = "solver-nsga2")]
pub use tripweave_solver_nsga2::Nsga2Solver;
