//! Core domain types and search pipeline for Tripweave.
//!
//! A [`TripRequest`] lists the stops a traveller must visit between two
//! anchors. The [`ScenarioBuilder`] expands it into candidate orderings,
//! each with concrete [`Stay`]s and [`Leg`]s. Offers are indexed once per
//! search by the [`CandidateIndex`]; [`assemble_groups`] turns a scenario
//! into exclusive [`DecisionGroup`]s, and a [`ScenarioSolver`] picks one
//! option per group. [`TripPlanner`] ties the steps together and reports
//! [`ScenarioDiagnostic`]s when no itinerary can be completed.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod context;
pub mod date;
pub mod diagnostics;
pub mod groups;
pub mod index;
pub mod itinerary;
pub mod offer;
pub mod planner;
pub mod queries;
pub mod ranking;
pub mod scenario;
pub mod solution;
pub mod solver;
pub mod trip;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use context::{CancellationToken, MemoryLog, NullLog, SearchContext, SearchLog};
pub use diagnostics::{MissingHotel, MissingLeg, ScenarioDiagnostic, diagnose_missing};
pub use groups::{DecisionGroup, GroupSlot, MissingOffers, OfferRef, assemble_groups};
pub use index::CandidateIndex;
pub use itinerary::{Leg, Stay, StayKind, legs_between};
pub use offer::{CarOffer, FlightLeg, FlightOffer, HotelOffer, OfferSet, RentalBlock};
pub use planner::{NO_SOLUTION_REASON, PlanError, SearchOutcome, SolverStatus, TripPlanner};
pub use queries::{OfferQueries, rental_block_for};
pub use ranking::{
    ParsePreferenceError, Preference, RankingWeights, rank_assignments, rank_by, rank_solutions,
};
pub use scenario::{Scenario, ScenarioBuilder, ScenarioConfig};
pub use solution::{Assignment, Objectives, Selections, Solution};
pub use solver::{ScenarioSolver, SolverConfig, SolverConfigError};
pub use trip::{Stop, StopConstraint, TripAnchors, TripRequest, TripRequestValidationError};
