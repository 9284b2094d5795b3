//! NSGA-II solver for Tripweave scenarios.
//!
//! This crate provides [`Nsga2Solver`], the default implementation of the
//! [`ScenarioSolver`](tripweave_core::ScenarioSolver) trait. Each individual
//! encodes one option index per decision group; the search minimises total
//! cost and total flight hours, keeps diversity with crowding distance, and
//! returns the final non-dominated front ranked by the caller's preference.
//!
//! The solver is single-threaded and deterministic for a given seed. It
//! never checks for cancellation; callers poll between scenarios instead.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod pareto;
mod search;
mod solver;

pub use solver::Nsga2Solver;
