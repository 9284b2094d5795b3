//! Command-line interface for planning multi-stop trips with Tripweave.
//!
//! Both subcommands read a JSON search file holding a trip request and,
//! optionally, the offers gathered for it. `scenarios` prints the candidate
//! orderings together with the offer searches they imply; `solve` runs the
//! full search and prints the ranked itineraries.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tripweave_core::ScenarioConfig;

mod error;
mod scenarios;
mod search_file;
mod solve;

pub use error::CliError;

use scenarios::{ScenariosArgs, run_scenarios};
use solve::{SolveArgs, run_solve};

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_MAX_GAP_FILL_DAYS: &str = "max-gap-fill-days";
pub(crate) const ARG_MAX_PERMUTED_STOPS: &str = "max-permuted-stops";
pub(crate) const ARG_SOLVE_POPULATION: &str = "population";
pub(crate) const ARG_SOLVE_GENERATIONS: &str = "generations";
pub(crate) const ARG_SOLVE_SEED: &str = "seed";
pub(crate) const ARG_SOLVE_MUTATION_RATE: &str = "mutation-rate";
pub(crate) const ARG_SOLVE_MAX_SOLUTIONS: &str = "max-solutions";
pub(crate) const ARG_SOLVE_PREFERENCE: &str = "preference";
pub(crate) const ARG_SOLVE_COST_WEIGHT: &str = "cost-weight";
pub(crate) const ARG_SOLVE_DURATION_WEIGHT: &str = "duration-weight";
pub(crate) const ENV_SCENARIOS_REQUEST: &str = "TRIPWEAVE_CMDS_SCENARIOS_REQUEST_PATH";
pub(crate) const ENV_SOLVE_REQUEST: &str = "TRIPWEAVE_CMDS_SOLVE_REQUEST_PATH";

/// Run the Tripweave CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// search file cannot be read, planning fails or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Scenarios(args) => run_scenarios(args),
        Command::Solve(args) => run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tripweave",
    about = "Plan multi-stop trips from gathered flight, hotel and car offers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List candidate orderings and the offer searches they need.
    Scenarios(ScenariosArgs),
    /// Search offers for the best itineraries.
    Solve(SolveArgs),
}

/// Resolve the scenario knobs shared by both subcommands.
pub(crate) fn scenario_config(
    max_gap_fill_days: Option<u32>,
    max_permuted_stops: Option<usize>,
) -> ScenarioConfig {
    let defaults = ScenarioConfig::default();
    ScenarioConfig {
        max_gap_fill_days: max_gap_fill_days.unwrap_or(defaults.max_gap_fill_days),
        max_permuted_flexible_stops: max_permuted_stops
            .unwrap_or(defaults.max_permuted_flexible_stops),
    }
}

#[cfg(test)]
mod tests;
