//! Solve command implementation for the Tripweave CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tripweave_core::{
    CancellationToken, MemoryLog, Preference, RankingWeights, ScenarioConfig, SearchContext,
    SearchOutcome, SolverConfig, TripPlanner,
};
use tripweave_solver_nsga2::Nsga2Solver;

use crate::search_file::{load_search_file, write_json};
use crate::{
    ARG_MAX_GAP_FILL_DAYS, ARG_MAX_PERMUTED_STOPS, ARG_REQUEST, ARG_SOLVE_COST_WEIGHT,
    ARG_SOLVE_DURATION_WEIGHT, ARG_SOLVE_GENERATIONS, ARG_SOLVE_MAX_SOLUTIONS,
    ARG_SOLVE_MUTATION_RATE, ARG_SOLVE_POPULATION, ARG_SOLVE_PREFERENCE, ARG_SOLVE_SEED, CliError,
    ENV_SOLVE_REQUEST, scenario_config,
};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Solve a trip by searching the offers in a JSON search file. \
                 Every feasible ordering of the stops is evolved with \
                 NSGA-II over total cost and flight hours; the ranked, \
                 de-duplicated itineraries are printed with the search log, \
                 or a no_solution status listing what each ordering lacks.",
    about = "Find the best itineraries for a trip"
)]
#[ortho_config(prefix = "TRIPWEAVE")]
pub(crate) struct SolveArgs {
    /// Path to a JSON search file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Individuals per generation.
    #[arg(long = ARG_SOLVE_POPULATION, value_name = "size")]
    #[serde(default)]
    pub(crate) population_size: Option<usize>,
    /// Generations to evolve per scenario.
    #[arg(long = ARG_SOLVE_GENERATIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) generations: Option<usize>,
    /// Seed for the random number generator.
    #[arg(long = ARG_SOLVE_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Per-gene mutation probability in [0, 1].
    #[arg(long = ARG_SOLVE_MUTATION_RATE, value_name = "rate")]
    #[serde(default)]
    pub(crate) mutation_rate: Option<f64>,
    /// Most itineraries to return.
    #[arg(long = ARG_SOLVE_MAX_SOLUTIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_solutions: Option<usize>,
    /// Ranking preference: best, price or duration.
    #[arg(long = ARG_SOLVE_PREFERENCE, value_name = "name")]
    #[serde(default)]
    pub(crate) preference: Option<String>,
    /// Weight of normalised cost in the best ranking.
    #[arg(long = ARG_SOLVE_COST_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) cost_weight: Option<f64>,
    /// Weight of normalised flight hours in the best ranking.
    #[arg(long = ARG_SOLVE_DURATION_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) duration_weight: Option<f64>,
    /// Longest idle interval, in days, filled before a fixed stop.
    #[arg(long = ARG_MAX_GAP_FILL_DAYS, value_name = "days")]
    #[serde(default)]
    pub(crate) max_gap_fill_days: Option<u32>,
    /// Flexible stop count above which only the given order is tried.
    #[arg(long = ARG_MAX_PERMUTED_STOPS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_permuted_stops: Option<usize>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON search file.
    pub(crate) request_path: Utf8PathBuf,
    /// Scenario builder settings.
    pub(crate) scenario: ScenarioConfig,
    /// Solver settings.
    pub(crate) solver: SolverConfig,
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_SOLVE_REQUEST,
        })?;

        let defaults = SolverConfig::default();
        let preference = match args.preference.as_deref() {
            Some(raw) => raw.parse::<Preference>()?,
            None => defaults.preference,
        };
        let weights = RankingWeights {
            cost: args.cost_weight.unwrap_or(defaults.weights.cost),
            duration: args.duration_weight.unwrap_or(defaults.weights.duration),
        };
        let solver = SolverConfig {
            population_size: args.population_size.unwrap_or(defaults.population_size),
            generations: args.generations.unwrap_or(defaults.generations),
            seed: args.seed.unwrap_or(defaults.seed),
            mutation_rate: args.mutation_rate.unwrap_or(defaults.mutation_rate),
            max_solutions: args.max_solutions.unwrap_or(defaults.max_solutions),
            preference,
            weights,
        };

        Ok(Self {
            request_path,
            scenario: scenario_config(args.max_gap_fill_days, args.max_permuted_stops),
            solver,
        })
    }
}

/// What the `solve` command prints: the outcome plus the search log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SolveReport {
    #[serde(flatten)]
    pub(crate) outcome: SearchOutcome,
    pub(crate) log: Vec<String>,
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_solve_with(args, &mut stdout)
}

pub(super) fn run_solve_with(args: SolveArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_solve(&config)?;
    write_json(writer, &report)
}

pub(crate) fn execute_solve(config: &SolveConfig) -> Result<SolveReport, CliError> {
    let search = load_search_file(&config.request_path)?;
    let planner = TripPlanner::with_config(Nsga2Solver::new(), config.scenario, config.solver);

    let mut log = MemoryLog::new();
    let mut ctx = SearchContext::new(CancellationToken::new(), &mut log);
    let outcome = planner.plan(&search.request, &search.offers, &mut ctx)?;
    log::info!(
        "solved {} into {} solutions",
        config.request_path,
        outcome.solutions.len()
    );

    Ok(SolveReport {
        outcome,
        log: log.entries().to_vec(),
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
