//! Scenarios command implementation for the Tripweave CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tripweave_core::{OfferQueries, Scenario, ScenarioConfig, SolverConfig, TripPlanner};
use tripweave_solver_nsga2::Nsga2Solver;

use crate::search_file::{load_search_file, write_json};
use crate::{
    ARG_MAX_GAP_FILL_DAYS, ARG_MAX_PERMUTED_STOPS, ARG_REQUEST, CliError, ENV_SCENARIOS_REQUEST,
    scenario_config,
};

/// CLI arguments for the `scenarios` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Expand the trip request in a search file into every \
                 candidate ordering of its stops, with stays, legs and \
                 feasibility, followed by the de-duplicated flight, hotel \
                 and car searches needed to cover the feasible ones. Offers \
                 in the file are ignored.",
    about = "Preview scenarios and the offer searches they need"
)]
#[ortho_config(prefix = "TRIPWEAVE")]
pub(crate) struct ScenariosArgs {
    /// Path to a JSON search file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Longest idle interval, in days, filled before a fixed stop.
    #[arg(long = ARG_MAX_GAP_FILL_DAYS, value_name = "days")]
    #[serde(default)]
    pub(crate) max_gap_fill_days: Option<u32>,
    /// Flexible stop count above which only the given order is tried.
    #[arg(long = ARG_MAX_PERMUTED_STOPS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_permuted_stops: Option<usize>,
}

impl ScenariosArgs {
    pub(crate) fn into_config(self) -> Result<ScenariosConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScenariosConfig::try_from(merged)
    }
}

/// Resolved `scenarios` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScenariosConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) scenario: ScenarioConfig,
}

impl TryFrom<ScenariosArgs> for ScenariosConfig {
    type Error = CliError;

    fn try_from(args: ScenariosArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_SCENARIOS_REQUEST,
        })?;
        Ok(Self {
            request_path,
            scenario: scenario_config(args.max_gap_fill_days, args.max_permuted_stops),
        })
    }
}

/// What the `scenarios` command prints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ScenarioPreview {
    pub(crate) scenarios: Vec<Scenario>,
    pub(crate) queries: OfferQueries,
}

pub(super) fn run_scenarios(args: ScenariosArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_scenarios_with(args, &mut stdout)
}

pub(super) fn run_scenarios_with(
    args: ScenariosArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let preview = preview_scenarios(&config)?;
    write_json(writer, &preview)
}

pub(crate) fn preview_scenarios(config: &ScenariosConfig) -> Result<ScenarioPreview, CliError> {
    let search = load_search_file(&config.request_path)?;
    let planner =
        TripPlanner::with_config(Nsga2Solver::new(), config.scenario, SolverConfig::default());
    let scenarios = planner.preview(&search.request)?;
    let queries = OfferQueries::from_scenarios(&scenarios);
    Ok(ScenarioPreview { scenarios, queries })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScenariosConfig, CliError> {
    let merged = ScenariosArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScenariosConfig::try_from(merged)
}
