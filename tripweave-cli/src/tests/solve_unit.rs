//! Focused unit tests covering solve CLI configuration and output.

use super::helpers::{Workspace, decode_output, write_utf8};
use super::*;
use crate::search_file::load_search_file;
use crate::solve::{SolveConfig, config_from_layers_for_test, execute_solve, run_solve_with};
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;
use tripweave_core::test_support::sample_request;
use tripweave_core::{OfferSet, PlanError, Preference, ScenarioConfig, SolverConfig};

fn config_for(request_path: camino::Utf8PathBuf) -> SolveConfig {
    SolveConfig {
        request_path,
        scenario: ScenarioConfig::default(),
        solver: SolverConfig::default(),
    }
}

#[rstest]
fn converting_solve_without_request_errors() {
    let err =
        SolveConfig::try_from(SolveArgs::default()).expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(env, ENV_SOLVE_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn unset_flags_fall_back_to_defaults() {
    let args = SolveArgs {
        request_path: Some("search.json".into()),
        ..SolveArgs::default()
    };
    let config = SolveConfig::try_from(args).expect("config should build");
    assert_eq!(config.solver, SolverConfig::default());
    assert_eq!(config.scenario, ScenarioConfig::default());
}

#[rstest]
#[case("price", Preference::Price)]
#[case(" Duration ", Preference::Duration)]
#[case("BEST", Preference::Best)]
fn preference_names_are_parsed(#[case] raw: &str, #[case] expected: Preference) {
    let args = SolveArgs {
        request_path: Some("search.json".into()),
        preference: Some(raw.to_owned()),
        ..SolveArgs::default()
    };
    let config = SolveConfig::try_from(args).expect("config should build");
    assert_eq!(config.solver.preference, expected);
}

#[rstest]
fn unknown_preference_is_rejected() {
    let args = SolveArgs {
        request_path: Some("search.json".into()),
        preference: Some("scenic".to_owned()),
        ..SolveArgs::default()
    };
    let err = SolveConfig::try_from(args).expect_err("unknown preference should error");
    match err {
        CliError::InvalidPreference(source) => assert_eq!(source.0, "scenic"),
        other => panic!("expected InvalidPreference, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "population_size": "many" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "request_path": "from-file.json",
            "population_size": 10,
            "preference": "duration",
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": "from-env.json",
        "seed": 7,
    }));
    composer.push_cli(json!({ "population_size": 30 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path.as_str(), "from-env.json");
    assert_eq!(config.solver.population_size, 30);
    assert_eq!(config.solver.seed, 7);
    assert_eq!(config.solver.preference, Preference::Duration);
    assert_eq!(config.solver.generations, SolverConfig::default().generations);
}

#[rstest]
fn search_file_without_offers_decodes() {
    let workspace = Workspace::new();
    let path = workspace.search_file(OfferSet::default());
    let search = load_search_file(&path).expect("search file should decode");
    assert_eq!(search.request, sample_request());
    assert!(search.offers.is_empty());
}

#[rstest]
fn invalid_json_reports_parse_error() {
    let workspace = Workspace::new();
    let path = workspace.path("broken.json");
    write_utf8(&path, b"{ not valid json");

    let err = load_search_file(&path).expect_err("invalid json should error");
    match err {
        CliError::ParseSearchFile { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ParseSearchFile, found {other:?}"),
    }
}

#[rstest]
fn missing_file_reports_open_error() {
    let workspace = Workspace::new();
    let path = workspace.path("absent.json");

    let err = load_search_file(&path).expect_err("missing file should error");
    match err {
        CliError::OpenSearchFile { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected OpenSearchFile, found {other:?}"),
    }
}

#[rstest]
fn solving_the_sample_trip_finds_the_cheapest_itinerary() {
    let workspace = Workspace::new();
    let mut config = config_for(workspace.sample_search_file());
    config.solver.preference = Preference::Price;
    config.solver.max_solutions = 10;

    let report = execute_solve(&config).expect("solve should succeed");
    let cheapest = report.outcome.solutions.first().expect("a solution");
    assert!((cheapest.objectives.cost_total - 3000.0).abs() < 1e-6);
    assert_eq!(cheapest.scenario_order, ["MIA", "ORL", "NYC"]);
    assert!(
        report
            .log
            .iter()
            .any(|entry| entry.starts_with("skipping MIA > NYC > ORL"))
    );
}

#[rstest]
fn missing_offers_produce_a_no_solution_status() {
    let workspace = Workspace::new();
    let config = config_for(workspace.search_file(OfferSet::default()));

    let report = execute_solve(&config).expect("missing offers are not an error");
    let payload = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(payload["status"], "no_solution");
    assert_eq!(payload["solutions"], json!([]));
    assert_eq!(
        payload["missing"].as_array().map(Vec::len),
        Some(2),
        "both orderings lack offers"
    );
}

#[rstest]
fn invalid_solver_settings_surface_as_plan_errors() {
    let workspace = Workspace::new();
    let mut config = config_for(workspace.sample_search_file());
    config.solver.max_solutions = 0;

    let err = execute_solve(&config).expect_err("zero max solutions should error");
    match err {
        CliError::Plan(PlanError::InvalidConfig(_)) => {}
        other => panic!("expected Plan(InvalidConfig), found {other:?}"),
    }
}

#[rstest]
fn run_solve_writes_pretty_json() {
    let workspace = Workspace::new();
    let args = SolveArgs {
        request_path: Some(workspace.sample_search_file()),
        max_solutions: Some(2),
        ..SolveArgs::default()
    };
    let mut buffer: Vec<u8> = Vec::new();

    run_solve_with(args, &mut buffer).expect("solve should succeed");

    assert!(buffer.ends_with(b"\n"));
    let payload = decode_output(&buffer);
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["solutions"].as_array().map(Vec::len), Some(2));
    assert_eq!(payload["scenarios"].as_array().map(Vec::len), Some(2));
    assert!(payload["log"].as_array().is_some_and(|log| !log.is_empty()));
}
