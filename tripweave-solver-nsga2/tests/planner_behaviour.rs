//! Behavioural tests for `TripPlanner` driving `Nsga2Solver` using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tripweave_core::test_support::{flight, sample_offers, sample_request, ymd};
use tripweave_core::{
    CancellationToken, MemoryLog, OfferSet, PlanError, Preference, ScenarioConfig, SearchContext,
    SearchOutcome, SolverConfig, SolverStatus, Stop, TripAnchors, TripPlanner, TripRequest,
};
use tripweave_solver_nsga2::Nsga2Solver;

#[derive(Debug)]
struct PlannerWorld {
    request: RefCell<TripRequest>,
    offers: RefCell<OfferSet>,
    config: RefCell<SolverConfig>,
    token: CancellationToken,
    log: RefCell<MemoryLog>,
    outcome: RefCell<Option<Result<SearchOutcome, PlanError>>>,
}

impl PlannerWorld {
    fn new() -> Self {
        Self {
            request: RefCell::new(sample_request()),
            offers: RefCell::new(OfferSet::default()),
            config: RefCell::new(SolverConfig::default()),
            token: CancellationToken::new(),
            log: RefCell::new(MemoryLog::new()),
            outcome: RefCell::new(None),
        }
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_outcome(&self) -> Result<SearchOutcome, PlanError> {
        self.outcome
            .borrow()
            .as_ref()
            .cloned()
            .expect("outcome should be recorded before assertions")
    }
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::new()
}

#[given("a round trip from GYN with a single three night stay in MIA")]
fn given_single_stay(world: &PlannerWorld) {
    world.request.replace(TripRequest {
        trip: TripAnchors {
            start_location: "GYN".to_owned(),
            start_date: ymd(2025, 7, 1),
            end_location: "GYN".to_owned(),
            end_date: ymd(2025, 7, 4),
        },
        stops: vec![Stop::flexible("MIA", 3)],
    });
}

#[given("flights for every leg but no hotels")]
fn given_flights_only(world: &PlannerWorld) {
    world.offers.replace(OfferSet {
        flights: vec![
            flight("GYN", "MIA", "2025-07-01", 600.0, "08:00 – 16:00"),
            flight("MIA", "GYN", "2025-07-04", 650.0, "18:00 – 03:30+1"),
        ],
        hotels: Vec::new(),
        cars: Vec::new(),
    });
}

#[given("the sample trip with a fixed MIA window")]
fn given_sample_trip(world: &PlannerWorld) {
    world.request.replace(sample_request());
}

#[given("the sample offers")]
fn given_sample_offers(world: &PlannerWorld) {
    world.offers.replace(sample_offers());
}

#[given("the price preference with room for ten solutions")]
fn given_price_preference(world: &PlannerWorld) {
    let mut config = world.config.borrow_mut();
    config.preference = Preference::Price;
    config.max_solutions = 10;
}

#[given("the search has been cancelled")]
fn given_cancelled(world: &PlannerWorld) {
    world.token.cancel();
}

#[when("the trip is planned")]
fn when_planned(world: &PlannerWorld) {
    let planner = TripPlanner::with_config(
        Nsga2Solver::new(),
        ScenarioConfig::default(),
        *world.config.borrow(),
    );
    let mut log = world.log.borrow_mut();
    let mut ctx = SearchContext::new(world.token.clone(), &mut *log);
    let outcome = planner.plan(&world.request.borrow(), &world.offers.borrow(), &mut ctx);
    world.outcome.replace(Some(outcome));
}

#[then("no solutions are returned")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_no_solutions(world: &PlannerWorld) {
    let outcome = world.expect_outcome().expect("plan should succeed");
    assert!(outcome.solutions.is_empty());
}

#[then("the diagnostics list the MIA stay under missing hotels")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_missing_hotel(world: &PlannerWorld) {
    let outcome = world.expect_outcome().expect("plan should succeed");
    let SolverStatus::NoSolution { missing, .. } = outcome.status else {
        panic!("expected a no_solution status");
    };
    let report = missing.first().expect("one diagnostic");
    assert_eq!(report.order, vec!["MIA"]);
    assert!(report.missing_legs.is_empty());
    let stay = report.missing_hotels.first().expect("missing hotel");
    assert_eq!(stay.location, "MIA");
    assert_eq!(stay.checkin, ymd(2025, 7, 1));
    assert_eq!(stay.checkout, ymd(2025, 7, 4));
}

#[then("the cheapest itinerary comes first")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_cheapest_first(world: &PlannerWorld) {
    let outcome = world.expect_outcome().expect("plan should succeed");
    assert_eq!(outcome.status, SolverStatus::Ok);
    let best = outcome.solutions.first().expect("a solution");
    assert!((best.objectives.cost_total - 3000.0).abs() < 1e-6);
    assert!(
        outcome
            .solutions
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.objectives.cost_total <= b.objectives.cost_total))
    );
}

#[then("every solution follows the MIA, ORL, NYC ordering")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_single_ordering(world: &PlannerWorld) {
    let outcome = world.expect_outcome().expect("plan should succeed");
    assert!(
        outcome
            .solutions
            .iter()
            .all(|s| s.scenario_order == ["MIA", "ORL", "NYC"])
    );
}

#[then("the search log mentions the unsupplied ordering")]
fn then_log_mentions_skip(world: &PlannerWorld) {
    let log = world.log.borrow();
    assert!(
        log.entries()
            .iter()
            .any(|entry| entry.starts_with("skipping MIA > NYC > ORL"))
    );
}

#[then("the plan fails as cancelled")]
fn then_cancelled(world: &PlannerWorld) {
    assert!(matches!(world.expect_outcome(), Err(PlanError::Cancelled)));
}

#[scenario(path = "tests/features/planner.feature", index = 0)]
fn missing_hotel_is_diagnosed(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 1)]
fn complete_offers_are_solved(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 2)]
fn cancellation_stops_planning(world: PlannerWorld) {
    let _ = world;
}
