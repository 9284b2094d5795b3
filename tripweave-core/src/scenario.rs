//! Scenario generation: turning a trip plan into candidate stop orderings.
//!
//! Fixed-window stops are always visited in window order. Flexible stops are
//! appended after the last fixed stop, once per permutation, each consuming
//! exactly its minimum number of nights. Short idle intervals before a fixed
//! window are covered by gap-fill stays.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::days_between;
use crate::itinerary::{Leg, Stay, StayKind, legs_between};
use crate::trip::{StopConstraint, TripAnchors, TripRequest};

/// Default upper bound for a gap-fill stay, in nights.
pub const DEFAULT_MAX_GAP_FILL_DAYS: u32 = 2;

/// Default number of flexible stops above which permutation is abandoned.
pub const DEFAULT_MAX_PERMUTED_FLEXIBLE_STOPS: usize = 6;

/// Tuning knobs for [`ScenarioBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Longest idle interval, in days, that is filled with a gap-fill stay.
    pub max_gap_fill_days: u32,
    /// Flexible stop count above which only the input order is tried.
    pub max_permuted_flexible_stops: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            max_gap_fill_days: DEFAULT_MAX_GAP_FILL_DAYS,
            max_permuted_flexible_stops: DEFAULT_MAX_PERMUTED_FLEXIBLE_STOPS,
        }
    }
}

/// One ordering of the plan's stops with its derived schedule.
///
/// `overrun_days` is zero exactly when `is_feasible` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Stop locations in visiting order.
    pub order: Vec<String>,
    /// Stays in check-in order, including gap fills.
    pub stays: Vec<Stay>,
    /// Legs connecting the anchors and stays.
    pub legs: Vec<Leg>,
    /// Days by which the schedule exceeds the trip end date.
    pub overrun_days: u32,
    /// Whether the schedule fits inside the trip anchors.
    pub is_feasible: bool,
}

impl Scenario {
    /// Stays that fulfil a stop and therefore need lodging.
    #[must_use]
    pub fn main_stays(&self) -> impl Iterator<Item = &Stay> {
        self.stays.iter().filter(|stay| stay.is_main())
    }
}

struct FixedStop<'a> {
    location: &'a str,
    window_start: NaiveDate,
    window_end: NaiveDate,
}

struct FlexibleStop<'a> {
    location: &'a str,
    min_days: u32,
}

/// Builds [`Scenario`] lists from trip requests.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tripweave_core::{ScenarioBuilder, ScenarioConfig, Stop, TripAnchors, TripRequest};
///
/// let day = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
/// let request = TripRequest {
///     trip: TripAnchors {
///         start_location: "GYN".into(),
///         start_date: day(1),
///         end_location: "GYN".into(),
///         end_date: day(20),
///     },
///     stops: vec![Stop::flexible("ORL", 2), Stop::flexible("NYC", 3)],
/// };
/// let scenarios = ScenarioBuilder::new(ScenarioConfig::default()).build(&request);
/// assert_eq!(scenarios.len(), 2);
/// assert!(scenarios.iter().all(|s| s.is_feasible));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioBuilder {
    config: ScenarioConfig,
}

impl ScenarioBuilder {
    /// Construct a builder with explicit configuration.
    #[must_use]
    pub const fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Enumerate every distinct ordering of the request's stops.
    ///
    /// Infeasible orderings are kept and flagged so callers can explain why
    /// nothing fits.
    #[must_use]
    pub fn build(&self, request: &TripRequest) -> Vec<Scenario> {
        let (fixed, flexible) = partition_stops(request);
        let mut seen: HashSet<Vec<String>> = HashSet::new();
        let mut scenarios = Vec::new();

        for ordering in self.flexible_orderings(flexible.len()) {
            let sequence: Vec<&FlexibleStop<'_>> = ordering
                .iter()
                .filter_map(|&idx| flexible.get(idx))
                .collect();
            let order: Vec<String> = fixed
                .iter()
                .map(|stop| stop.location)
                .chain(sequence.iter().map(|stop| stop.location))
                .map(str::to_owned)
                .collect();

            if has_adjacent_repeat(&order) {
                log::debug!("skipping ordering {order:?}: consecutive repeated location");
                continue;
            }
            if !seen.insert(order.clone()) {
                continue;
            }

            scenarios.push(self.schedule(order, &fixed, &sequence, &request.trip));
        }

        log::debug!(
            "built {} scenarios ({} feasible)",
            scenarios.len(),
            scenarios.iter().filter(|s| s.is_feasible).count()
        );
        scenarios
    }

    fn flexible_orderings(&self, count: usize) -> Vec<Vec<usize>> {
        if count > self.config.max_permuted_flexible_stops {
            log::warn!(
                "{count} flexible stops exceed the permutation limit of {}; using input order only",
                self.config.max_permuted_flexible_stops
            );
            return vec![(0..count).collect()];
        }
        permutations(count)
    }

    fn schedule(
        &self,
        order: Vec<String>,
        fixed: &[FixedStop<'_>],
        flexible: &[&FlexibleStop<'_>],
        anchors: &TripAnchors,
    ) -> Scenario {
        let max_gap = i64::from(self.config.max_gap_fill_days);
        let mut cursor = anchors.start_date;
        let mut stays = Vec::with_capacity(fixed.len() * 2 + flexible.len());

        for stop in fixed {
            let gap = days_between(cursor, stop.window_start);
            if gap > 0 && gap <= max_gap {
                stays.push(Stay::new(
                    stop.location,
                    cursor,
                    stop.window_start,
                    StayKind::GapFill,
                ));
            }
            if stop.window_end > anchors.end_date {
                log::warn!(
                    "fixed window for {} ends {} after trip end {}",
                    stop.location,
                    stop.window_end,
                    anchors.end_date
                );
            }
            stays.push(Stay::new(
                stop.location,
                stop.window_start,
                stop.window_end,
                StayKind::Main,
            ));
            cursor = cursor.max(stop.window_end);
        }

        if flexible.is_empty()
            && let Some(last) = fixed.last()
        {
            let gap = days_between(cursor, anchors.end_date);
            if gap > 0 && gap <= max_gap {
                stays.push(Stay::new(
                    last.location,
                    cursor,
                    anchors.end_date,
                    StayKind::GapFill,
                ));
                cursor = anchors.end_date;
            }
        }

        for stop in flexible {
            let checkout = cursor
                .checked_add_days(Days::new(u64::from(stop.min_days)))
                .unwrap_or(NaiveDate::MAX);
            stays.push(Stay::new(stop.location, cursor, checkout, StayKind::Main));
            cursor = checkout;
        }

        let overrun = days_between(anchors.end_date, cursor).max(0);
        let overrun_days = u32::try_from(overrun).unwrap_or(u32::MAX);
        let legs = legs_between(
            &stays,
            &anchors.start_location,
            &anchors.end_location,
            anchors.end_date,
        );

        Scenario {
            order,
            stays,
            legs,
            overrun_days,
            is_feasible: overrun_days == 0,
        }
    }
}

fn partition_stops(request: &TripRequest) -> (Vec<FixedStop<'_>>, Vec<FlexibleStop<'_>>) {
    let mut fixed = Vec::new();
    let mut flexible = Vec::new();
    for stop in &request.stops {
        match stop.constraint {
            StopConstraint::FixedWindow {
                window_start,
                window_end,
            } => fixed.push(FixedStop {
                location: &stop.location,
                window_start,
                window_end,
            }),
            StopConstraint::FlexibleDays { min_days } => flexible.push(FlexibleStop {
                location: &stop.location,
                min_days,
            }),
        }
    }
    fixed.sort_by_key(|stop| stop.window_start);
    (fixed, flexible)
}

fn has_adjacent_repeat(order: &[String]) -> bool {
    order.windows(2).any(|pair| match pair {
        [a, b] => a == b,
        _ => false,
    })
}

/// All permutations of `0..count` in lexicographic order, identity first.
fn permutations(count: usize) -> Vec<Vec<usize>> {
    let mut current: Vec<usize> = (0..count).collect();
    let mut all = vec![current.clone()];
    while next_permutation(&mut current) {
        all.push(current.clone());
    }
    all
}

#[expect(
    clippy::indexing_slicing,
    reason = "pivot and successor are derived from in-range positions"
)]
fn next_permutation(items: &mut [usize]) -> bool {
    let Some(pivot) = (1..items.len())
        .rev()
        .find(|&i| items[i - 1] < items[i])
        .map(|i| i - 1)
    else {
        return false;
    };
    let successor = (pivot + 1..items.len())
        .rev()
        .find(|&j| items[j] > items[pivot])
        .unwrap_or(pivot);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::Stop;
    use rstest::{fixture, rstest};

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn request_ending(end: NaiveDate, stops: Vec<Stop>) -> TripRequest {
        TripRequest {
            trip: TripAnchors {
                start_location: "GYN".to_owned(),
                start_date: ymd(2025, 5, 30),
                end_location: "GYN".to_owned(),
                end_date: end,
            },
            stops,
        }
    }

    #[fixture]
    fn mixed_stops() -> Vec<Stop> {
        vec![
            Stop::flexible("ORL", 2),
            Stop::fixed("MIA", ymd(2025, 6, 1), ymd(2025, 6, 5)),
            Stop::flexible("NYC", 3),
        ]
    }

    fn orders(scenarios: &[Scenario]) -> Vec<Vec<&str>> {
        scenarios
            .iter()
            .map(|s| s.order.iter().map(String::as_str).collect())
            .collect()
    }

    #[rstest]
    fn permutes_flexible_stops_after_fixed_window(mixed_stops: Vec<Stop>) {
        let request = request_ending(ymd(2025, 6, 15), mixed_stops);
        let scenarios = ScenarioBuilder::default().build(&request);

        assert_eq!(
            orders(&scenarios),
            vec![vec!["MIA", "ORL", "NYC"], vec!["MIA", "NYC", "ORL"]]
        );
        assert!(scenarios.iter().all(|s| s.is_feasible && s.overrun_days == 0));
    }

    #[rstest]
    fn schedule_inserts_gap_fill_before_fixed_window(mixed_stops: Vec<Stop>) {
        let request = request_ending(ymd(2025, 6, 15), mixed_stops);
        let scenarios = ScenarioBuilder::default().build(&request);
        let first = scenarios.first().expect("scenario");

        let kinds: Vec<(&str, StayKind, u32)> = first
            .stays
            .iter()
            .map(|stay| (stay.location.as_str(), stay.kind, stay.nights))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("MIA", StayKind::GapFill, 2),
                ("MIA", StayKind::Main, 4),
                ("ORL", StayKind::Main, 2),
                ("NYC", StayKind::Main, 3),
            ]
        );
        let last = first.stays.last().expect("stay");
        assert_eq!(last.checkout, ymd(2025, 6, 10));
    }

    #[rstest]
    fn legs_follow_the_schedule(mixed_stops: Vec<Stop>) {
        let request = request_ending(ymd(2025, 6, 15), mixed_stops);
        let scenarios = ScenarioBuilder::default().build(&request);
        let first = scenarios.first().expect("scenario");

        let hops: Vec<(&str, &str, NaiveDate)> = first
            .legs
            .iter()
            .map(|leg| (leg.origin.as_str(), leg.destination.as_str(), leg.departure))
            .collect();
        assert_eq!(
            hops,
            vec![
                ("GYN", "MIA", ymd(2025, 5, 30)),
                ("MIA", "ORL", ymd(2025, 6, 5)),
                ("ORL", "NYC", ymd(2025, 6, 7)),
                ("NYC", "GYN", ymd(2025, 6, 10)),
            ]
        );
    }

    #[rstest]
    fn early_trip_end_overruns_every_ordering(mixed_stops: Vec<Stop>) {
        let request = request_ending(ymd(2025, 6, 3), mixed_stops);
        let scenarios = ScenarioBuilder::default().build(&request);

        assert_eq!(scenarios.len(), 2);
        for scenario in &scenarios {
            assert!(!scenario.is_feasible);
            assert_eq!(scenario.overrun_days, 7);
        }
    }

    #[rstest]
    fn long_gaps_are_left_idle() {
        let stops = vec![Stop::fixed("MIA", ymd(2025, 6, 10), ymd(2025, 6, 12))];
        let request = request_ending(ymd(2025, 6, 20), stops);
        let scenarios = ScenarioBuilder::default().build(&request);
        let only = scenarios.first().expect("scenario");

        assert_eq!(only.stays.len(), 1);
        let leg = only.legs.first().expect("outbound leg");
        assert_eq!(leg.departure, ymd(2025, 6, 10));
    }

    #[rstest]
    fn trailing_gap_is_filled_when_no_flexible_stops() {
        let stops = vec![Stop::fixed("MIA", ymd(2025, 5, 30), ymd(2025, 6, 2))];
        let request = request_ending(ymd(2025, 6, 4), stops);
        let scenarios = ScenarioBuilder::default().build(&request);
        let only = scenarios.first().expect("scenario");

        let trailing = only.stays.last().expect("gap fill");
        assert_eq!(trailing.kind, StayKind::GapFill);
        assert_eq!(trailing.checkout, ymd(2025, 6, 4));
        assert!(only.is_feasible);
    }

    #[rstest]
    fn identical_location_sequences_are_deduplicated() {
        let stops = vec![
            Stop::flexible("ORL", 2),
            Stop::flexible("NYC", 3),
            Stop::flexible("ORL", 4),
        ];
        let request = request_ending(ymd(2025, 7, 30), stops);
        let scenarios = ScenarioBuilder::default().build(&request);

        assert_eq!(orders(&scenarios), vec![vec!["ORL", "NYC", "ORL"]]);
    }

    #[rstest]
    fn too_many_flexible_stops_fall_back_to_input_order() {
        let stops = ["AAA", "BBB", "CCC"]
            .into_iter()
            .map(|code| Stop::flexible(code, 1))
            .collect();
        let request = request_ending(ymd(2025, 7, 30), stops);
        let builder = ScenarioBuilder::new(ScenarioConfig {
            max_permuted_flexible_stops: 2,
            ..ScenarioConfig::default()
        });

        let scenarios = builder.build(&request);
        assert_eq!(orders(&scenarios), vec![vec!["AAA", "BBB", "CCC"]]);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(3, 6)]
    #[case(4, 24)]
    fn permutation_counts(#[case] count: usize, #[case] expected: usize) {
        let all = permutations(count);
        assert_eq!(all.len(), expected);
        let distinct: HashSet<Vec<usize>> = all.into_iter().collect();
        assert_eq!(distinct.len(), expected);
    }
}
