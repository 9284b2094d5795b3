//! What an acquisition layer must search for before planning.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::itinerary::{Leg, Stay};
use crate::offer::RentalBlock;
use crate::scenario::Scenario;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// De-duplicated offer searches needed to cover a set of scenarios.
///
/// Only feasible scenarios contribute, since infeasible ones are never
/// solved. Entries keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferQueries {
    /// Legs to search flights for.
    pub legs: Vec<Leg>,
    /// Main stays to search hotels for.
    pub stays: Vec<Stay>,
    /// One rental block per leg, to search cars for.
    pub rental_blocks: Vec<RentalBlock>,
}

impl OfferQueries {
    /// Collect the searches implied by `scenarios`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use tripweave_core::{OfferQueries, ScenarioBuilder, Stop, TripAnchors, TripRequest};
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
    /// let request = TripRequest {
    ///     trip: TripAnchors {
    ///         start_location: "GYN".into(),
    ///         start_date: day(1),
    ///         end_location: "GYN".into(),
    ///         end_date: day(10),
    ///     },
    ///     stops: vec![Stop::flexible("ORL", 2), Stop::flexible("NYC", 3)],
    /// };
    /// let scenarios = ScenarioBuilder::default().build(&request);
    /// let queries = OfferQueries::from_scenarios(&scenarios);
    /// assert_eq!(queries.rental_blocks.len(), queries.legs.len());
    /// assert_eq!(queries.stays.len(), 4);
    /// ```
    #[must_use]
    pub fn from_scenarios(scenarios: &[Scenario]) -> Self {
        let mut queries = Self::default();
        let mut seen_legs: HashSet<&Leg> = HashSet::new();
        let mut seen_stays: HashSet<&Stay> = HashSet::new();

        for scenario in scenarios.iter().filter(|s| s.is_feasible) {
            for leg in &scenario.legs {
                if seen_legs.insert(leg) {
                    queries.legs.push(leg.clone());
                    queries.rental_blocks.push(rental_block_for(leg));
                }
            }
            for stay in scenario.main_stays() {
                if seen_stays.insert(stay) {
                    queries.stays.push(stay.clone());
                }
            }
        }
        queries
    }

    /// Whether nothing needs to be searched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.legs.is_empty() && self.stays.is_empty()
    }
}

/// The rental block a car offer must match to serve `leg`.
#[must_use]
pub fn rental_block_for(leg: &Leg) -> RentalBlock {
    RentalBlock {
        pickup: leg.origin.clone(),
        dropoff: leg.destination.clone(),
        pickup_date: leg.departure.format(DATE_FORMAT).to_string(),
        dropoff_date: leg.arrival.format(DATE_FORMAT).to_string(),
    }
}
