//! Objective values and the solutions reported to callers.

use serde::{Deserialize, Serialize};

use crate::groups::{DecisionGroup, OfferRef};
use crate::offer::{CarOffer, FlightOffer, HotelOffer, round_hundredths};

/// The two minimised objectives of a choice vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Objectives {
    /// Flights, car rentals and hotels summed.
    pub cost_total: f64,
    /// Flight hours summed; car legs contribute nothing.
    pub flight_duration_hours: f64,
}

impl Objectives {
    /// Evaluate the options picked by `choices`, one index per group.
    ///
    /// Both sums are rounded to two decimals. Out-of-range indices
    /// contribute nothing.
    #[expect(clippy::float_arithmetic, reason = "objectives are sums of prices and hours")]
    #[must_use]
    pub fn evaluate(groups: &[DecisionGroup<'_>], choices: &[usize]) -> Self {
        let (cost, hours) = groups
            .iter()
            .zip(choices)
            .filter_map(|(group, &choice)| group.option(choice))
            .fold((0.0, 0.0), |(cost_sum, hours_sum), option| {
                (cost_sum + option.price(), hours_sum + option.duration_hours())
            });
        Self {
            cost_total: round_hundredths(cost),
            flight_duration_hours: round_hundredths(hours),
        }
    }

    /// Whether `self` is no worse on both objectives and strictly better on
    /// at least one.
    #[must_use]
    pub fn dominates(&self, other: &Self) -> bool {
        let no_worse = self.cost_total <= other.cost_total
            && self.flight_duration_hours <= other.flight_duration_hours;
        let better = self.cost_total < other.cost_total
            || self.flight_duration_hours < other.flight_duration_hours;
        no_worse && better
    }

    /// Objective values in a fixed order: cost, then duration.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 2] {
        [self.cost_total, self.flight_duration_hours]
    }
}

/// One choice vector found by a solver, with its objectives.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// One option index per decision group.
    pub choices: Vec<usize>,
    /// Objective values of `choices`.
    pub objectives: Objectives,
}

impl Assignment {
    /// Evaluate `choices` against `groups`.
    #[must_use]
    pub fn evaluate(groups: &[DecisionGroup<'_>], choices: Vec<usize>) -> Self {
        let objectives = Objectives::evaluate(groups, &choices);
        Self {
            choices,
            objectives,
        }
    }
}

/// Offers picked by a solution, grouped by kind.
///
/// Two solutions are duplicates exactly when their selections are equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selections {
    /// Chosen flights in leg order.
    pub flights: Vec<FlightOffer>,
    /// Chosen hotels in stay order.
    pub hotels: Vec<HotelOffer>,
    /// Chosen car rentals in leg order.
    pub cars: Vec<CarOffer>,
}

impl Selections {
    /// Copy out the offers picked by `choices`.
    #[must_use]
    pub fn from_choices(groups: &[DecisionGroup<'_>], choices: &[usize]) -> Self {
        let mut selections = Self::default();
        for option in groups
            .iter()
            .zip(choices)
            .filter_map(|(group, &choice)| group.option(choice))
        {
            match option {
                OfferRef::Flight(flight) => selections.flights.push(flight.clone()),
                OfferRef::Car(car) => selections.cars.push(car.clone()),
                OfferRef::Hotel(hotel) => selections.hotels.push(hotel.clone()),
            }
        }
        selections
    }

    /// Total number of selected offers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.flights.len() + self.hotels.len() + self.cars.len()
    }

    /// Whether nothing was selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A complete itinerary returned by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Stop order of the scenario the solution belongs to.
    pub scenario_order: Vec<String>,
    /// Cost and flight duration.
    pub objectives: Objectives,
    /// Booked offers.
    pub selections: Selections,
}
