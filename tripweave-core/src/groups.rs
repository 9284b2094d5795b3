//! Decision groups: the exclusive choice points of one scenario.

use thiserror::Error;

use crate::diagnostics::{MissingHotel, MissingLeg};
use crate::index::CandidateIndex;
use crate::itinerary::{Leg, Stay};
use crate::offer::{CarOffer, FlightOffer, HotelOffer};
use crate::scenario::Scenario;

/// A borrowed offer tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OfferRef<'a> {
    /// A flight serving a transport group.
    Flight(&'a FlightOffer),
    /// A car rental serving a transport group.
    Car(&'a CarOffer),
    /// A hotel serving a lodging group.
    Hotel(&'a HotelOffer),
}

impl OfferRef<'_> {
    /// Price contributed to the cost objective.
    #[must_use]
    pub const fn price(&self) -> f64 {
        match self {
            Self::Flight(flight) => flight.price,
            Self::Car(car) => car.price_total,
            Self::Hotel(hotel) => hotel.price_total,
        }
    }

    /// Hours contributed to the duration objective. Only flights count.
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        match self {
            Self::Flight(flight) => flight.duration_hours(),
            Self::Car(_) | Self::Hotel(_) => 0.0,
        }
    }
}

/// What a [`DecisionGroup`] chooses for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSlot {
    /// Transport for one leg; options are flights then cars.
    Transport(Leg),
    /// Lodging for one main stay; options are hotels.
    Lodging(Stay),
}

/// One mutually exclusive choice point. Never empty once assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionGroup<'a> {
    /// The leg or stay this group covers.
    pub slot: GroupSlot,
    /// Candidate offers; exactly one is selected per solution.
    pub options: Vec<OfferRef<'a>>,
}

impl<'a> DecisionGroup<'a> {
    /// Number of candidate options.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the group has no options.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// The option at `choice`, if in range.
    #[must_use]
    pub fn option(&self, choice: usize) -> Option<OfferRef<'a>> {
        self.options.get(choice).copied()
    }
}

/// Legs and stays of a scenario that have no offers at all.
///
/// Returned by [`assemble_groups`] instead of a partial group list; a
/// scenario in this state is never handed to a solver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error(
    "no offers for {} legs and {} stays",
    .missing_legs.len(),
    .missing_hotels.len()
)]
pub struct MissingOffers {
    /// Legs without a flight or car.
    pub missing_legs: Vec<MissingLeg>,
    /// Main stays without a hotel.
    pub missing_hotels: Vec<MissingHotel>,
}

impl MissingOffers {
    /// Whether nothing is missing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.missing_legs.is_empty() && self.missing_hotels.is_empty()
    }
}

/// Build the decision groups for `scenario`.
///
/// Transport groups come first, one per leg in travel order, followed by one
/// lodging group per main stay. Gap-fill stays get no lodging group. Every
/// leg and stay is checked so the error lists all gaps, not just the first.
///
/// # Errors
///
/// Returns [`MissingOffers`] when any leg or main stay has no candidates.
pub fn assemble_groups<'a>(
    scenario: &Scenario,
    index: &CandidateIndex<'a>,
) -> Result<Vec<DecisionGroup<'a>>, MissingOffers> {
    let mut groups = Vec::with_capacity(scenario.legs.len() + scenario.stays.len());
    let mut missing = MissingOffers::default();

    for leg in &scenario.legs {
        let options: Vec<OfferRef<'a>> = index
            .flights_for(leg)
            .iter()
            .map(|&flight| OfferRef::Flight(flight))
            .chain(index.cars_for(leg).iter().map(|&car| OfferRef::Car(car)))
            .collect();
        if options.is_empty() {
            missing.missing_legs.push(MissingLeg::from(leg));
            continue;
        }
        groups.push(DecisionGroup {
            slot: GroupSlot::Transport(leg.clone()),
            options,
        });
    }

    for stay in scenario.main_stays() {
        let options: Vec<OfferRef<'a>> = index
            .hotels_for(stay)
            .iter()
            .map(|&hotel| OfferRef::Hotel(hotel))
            .collect();
        if options.is_empty() {
            missing.missing_hotels.push(MissingHotel::from(stay));
            continue;
        }
        groups.push(DecisionGroup {
            slot: GroupSlot::Lodging(stay.clone()),
            options,
        });
    }

    if missing.is_empty() {
        Ok(groups)
    } else {
        Err(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_offers, sample_request};
    use crate::{ScenarioBuilder, ScenarioConfig};
    use rstest::rstest;

    fn first_scenario() -> Scenario {
        let scenarios = ScenarioBuilder::new(ScenarioConfig::default()).build(&sample_request());
        scenarios.into_iter().next().expect("scenario")
    }

    #[rstest]
    fn groups_cover_every_leg_then_every_main_stay() {
        let offers = sample_offers();
        let index = CandidateIndex::build(&offers);
        let scenario = first_scenario();

        let groups = assemble_groups(&scenario, &index).expect("complete offers");
        let transport = groups
            .iter()
            .filter(|g| matches!(g.slot, GroupSlot::Transport(_)))
            .count();
        assert_eq!(transport, scenario.legs.len());
        assert_eq!(groups.len(), scenario.legs.len() + scenario.main_stays().count());
        assert!(groups.iter().all(|g| !g.is_empty()));
        assert!(matches!(
            groups.last().map(|g| &g.slot),
            Some(GroupSlot::Lodging(_))
        ));
    }

    #[rstest]
    fn flights_precede_cars_within_a_leg() {
        let offers = sample_offers();
        let index = CandidateIndex::build(&offers);
        let scenario = first_scenario();

        let groups = assemble_groups(&scenario, &index).expect("complete offers");
        let mixed = groups
            .iter()
            .find(|g| g.options.iter().any(|o| matches!(o, OfferRef::Car(_))))
            .expect("a leg with a car option");
        let first_car = mixed
            .options
            .iter()
            .position(|o| matches!(o, OfferRef::Car(_)))
            .expect("car");
        assert!(
            mixed
                .options
                .iter()
                .skip(first_car)
                .all(|o| matches!(o, OfferRef::Car(_)))
        );
    }

    #[rstest]
    fn missing_offers_are_all_reported() {
        let mut offers = sample_offers();
        offers.hotels.retain(|hotel| hotel.city != "MIA");
        offers.flights.retain(|flight| flight.leg.origin != "GYN");
        let index = CandidateIndex::build(&offers);

        let missing = assemble_groups(&first_scenario(), &index).expect_err("gaps");
        assert_eq!(missing.missing_legs.len(), 1);
        assert_eq!(missing.missing_hotels.len(), 1);
        let hotel = missing.missing_hotels.first().expect("hotel");
        assert_eq!(hotel.location, "MIA");
    }

    #[rstest]
    fn car_options_carry_no_duration() {
        let offers = sample_offers();
        let car = offers.cars.first().expect("car offer");
        let option = OfferRef::Car(car);
        assert!(option.duration_hours().abs() < f64::EPSILON);
        assert!((option.price() - car.price_total).abs() < f64::EPSILON);
    }
}
