//! Exact-match lookup tables over flat offer lists.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::date::calendar_date;
use crate::itinerary::{Leg, Stay};
use crate::offer::{CarOffer, FlightOffer, HotelOffer, OfferSet};

type RouteKey = (String, String, NaiveDate);
type RentalKey = (String, String, NaiveDate, NaiveDate);
type LodgingKey = (String, NaiveDate, NaiveDate);

/// Offers keyed by the legs and stays they can serve.
///
/// Flights are keyed by `(origin, destination, departure date)`, car rentals
/// by `(pickup, dropoff, pickup date, dropoff date)` and hotels by
/// `(city, checkin, checkout)`. Time-of-day components are ignored. Offers
/// whose dates cannot be parsed are left out because nothing could match
/// them.
///
/// The index borrows the offer set; build it once per search and share it
/// across every scenario.
#[derive(Debug, Default)]
pub struct CandidateIndex<'a> {
    flights: HashMap<RouteKey, Vec<&'a FlightOffer>>,
    cars: HashMap<RentalKey, Vec<&'a CarOffer>>,
    hotels: HashMap<LodgingKey, Vec<&'a HotelOffer>>,
}

impl<'a> CandidateIndex<'a> {
    /// Index every offer in `offers`, preserving input order per key.
    #[must_use]
    pub fn build(offers: &'a OfferSet) -> Self {
        let mut index = Self::default();

        for flight in &offers.flights {
            let Some(date) = calendar_date(&flight.leg.departure) else {
                log::debug!(
                    "skipping flight {} -> {}: unparsable departure {:?}",
                    flight.leg.origin,
                    flight.leg.destination,
                    flight.leg.departure
                );
                continue;
            };
            index
                .flights
                .entry((flight.leg.origin.clone(), flight.leg.destination.clone(), date))
                .or_default()
                .push(flight);
        }

        for car in &offers.cars {
            let block = &car.rental_block;
            let (Some(pickup), Some(dropoff)) = (
                calendar_date(&block.pickup_date),
                calendar_date(&block.dropoff_date),
            ) else {
                log::debug!(
                    "skipping car {} -> {}: unparsable rental dates",
                    block.pickup,
                    block.dropoff
                );
                continue;
            };
            index
                .cars
                .entry((block.pickup.clone(), block.dropoff.clone(), pickup, dropoff))
                .or_default()
                .push(car);
        }

        for hotel in &offers.hotels {
            let (Some(checkin), Some(checkout)) =
                (calendar_date(&hotel.checkin), calendar_date(&hotel.checkout))
            else {
                log::debug!("skipping hotel in {}: unparsable stay dates", hotel.city);
                continue;
            };
            index
                .hotels
                .entry((hotel.city.clone(), checkin, checkout))
                .or_default()
                .push(hotel);
        }

        log::debug!(
            "indexed {} flight, {} car and {} hotel keys",
            index.flights.len(),
            index.cars.len(),
            index.hotels.len()
        );
        index
    }

    /// Flights departing on the leg's departure date along its route.
    #[must_use]
    pub fn flights_for(&self, leg: &Leg) -> &[&'a FlightOffer] {
        self.flights
            .get(&(leg.origin.clone(), leg.destination.clone(), leg.departure))
            .map_or(&[], Vec::as_slice)
    }

    /// Car rentals picked up at the leg's origin on its departure date and
    /// dropped off at its destination on its arrival date.
    #[must_use]
    pub fn cars_for(&self, leg: &Leg) -> &[&'a CarOffer] {
        self.cars
            .get(&(
                leg.origin.clone(),
                leg.destination.clone(),
                leg.departure,
                leg.arrival,
            ))
            .map_or(&[], Vec::as_slice)
    }

    /// Hotels covering exactly the stay's dates at its location.
    #[must_use]
    pub fn hotels_for(&self, stay: &Stay) -> &[&'a HotelOffer] {
        self.hotels
            .get(&(stay.location.clone(), stay.checkin, stay.checkout))
            .map_or(&[], Vec::as_slice)
    }

    /// Whether the leg has at least one flight or car option.
    #[must_use]
    pub fn has_transport(&self, leg: &Leg) -> bool {
        !self.flights_for(leg).is_empty() || !self.cars_for(leg).is_empty()
    }
}
