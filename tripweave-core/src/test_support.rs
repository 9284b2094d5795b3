//! Fixture builders for unit, behaviour and property tests.
//!
//! Gated behind the `test-support` feature (and `cfg(test)`).

use chrono::NaiveDate;
use serde_json::json;

use crate::offer::{
    CarOffer, Details, FLIGHT_TIMES_KEY, FlightLeg, FlightOffer, HotelOffer, OfferSet, RentalBlock,
};
use crate::trip::{Stop, TripAnchors, TripRequest};

/// Build a date, panicking on invalid input.
///
/// # Panics
///
/// Panics when the components do not form a calendar date.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures are built from literal dates")]
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// A flight offer with a `times` detail.
#[must_use]
pub fn flight(
    origin: &str,
    destination: &str,
    departure: &str,
    price: f64,
    times: &str,
) -> FlightOffer {
    let mut details = Details::new();
    details.insert(FLIGHT_TIMES_KEY.to_owned(), json!(times));
    FlightOffer {
        leg: FlightLeg {
            origin: origin.to_owned(),
            destination: destination.to_owned(),
            departure: departure.to_owned(),
            arrival: None,
        },
        price,
        currency: "USD".to_owned(),
        provider: Some("fixture air".to_owned()),
        details,
    }
}

/// A hotel offer covering `checkin..checkout`.
#[must_use]
pub fn hotel(
    city: &str,
    checkin: &str,
    checkout: &str,
    price_total: f64,
    name: &str,
) -> HotelOffer {
    let nights = match (
        crate::date::calendar_date(checkin),
        crate::date::calendar_date(checkout),
    ) {
        (Some(start), Some(end)) => {
            u32::try_from(crate::date::days_between(start, end).max(0)).unwrap_or_default()
        }
        _ => 0,
    };
    HotelOffer {
        city: city.to_owned(),
        checkin: checkin.to_owned(),
        checkout: checkout.to_owned(),
        nights,
        price_total,
        currency: "USD".to_owned(),
        name: name.to_owned(),
    }
}

/// A car rental offer.
#[must_use]
pub fn car(
    pickup: &str,
    dropoff: &str,
    pickup_date: &str,
    dropoff_date: &str,
    price_total: f64,
) -> CarOffer {
    CarOffer {
        rental_block: RentalBlock {
            pickup: pickup.to_owned(),
            dropoff: dropoff.to_owned(),
            pickup_date: pickup_date.to_owned(),
            dropoff_date: dropoff_date.to_owned(),
        },
        price_total,
        currency: "USD".to_owned(),
        name: "Compact".to_owned(),
        details: Details::new(),
    }
}

/// Round trip from GYN with a fixed MIA window and flexible ORL and NYC
/// stops, ending 2025-06-15.
#[must_use]
pub fn sample_request() -> TripRequest {
    TripRequest {
        trip: TripAnchors {
            start_location: "GYN".to_owned(),
            start_date: ymd(2025, 5, 30),
            end_location: "GYN".to_owned(),
            end_date: ymd(2025, 6, 15),
        },
        stops: vec![
            Stop::fixed("MIA", ymd(2025, 6, 1), ymd(2025, 6, 5)),
            Stop::flexible("ORL", 2),
            Stop::flexible("NYC", 3),
        ],
    }
}

/// Offers covering the MIA > ORL > NYC ordering of [`sample_request`].
///
/// The MIA > NYC > ORL ordering is left without offers. Every flight leg
/// has a cheap slow and a dear fast option where it has two.
#[must_use]
pub fn sample_offers() -> OfferSet {
    OfferSet {
        flights: vec![
            flight("GYN", "MIA", "2025-05-30", 820.0, "06:00 – 14:30"),
            flight("GYN", "MIA", "2025-05-30", 640.0, "22:00 – 09:15+1"),
            flight("MIA", "ORL", "2025-06-05", 95.0, "10:00 – 11:05"),
            flight("ORL", "NYC", "2025-06-07", 180.0, "07:00 – 09:40"),
            flight("ORL", "NYC", "2025-06-07", 240.0, "12:00 – 14:20"),
            flight("NYC", "GYN", "2025-06-10", 710.0, "21:00 – 09:00+1"),
            flight("NYC", "GYN", "2025-06-10", 930.0, "10:00 – 19:30"),
        ],
        hotels: vec![
            hotel("MIA", "2025-06-01", "2025-06-05", 820.0, "Bayfront"),
            hotel("MIA", "2025-06-01", "2025-06-05", 610.0, "Harbour Inn"),
            hotel("ORL", "2025-06-05", "2025-06-07", 260.0, "Lakeside"),
            hotel("NYC", "2025-06-07", "2025-06-10", 690.0, "Midtown"),
            hotel("NYC", "2025-06-07", "2025-06-10", 540.0, "Chelsea"),
        ],
        cars: vec![car("MIA", "ORL", "2025-06-05", "2025-06-05", 60.0)],
    }
}
