//! Externally sourced offers: flights, hotels and car rentals.
//!
//! Prices are expected to be converted to a common currency before they
//! reach the core. Dates stay as the raw strings supplied by the acquisition
//! layer; [`crate::CandidateIndex`] reduces them to calendar dates and drops
//! offers it cannot match.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form provider metadata kept verbatim.
pub type Details = Map<String, Value>;

/// Key under [`FlightOffer::details`] holding the `HH:MM – HH:MM(+N)` range.
pub const FLIGHT_TIMES_KEY: &str = "times";

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Route and timing of a flight offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightLeg {
    /// Departure airport or city code.
    pub origin: String,
    /// Arrival airport or city code.
    pub destination: String,
    /// Departure date or date-time.
    pub departure: String,
    /// Arrival date or date-time, when known.
    #[serde(default)]
    pub arrival: Option<String>,
}

/// A bookable flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    /// Route and dates.
    pub leg: FlightLeg,
    /// Fare in the search currency.
    #[serde(default)]
    pub price: f64,
    /// Currency code of `price`.
    #[serde(default)]
    pub currency: String,
    /// Airline or agency name.
    #[serde(default)]
    pub provider: Option<String>,
    /// Provider metadata such as departure and arrival times.
    #[serde(default)]
    pub details: Details,
}

impl FlightOffer {
    /// Flight time in hours derived from the `times` detail.
    ///
    /// Missing or unparsable ranges count as zero hours.
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        self.details
            .get(FLIGHT_TIMES_KEY)
            .and_then(Value::as_str)
            .and_then(parse_time_range)
            .unwrap_or_default()
    }
}

/// A bookable hotel stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOffer {
    /// Location code the hotel serves.
    pub city: String,
    /// Check-in date.
    pub checkin: String,
    /// Checkout date.
    pub checkout: String,
    /// Nights covered by `price_total`.
    #[serde(default)]
    pub nights: u32,
    /// Total price for the stay.
    #[serde(default)]
    pub price_total: f64,
    /// Currency code of `price_total`.
    #[serde(default)]
    pub currency: String,
    /// Property name.
    #[serde(default)]
    pub name: String,
}

/// Pickup and dropoff of a car rental.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RentalBlock {
    /// Pickup location code.
    pub pickup: String,
    /// Dropoff location code.
    pub dropoff: String,
    /// Pickup date.
    pub pickup_date: String,
    /// Dropoff date.
    pub dropoff_date: String,
}

/// A bookable car rental.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarOffer {
    /// Pickup and dropoff details.
    pub rental_block: RentalBlock,
    /// Total rental price.
    #[serde(default)]
    pub price_total: f64,
    /// Currency code of `price_total`.
    #[serde(default)]
    pub currency: String,
    /// Vehicle or agency name.
    #[serde(default)]
    pub name: String,
    /// Provider metadata.
    #[serde(default)]
    pub details: Details,
}

/// The three flat offer collections consumed by a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferSet {
    /// Flight offers.
    #[serde(default)]
    pub flights: Vec<FlightOffer>,
    /// Hotel offers.
    #[serde(default)]
    pub hotels: Vec<HotelOffer>,
    /// Car rental offers.
    #[serde(default)]
    pub cars: Vec<CarOffer>,
}

impl OfferSet {
    /// Whether no offers of any kind are present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.flights.is_empty() && self.hotels.is_empty() && self.cars.is_empty()
    }
}

/// Parse a `HH:MM – HH:MM(+N)` range into hours, rounded to two decimals.
///
/// The separator may be an en dash or an ASCII hyphen. A `+N` suffix on the
/// arrival time adds `N` days; spans that still come out negative wrap by
/// one day.
///
/// # Examples
/// ```
/// use tripweave_core::offer::parse_time_range;
///
/// assert_eq!(parse_time_range("08:00 – 10:30"), Some(2.5));
/// assert_eq!(parse_time_range("22:15 - 06:45+1"), Some(8.5));
/// assert_eq!(parse_time_range("soon"), None);
/// ```
#[must_use]
pub fn parse_time_range(raw: &str) -> Option<f64> {
    let (start_raw, end_raw) = raw.split_once(['–', '-'])?;
    let start = clock_minutes(start_raw)?;

    let (end_clock, day_offset) = match end_raw.split_once('+') {
        Some((clock, offset)) => {
            let days = offset.trim().trim_end_matches(')').trim().parse::<i32>().ok()?;
            (clock.trim().trim_end_matches('('), days)
        }
        None => (end_raw, 0),
    };
    let end = clock_minutes(end_clock)?;

    let span = day_offset
        .checked_mul(MINUTES_PER_DAY)?
        .checked_add(end)?
        .checked_sub(start)?;
    let wrapped = if span < 0 {
        span.checked_add(MINUTES_PER_DAY)?
    } else {
        span
    };
    Some(minutes_to_hours(wrapped))
}

/// Minutes past midnight for an `HH:MM` clock reading.
///
/// Readings outside `00:00..=23:59` are rejected.
fn clock_minutes(raw: &str) -> Option<i32> {
    let (hour_text, minute_text) = raw.trim().split_once(':')?;
    let hour: i32 = hour_text.trim().parse().ok()?;
    let minute: i32 = minute_text.trim().parse().ok()?;
    if !(0..24).contains(&hour) || !(0..60).contains(&minute) {
        return None;
    }
    hour.checked_mul(60)?.checked_add(minute)
}

#[expect(
    clippy::float_arithmetic,
    reason = "converting whole minutes to fractional hours"
)]
fn minutes_to_hours(minutes: i32) -> f64 {
    round_hundredths(f64::from(minutes) / 60.0)
}

/// Round to two decimal places.
#[expect(clippy::float_arithmetic, reason = "objective values are reported in hundredths")]
#[must_use]
pub(crate) fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
