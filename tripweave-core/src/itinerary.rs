//! Materialised stays and the legs connecting them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::days_between;

/// Why a [`Stay`] exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayKind {
    /// The stay fulfils one of the plan's stops.
    Main,
    /// The stay covers a short idle interval next to a fixed window.
    GapFill,
}

/// A concrete visit to a location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stay {
    /// Location code.
    pub location: String,
    /// Arrival date.
    pub checkin: NaiveDate,
    /// Departure date.
    pub checkout: NaiveDate,
    /// Nights between check-in and checkout.
    pub nights: u32,
    /// Whether this stay fulfils a stop or fills a gap.
    #[serde(rename = "type")]
    pub kind: StayKind,
}

impl Stay {
    /// Construct a stay, deriving `nights` from the dates.
    ///
    /// Reversed dates yield zero nights.
    #[must_use]
    pub fn new(
        location: impl Into<String>,
        checkin: NaiveDate,
        checkout: NaiveDate,
        kind: StayKind,
    ) -> Self {
        let nights = u32::try_from(days_between(checkin, checkout).max(0)).unwrap_or(u32::MAX);
        Self {
            location: location.into(),
            checkin,
            checkout,
            nights,
            kind,
        }
    }

    /// Whether the stay needs its own lodging booking.
    #[must_use]
    pub fn is_main(&self) -> bool {
        self.kind == StayKind::Main
    }
}

/// A directed transition between two places.
///
/// Legs are never created for a transition whose origin equals its
/// destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Leg {
    /// Departure location code.
    pub origin: String,
    /// Arrival location code.
    pub destination: String,
    /// Departure date.
    pub departure: NaiveDate,
    /// Arrival date.
    pub arrival: NaiveDate,
}

/// Derive the legs connecting `stays` to the trip anchors.
///
/// Stays are walked in check-in order: start anchor to the first stay, each
/// adjacent pair, then the last stay to the end anchor, which arrives on
/// `end_date`. Transitions between identical locations are dropped.
#[must_use]
pub fn legs_between(
    stays: &[Stay],
    start_location: &str,
    end_location: &str,
    end_date: NaiveDate,
) -> Vec<Leg> {
    let mut ordered: Vec<&Stay> = stays.iter().collect();
    ordered.sort_by_key(|stay| stay.checkin);

    let (Some(first), Some(last)) = (ordered.first(), ordered.last()) else {
        return Vec::new();
    };

    let mut legs = Vec::with_capacity(ordered.len() + 1);
    legs.push(Leg {
        origin: start_location.to_owned(),
        destination: first.location.clone(),
        departure: first.checkin,
        arrival: first.checkin,
    });
    legs.extend(ordered.windows(2).filter_map(|pair| match pair {
        [from, to] => Some(Leg {
            origin: from.location.clone(),
            destination: to.location.clone(),
            departure: from.checkout,
            arrival: to.checkin,
        }),
        _ => None,
    }));
    legs.push(Leg {
        origin: last.location.clone(),
        destination: end_location.to_owned(),
        departure: last.checkout,
        arrival: end_date,
    });

    legs.retain(|leg| leg.origin != leg.destination);
    legs
}
