//! Trip plans: the stops a traveller must visit and the anchors bounding them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date::{deserialize_lenient, today};

/// Scheduling constraint attached to a [`Stop`].
///
/// Serialised with an internal `constraint_type` tag so a fixed window
/// never carries a `min_days` value and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "constraint_type", rename_all = "snake_case")]
pub enum StopConstraint {
    /// The stop occupies an exact, non-negotiable date range.
    FixedWindow {
        /// First night of the stay.
        #[serde(deserialize_with = "deserialize_lenient", default = "today")]
        window_start: NaiveDate,
        /// Checkout date.
        #[serde(deserialize_with = "deserialize_lenient", default = "today")]
        window_end: NaiveDate,
    },
    /// The stop needs a minimum number of nights and may be ordered freely.
    FlexibleDays {
        /// Nights to spend at the stop.
        min_days: u32,
    },
}

/// A location the traveller must visit.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tripweave_core::Stop;
///
/// let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
/// let fixed = Stop::fixed("MIA", start, end);
/// assert!(fixed.is_fixed());
///
/// let flexible = Stop::flexible("ORL", 2);
/// assert!(!flexible.is_fixed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Location code, typically an IATA airport or city code.
    pub location: String,
    /// How the stop is scheduled.
    #[serde(flatten)]
    pub constraint: StopConstraint,
}

impl Stop {
    /// Construct a stop bound to an exact date window.
    #[must_use]
    pub fn fixed(
        location: impl Into<String>,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Self {
        Self {
            location: location.into(),
            constraint: StopConstraint::FixedWindow {
                window_start,
                window_end,
            },
        }
    }

    /// Construct a stop requiring `min_days` nights in any order.
    #[must_use]
    pub fn flexible(location: impl Into<String>, min_days: u32) -> Self {
        Self {
            location: location.into(),
            constraint: StopConstraint::FlexibleDays { min_days },
        }
    }

    /// Whether the stop is bound to a fixed window.
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        matches!(self.constraint, StopConstraint::FixedWindow { .. })
    }
}

/// Start and end of the whole trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripAnchors {
    /// Where the trip begins.
    pub start_location: String,
    /// Departure date from the start location.
    #[serde(deserialize_with = "deserialize_lenient", default = "today")]
    pub start_date: NaiveDate,
    /// Where the trip ends.
    pub end_location: String,
    /// Latest acceptable return date.
    #[serde(deserialize_with = "deserialize_lenient", default = "today")]
    pub end_date: NaiveDate,
}

/// A complete trip plan handed to the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Trip-level start and end anchors.
    pub trip: TripAnchors,
    /// Stops to visit, fixed and flexible mixed in any order.
    #[serde(default)]
    pub stops: Vec<Stop>,
}

/// Reasons a [`TripRequest`] cannot be planned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripRequestValidationError {
    /// No stops were supplied.
    #[error("trip must contain at least one stop")]
    NoStops,
    /// A location code was blank.
    #[error("{field} must not be empty")]
    EmptyLocation {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The trip ends before it starts.
    #[error("trip end {end} precedes trip start {start}")]
    EndBeforeStart {
        /// Trip start date.
        start: NaiveDate,
        /// Trip end date.
        end: NaiveDate,
    },
}

impl TripRequest {
    /// Check the request for structural problems before planning.
    pub fn validate(&self) -> Result<(), TripRequestValidationError> {
        if self.stops.is_empty() {
            return Err(TripRequestValidationError::NoStops);
        }
        if self.trip.start_location.trim().is_empty() {
            return Err(TripRequestValidationError::EmptyLocation {
                field: "start_location",
            });
        }
        if self.trip.end_location.trim().is_empty() {
            return Err(TripRequestValidationError::EmptyLocation {
                field: "end_location",
            });
        }
        if self.stops.iter().any(|stop| stop.location.trim().is_empty()) {
            return Err(TripRequestValidationError::EmptyLocation {
                field: "stop location",
            });
        }
        if self.trip.end_date < self.trip.start_date {
            return Err(TripRequestValidationError::EndBeforeStart {
                start: self.trip.start_date,
                end: self.trip.end_date,
            });
        }
        Ok(())
    }
}
