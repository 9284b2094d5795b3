//! Explanations for scenarios that cannot be solved for lack of offers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::groups::assemble_groups;
use crate::index::CandidateIndex;
use crate::itinerary::{Leg, Stay};
use crate::scenario::Scenario;

/// A leg with neither a flight nor a car option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissingLeg {
    /// Departure location.
    pub origin: String,
    /// Arrival location.
    pub destination: String,
    /// Departure date.
    pub date: NaiveDate,
}

impl From<&Leg> for MissingLeg {
    fn from(leg: &Leg) -> Self {
        Self {
            origin: leg.origin.clone(),
            destination: leg.destination.clone(),
            date: leg.departure,
        }
    }
}

/// A main stay with no hotel option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissingHotel {
    /// Stay location.
    pub location: String,
    /// Check-in date.
    pub checkin: NaiveDate,
    /// Checkout date.
    pub checkout: NaiveDate,
}

impl From<&Stay> for MissingHotel {
    fn from(stay: &Stay) -> Self {
        Self {
            location: stay.location.clone(),
            checkin: stay.checkin,
            checkout: stay.checkout,
        }
    }
}

/// Everything one scenario is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDiagnostic {
    /// Stop order of the scenario.
    pub order: Vec<String>,
    /// Legs lacking transport.
    pub missing_legs: Vec<MissingLeg>,
    /// Main stays lacking lodging.
    pub missing_hotels: Vec<MissingHotel>,
}

/// Report the missing legs and stays of every scenario in `scenarios`.
///
/// Scenarios with complete offers are omitted, so an empty result means
/// every scenario could be handed to a solver.
#[must_use]
pub fn diagnose_missing(
    scenarios: &[Scenario],
    index: &CandidateIndex<'_>,
) -> Vec<ScenarioDiagnostic> {
    scenarios
        .iter()
        .filter_map(|scenario| {
            assemble_groups(scenario, index)
                .err()
                .map(|missing| ScenarioDiagnostic {
                    order: scenario.order.clone(),
                    missing_legs: missing.missing_legs,
                    missing_hotels: missing.missing_hotels,
                })
        })
        .collect()
}
