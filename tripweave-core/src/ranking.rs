//! Ordering candidate solutions by the caller's preference.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::solution::{Assignment, Objectives, Solution};

/// How to order Pareto-equivalent solutions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    /// Weighted sum of min-max normalised cost and duration.
    #[default]
    Best,
    /// Cheapest first, ties broken by duration.
    Price,
    /// Shortest flight time first, ties broken by cost.
    Duration,
}

impl Preference {
    /// The lowercase name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::Price => "price",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a preference name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preference {0:?}; expected best, price or duration")]
pub struct ParsePreferenceError(pub String);

impl FromStr for Preference {
    type Err = ParsePreferenceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "best" => Ok(Self::Best),
            "price" => Ok(Self::Price),
            "duration" => Ok(Self::Duration),
            _ => Err(ParsePreferenceError(raw.to_owned())),
        }
    }
}

/// Weights of the [`Preference::Best`] score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingWeights {
    /// Weight of normalised cost.
    pub cost: f64,
    /// Weight of normalised flight duration.
    pub duration: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            cost: 0.5,
            duration: 0.5,
        }
    }
}

impl RankingWeights {
    /// Whether both weights are finite and non-negative.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.cost.is_finite()
            && self.duration.is_finite()
            && self.cost >= 0.0
            && self.duration >= 0.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |acc: Option<Self>, value| {
            Some(acc.map_or(Self { min: value, max: value }, |b| Self {
                min: b.min.min(value),
                max: b.max.max(value),
            }))
        })
    }

    /// Position of `value` inside the bounds; zero when the range is empty.
    #[expect(clippy::float_arithmetic, reason = "min-max normalisation")]
    fn normalise(self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 {
            (value - self.min) / range
        } else {
            0.0
        }
    }
}

/// Sort `items` in place by `preference`. The sort is stable.
///
/// Under [`Preference::Best`], each objective is min-max normalised over
/// `items`; an objective on which every item ties contributes zero.
pub fn rank_by<T>(
    items: &mut [T],
    objectives: impl Fn(&T) -> Objectives,
    preference: Preference,
    weights: RankingWeights,
) {
    match preference {
        Preference::Price => items.sort_by(|a, b| {
            let (left, right) = (objectives(a), objectives(b));
            left.cost_total
                .total_cmp(&right.cost_total)
                .then(left.flight_duration_hours.total_cmp(&right.flight_duration_hours))
        }),
        Preference::Duration => items.sort_by(|a, b| {
            let (left, right) = (objectives(a), objectives(b));
            left.flight_duration_hours
                .total_cmp(&right.flight_duration_hours)
                .then(left.cost_total.total_cmp(&right.cost_total))
        }),
        Preference::Best => {
            let (Some(cost), Some(duration)) = (
                Bounds::of(items.iter().map(|item| objectives(item).cost_total)),
                Bounds::of(items.iter().map(|item| objectives(item).flight_duration_hours)),
            ) else {
                return;
            };
            let score = |item: &T| weighted_score(objectives(item), cost, duration, weights);
            items.sort_by(|a, b| score(a).partial_cmp(&score(b)).unwrap_or(Ordering::Equal));
        }
    }
}

#[expect(clippy::float_arithmetic, reason = "weighted sum of normalised objectives")]
fn weighted_score(
    objectives: Objectives,
    cost: Bounds,
    duration: Bounds,
    weights: RankingWeights,
) -> f64 {
    weights.cost * cost.normalise(objectives.cost_total)
        + weights.duration * duration.normalise(objectives.flight_duration_hours)
}

/// Rank solver output by `preference`.
pub fn rank_assignments(
    assignments: &mut [Assignment],
    preference: Preference,
    weights: RankingWeights,
) {
    rank_by(assignments, |a| a.objectives, preference, weights);
}

/// Re-rank a final solution list without solving again.
///
/// # Examples
/// ```
/// use tripweave_core::{
///     Objectives, Preference, RankingWeights, Selections, Solution, rank_solutions,
/// };
///
/// let solution = |cost, hours| Solution {
///     scenario_order: vec!["MIA".into()],
///     objectives: Objectives { cost_total: cost, flight_duration_hours: hours },
///     selections: Selections::default(),
/// };
/// let mut solutions = vec![solution(900.0, 4.0), solution(700.0, 9.0)];
/// rank_solutions(&mut solutions, Preference::Price, RankingWeights::default());
/// assert_eq!(solutions[0].objectives.cost_total, 700.0);
/// ```
pub fn rank_solutions(solutions: &mut [Solution], preference: Preference, weights: RankingWeights) {
    rank_by(solutions, |s| s.objectives, preference, weights);
}
