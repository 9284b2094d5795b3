//! Calendar-date helpers shared by the scenario builder and the offer index.
//!
//! Trip plans and offers arrive as ISO-8601 strings that may carry a
//! time-of-day suffix. Everything in the core works at calendar-date
//! granularity, so these helpers strip the time component before parsing.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Extract the calendar date from an ISO date or date-time string.
///
/// Returns `None` when the date part cannot be parsed.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tripweave_core::date::calendar_date;
///
/// let date = calendar_date("2025-06-01T08:30:00");
/// assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 1));
/// assert_eq!(calendar_date("next tuesday"), None);
/// ```
#[must_use]
pub fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

/// Parse a date, falling back to today's local date when it is malformed.
///
/// The fallback keeps a search running on best-effort dates instead of
/// rejecting the whole plan.
#[must_use]
pub fn parse_date_or_today(raw: &str) -> NaiveDate {
    calendar_date(raw).unwrap_or_else(|| {
        let today = today();
        log::warn!("unparsable date {raw:?}; falling back to {today}");
        today
    })
}

/// Today's date in the local time zone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days from `from` to `to`, negative when `to` precedes `from`.
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Serde adapter applying [`parse_date_or_today`] to string fields.
///
/// Missing or `null` values also fall back to today.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(parse_date_or_today(raw.as_deref().unwrap_or_default()))
}
