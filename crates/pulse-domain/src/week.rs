//! Week module - ISO weeks identified by their Monday

use crate::error::DomainError;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compact event date format used by the upstream row source (`20240115`)
const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Extended date format used in persisted documents (`2024-01-15`)
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// An ISO week, identified by the Monday it starts on
///
/// A `Week` is always derived from a date; there is no way to build one
/// that does not fall on a Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Week(NaiveDate);

impl Week {
    /// The week containing `date`
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use pulse_domain::Week;
    ///
    /// // Wednesday 2024-01-17 belongs to the week of Monday 2024-01-15
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
    /// assert_eq!(Week::containing(date).to_string(), "2024-01-15");
    /// ```
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday();
        Self(date - Duration::days(i64::from(offset)))
    }

    /// Resolve the week of a raw event date
    ///
    /// Accepts the compact `YYYYMMDD` form and the extended `YYYY-MM-DD` form.
    /// Anything else is an error; malformed dates are never skipped.
    pub fn from_event_date(input: &str) -> Result<Self, DomainError> {
        parse_event_date(input).map(Self::containing)
    }

    /// Parse a week identifier as written in a summary document
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        NaiveDate::parse_from_str(input.trim(), ISO_DATE_FORMAT)
            .map(Self::containing)
            .map_err(|source| DomainError::InvalidDate {
                input: input.to_string(),
                source,
            })
    }

    /// The Monday this week starts on
    pub fn monday(&self) -> NaiveDate {
        self.0
    }

    /// The week `weeks` before this one
    pub fn weeks_before(&self, weeks: u32) -> Self {
        Self(self.0 - Duration::weeks(i64::from(weeks)))
    }

    /// Ordered week axis of `count` weeks ending with the week containing `today`
    ///
    /// Oldest week first. An axis of zero weeks is empty.
    pub fn axis(today: NaiveDate, count: u32) -> Vec<Self> {
        let current = Self::containing(today);
        (0..count).rev().map(|i| current.weeks_before(i)).collect()
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl TryFrom<String> for Week {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Week> for String {
    fn from(week: Week) -> Self {
        week.to_string()
    }
}

/// Parse a raw event date in either supported format
pub fn parse_event_date(input: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, COMPACT_DATE_FORMAT)
        .or_else(|compact_err| {
            NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).map_err(|_| compact_err)
        })
        .map_err(|source| DomainError::InvalidDate {
            input: input.to_string(),
            source,
        })
}
