//! Request types for aggregation runs

use chrono::{DateTime, Utc};
use pulse_domain::{CountryDirectory, Event, PriorDocument, RunMode};

/// Inputs of one aggregation run
#[derive(Debug, Clone, Copy)]
pub struct RunRequest<'a> {
    /// Full rebuild or incremental merge
    pub mode: RunMode,

    /// Fresh event batch
    pub events: &'a [Event],

    /// Previously written document, replayed in incremental mode
    pub prior: Option<&'a PriorDocument>,

    /// Code to display name lookup
    pub countries: &'a CountryDirectory,

    /// Run time; anchors the week axis and `generated_at`
    pub now: DateTime<Utc>,
}

impl<'a> RunRequest<'a> {
    /// Request for a full rebuild from `events`
    pub fn full(events: &'a [Event], countries: &'a CountryDirectory, now: DateTime<Utc>) -> Self {
        Self {
            mode: RunMode::Full,
            events,
            prior: None,
            countries,
            now,
        }
    }

    /// Request for an incremental run against an optional prior document
    pub fn incremental(
        events: &'a [Event],
        prior: Option<&'a PriorDocument>,
        countries: &'a CountryDirectory,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            mode: RunMode::Incremental,
            events,
            prior,
            countries,
            now,
        }
    }
}
