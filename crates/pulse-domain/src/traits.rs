//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the aggregation engine and
//! infrastructure. Implementations live in `pulse-store`.

use crate::document::{PriorDocument, SummaryDocument};
use crate::event::Event;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a run treats previously persisted state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Recompute every bucket from a complete batch; prior state is ignored
    Full,
    /// Merge a partial batch onto buckets replayed from the prior document
    #[default]
    Incremental,
}

impl RunMode {
    /// Mode name as used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Full => "full",
            RunMode::Incremental => "incremental",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(RunMode::Full),
            "incremental" => Ok(RunMode::Incremental),
            _ => Err(format!("Invalid run mode: {}", s)),
        }
    }
}

/// Date range a row source is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceWindow {
    /// First day included
    pub start: NaiveDate,
}

impl SourceWindow {
    /// Window for a run started at `now`
    ///
    /// Full mode reaches back over the whole history horizon, incremental
    /// mode only over the lookback days.
    pub fn for_mode(
        mode: RunMode,
        now: DateTime<Utc>,
        weeks_history: u32,
        incremental_days: u32,
    ) -> Self {
        let back = match mode {
            RunMode::Full => Duration::weeks(i64::from(weeks_history)),
            RunMode::Incremental => Duration::days(i64::from(incremental_days)),
        };
        Self {
            start: (now - back).date_naive(),
        }
    }

    /// Whether a day falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start
    }
}

/// Producer of raw event rows (the data-source query layer)
pub trait EventSource {
    /// Error type for source operations
    type Error;

    /// Fetch every event inside the window
    fn fetch(&self, window: &SourceWindow) -> Result<Vec<Event>, Self::Error>;
}

/// Persistence for the summary document
pub trait DocumentStore {
    /// Error type for store operations
    type Error;

    /// Load the previously written document, if there is one
    fn load(&self) -> Result<Option<PriorDocument>, Self::Error>;

    /// Replace the stored document, returning the number of bytes written
    fn save(&self, document: &SummaryDocument) -> Result<u64, Self::Error>;
}
