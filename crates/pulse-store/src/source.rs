//! Event row source backed by an exported rows file

use crate::StoreError;
use pulse_domain::traits::{EventSource, SourceWindow};
use pulse_domain::week::parse_event_date;
use pulse_domain::{Event, EventClass};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One row in the events table column naming
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    /// Event date, `YYYYMMDD` as a number or string
    #[serde(rename = "SQLDATE")]
    pub sqldate: RawDate,

    /// First actor country code
    #[serde(rename = "Actor1CountryCode", default)]
    pub actor1: Option<String>,

    /// Second actor country code
    #[serde(rename = "Actor2CountryCode", default)]
    pub actor2: Option<String>,

    /// Goldstein scale score
    #[serde(rename = "GoldsteinScale", default)]
    pub goldstein: Option<f64>,

    /// Quad class code
    #[serde(rename = "QuadClass", default)]
    pub quad_class: Option<i64>,

    /// Mention count
    #[serde(rename = "NumMentions", default)]
    pub mentions: Option<u64>,

    /// Average tone
    #[serde(rename = "AvgTone", default)]
    pub tone: Option<f64>,
}

/// `SQLDATE` as exported: integer or string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// Numeric form, `20240115`
    Number(i64),
    /// Text form, `"20240115"` or `"2024-01-15"`
    Text(String),
}

impl RawDate {
    fn into_string(self) -> String {
        match self {
            RawDate::Number(n) => n.to_string(),
            RawDate::Text(s) => s,
        }
    }
}

impl RawRow {
    /// Convert to an [`Event`], applying the source query filters
    ///
    /// Rows without both actor codes, or with the same code twice, are
    /// dropped. So are rows dated before the window. A date that does not
    /// parse is kept so that aggregation rejects it.
    pub fn into_event(self, window: &SourceWindow) -> Option<Event> {
        let actor1 = self.actor1.filter(|code| !code.is_empty())?;
        let actor2 = self.actor2.filter(|code| !code.is_empty())?;
        if actor1 == actor2 {
            return None;
        }

        let date = self.sqldate.into_string();
        if let Ok(day) = parse_event_date(&date) {
            if !window.contains(day) {
                return None;
            }
        }

        Some(Event {
            date,
            actor1,
            actor2,
            goldstein: self.goldstein,
            class: self.quad_class.and_then(EventClass::from_code),
            mentions: self.mentions,
            tone: self.tone,
        })
    }
}

/// Reads event rows from a JSON array or JSON lines file
#[derive(Debug, Clone)]
pub struct JsonRowSource {
    path: PathBuf,
}

impl JsonRowSource {
    /// Create a source for the given rows file
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the rows file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse every row in the file without filtering
    pub fn read_rows(&self) -> Result<Vec<RawRow>, StoreError> {
        let content = fs::read_to_string(&self.path)?;
        parse_rows(&content)
    }
}

/// Parse rows from a JSON array, or one JSON object per line
pub(crate) fn parse_rows(content: &str) -> Result<Vec<RawRow>, StoreError> {
    if content.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(content)?);
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .map_err(|e| StoreError::InvalidData(format!("line {}: {}", index + 1, e)))
        })
        .collect()
}

impl EventSource for JsonRowSource {
    type Error = StoreError;

    fn fetch(&self, window: &SourceWindow) -> Result<Vec<Event>, Self::Error> {
        let rows = self.read_rows()?;
        let read = rows.len();
        let events: Vec<Event> = rows
            .into_iter()
            .filter_map(|row| row.into_event(window))
            .collect();

        tracing::info!(
            path = %self.path.display(),
            start = %window.start,
            read,
            kept = events.len(),
            "Loaded event rows"
        );
        Ok(events)
    }
}
