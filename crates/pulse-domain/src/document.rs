//! Summary document - the persisted artifact rendered by the dashboard
//!
//! Two shapes live here. [`SummaryDocument`] is the strict form the engine
//! writes. [`PriorDocument`] is a lenient reading of the same JSON, used to
//! replay history in incremental mode: every field is optional so a record
//! with missing fields can be skipped instead of failing the run.

use crate::pair::PairKey;
use crate::stat::WeeklyStat;
use crate::week::Week;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One week of one pair's timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekEntry {
    /// Monday of the week
    pub week: Week,
    /// Mean Goldstein score, `null` when no event was scored
    pub avg_goldstein: Option<f64>,
    /// Cooperative events
    pub coop: u64,
    /// Conflictual events
    pub conf: u64,
    /// All events
    pub total: u64,
    /// Sum of mentions
    pub mentions: u64,
}

impl WeekEntry {
    /// Pair a week with its statistics
    pub fn new(week: Week, stat: &WeeklyStat) -> Self {
        Self {
            week,
            avg_goldstein: stat.avg_goldstein,
            coop: stat.coop,
            conf: stat.conf,
            total: stat.total,
            mentions: stat.mentions,
        }
    }

    /// Statistics without the week label
    pub fn stat(&self) -> WeeklyStat {
        WeeklyStat {
            avg_goldstein: self.avg_goldstein,
            coop: self.coop,
            conf: self.conf,
            total: self.total,
            mentions: self.mentions,
        }
    }
}

/// Full output record for one retained pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSummary {
    /// Lexicographically smaller actor code
    pub actor1: String,
    /// Lexicographically larger actor code
    pub actor2: String,
    /// Display label built from country names
    pub label: String,
    /// Events summed over the whole week axis
    pub total_events: u64,
    /// Mean weekly score over the recent window
    pub recent_avg_goldstein: Option<f64>,
    /// Recent window mean minus prior window mean
    pub trend: Option<f64>,
    /// One entry per axis week, oldest first
    pub data: Vec<WeekEntry>,
}

impl PairSummary {
    /// Identifier used in ranking lists (`"CHN-USA"`)
    pub fn pair_id(&self) -> String {
        format!("{}-{}", self.actor1, self.actor2)
    }

    /// Canonical key for this pair
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.actor1.as_str(), self.actor2.as_str())
    }
}

/// Which dashboard ranking to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingKind {
    /// Most negative recent average first
    MostConflictual,
    /// Most positive recent average first
    MostCooperative,
    /// Largest absolute trend first
    BiggestShifts,
}

impl RankingKind {
    /// Every ranking, in document order
    pub const ALL: [RankingKind; 3] = [
        RankingKind::MostConflictual,
        RankingKind::MostCooperative,
        RankingKind::BiggestShifts,
    ];

    /// Key used in the serialized document
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingKind::MostConflictual => "most_conflictual",
            RankingKind::MostCooperative => "most_cooperative",
            RankingKind::BiggestShifts => "biggest_shifts",
        }
    }
}

impl fmt::Display for RankingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-computed top lists of pair identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rankings {
    /// Ascending by recent average
    pub most_conflictual: Vec<String>,
    /// Descending by recent average
    pub most_cooperative: Vec<String>,
    /// Descending by absolute trend
    pub biggest_shifts: Vec<String>,
}

impl Rankings {
    /// Pair identifiers for one ranking
    pub fn get(&self, kind: RankingKind) -> &[String] {
        match kind {
            RankingKind::MostConflictual => &self.most_conflictual,
            RankingKind::MostCooperative => &self.most_cooperative,
            RankingKind::BiggestShifts => &self.biggest_shifts,
        }
    }
}

/// The complete persisted document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDocument {
    /// Generation time, UTC, `YYYY-MM-DDTHH:MM:SSZ`
    pub generated_at: String,
    /// Week axis, oldest first
    pub weeks: Vec<Week>,
    /// Retained pairs in volume order
    pub pairs: Vec<PairSummary>,
    /// Dashboard top lists
    pub rankings: Rankings,
    /// Country names for every code used by `pairs`
    pub countries: BTreeMap<String, String>,
}

impl SummaryDocument {
    /// Look up a pair by its identifier
    pub fn find_pair(&self, pair_id: &str) -> Option<&PairSummary> {
        self.pairs.iter().find(|p| p.pair_id() == pair_id)
    }

    /// Resolve a ranking to its pair records, skipping unknown identifiers
    pub fn ranked_pairs(&self, kind: RankingKind) -> Vec<&PairSummary> {
        self.rankings
            .get(kind)
            .iter()
            .filter_map(|id| self.find_pair(id))
            .collect()
    }
}

/// Lenient reading of a previously written [`SummaryDocument`]
///
/// Only the parts needed to replay weekly statistics are read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriorDocument {
    /// Pair records; `None` when the document has no `pairs` key
    #[serde(default)]
    pub pairs: Option<Vec<PriorPair>>,
}

/// One pair record of a prior document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriorPair {
    /// First actor code
    #[serde(default)]
    pub actor1: Option<String>,
    /// Second actor code
    #[serde(default)]
    pub actor2: Option<String>,
    /// Week entries
    #[serde(default)]
    pub data: Option<Vec<PriorWeekEntry>>,
}

/// One week entry of a prior document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriorWeekEntry {
    /// Week identifier
    #[serde(default)]
    pub week: Option<String>,
    /// Mean score; absent and `null` both read as "no scored events"
    #[serde(default)]
    pub avg_goldstein: Option<f64>,
    /// Cooperative events
    #[serde(default)]
    pub coop: Option<u64>,
    /// Conflictual events
    #[serde(default)]
    pub conf: Option<u64>,
    /// All events
    #[serde(default)]
    pub total: Option<u64>,
    /// Sum of mentions
    #[serde(default)]
    pub mentions: Option<u64>,
}

impl PriorPair {
    /// Canonical key, if both actor codes are present and non-empty
    pub fn pair_key(&self) -> Option<PairKey> {
        match (self.actor1.as_deref(), self.actor2.as_deref()) {
            (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => Some(PairKey::new(a, b)),
            _ => None,
        }
    }
}

impl PriorWeekEntry {
    /// Statistics for this entry, if every count is present
    pub fn stat(&self) -> Option<WeeklyStat> {
        Some(WeeklyStat {
            avg_goldstein: self.avg_goldstein,
            coop: self.coop?,
            conf: self.conf?,
            total: self.total?,
            mentions: self.mentions?,
        })
    }
}

impl From<&SummaryDocument> for PriorDocument {
    fn from(doc: &SummaryDocument) -> Self {
        let pairs = doc
            .pairs
            .iter()
            .map(|p| PriorPair {
                actor1: Some(p.actor1.clone()),
                actor2: Some(p.actor2.clone()),
                data: Some(
                    p.data
                        .iter()
                        .map(|e| PriorWeekEntry {
                            week: Some(e.week.to_string()),
                            avg_goldstein: e.avg_goldstein,
                            coop: Some(e.coop),
                            conf: Some(e.conf),
                            total: Some(e.total),
                            mentions: Some(e.mentions),
                        })
                        .collect(),
                ),
            })
            .collect();

        Self { pairs: Some(pairs) }
    }
}
