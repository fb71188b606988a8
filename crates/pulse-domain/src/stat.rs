//! Weekly statistics for one (pair, week)

use serde::{Deserialize, Serialize};

/// The reduction of every event for one pair in one week
///
/// `avg_goldstein` is `None` when no event carried a score, which is a
/// different fact from a neutral average of `0.0`.
/// Invariant: `coop + conf <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklyStat {
    /// Mean Goldstein score over scored events, rounded to 2 decimals
    pub avg_goldstein: Option<f64>,
    /// Cooperative events (classes 1, 2)
    pub coop: u64,
    /// Conflictual events (classes 3, 4)
    pub conf: u64,
    /// All events
    pub total: u64,
    /// Sum of mentions
    pub mentions: u64,
}

impl WeeklyStat {
    /// Gap filler for weeks with no data
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Whether this week holds any events
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
