//! Timeline assembler - gap-filled weekly series with window averages

use crate::stats::{mean, round2};
use pulse_domain::{CountryDirectory, PairKey, PairSummary, Week, WeekEntry, WeeklyStat};
use std::collections::BTreeMap;

/// Recent and prior window averages of one timeline
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowAverages {
    /// Mean over the last `k` axis weeks that have a score
    pub recent: Option<f64>,
    /// Mean over the `k` weeks before the recent window
    pub prior: Option<f64>,
}

impl WindowAverages {
    /// Compute both windows over an axis-aligned series
    ///
    /// Gap weeks have no score and never count toward either window. A
    /// series shorter than `2k` gives a shorter (or empty) prior window.
    pub fn compute(data: &[WeekEntry], k: usize) -> Self {
        let recent_start = data.len().saturating_sub(k);
        let prior_start = data.len().saturating_sub(2 * k);

        Self {
            recent: scored_mean(&data[recent_start..]),
            prior: scored_mean(&data[prior_start..recent_start]),
        }
    }

    /// Recent minus prior, rounded; `None` unless both are present
    pub fn trend(&self) -> Option<f64> {
        match (self.recent, self.prior) {
            (Some(recent), Some(prior)) => Some(round2(recent - prior)),
            _ => None,
        }
    }
}

fn scored_mean(entries: &[WeekEntry]) -> Option<f64> {
    mean(entries.iter().filter_map(|e| e.avg_goldstein))
}

/// Build the output record for one selected pair
///
/// Every axis week gets an entry; weeks without a bucket are filled with a
/// placeholder. `total_events` only counts axis weeks.
pub fn assemble_timeline(
    pair: &PairKey,
    weeks: Option<&BTreeMap<Week, WeeklyStat>>,
    axis: &[Week],
    countries: &CountryDirectory,
    recent_weeks: usize,
) -> PairSummary {
    let placeholder = WeeklyStat::placeholder();
    let data: Vec<WeekEntry> = axis
        .iter()
        .map(|week| {
            let stat = weeks.and_then(|w| w.get(week)).unwrap_or(&placeholder);
            WeekEntry::new(*week, stat)
        })
        .collect();

    let total_events = data.iter().map(|e| e.total).sum();
    let windows = WindowAverages::compute(&data, recent_weeks);

    PairSummary {
        actor1: pair.first().to_string(),
        actor2: pair.second().to_string(),
        label: countries.pair_label(pair),
        total_events,
        recent_avg_goldstein: windows.recent.map(round2),
        trend: windows.trend(),
        data,
    }
}
