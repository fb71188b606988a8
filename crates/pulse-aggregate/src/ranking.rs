//! Dashboard ranker

use pulse_domain::{PairSummary, Rankings};
use std::cmp::Ordering;

/// Derive the three dashboard top lists
///
/// Each list only considers pairs where its value is present and emits pair
/// identifiers, not records. Sorting is stable, so ties keep input order.
pub fn rank_pairs(summaries: &[PairSummary], limit: usize) -> Rankings {
    let with_recent: Vec<(&PairSummary, f64)> = summaries
        .iter()
        .filter_map(|p| p.recent_avg_goldstein.map(|avg| (p, avg)))
        .collect();

    let with_trend: Vec<(&PairSummary, f64)> = summaries
        .iter()
        .filter_map(|p| p.trend.map(|trend| (p, trend.abs())))
        .collect();

    Rankings {
        most_conflictual: top_ids(with_recent.clone(), limit, |a, b| a.total_cmp(b)),
        most_cooperative: top_ids(with_recent, limit, |a, b| b.total_cmp(a)),
        biggest_shifts: top_ids(with_trend, limit, |a, b| b.total_cmp(a)),
    }
}

fn top_ids<F>(mut keyed: Vec<(&PairSummary, f64)>, limit: usize, order: F) -> Vec<String>
where
    F: Fn(&f64, &f64) -> Ordering,
{
    keyed.sort_by(|(_, a), (_, b)| order(a, b));
    keyed.into_iter().take(limit).map(|(p, _)| p.pair_id()).collect()
}
