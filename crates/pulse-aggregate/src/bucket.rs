//! Bucket builder - groups events into pair → week → statistics
//!
//! Two ways in: [`build_buckets`] reduces a batch of raw events, and
//! [`replay_buckets`] reconstructs buckets from a previously written
//! document. Both produce a [`PairBuckets`].

use crate::stats::weekly_stat;
use pulse_domain::{DomainError, Event, PairKey, PriorDocument, Week, WeeklyStat};
use std::collections::{BTreeMap, HashMap};

/// Two-level mapping pair → week → `V` that remembers pair insertion order
///
/// Iteration visits pairs in the order they were first inserted and weeks in
/// chronological order. Volume-rank ties are broken by that pair order, so
/// it must stay reproducible from run to run.
#[derive(Debug, Clone, PartialEq)]
pub struct PairWeekMap<V> {
    order: Vec<PairKey>,
    pairs: HashMap<PairKey, BTreeMap<Week, V>>,
}

/// Weekly statistics per pair
pub type PairBuckets = PairWeekMap<WeeklyStat>;

/// Raw events per pair and week, before reduction
pub type EventGroups<'a> = PairWeekMap<Vec<&'a Event>>;

impl<V> Default for PairWeekMap<V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            pairs: HashMap::new(),
        }
    }
}

impl<V> PairWeekMap<V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the map holds no pairs
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of (pair, week) entries
    pub fn bucket_count(&self) -> usize {
        self.pairs.values().map(BTreeMap::len).sum()
    }

    /// Whether a pair is present
    pub fn contains_pair(&self, pair: &PairKey) -> bool {
        self.pairs.contains_key(pair)
    }

    /// Weeks recorded for a pair
    pub fn weeks(&self, pair: &PairKey) -> Option<&BTreeMap<Week, V>> {
        self.pairs.get(pair)
    }

    /// Value for one (pair, week)
    pub fn get(&self, pair: &PairKey, week: &Week) -> Option<&V> {
        self.pairs.get(pair).and_then(|weeks| weeks.get(week))
    }

    /// Pairs in insertion order
    pub fn pairs(&self) -> impl Iterator<Item = &PairKey> {
        self.order.iter()
    }

    /// Pairs with their weeks, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &BTreeMap<Week, V>)> {
        self.order
            .iter()
            .filter_map(move |pair| self.pairs.get(pair).map(|weeks| (pair, weeks)))
    }

    /// Store a value, returning the one it replaced
    ///
    /// A pair seen for the first time is appended to the iteration order.
    pub fn insert(&mut self, pair: PairKey, week: Week, value: V) -> Option<V> {
        if let Some(weeks) = self.pairs.get_mut(&pair) {
            return weeks.insert(week, value);
        }
        self.order.push(pair.clone());
        self.pairs.insert(pair, BTreeMap::from([(week, value)]));
        None
    }

    /// Mutable access to one (pair, week), creating it with `init` if absent
    pub fn get_or_insert_with<F>(&mut self, pair: PairKey, week: Week, init: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        if !self.pairs.contains_key(&pair) {
            self.order.push(pair.clone());
        }
        self.pairs.entry(pair).or_default().entry(week).or_insert_with(init)
    }

    /// Apply `f` to every value, keeping keys and order
    pub fn map_values<U, F>(&self, mut f: F) -> PairWeekMap<U>
    where
        F: FnMut(&V) -> U,
    {
        let pairs = self
            .pairs
            .iter()
            .map(|(pair, weeks)| {
                let mapped = weeks.iter().map(|(week, v)| (*week, f(v))).collect();
                (pair.clone(), mapped)
            })
            .collect();

        PairWeekMap {
            order: self.order.clone(),
            pairs,
        }
    }
}

/// Group raw events by canonical pair and week
///
/// Direction-reversed events land in the same group. A malformed event
/// date fails the whole batch.
pub fn group_events(events: &[Event]) -> Result<EventGroups<'_>, DomainError> {
    let mut groups = EventGroups::new();
    for event in events {
        let week = event.week()?;
        groups.get_or_insert_with(event.pair(), week, Vec::new).push(event);
    }
    Ok(groups)
}

/// Build weekly statistics from a batch of raw events
pub fn build_buckets(events: &[Event]) -> Result<PairBuckets, DomainError> {
    let groups = group_events(events)?;
    Ok(groups.map_values(|group| weekly_stat(group.iter().copied())))
}

/// Buckets reconstructed from a prior document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayedBuckets {
    /// Reconstructed statistics
    pub buckets: PairBuckets,
    /// Pair records or week entries dropped for missing or invalid fields
    pub skipped: usize,
}

/// Rebuild weekly statistics from a previously written document
///
/// Weeks with `total == 0` are gap fillers and are not replayed. Records
/// missing a field are skipped rather than failing the run.
pub fn replay_buckets(prior: &PriorDocument) -> ReplayedBuckets {
    let mut replayed = ReplayedBuckets::default();
    let Some(pairs) = prior.pairs.as_ref() else {
        return replayed;
    };

    for record in pairs {
        let (Some(pair), Some(entries)) = (record.pair_key(), record.data.as_ref()) else {
            tracing::warn!("Skipping prior pair record with missing actors or data");
            replayed.skipped += 1;
            continue;
        };

        for entry in entries {
            let (Some(week), Some(stat)) = (entry.week.as_deref(), entry.stat()) else {
                tracing::warn!(pair = %pair, "Skipping prior week entry with missing fields");
                replayed.skipped += 1;
                continue;
            };
            if stat.is_empty() {
                continue;
            }
            match Week::parse(week) {
                Ok(week) => {
                    replayed.buckets.insert(pair.clone(), week, stat);
                }
                Err(e) => {
                    tracing::warn!(pair = %pair, "Skipping prior week entry: {}", e);
                    replayed.skipped += 1;
                }
            }
        }
    }

    replayed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_domain::document::{PriorPair, PriorWeekEntry};

    fn week(s: &str) -> Week {
        Week::parse(s).unwrap()
    }

    fn entry(week: &str, total: u64) -> PriorWeekEntry {
        PriorWeekEntry {
            week: Some(week.to_string()),
            avg_goldstein: Some(-1.0),
            coop: Some(0),
            conf: Some(total),
            total: Some(total),
            mentions: Some(total * 2),
        }
    }

    fn prior_pair(a: &str, b: &str, data: Vec<PriorWeekEntry>) -> PriorPair {
        PriorPair {
            actor1: Some(a.to_string()),
            actor2: Some(b.to_string()),
            data: Some(data),
        }
    }

    #[test]
    fn test_aggregate_rows_merges_directions() {
        let events = vec![
            Event::new("20240115", "USA", "CHN").with_goldstein(-3.0).with_class(3).with_mentions(5),
            Event::new("20240115", "CHN", "USA").with_goldstein(2.0).with_class(1).with_mentions(3),
        ];
        let groups = group_events(&events).unwrap();

        assert_eq!(groups.len(), 1);
        let pair = PairKey::new("CHN", "USA");
        assert!(groups.contains_pair(&pair));
        assert_eq!(groups.get(&pair, &week("2024-01-15")).unwrap().len(), 2);
    }

    #[test]
    fn test_build_buckets_reduces_groups() {
        let events = vec![
            Event::new("20240115", "USA", "CHN").with_goldstein(-3.0).with_class(3),
            Event::new("20240117", "CHN", "USA").with_goldstein(2.0).with_class(1),
            Event::new("20240122", "CHN", "USA").with_class(2),
        ];
        let buckets = build_buckets(&events).unwrap();
        let pair = PairKey::new("CHN", "USA");

        assert_eq!(buckets.bucket_count(), 2);
        let first = buckets.get(&pair, &week("2024-01-15")).unwrap();
        assert_eq!(first.total, 2);
        assert_eq!(first.avg_goldstein, Some(-0.5));
        let second = buckets.get(&pair, &week("2024-01-22")).unwrap();
        assert_eq!(second.total, 1);
        assert!(second.avg_goldstein.is_none());
    }

    #[test]
    fn test_pair_order_is_first_appearance() {
        let events = vec![
            Event::new("20240115", "USA", "RUS"),
            Event::new("20240115", "CHN", "USA"),
            Event::new("20240116", "RUS", "USA"),
        ];
        let buckets = build_buckets(&events).unwrap();
        let order: Vec<String> = buckets.pairs().map(PairKey::id).collect();
        assert_eq!(order, vec!["RUS-USA", "CHN-USA"]);
    }

    #[test]
    fn test_malformed_date_fails_batch() {
        let events = vec![
            Event::new("20240115", "USA", "CHN"),
            Event::new("2024-13-45", "USA", "CHN"),
        ];
        assert!(build_buckets(&events).is_err());
    }

    #[test]
    fn test_empty_batch_builds_nothing() {
        let buckets = build_buckets(&[]).unwrap();
        assert!(buckets.is_empty());
        assert_eq!(buckets.bucket_count(), 0);
    }

    #[test]
    fn test_insert_reports_replaced_value() {
        let mut buckets = PairBuckets::new();
        let pair = PairKey::new("A", "B");
        let stat = WeeklyStat { total: 1, ..Default::default() };

        assert!(buckets.insert(pair.clone(), week("2024-01-15"), stat).is_none());
        let replaced = buckets.insert(pair, week("2024-01-15"), WeeklyStat::placeholder());
        assert_eq!(replaced, Some(stat));
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn test_replay_skips_placeholder_weeks() {
        let prior = PriorDocument {
            pairs: Some(vec![prior_pair(
                "CHN",
                "USA",
                vec![entry("2024-01-08", 0), entry("2024-01-15", 3)],
            )]),
        };
        let replayed = replay_buckets(&prior);
        let pair = PairKey::new("CHN", "USA");

        assert_eq!(replayed.skipped, 0);
        assert_eq!(replayed.buckets.bucket_count(), 1);
        assert!(replayed.buckets.get(&pair, &week("2024-01-08")).is_none());
        assert_eq!(replayed.buckets.get(&pair, &week("2024-01-15")).unwrap().total, 3);
    }

    #[test]
    fn test_replay_skips_incomplete_records() {
        let mut partial = entry("2024-01-15", 2);
        partial.mentions = None;

        let prior = PriorDocument {
            pairs: Some(vec![
                PriorPair {
                    actor1: Some("CHN".to_string()),
                    actor2: None,
                    data: Some(vec![entry("2024-01-15", 1)]),
                },
                prior_pair("RUS", "UKR", vec![partial, entry("not-a-week", 4), entry("2024-01-22", 5)]),
            ]),
        };
        let replayed = replay_buckets(&prior);

        assert_eq!(replayed.skipped, 3);
        assert_eq!(replayed.buckets.len(), 1);
        assert_eq!(replayed.buckets.bucket_count(), 1);
    }

    #[test]
    fn test_replay_pair_with_only_placeholders_is_absent() {
        let prior = PriorDocument {
            pairs: Some(vec![prior_pair("CHN", "USA", vec![entry("2024-01-15", 0)])]),
        };
        assert!(replay_buckets(&prior).buckets.is_empty());
    }

    #[test]
    fn test_replay_without_pairs() {
        let replayed = replay_buckets(&PriorDocument::default());
        assert!(replayed.buckets.is_empty());
        assert_eq!(replayed.skipped, 0);
    }
}
