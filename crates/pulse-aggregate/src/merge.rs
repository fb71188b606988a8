//! Incremental merger - overlays fresh weeks onto replayed history

use crate::bucket::PairBuckets;

/// Overlay `fresh` onto `target`, returning how many weeks were replaced
///
/// Every (pair, week) in `fresh` is treated as the complete event set for
/// that week and overwrites whatever `target` held. Weeks absent from
/// `fresh` are left untouched. Pairs new to `target` are appended after
/// the existing ones, in `fresh` order.
pub fn merge_into(target: &mut PairBuckets, fresh: &PairBuckets) -> usize {
    let mut overwritten = 0;
    for (pair, weeks) in fresh.iter() {
        for (week, stat) in weeks {
            if target.insert(pair.clone(), *week, *stat).is_some() {
                overwritten += 1;
            }
        }
    }
    overwritten
}

/// Merge fresh buckets onto replayed buckets
///
/// Idempotent: merging the same fresh batch twice gives the same result as
/// merging it once.
pub fn merge_buckets(replayed: PairBuckets, fresh: &PairBuckets) -> PairBuckets {
    let mut merged = replayed;
    merge_into(&mut merged, fresh);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_domain::{PairKey, Week, WeeklyStat};

    fn week(s: &str) -> Week {
        Week::parse(s).unwrap()
    }

    fn stat(total: u64, avg: f64) -> WeeklyStat {
        WeeklyStat {
            avg_goldstein: Some(avg),
            coop: 0,
            conf: total,
            total,
            mentions: total,
        }
    }

    fn replayed() -> PairBuckets {
        let mut buckets = PairBuckets::new();
        buckets.insert(PairKey::new("CHN", "USA"), week("2024-01-01"), stat(5, -2.0));
        buckets.insert(PairKey::new("CHN", "USA"), week("2024-01-08"), stat(3, -1.0));
        buckets.insert(PairKey::new("RUS", "UKR"), week("2024-01-08"), stat(9, -6.0));
        buckets
    }

    fn fresh() -> PairBuckets {
        let mut buckets = PairBuckets::new();
        buckets.insert(PairKey::new("CHN", "USA"), week("2024-01-08"), stat(4, 1.5));
        buckets.insert(PairKey::new("DEU", "FRA"), week("2024-01-08"), stat(2, 3.0));
        buckets
    }

    #[test]
    fn test_fresh_weeks_overwrite() {
        let mut merged = replayed();
        let overwritten = merge_into(&mut merged, &fresh());
        let pair = PairKey::new("CHN", "USA");

        assert_eq!(overwritten, 1);
        assert_eq!(merged.get(&pair, &week("2024-01-08")), Some(&stat(4, 1.5)));
    }

    #[test]
    fn test_untouched_weeks_retained() {
        let merged = merge_buckets(replayed(), &fresh());

        assert_eq!(
            merged.get(&PairKey::new("CHN", "USA"), &week("2024-01-01")),
            Some(&stat(5, -2.0))
        );
        assert_eq!(
            merged.get(&PairKey::new("RUS", "UKR"), &week("2024-01-08")),
            Some(&stat(9, -6.0))
        );
    }

    #[test]
    fn test_new_pairs_appended() {
        let merged = merge_buckets(replayed(), &fresh());
        let order: Vec<String> = merged.pairs().map(PairKey::id).collect();
        assert_eq!(order, vec!["CHN-USA", "RUS-UKR", "DEU-FRA"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = merge_buckets(replayed(), &fresh());
        let twice = merge_buckets(once.clone(), &fresh());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_into_empty() {
        let merged = merge_buckets(PairBuckets::new(), &fresh());
        assert_eq!(merged, fresh());
    }
}
