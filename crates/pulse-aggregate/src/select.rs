//! Volume ranker and selector

use crate::bucket::PairBuckets;
use pulse_domain::PairKey;

/// A pair with its event volume across every bucketed week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairVolume {
    /// The pair
    pub pair: PairKey,
    /// Sum of weekly totals
    pub volume: u64,
}

/// Volume per pair, in bucket order
pub fn pair_volumes(buckets: &PairBuckets) -> Vec<PairVolume> {
    buckets
        .iter()
        .map(|(pair, weeks)| PairVolume {
            pair: pair.clone(),
            volume: weeks.values().map(|stat| stat.total).sum(),
        })
        .collect()
}

/// The `limit` pairs with the highest volume, highest first
///
/// The sort is stable, so equal volumes keep bucket order.
pub fn select_top_pairs(buckets: &PairBuckets, limit: usize) -> Vec<PairVolume> {
    let mut volumes = pair_volumes(buckets);
    volumes.sort_by(|a, b| b.volume.cmp(&a.volume));
    volumes.truncate(limit);
    volumes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_domain::{Week, WeeklyStat};

    fn buckets(pairs: &[(&str, &str, Vec<u64>)]) -> PairBuckets {
        let mut buckets = PairBuckets::new();
        let latest = Week::parse("2024-03-04").unwrap();
        for (a, b, totals) in pairs {
            for (i, total) in totals.iter().enumerate() {
                let week = latest.weeks_before(i as u32);
                buckets.insert(
                    PairKey::new(*a, *b),
                    week,
                    WeeklyStat { total: *total, ..Default::default() },
                );
            }
        }
        buckets
    }

    #[test]
    fn test_volume_sums_all_weeks() {
        let volumes = pair_volumes(&buckets(&[("CHN", "USA", vec![3, 4, 5])]));
        assert_eq!(volumes[0].volume, 12);
    }

    #[test]
    fn test_selects_highest_volume() {
        let b = buckets(&[
            ("A", "B", vec![1]),
            ("C", "D", vec![10, 10]),
            ("E", "F", vec![5]),
            ("G", "H", vec![30]),
        ]);
        let top: Vec<String> = select_top_pairs(&b, 2).iter().map(|v| v.pair.id()).collect();
        assert_eq!(top, vec!["G-H", "C-D"]);
    }

    #[test]
    fn test_ties_keep_bucket_order() {
        let b = buckets(&[("X", "Y", vec![4]), ("A", "B", vec![4]), ("M", "N", vec![4])]);
        let top: Vec<String> = select_top_pairs(&b, 3).iter().map(|v| v.pair.id()).collect();
        assert_eq!(top, vec!["X-Y", "A-B", "M-N"]);
    }

    #[test]
    fn test_never_exceeds_limit() {
        let b = buckets(&[("A", "B", vec![1]), ("C", "D", vec![2])]);
        assert_eq!(select_top_pairs(&b, 1).len(), 1);
        assert_eq!(select_top_pairs(&b, 10).len(), 2);
    }
}
