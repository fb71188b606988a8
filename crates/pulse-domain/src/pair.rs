//! Pair module - direction-free identity of two actors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical key for an unordered pair of actor codes
///
/// The two codes are stored sorted, so `PairKey::new("USA", "CHN")` and
/// `PairKey::new("CHN", "USA")` are the same key. Every place that groups
/// events by pair goes through this type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    first: String,
    second: String,
}

impl PairKey {
    /// Build the canonical key for two actor codes
    ///
    /// # Examples
    ///
    /// ```
    /// use pulse_domain::PairKey;
    ///
    /// let key = PairKey::new("USA", "CHN");
    /// assert_eq!(key.first(), "CHN");
    /// assert_eq!(key, PairKey::new("CHN", "USA"));
    /// ```
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Lexicographically smaller code
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Lexicographically larger code
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Stable identifier used by ranking lists (`"CHN-USA"`)
    pub fn id(&self) -> String {
        self.to_string()
    }

    /// Whether either side of the pair is the given code
    pub fn contains(&self, code: &str) -> bool {
        self.first == code || self.second == code
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: direction never matters
        #[test]
        fn test_symmetric(a in "[A-Z]{3}", b in "[A-Z]{3}") {
            prop_assert_eq!(PairKey::new(a.clone(), b.clone()), PairKey::new(b, a));
        }

        /// Property: the first code never sorts after the second
        #[test]
        fn test_sorted(a in "[A-Z]{2,3}", b in "[A-Z]{2,3}") {
            let key = PairKey::new(a, b);
            prop_assert!(key.first() <= key.second());
        }
    }
}
