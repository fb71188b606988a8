//! Configuration for aggregation runs
//!
//! Controls how many pairs are kept, how far back the week axis reaches and
//! how the trend windows are sized.

use serde::{Deserialize, Serialize};

/// Configuration for the [`Aggregator`](crate::Aggregator)
///
/// # Examples
///
/// ```
/// use pulse_aggregate::AggregatorConfig;
///
/// let config = AggregatorConfig::default();
/// assert_eq!(config.top_pairs, 100);
/// assert_eq!(config.weeks_history, 260);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Number of pairs retained in the document, by total volume
    /// Default: 100
    #[serde(default = "default_top_pairs")]
    pub top_pairs: usize,

    /// Length of the week axis
    /// Default: 260 weeks (about five years)
    #[serde(default = "default_weeks_history")]
    pub weeks_history: u32,

    /// Size of the recent window, and of the prior window before it
    /// Default: 12 weeks
    #[serde(default = "default_recent_weeks")]
    pub recent_weeks: u32,

    /// Length of each dashboard ranking list
    /// Default: 10
    #[serde(default = "default_ranking_limit")]
    pub ranking_limit: usize,
}

fn default_top_pairs() -> usize {
    100
}

fn default_weeks_history() -> u32 {
    260
}

fn default_recent_weeks() -> u32 {
    12
}

fn default_ranking_limit() -> usize {
    10
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            top_pairs: default_top_pairs(),
            weeks_history: default_weeks_history(),
            recent_weeks: default_recent_weeks(),
            ranking_limit: default_ranking_limit(),
        }
    }
}

impl AggregatorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.top_pairs == 0 {
            return Err("top_pairs must be greater than 0".to_string());
        }
        if self.weeks_history == 0 {
            return Err("weeks_history must be greater than 0".to_string());
        }
        if self.recent_weeks == 0 {
            return Err("recent_weeks must be greater than 0".to_string());
        }
        if self.ranking_limit == 0 {
            return Err("ranking_limit must be greater than 0".to_string());
        }
        if u64::from(self.weeks_history) < 2 * u64::from(self.recent_weeks) {
            return Err(format!(
                "weeks_history ({}) must cover two recent windows of {} weeks",
                self.weeks_history, self.recent_weeks
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
