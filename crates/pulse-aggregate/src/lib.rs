//! Pulse Aggregate
//!
//! Turns a batch of country-pair events into the weekly dashboard document.
//!
//! # Overview
//!
//! One run of the [`Aggregator`] goes through these stages:
//! - **Buckets**: events are grouped by unordered country pair and ISO week
//!   and reduced to a [`WeeklyStat`](pulse_domain::WeeklyStat)
//! - **Replay and merge**: in incremental mode, the previous document is
//!   turned back into buckets and fresh weeks overwrite replayed ones
//! - **Selection**: the pairs with the highest event volume are kept
//! - **Timelines**: each kept pair gets a gap-filled series over the week
//!   axis, with recent/prior window averages and a trend
//! - **Rankings**: most conflictual, most cooperative and biggest shifts
//!
//! # Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use pulse_aggregate::{Aggregator, AggregatorConfig, RunRequest};
//! use pulse_domain::{CountryDirectory, Event};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let events = vec![
//!     Event::new("20240115", "RUS", "UKR").with_goldstein(-8.0).with_class(4),
//! ];
//! let countries: CountryDirectory = [("RUS", "Russia"), ("UKR", "Ukraine")]
//!     .into_iter()
//!     .collect();
//! let now = Utc.with_ymd_and_hms(2024, 1, 17, 0, 0, 0).unwrap();
//!
//! let mut aggregator = Aggregator::new(AggregatorConfig::default());
//! if let Some(document) = aggregator.run(RunRequest::full(&events, &countries, now))? {
//!     assert_eq!(document.pairs[0].label, "Russia \u{2014} Ukraine");
//! }
//! println!("{}", aggregator.metrics().summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! top_pairs = 100
//! weeks_history = 260
//! recent_weeks = 12
//! ranking_limit = 10
//! ```

#![warn(missing_docs)]

mod aggregator;
mod config;
mod error;
mod metrics;
mod types;

pub mod bucket;
pub mod merge;
pub mod ranking;
pub mod select;
pub mod serializer;
pub mod stats;
pub mod timeline;

pub use aggregator::Aggregator;
pub use bucket::{build_buckets, replay_buckets, PairBuckets, PairWeekMap, ReplayedBuckets};
pub use config::AggregatorConfig;
pub use error::AggregateError;
pub use merge::merge_buckets;
pub use metrics::AggregateMetrics;
pub use ranking::rank_pairs;
pub use select::{select_top_pairs, PairVolume};
pub use serializer::{assemble_document, format_generated_at};
pub use stats::{round2, weekly_stat};
pub use timeline::{assemble_timeline, WindowAverages};
pub use types::RunRequest;
