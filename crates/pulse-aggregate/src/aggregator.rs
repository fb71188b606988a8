//! Core aggregation pipeline

use crate::bucket::{build_buckets, replay_buckets};
use crate::merge::merge_into;
use crate::ranking::rank_pairs;
use crate::select::select_top_pairs;
use crate::serializer::assemble_document;
use crate::timeline::assemble_timeline;
use crate::{AggregateError, AggregateMetrics, AggregatorConfig, RunRequest};
use pulse_domain::{PairSummary, RunMode, SummaryDocument, Week};
use std::time::Instant;

/// Builds the dashboard document from an event batch
///
/// One run goes: fresh buckets, replay and merge (incremental only), top-N
/// selection, gap-filled timelines, rankings, document.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use pulse_aggregate::{Aggregator, RunRequest};
/// use pulse_domain::{CountryDirectory, Event};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let events = vec![
///     Event::new("20240115", "USA", "CHN").with_goldstein(-2.0).with_class(3),
///     Event::new("20240116", "CHN", "USA").with_goldstein(1.0).with_class(1),
/// ];
/// let countries = CountryDirectory::new();
/// let now = Utc.with_ymd_and_hms(2024, 1, 17, 0, 0, 0).unwrap();
///
/// let mut aggregator = Aggregator::default_config();
/// let document = aggregator
///     .run(RunRequest::full(&events, &countries, now))?
///     .expect("batch is not empty");
///
/// assert_eq!(document.pairs.len(), 1);
/// assert_eq!(document.pairs[0].pair_id(), "CHN-USA");
/// assert_eq!(document.weeks.len(), 260);
/// # Ok(())
/// # }
/// ```
pub struct Aggregator {
    config: AggregatorConfig,
    metrics: AggregateMetrics,
}

impl Aggregator {
    /// Create a new Aggregator with the given configuration
    pub fn new(config: AggregatorConfig) -> Self {
        Self {
            config,
            metrics: AggregateMetrics::new(),
        }
    }

    /// Create an Aggregator with default configuration
    pub fn default_config() -> Self {
        Self::new(AggregatorConfig::default())
    }

    /// Current configuration
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &AggregateMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Run the pipeline once
    ///
    /// Returns `Ok(None)` for an empty batch; nothing should be written in
    /// that case. A malformed event date fails the run before any output is
    /// produced. Prior records with missing fields are skipped and counted.
    pub fn run(&mut self, request: RunRequest<'_>) -> Result<Option<SummaryDocument>, AggregateError> {
        self.config.validate().map_err(AggregateError::Config)?;

        if request.events.is_empty() {
            tracing::info!(mode = %request.mode, "No rows returned, nothing to aggregate");
            self.metrics.record_empty_run();
            return Ok(None);
        }

        let start = Instant::now();

        let fresh = build_buckets(request.events)?;
        self.metrics.record_fresh(request.events.len(), fresh.bucket_count());
        tracing::info!(
            rows = request.events.len(),
            pairs = fresh.len(),
            buckets = fresh.bucket_count(),
            "Built fresh weekly buckets"
        );

        let buckets = match (request.mode, request.prior) {
            (RunMode::Incremental, Some(prior)) => {
                let mut replayed = replay_buckets(prior);
                self.metrics
                    .record_replay(replayed.buckets.bucket_count(), replayed.skipped);
                if replayed.skipped > 0 {
                    tracing::warn!(skipped = replayed.skipped, "Prior document had incomplete records");
                }

                let overwritten = merge_into(&mut replayed.buckets, &fresh);
                self.metrics.record_overwrites(overwritten);
                tracing::info!(
                    pairs = replayed.buckets.len(),
                    overwritten,
                    "Merged fresh buckets onto prior history"
                );
                replayed.buckets
            }
            (RunMode::Incremental, None) => {
                tracing::info!("No prior document, running incremental batch standalone");
                fresh
            }
            (RunMode::Full, _) => fresh,
        };

        let selected = select_top_pairs(&buckets, self.config.top_pairs);
        self.metrics.record_selection(buckets.len(), selected.len());
        tracing::debug!(
            considered = buckets.len(),
            retained = selected.len(),
            "Selected pairs by volume"
        );

        let axis = Week::axis(request.now.date_naive(), self.config.weeks_history);
        let recent_weeks = self.config.recent_weeks as usize;
        let pairs: Vec<PairSummary> = selected
            .iter()
            .map(|v| {
                assemble_timeline(
                    &v.pair,
                    buckets.weeks(&v.pair),
                    &axis,
                    request.countries,
                    recent_weeks,
                )
            })
            .collect();

        let rankings = rank_pairs(&pairs, self.config.ranking_limit);
        let document = assemble_document(request.now, axis, pairs, rankings, request.countries);

        self.metrics.record_run();
        self.metrics.total_runtime_ms += start.elapsed().as_millis() as u64;

        tracing::info!(
            pairs = document.pairs.len(),
            weeks = document.weeks.len(),
            "Summary document assembled"
        );

        Ok(Some(document))
    }
}
