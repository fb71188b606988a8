//! Metrics collection for aggregation runs

/// Counters collected while building a summary document
///
/// Accumulates across runs of the same [`Aggregator`](crate::Aggregator).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateMetrics {
    /// Completed runs that produced a document
    pub run_count: usize,

    /// Runs that found an empty batch
    pub empty_runs: usize,

    /// Event rows consumed
    pub rows_ingested: usize,

    /// (pair, week) buckets computed from fresh events
    pub fresh_buckets: usize,

    /// (pair, week) buckets reconstructed from a prior document
    pub replayed_buckets: usize,

    /// Replayed buckets replaced by fresh ones
    pub overwritten_buckets: usize,

    /// Prior records skipped because fields were missing
    pub skipped_records: usize,

    /// Pairs present before top-N selection
    pub pairs_considered: usize,

    /// Pairs written to the document
    pub pairs_retained: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u64,
}

impl AggregateMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a run completion
    pub fn record_run(&mut self) {
        self.run_count += 1;
    }

    /// Record a run that had nothing to do
    pub fn record_empty_run(&mut self) {
        self.empty_runs += 1;
    }

    /// Record fresh rows and the buckets they produced
    pub fn record_fresh(&mut self, rows: usize, buckets: usize) {
        self.rows_ingested += rows;
        self.fresh_buckets += buckets;
    }

    /// Record replayed buckets and skipped prior records
    pub fn record_replay(&mut self, buckets: usize, skipped: usize) {
        self.replayed_buckets += buckets;
        self.skipped_records += skipped;
    }

    /// Record replayed buckets replaced during a merge
    pub fn record_overwrites(&mut self, count: usize) {
        self.overwritten_buckets += count;
    }

    /// Record the outcome of top-N selection
    pub fn record_selection(&mut self, considered: usize, retained: usize) {
        self.pairs_considered += considered;
        self.pairs_retained += retained;
    }

    /// Pairs that fell outside the top N
    pub fn pairs_dropped(&self) -> usize {
        self.pairs_considered.saturating_sub(self.pairs_retained)
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Aggregation Metrics Summary".to_string(),
            "===========================".to_string(),
            format!("Runs: {} ({} empty)", self.run_count, self.empty_runs),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            format!("Rows ingested: {}", self.rows_ingested),
            format!("Fresh buckets: {}", self.fresh_buckets),
        ];

        if self.replayed_buckets > 0 || self.skipped_records > 0 {
            lines.push(format!("Replayed buckets: {}", self.replayed_buckets));
            lines.push(format!("Overwritten buckets: {}", self.overwritten_buckets));
            lines.push(format!("Skipped prior records: {}", self.skipped_records));
        }

        lines.push(format!(
            "Pairs: {} retained, {} dropped",
            self.pairs_retained,
            self.pairs_dropped()
        ));

        lines.join("\n")
    }
}
