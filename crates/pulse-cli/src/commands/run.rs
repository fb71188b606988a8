//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::{DateTime, NaiveDate, Utc};
use pulse_aggregate::{Aggregator, AggregatorConfig, RunRequest};
use pulse_domain::traits::{DocumentStore, EventSource, SourceWindow};
use pulse_domain::RunMode;
use pulse_store::{load_countries, FileDocumentStore, JsonRowSource};
use std::path::PathBuf;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Fully resolved inputs of one run.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Run mode
    pub mode: RunMode,
    /// Event rows file
    pub input: PathBuf,
    /// Country names file
    pub countries: Option<PathBuf>,
    /// Summary document path
    pub document: PathBuf,
    /// Stop after sourcing rows
    pub dry_run: bool,
    /// Aggregation parameters
    pub pipeline: AggregatorConfig,
    /// Lookback of an incremental run
    pub incremental_days: u32,
}

impl RunPlan {
    /// Combine command-line arguments with the configuration.
    ///
    /// Flags and their environment variables win over the file.
    pub fn resolve(args: RunArgs, config: &Config) -> Result<Self> {
        config.validate()?;

        let input = args
            .input
            .or_else(|| config.paths.input.clone())
            .ok_or_else(|| {
                CliError::Config("No input rows file; pass --input or set paths.input".into())
            })?;
        let output_dir = args
            .output_dir
            .unwrap_or_else(|| config.paths.output_dir.clone());

        Ok(Self {
            mode: args.mode.map(Into::into).unwrap_or(config.run.mode),
            input,
            countries: args.countries.or_else(|| config.paths.countries.clone()),
            document: output_dir.join(&config.paths.output_file),
            dry_run: args.dry_run,
            pipeline: config.pipeline.clone(),
            incremental_days: config.run.incremental_days,
        })
    }

    /// Source window for a run started at `now`.
    pub fn window(&self, now: DateTime<Utc>) -> SourceWindow {
        SourceWindow::for_mode(
            self.mode,
            now,
            self.pipeline.weeks_history,
            self.incremental_days,
        )
    }
}

/// What a run did.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Rows were sourced and counted only
    DryRun {
        /// Rows inside the window
        rows: usize,
        /// First day of the window
        window_start: NaiveDate,
    },
    /// The batch was empty; nothing was written
    NothingToDo,
    /// A new document was written
    Written {
        /// Document path
        path: PathBuf,
        /// Bytes written
        bytes: u64,
        /// Pairs in the document
        pairs: usize,
        /// Weeks on the axis
        weeks: usize,
    },
}

/// Source, aggregate and persist once.
pub fn run_pipeline(plan: &RunPlan, now: DateTime<Utc>) -> Result<RunOutcome> {
    let window = plan.window(now);
    tracing::info!(mode = %plan.mode, start = %window.start, "Sourcing event rows");

    let events = JsonRowSource::new(&plan.input).fetch(&window)?;

    if plan.dry_run {
        tracing::info!(rows = events.len(), "Dry run, skipping aggregation");
        return Ok(RunOutcome::DryRun {
            rows: events.len(),
            window_start: window.start,
        });
    }

    if events.is_empty() {
        tracing::info!("No rows returned");
        return Ok(RunOutcome::NothingToDo);
    }

    let countries = load_countries(plan.countries.as_deref())?;
    let store = FileDocumentStore::new(&plan.document);
    let prior = match plan.mode {
        RunMode::Incremental => store.load()?,
        RunMode::Full => None,
    };

    let mut aggregator = Aggregator::new(plan.pipeline.clone());
    let request = RunRequest {
        mode: plan.mode,
        events: &events,
        prior: prior.as_ref(),
        countries: &countries,
        now,
    };

    let Some(document) = aggregator.run(request)? else {
        return Ok(RunOutcome::NothingToDo);
    };
    tracing::info!("{}", aggregator.metrics().summary());

    let bytes = store.save(&document)?;
    tracing::info!(
        path = %plan.document.display(),
        size_mb = %format!("{:.2}", bytes as f64 / BYTES_PER_MB),
        pairs = document.pairs.len(),
        weeks = document.weeks.len(),
        "Wrote summary document"
    );

    Ok(RunOutcome::Written {
        path: plan.document.clone(),
        bytes,
        pairs: document.pairs.len(),
        weeks: document.weeks.len(),
    })
}

/// Execute the run command.
pub fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let plan = RunPlan::resolve(args, config)?;

    match run_pipeline(&plan, Utc::now())? {
        RunOutcome::DryRun { rows, window_start } => {
            println!(
                "{}",
                formatter.info(&format!(
                    "Dry run: {} rows since {} ({} mode)",
                    rows, window_start, plan.mode
                ))
            );
        }
        RunOutcome::NothingToDo => {
            println!("{}", formatter.warning("No rows returned, nothing written"));
        }
        RunOutcome::Written {
            path,
            bytes,
            pairs,
            weeks,
        } => {
            println!(
                "{}",
                formatter.success(&format!(
                    "Wrote {} ({:.2} MB, {} pairs, {} weeks)",
                    path.display(),
                    bytes as f64 / BYTES_PER_MB,
                    pairs,
                    weeks
                ))
            );
        }
    }

    Ok(())
}
