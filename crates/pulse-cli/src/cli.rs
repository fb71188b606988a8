//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use pulse_domain::{RankingKind, RunMode};
use std::path::PathBuf;

/// Pulse CLI - Weekly country-pair event summaries.
#[derive(Debug, Parser)]
#[command(name = "pulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (pair IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate event rows and write the summary document
    Run(RunArgs),

    /// Show a ranking from a written summary document
    Inspect(InspectArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Run mode
    #[arg(short, long, value_enum, env = "PULSE_MODE")]
    pub mode: Option<ModeArg>,

    /// Event rows file (JSON array or JSON lines)
    #[arg(short, long, env = "PULSE_INPUT")]
    pub input: Option<PathBuf>,

    /// Country names file (JSON object, code to name)
    #[arg(long, env = "PULSE_COUNTRIES")]
    pub countries: Option<PathBuf>,

    /// Directory the summary document is written to
    #[arg(short, long, env = "PULSE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Source and count rows without aggregating or writing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Summary document to read (defaults to the configured output)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Ranking to show
    #[arg(short, long, value_enum, default_value = "conflictual")]
    pub ranking: RankingArg,

    /// Maximum number of pairs
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run mode argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Rebuild from the full history window
    Full,
    /// Merge recent rows onto the previous document
    Incremental,
}

/// Ranking argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RankingArg {
    /// Most conflictual recent average first
    Conflictual,
    /// Most cooperative recent average first
    Cooperative,
    /// Largest trend first
    Shifts,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Full => RunMode::Full,
            ModeArg::Incremental => RunMode::Incremental,
        }
    }
}

impl From<RankingArg> for RankingKind {
    fn from(ranking: RankingArg) -> Self {
        match ranking {
            RankingArg::Conflictual => RankingKind::MostConflictual,
            RankingArg::Cooperative => RankingKind::MostCooperative,
            RankingArg::Shifts => RankingKind::BiggestShifts,
        }
    }
}
