//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use pulse_domain::{PairSummary, RankingKind, SummaryDocument};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a ranking joined to its pair records.
    pub fn format_ranking(&self, kind: RankingKind, pairs: &[&PairSummary]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_ranking_json(kind, pairs),
            OutputFormat::Table => self.format_ranking_table(pairs),
            OutputFormat::Quiet => self.format_ranking_quiet(pairs),
        }
    }

    fn format_ranking_json(&self, kind: RankingKind, pairs: &[&PairSummary]) -> Result<String> {
        let entries: Vec<serde_json::Value> = pairs
            .iter()
            .enumerate()
            .map(|(i, p)| {
                serde_json::json!({
                    "rank": i + 1,
                    "pair": p.pair_id(),
                    "label": p.label,
                    "total_events": p.total_events,
                    "recent_avg_goldstein": p.recent_avg_goldstein,
                    "trend": p.trend,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&serde_json::json!({
            "ranking": kind.as_str(),
            "pairs": entries,
        }))?)
    }

    fn format_ranking_table(&self, pairs: &[&PairSummary]) -> Result<String> {
        if pairs.is_empty() {
            return Ok(self.colorize("No pairs ranked.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Pair", "Label", "Events", "Recent Avg", "Trend"]);

        for (i, pair) in pairs.iter().enumerate() {
            builder.push_record([
                (i + 1).to_string(),
                pair.pair_id(),
                pair.label.clone(),
                pair.total_events.to_string(),
                format_score(pair.recent_avg_goldstein),
                format_score(pair.trend),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    fn format_ranking_quiet(&self, pairs: &[&PairSummary]) -> Result<String> {
        let ids: Vec<String> = pairs.iter().map(|p| p.pair_id()).collect();
        Ok(ids.join("\n"))
    }

    /// One-line description of a document.
    pub fn document_info(&self, document: &SummaryDocument) -> String {
        let span = match (document.weeks.first(), document.weeks.last()) {
            (Some(first), Some(last)) => format!("{} to {}", first, last),
            _ => "no weeks".to_string(),
        };
        self.info(&format!(
            "Generated {}: {} pairs, {} weeks ({})",
            document.generated_at,
            document.pairs.len(),
            document.weeks.len(),
            span
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Format an optional score with its sign, `-` when absent.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{:+.2}", value),
        None => "-".to_string(),
    }
}
