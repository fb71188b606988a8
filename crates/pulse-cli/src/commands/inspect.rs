//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use pulse_domain::RankingKind;
use pulse_store::FileDocumentStore;

/// Execute the inspect command.
pub fn execute_inspect(args: InspectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let path = args.file.unwrap_or_else(|| config.document_path());
    let document = FileDocumentStore::new(&path).read()?;
    tracing::debug!(path = %path.display(), pairs = document.pairs.len(), "Loaded summary document");

    let kind = RankingKind::from(args.ranking);
    let mut pairs = document.ranked_pairs(kind);
    if let Some(limit) = args.limit {
        pairs.truncate(limit);
    }

    if formatter.format() == OutputFormat::Table {
        println!("{}", formatter.document_info(&document));
    }
    println!("{}", formatter.format_ranking(kind, &pairs)?);

    Ok(())
}
