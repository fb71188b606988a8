//! Summary serializer - assembles the final document

use chrono::{DateTime, Utc};
use pulse_domain::{CountryDirectory, PairSummary, Rankings, SummaryDocument, Week};
use std::collections::BTreeSet;

/// Timestamp format of `generated_at`
const GENERATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a generation time, UTC with second precision
pub fn format_generated_at(now: DateTime<Utc>) -> String {
    now.format(GENERATED_AT_FORMAT).to_string()
}

/// Assemble the persisted document
///
/// `pairs` keeps the order it is given in (volume rank). The country map is
/// restricted to codes that appear in `pairs`.
pub fn assemble_document(
    now: DateTime<Utc>,
    weeks: Vec<Week>,
    pairs: Vec<PairSummary>,
    rankings: Rankings,
    countries: &CountryDirectory,
) -> SummaryDocument {
    let used_codes: BTreeSet<&str> = pairs
        .iter()
        .flat_map(|p| [p.actor1.as_str(), p.actor2.as_str()])
        .collect();
    let countries = countries.restrict(used_codes);

    SummaryDocument {
        generated_at: format_generated_at(now),
        weeks,
        pairs,
        rankings,
        countries,
    }
}
