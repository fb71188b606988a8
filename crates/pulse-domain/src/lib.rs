//! Pulse Domain Layer
//!
//! Value types and collaborator interfaces shared by every Pulse crate.
//! The only dependencies are `chrono` for calendar arithmetic, `serde` for
//! the persisted document shape and `thiserror` for the error type.
//!
//! ## Key Concepts
//!
//! - **Event**: One bilateral interaction between two actor (country) codes
//! - **PairKey**: Direction-free identity of a country pair, stored sorted
//! - **Week**: An ISO week, identified by its Monday
//! - **WeeklyStat**: The reduction of all events for one (pair, week)
//! - **SummaryDocument**: The single persisted artifact a dashboard renders
//!
//! ## Architecture
//!
//! Pure types only. Sourcing rows, looking up country names and persisting
//! the document are expressed as traits in [`traits`]; implementations live
//! in `pulse-store`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod country;
pub mod document;
pub mod error;
pub mod event;
pub mod pair;
pub mod stat;
pub mod traits;
pub mod week;

// Re-exports for convenience
pub use country::CountryDirectory;
pub use document::{
    PairSummary, PriorDocument, PriorPair, PriorWeekEntry, RankingKind, Rankings, SummaryDocument,
    WeekEntry,
};
pub use error::DomainError;
pub use event::{Event, EventClass};
pub use pair::PairKey;
pub use stat::WeeklyStat;
pub use traits::{DocumentStore, EventSource, RunMode, SourceWindow};
pub use week::Week;
