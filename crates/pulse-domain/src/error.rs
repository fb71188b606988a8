//! Error types for domain value construction

use thiserror::Error;

/// Errors raised while building domain values from raw input
#[derive(Error, Debug)]
pub enum DomainError {
    /// An event date could not be parsed as a calendar day
    #[error("Invalid event date '{input}': {source}")]
    InvalidDate {
        /// The raw date text as received from the row source
        input: String,
        /// Underlying parse failure
        #[source]
        source: chrono::ParseError,
    },
}
