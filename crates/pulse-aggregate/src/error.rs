//! Error types for aggregation runs

use pulse_domain::DomainError;
use thiserror::Error;

/// Errors that can occur during an aggregation run
///
/// The engine performs no I/O, so every error here is fatal to the whole run.
#[derive(Error, Debug)]
pub enum AggregateError {
    /// Invalid input value (for example a malformed event date)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
