//! Pulse Storage Layer
//!
//! File-backed implementations of the collaborator traits in
//! [`pulse_domain::traits`].
//!
//! # Architecture
//!
//! - [`JsonRowSource`] reads event rows exported from the events table, as
//!   a JSON array or JSON lines, and applies the source query filters
//! - [`load_countries`] reads the code to name lookup
//! - [`FileDocumentStore`] reads the previous summary document and replaces
//!   it atomically
//!
//! # Examples
//!
//! ```no_run
//! use pulse_domain::traits::DocumentStore;
//! use pulse_store::FileDocumentStore;
//!
//! let store = FileDocumentStore::new("output/pulse_data.json");
//! let prior = store.load().unwrap();
//! println!("prior document present: {}", prior.is_some());
//! ```

#![warn(missing_docs)]

mod countries;
mod document;
mod source;

pub use countries::load_countries;
pub use document::FileDocumentStore;
pub use source::{JsonRowSource, RawDate, RawRow};

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
