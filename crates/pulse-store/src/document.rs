//! Summary document persistence on the local filesystem

use crate::StoreError;
use pulse_domain::traits::DocumentStore;
use pulse_domain::{PriorDocument, SummaryDocument};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores the summary document as a single JSON file
///
/// Saving writes a sibling `.tmp` file and renames it over the target, so a
/// reader sees either the old document or the new one.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    path: PathBuf,
}

impl FileDocumentStore {
    /// Create a store for the document at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a store for `file_name` inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P, file_name: &str) -> Self {
        Self::new(dir.as_ref().join(file_name))
    }

    /// Path of the document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored document in its strict form
    pub fn read(&self) -> Result<SummaryDocument, StoreError> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("document"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DocumentStore for FileDocumentStore {
    type Error = StoreError;

    fn load(&self) -> Result<Option<PriorDocument>, Self::Error> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "No prior document found");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let prior: PriorDocument = serde_json::from_str(&content)?;
        tracing::info!(
            path = %self.path.display(),
            pairs = prior.pairs.as_ref().map_or(0, Vec::len),
            "Loaded prior document"
        );
        Ok(Some(prior))
    }

    fn save(&self, document: &SummaryDocument) -> Result<u64, Self::Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec(document)?;
        let temp = self.temp_path();
        fs::write(&temp, &bytes)?;
        fs::rename(&temp, &self.path)?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Document written");
        Ok(bytes.len() as u64)
    }
}
