//! Country directory loader

use crate::StoreError;
use pulse_domain::CountryDirectory;
use std::fs;
use std::path::Path;

/// Load the code to name lookup from a JSON object file
///
/// Without a path the directory is empty and every label falls back to its
/// code. A configured path that cannot be read is an error.
pub fn load_countries(path: Option<&Path>) -> Result<CountryDirectory, StoreError> {
    let Some(path) = path else {
        tracing::debug!("No countries file configured, labels will use codes");
        return Ok(CountryDirectory::new());
    };

    let content = fs::read_to_string(path)?;
    let countries: CountryDirectory = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), count = countries.len(), "Loaded country names");
    Ok(countries)
}
