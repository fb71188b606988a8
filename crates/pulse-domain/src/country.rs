//! Country code to display name lookup

use crate::pair::PairKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Separator between the two country names of a pair label
const LABEL_SEPARATOR: &str = " \u{2014} ";

/// Read-only mapping from actor code to country name
///
/// Codes without an entry are labelled with the code itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryDirectory {
    names: HashMap<String, String>,
}

impl CountryDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of known codes
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the directory has no entries
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Display name for a code, falling back to the code
    pub fn name<'a>(&'a self, code: &'a str) -> &'a str {
        self.names.get(code).map(String::as_str).unwrap_or(code)
    }

    /// Display label for a pair (`"China — United States"`)
    pub fn pair_label(&self, pair: &PairKey) -> String {
        format!(
            "{}{}{}",
            self.name(pair.first()),
            LABEL_SEPARATOR,
            self.name(pair.second())
        )
    }

    /// Sorted name map restricted to the given codes
    pub fn restrict<'a, I>(&self, codes: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        codes
            .into_iter()
            .map(|code| (code.to_string(), self.name(code).to_string()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CountryDirectory {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
