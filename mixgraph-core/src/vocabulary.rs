//! Ingredient vocabulary loading
//!
//! The vocabulary is the fixed allow-list of ingredients the analysis is
//! scoped to. It is supplied as a CSV whose *column names* are the
//! ingredient names (an export of a wide ingredient table), and is treated
//! as the ground-truth canonical spelling: no normalization is applied to
//! it beyond filtering out placeholder columns.

use crate::{Error, Result};
use std::collections::HashSet;
use std::path::Path;

/// Placeholder column name prefix emitted for blank headers by common
/// tabular tooling (e.g. `Unnamed: 0` for an index column)
const PLACEHOLDER_PREFIX: &str = "Unnamed:";

/// Fixed, ordered set of canonical ingredient names bounding the analysis
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Names in their original order, as supplied
    names: Vec<String>,
    /// Lowercased, trimmed forms for case-insensitive membership tests
    canonical: HashSet<String>,
}

impl Vocabulary {
    /// Load the vocabulary from a CSV file's header row
    ///
    /// Blank columns and `Unnamed: N` placeholder columns are excluded.
    /// Fails if the file is unreadable or no usable names remain.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Vocabulary> {
        let path = path.as_ref();

        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            Error::Vocabulary(format!(
                "Failed to open ingredient CSV {}: {}",
                path.display(),
                e
            ))
        })?;

        let headers = reader.headers().map_err(|e| {
            Error::Vocabulary(format!(
                "Failed to read header row of {}: {}",
                path.display(),
                e
            ))
        })?;

        let names: Vec<String> = headers
            .iter()
            .map(str::trim)
            .filter(|name| !name.is_empty() && !name.starts_with(PLACEHOLDER_PREFIX))
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            return Err(Error::Vocabulary(format!(
                "No usable ingredient columns in {}",
                path.display()
            )));
        }

        tracing::info!(
            path = %path.display(),
            count = names.len(),
            "Loaded ingredient vocabulary"
        );

        Ok(Self::from_names(names))
    }

    /// Build a vocabulary from an explicit name sequence (tests, drivers)
    pub fn from_names<I, S>(names: I) -> Vocabulary
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let canonical = names
            .iter()
            .map(|name| name.trim().to_lowercase())
            .collect();

        Vocabulary { names, canonical }
    }

    /// Names in their original supplied order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Case-insensitive membership test against canonical forms
    ///
    /// `name` is expected to already be normalized (lowercased, trimmed).
    pub fn contains_canonical(&self, name: &str) -> bool {
        self.canonical.contains(name)
    }

    /// Deduplicated, lexicographically sorted canonical names
    ///
    /// This is the matrix index order. Duplicate vocabulary entries
    /// collapse here so they cannot corrupt matrix indexing.
    pub fn sorted_canonical(&self) -> Vec<String> {
        let mut sorted: Vec<String> = self.canonical.iter().cloned().collect();
        sorted.sort();
        sorted
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
