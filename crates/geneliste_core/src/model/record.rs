//! Flat genealogy record and column resolution.
//!
//! # Responsibility
//! - Hold one CSV row as a column -> value mapping.
//! - Resolve logical columns (id, lineage, name fields) against real headers.
//!
//! # Invariants
//! - Column lookups on headers are case-insensitive.
//! - A missing column reads as the empty string, never as an error.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One flat record as read from the record store.
///
/// Columns keep insertion order, which is header order for loaded rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: IndexMap<String, String>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(column, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Returns the raw value of `column`, or `""` when absent.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    /// Returns the value of an optional column, or `""` when unresolved.
    pub fn get_opt(&self, column: Option<&str>) -> &str {
        column.map(|name| self.get(name)).unwrap_or("")
    }

    /// Sets `column` to `value`, returning the previous value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(column.into(), value.into())
    }

    /// Returns whether the record has an entry for `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }
}

/// Configured names of the logical columns.
///
/// Defaults match the historical `Qui.csv` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    pub id: String,
    pub lineage: String,
    pub family_name: String,
    pub given_name: String,
    pub sex: String,
    pub birth_year: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            lineage: "Gene".to_string(),
            family_name: "Nom".to_string(),
            given_name: "Prenom".to_string(),
            sex: "S".to_string(),
            birth_year: "Naiss_AAAA".to_string(),
        }
    }
}

/// Logical columns resolved against an actual header row.
///
/// Each field holds the header spelling found in the data, so record lookups
/// stay exact once resolution is done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub lineage: Option<String>,
    pub family_name: Option<String>,
    pub given_name: Option<String>,
    pub sex: Option<String>,
    pub birth_year: Option<String>,
}

impl ColumnMap {
    /// Resolves every configured column name against `headers`.
    pub fn resolve(headers: &[String], names: &ColumnNames) -> Self {
        Self {
            lineage: find_column(headers, &names.lineage),
            family_name: find_column(headers, &names.family_name),
            given_name: find_column(headers, &names.given_name),
            sex: find_column(headers, &names.sex),
            birth_year: find_column(headers, &names.birth_year),
        }
    }
}

/// Finds the header matching `wanted`, ignoring case and surrounding spaces.
pub fn find_column(headers: &[String], wanted: &str) -> Option<String> {
    let wanted = wanted.trim().to_lowercase();
    headers
        .iter()
        .find(|header| header.trim().to_lowercase() == wanted)
        .cloned()
}
