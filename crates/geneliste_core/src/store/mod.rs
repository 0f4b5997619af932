//! Record store contracts and the CSV-backed implementation.
//!
//! # Responsibility
//! - Supply ordered flat records and their headers to the tree pipeline.
//! - Own CSV parsing, editing, backups, and snapshot exports.
//!
//! # Invariants
//! - Record order is the file order, except newly created rows which go first.
//! - The identifier column is never edited through `update_field`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod csv_store;

pub use csv_store::{detect_delimiter, parse_csv, CsvRecordStore, SaveReport};

use crate::model::record::Record;

/// Result type used by record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from record store operations.
#[derive(Debug)]
pub enum StoreError {
    /// File system failure on `path`.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// No header matches the configured identifier column.
    MissingIdColumn,
    /// No record carries the requested identifier.
    RecordNotFound(String),
    /// Field name is blank.
    MissingField,
    /// The identifier column cannot be edited directly.
    IdNotEditable,
    /// Snapshot serialization failed.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::MissingIdColumn => write!(f, "identifier column not found"),
            Self::RecordNotFound(id) => write!(f, "record not found: {id}"),
            Self::MissingField => write!(f, "field name must not be blank"),
            Self::IdNotEditable => write!(f, "identifier column cannot be edited"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::MissingIdColumn => None,
            Self::RecordNotFound(_) => None,
            Self::MissingField => None,
            Self::IdNotEditable => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Read-only view the tree pipeline needs from a record store.
pub trait RecordSource {
    /// Column names in file order.
    fn headers(&self) -> &[String];
    /// Records in store order.
    fn records(&self) -> &[Record];
}
