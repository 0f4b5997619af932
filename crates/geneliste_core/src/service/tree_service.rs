//! Genealogy tree use-case service.
//!
//! # Responsibility
//! - Run the parse -> assemble -> render pipeline over a record source.
//! - Persist the rendered text artifact.
//! - Save store edits together with a refreshed tree file.
//!
//! # Invariants
//! - Every call rebuilds the tree from the source's current records.
//! - A missing lineage column still yields (and persists) the diagnostic text.

use crate::clock;
use crate::config::GeneConfig;
use crate::store::{CsvRecordStore, RecordSource, SaveReport, StoreError};
use crate::tree::{render_genealogy, try_render_genealogy, TreeBuildError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use time::OffsetDateTime;

/// Errors from tree service operations.
#[derive(Debug)]
pub enum TreeServiceError {
    /// Writing the tree file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Saving the record store failed.
    Store(StoreError),
}

impl Display for TreeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write tree to {}: {source}", path.display())
            }
            Self::Store(err) => write!(f, "failed to save records: {err}"),
        }
    }
}

impl Error for TreeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for TreeServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Tree rendering facade over one record source.
pub struct TreeService<'s, S: RecordSource> {
    source: &'s S,
    config: GeneConfig,
}

impl<'s, S: RecordSource> TreeService<'s, S> {
    /// Creates service reading from `source`.
    pub fn new(source: &'s S, config: GeneConfig) -> Self {
        Self { source, config }
    }

    /// Renders the tree, or the fixed diagnostic when the lineage column is missing.
    pub fn render(&self, at: OffsetDateTime) -> String {
        render_genealogy(
            self.source.records(),
            self.source.headers(),
            &self.config,
            &clock::display_timestamp(at),
        )
    }

    /// Renders the tree, surfacing a missing lineage column as an error.
    pub fn try_render(&self, at: OffsetDateTime) -> Result<String, TreeBuildError> {
        try_render_genealogy(
            self.source.records(),
            self.source.headers(),
            &self.config,
            &clock::display_timestamp(at),
        )
    }

    /// Renders and writes the tree to `path`, returning the written text.
    pub fn write_tree(&self, path: &Path, at: OffsetDateTime) -> Result<String, TreeServiceError> {
        let started_at = Instant::now();
        let text = self.render(at);
        if let Err(source) = fs::write(path, &text) {
            error!(
                "event=tree_write module=service status=error duration_ms={} path={} error={}",
                started_at.elapsed().as_millis(),
                path.display(),
                source
            );
            return Err(TreeServiceError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
        info!(
            "event=tree_write module=service status=ok duration_ms={} bytes={} path={}",
            started_at.elapsed().as_millis(),
            text.len(),
            path.display()
        );
        Ok(text)
    }
}

impl TreeService<'_, CsvRecordStore> {
    /// Saves the store (with backup), then rewrites the tree file at `tree_path`.
    ///
    /// The tree is only rewritten once the records are on disk.
    pub fn save_and_render(
        &self,
        tree_path: &Path,
        at: OffsetDateTime,
    ) -> Result<SaveReport, TreeServiceError> {
        let report = self.source.save(at)?;
        self.write_tree(tree_path, at)?;
        Ok(report)
    }
}
