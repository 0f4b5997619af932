//! Genealogy tree pipeline: assemble records by lineage path, then render.
//!
//! # Responsibility
//! - Expose the pure records -> text function used by callers.
//! - Turn a missing lineage column into a fixed diagnostic text.
//!
//! # Invariants
//! - The tree is rebuilt on every call; nothing is cached between runs.
//! - No file I/O happens here.

pub mod builder;
pub mod render;

pub use builder::{
    build_tree, LineageNode, LineageTree, NodeIndex, TreeBuildError, TreeBuilder, ROOT_INDEX,
};
pub use render::{
    header_line, record_label, render_text, RenderStyle, MISSING_LINEAGE_DIAGNOSTIC,
};

use crate::config::GeneConfig;
use crate::model::record::{ColumnMap, Record};
use log::warn;

/// Runs assemble + render over `records`.
///
/// # Errors
/// - `MissingLineageColumn` when no header matches the configured lineage column.
pub fn try_render_genealogy(
    records: &[Record],
    headers: &[String],
    config: &GeneConfig,
    timestamp: &str,
) -> Result<String, TreeBuildError> {
    let columns = ColumnMap::resolve(headers, &config.columns);
    let lineage = columns
        .lineage
        .as_deref()
        .ok_or_else(|| TreeBuildError::MissingLineageColumn {
            column: config.columns.lineage.clone(),
        })?;
    let tree = TreeBuilder::new().build(records, headers, lineage)?;
    Ok(render_text(&tree, &columns, timestamp, &config.style))
}

/// Runs the pipeline and always yields text.
///
/// A missing lineage column produces exactly [`MISSING_LINEAGE_DIAGNOSTIC`].
pub fn render_genealogy(
    records: &[Record],
    headers: &[String],
    config: &GeneConfig,
    timestamp: &str,
) -> String {
    match try_render_genealogy(records, headers, config, timestamp) {
        Ok(text) => text,
        Err(err) => {
            warn!("event=tree_render module=tree status=error error={err}");
            MISSING_LINEAGE_DIAGNOSTIC.to_string()
        }
    }
}
