//! Core logic for GeneListe, a personal genealogy record editor.
//!
//! Records live in a delimited text file; each carries a lineage code
//! (`#aa#ba#ca#`) that places it in a family tree rendered as indented text.

pub mod clock;
pub mod config;
pub mod lineage;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod tree;

pub use config::GeneConfig;
pub use lineage::{compare_tokens, parse_segments, TokenComparator};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::record::{ColumnMap, ColumnNames, Record};
pub use service::tree_service::{TreeService, TreeServiceError};
pub use store::{CsvRecordStore, RecordSource, SaveReport, StoreError, StoreResult};
pub use tree::{
    build_tree, render_genealogy, render_text, try_render_genealogy, LineageTree, RenderStyle,
    TreeBuildError, TreeBuilder, MISSING_LINEAGE_DIAGNOSTIC,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
