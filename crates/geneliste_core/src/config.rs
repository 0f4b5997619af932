//! Runtime configuration for column names and tree rendering.
//!
//! # Responsibility
//! - Group the knobs shared by the store, the tree pipeline, and the CLI.
//! - Provide defaults matching the historical `Data/Qui.csv` layout.

use crate::model::record::ColumnNames;
use crate::tree::render::RenderStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default CSV location relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "Data/Qui.csv";
/// Backup directory name, created next to the CSV file.
pub const BACKUP_DIR_NAME: &str = "Save";
/// Backup file prefix: `qui_YYYYMMDD_HHMMSS.csv`.
pub const BACKUP_FILE_PREFIX: &str = "qui_";
/// Rendered tree file name, written next to the CSV file.
pub const TREE_FILE_NAME: &str = "Arbre.txt";
/// Generated JS snapshot file name.
pub const JS_EXPORT_FILE_NAME: &str = "Qui.js";

/// Column and rendering configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneConfig {
    pub columns: ColumnNames,
    pub style: RenderStyle,
}

/// Default tree output path for a given CSV path.
pub fn default_tree_path(data_path: &Path) -> PathBuf {
    sibling_path(data_path, TREE_FILE_NAME)
}

/// Default JS export path: next to the `Data` directory, like the web client expects.
pub fn default_js_export_path(data_path: &Path) -> PathBuf {
    let data_dir = data_path.parent().unwrap_or_else(|| Path::new(""));
    data_dir
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(JS_EXPORT_FILE_NAME)
}

fn sibling_path(data_path: &Path, file_name: &str) -> PathBuf {
    data_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(file_name)
}

#[cfg(test)]
mod tests {
    use super::{default_js_export_path, default_tree_path, GeneConfig};
    use std::path::{Path, PathBuf};

    #[test]
    fn defaults_match_historical_columns() {
        let config = GeneConfig::default();
        assert_eq!(config.columns.lineage, "Gene");
        assert_eq!(config.style.spouse_marker, "0");
    }

    #[test]
    fn artifact_paths_follow_data_file() {
        let data = Path::new("genealogy/Data/Qui.csv");
        assert_eq!(default_tree_path(data), PathBuf::from("genealogy/Data/Arbre.txt"));
        assert_eq!(default_js_export_path(data), PathBuf::from("genealogy/Qui.js"));
    }
}
